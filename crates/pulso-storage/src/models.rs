// SPDX-FileCopyrightText: 2026 Pulso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types are defined in `pulso-core::types` for use across
//! the store trait boundary. This module re-exports them for convenience
//! within the storage crate.

pub use pulso_core::types::{
    EventType, InstagramEvent, Interaction, Metadata, NewInteraction, Platform, WhatsappEvent,
};
