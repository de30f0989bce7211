// SPDX-FileCopyrightText: 2026 Pulso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Pulso interaction analytics service.
//!
//! Provides the error taxonomy, domain types (platforms, event kinds,
//! stored rows, normalized inbound events), and the `EventStore` trait
//! implemented by persistence adapters.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PulsoError;
pub use traits::EventStore;
pub use types::{
    EventType, InstagramEvent, Interaction, Metadata, NewInteraction, Platform, WhatsappEvent,
};
