// SPDX-FileCopyrightText: 2026 Pulso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the core domain and its adapters.

pub mod store;

pub use store::EventStore;
