// SPDX-FileCopyrightText: 2026 Pulso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook ingestion endpoint and read-side HTTP surface for Pulso.
//!
//! The single external entry point of the system: POST /v1/interactions
//! validates and normalizes untrusted automation payloads and appends one
//! row to the event store per accepted call. The read side (bulk list,
//! stats, SSE live stream, health) mirrors the same data for dashboards.

pub mod handlers;
pub mod payload;
pub mod server;
pub mod sse;

pub use server::{build_router, start_server, ServerConfig, WebhookState};
