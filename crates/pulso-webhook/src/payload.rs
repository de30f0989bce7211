// SPDX-FileCopyrightText: 2026 Pulso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound payload extraction and validation.
//!
//! The webhook body is deserialized into [`WebhookPayload`], where every
//! field is optional, then [`normalize`] applies defaults and the
//! platform-conditional required-field rules, producing a fully typed
//! [`NewInteraction`] variant. The conditional checks become exhaustive
//! pattern matching: a value that reaches the store call is valid by
//! construction.
//!
//! An empty string counts as missing, matching what the upstream
//! automation tools send for blank fields.

use serde::Deserialize;

use pulso_core::{
    EventType, InstagramEvent, Metadata, NewInteraction, Platform, PulsoError, WhatsappEvent,
};

/// Required for every platform. `platform` and `event_type` are listed as
/// contextual hints alongside the two hard requirements.
pub const UNIVERSAL_REQUIRED: &[&str] = &["full_name", "response", "platform", "event_type"];

/// Required when `platform` is `instagram`.
pub const INSTAGRAM_REQUIRED: &[&str] = &["instagram_username", "keyword", "comment"];

/// Required when `platform` is `whatsapp`.
pub const WHATSAPP_REQUIRED: &[&str] = &["whatsapp_id", "group_name"];

/// Raw webhook payload as sent by the automation tool.
///
/// Everything is optional at this layer; [`normalize`] decides what is
/// missing. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WebhookPayload {
    pub platform: Option<String>,
    pub event_type: Option<String>,
    pub full_name: Option<String>,
    pub response: Option<String>,
    pub instagram_username: Option<String>,
    pub keyword: Option<String>,
    pub comment: Option<String>,
    pub whatsapp_id: Option<String>,
    pub group_name: Option<String>,
    pub metadata: Option<Metadata>,
}

/// Parse a request body into a raw payload.
///
/// Any JSON that does not decode into the payload shape (including type
/// mismatches on known fields) is a malformed request.
pub fn parse(body: &[u8]) -> Result<WebhookPayload, PulsoError> {
    serde_json::from_slice(body).map_err(|e| PulsoError::MalformedRequest(e.to_string()))
}

/// Validate and normalize a raw payload into a typed event.
///
/// Order of checks:
/// 1. universal required fields (`full_name`, `response`)
/// 2. `platform` (defaults to `instagram`; unknown values rejected)
/// 3. `event_type` (defaults to `comment`; unknown values rejected)
/// 4. platform-conditional required fields
pub fn normalize(payload: WebhookPayload) -> Result<NewInteraction, PulsoError> {
    let full_name = non_empty(payload.full_name);
    let response = non_empty(payload.response);
    let (Some(full_name), Some(response)) = (full_name, response) else {
        return Err(PulsoError::validation(
            "Missing required fields",
            UNIVERSAL_REQUIRED,
        ));
    };

    let platform = match non_empty(payload.platform) {
        None => Platform::Instagram,
        Some(raw) => raw.parse().map_err(|_| {
            PulsoError::validation(format!("Unsupported platform `{raw}`"), &["platform"])
        })?,
    };

    let event_type = match non_empty(payload.event_type) {
        None => EventType::default(),
        Some(raw) => raw.parse().map_err(|_| {
            PulsoError::validation(format!("Unsupported event_type `{raw}`"), &["event_type"])
        })?,
    };

    let metadata = payload.metadata.unwrap_or_default();

    match platform {
        Platform::Instagram => {
            let instagram_username = non_empty(payload.instagram_username);
            let keyword = non_empty(payload.keyword);
            let comment = non_empty(payload.comment);
            match (instagram_username, keyword, comment) {
                (Some(instagram_username), Some(keyword), Some(comment)) => {
                    Ok(NewInteraction::Instagram(InstagramEvent {
                        event_type,
                        full_name,
                        response,
                        instagram_username,
                        keyword,
                        comment,
                        metadata,
                    }))
                }
                _ => Err(PulsoError::validation(
                    "Missing Instagram-specific fields",
                    INSTAGRAM_REQUIRED,
                )),
            }
        }
        Platform::Whatsapp => {
            let whatsapp_id = non_empty(payload.whatsapp_id);
            let group_name = non_empty(payload.group_name);
            match (whatsapp_id, group_name) {
                (Some(whatsapp_id), Some(group_name)) => {
                    Ok(NewInteraction::Whatsapp(WhatsappEvent {
                        event_type,
                        full_name,
                        response,
                        whatsapp_id,
                        group_name,
                        metadata,
                    }))
                }
                _ => Err(PulsoError::validation(
                    "Missing WhatsApp-specific fields",
                    WHATSAPP_REQUIRED,
                )),
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
