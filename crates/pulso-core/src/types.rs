// SPDX-FileCopyrightText: 2026 Pulso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Pulso workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Free-form key-value passthrough carried alongside every event.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// The originating messaging surface of an interaction event.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Whatsapp,
}

/// What kind of external action an interaction event records.
///
/// Semantics depend on the platform: `Comment` and `DmSent` originate from
/// Instagram automations, `GroupJoin` and `GroupLeave` from WhatsApp groups.
/// No cross-rule is enforced; the combination is caller-defined.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Comment,
    DmSent,
    GroupJoin,
    GroupLeave,
}

impl Default for EventType {
    fn default() -> Self {
        Self::Comment
    }
}

/// A stored interaction event, as returned by the event store.
///
/// `id` and `created_at` are assigned by the store at insert time and are
/// immutable afterwards. Optional columns are populated according to the
/// platform-conditional rules enforced at ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: String,
    pub platform: Platform,
    pub event_type: EventType,
    pub full_name: String,
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
    /// ISO 8601 UTC timestamp.
    pub created_at: String,
}

impl Interaction {
    /// The platform-scoped identity of the user behind this event.
    ///
    /// Instagram and WhatsApp handles live in separate namespaces: the same
    /// string on different platforms names two different users.
    pub fn user_handle(&self) -> &str {
        match self.platform {
            Platform::Instagram => self.instagram_username.as_deref(),
            Platform::Whatsapp => self.whatsapp_id.as_deref(),
        }
        .unwrap_or(&self.full_name)
    }
}

/// A fully validated Instagram event, ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct InstagramEvent {
    pub event_type: EventType,
    pub full_name: String,
    pub response: String,
    pub instagram_username: String,
    pub keyword: String,
    pub comment: String,
    pub metadata: Metadata,
}

/// A fully validated WhatsApp event, ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct WhatsappEvent {
    pub event_type: EventType,
    pub full_name: String,
    pub response: String,
    pub whatsapp_id: String,
    pub group_name: String,
    pub metadata: Metadata,
}

/// A normalized inbound event, keyed on the platform discriminant.
///
/// Validation produces one of these variants before any store call, so the
/// platform-conditional required fields are guaranteed by construction
/// rather than checked ad hoc at the persistence layer.
#[derive(Debug, Clone, PartialEq)]
pub enum NewInteraction {
    Instagram(InstagramEvent),
    Whatsapp(WhatsappEvent),
}

impl NewInteraction {
    pub fn platform(&self) -> Platform {
        match self {
            Self::Instagram(_) => Platform::Instagram,
            Self::Whatsapp(_) => Platform::Whatsapp,
        }
    }

    pub fn event_type(&self) -> EventType {
        match self {
            Self::Instagram(e) => e.event_type,
            Self::Whatsapp(e) => e.event_type,
        }
    }

    pub fn full_name(&self) -> &str {
        match self {
            Self::Instagram(e) => &e.full_name,
            Self::Whatsapp(e) => &e.full_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn platform_roundtrips_through_strings() {
        for platform in [Platform::Instagram, Platform::Whatsapp] {
            let s = platform.to_string();
            assert_eq!(Platform::from_str(&s).unwrap(), platform);
        }
        assert_eq!(Platform::Instagram.to_string(), "instagram");
        assert!(Platform::from_str("telegram").is_err());
    }

    #[test]
    fn event_type_uses_snake_case_wire_names() {
        assert_eq!(EventType::DmSent.to_string(), "dm_sent");
        assert_eq!(EventType::from_str("group_join").unwrap(), EventType::GroupJoin);
        assert_eq!(EventType::from_str("group_leave").unwrap(), EventType::GroupLeave);
        assert!(EventType::from_str("story_reply").is_err());
    }

    #[test]
    fn event_type_defaults_to_comment() {
        assert_eq!(EventType::default(), EventType::Comment);
    }

    #[test]
    fn interaction_serializes_without_absent_optionals() {
        let row = Interaction {
            id: "i-1".to_string(),
            platform: Platform::Whatsapp,
            event_type: EventType::GroupJoin,
            full_name: "Maria".to_string(),
            response: "Bem-vinda!".to_string(),
            instagram_username: None,
            keyword: None,
            comment: None,
            whatsapp_id: Some("5511999999999@c.us".to_string()),
            group_name: Some("Grupo VIP".to_string()),
            metadata: Metadata::new(),
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["platform"], "whatsapp");
        assert_eq!(json["event_type"], "group_join");
        assert!(json.get("instagram_username").is_none());
        assert_eq!(json["whatsapp_id"], "5511999999999@c.us");
    }

    #[test]
    fn user_handle_is_platform_scoped() {
        let insta = Interaction {
            id: "i-2".to_string(),
            platform: Platform::Instagram,
            event_type: EventType::Comment,
            full_name: "João Silva".to_string(),
            response: "ok".to_string(),
            instagram_username: Some("joao".to_string()),
            keyword: Some("PROMO".to_string()),
            comment: Some("quero saber mais".to_string()),
            whatsapp_id: None,
            group_name: None,
            metadata: Metadata::new(),
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
        };
        assert_eq!(insta.user_handle(), "joao");
    }

    #[test]
    fn new_interaction_accessors_match_variant() {
        let event = NewInteraction::Instagram(InstagramEvent {
            event_type: EventType::Comment,
            full_name: "João Silva".to_string(),
            response: "Enviamos os detalhes!".to_string(),
            instagram_username: "joao".to_string(),
            keyword: "PROMO".to_string(),
            comment: "quero saber mais".to_string(),
            metadata: Metadata::new(),
        });
        assert_eq!(event.platform(), Platform::Instagram);
        assert_eq!(event.event_type(), EventType::Comment);
        assert_eq!(event.full_name(), "João Silva");
    }
}
