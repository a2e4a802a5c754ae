use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::industry::industry_from_campaign;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Click,
    Open,
    Conversion,
}

impl EventKind {
    pub fn all() -> [EventKind; 3] {
        [EventKind::Click, EventKind::Open, EventKind::Conversion]
    }

    /// Name of the SQLite table holding this kind of event
    pub fn table_name(&self) -> &'static str {
        match self {
            EventKind::Click => "clicks",
            EventKind::Open => "opens",
            EventKind::Conversion => "conversions",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Click => write!(f, "click"),
            EventKind::Open => write!(f, "open"),
            EventKind::Conversion => write!(f, "conversion"),
        }
    }
}

/// One tracked interaction. Never modified once written.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrackingEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub lead_id: String,
    #[serde(default)]
    pub campaign: String,
    #[serde(default)]
    pub industry: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default)]
    pub ip_hash: String, // Truncated salted hash, never the raw IP
}

impl TrackingEvent {
    pub fn new(
        kind: EventKind,
        lead_id: String,
        campaign: String,
        user_agent: String,
        ip_hash: String,
    ) -> Self {
        let industry = industry_from_campaign(&campaign);
        Self {
            kind,
            lead_id,
            campaign,
            industry,
            timestamp: Utc::now(),
            user_agent,
            ip_hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_event_derives_industry() {
        let ev = TrackingEvent::new(
            EventKind::Click,
            "lead-1".to_string(),
            "restaurants_v1".to_string(),
            String::new(),
            String::new(),
        );
        assert_eq!(ev.industry, "restaurants");
    }

    #[test]
    fn serializes_kind_as_lowercase_type_field() {
        let ev = TrackingEvent::new(
            EventKind::Conversion,
            "lead-1".to_string(),
            String::new(),
            "curl/8".to_string(),
            "abc".to_string(),
        );
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "conversion");
        assert_eq!(json["lead_id"], "lead-1");
        assert!(json["timestamp"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let line = r#"{"type":"open","lead_id":"x","timestamp":"2026-01-02T03:04:05Z"}"#;
        let ev: TrackingEvent = serde_json::from_str(line).unwrap();
        assert_eq!(ev.kind, EventKind::Open);
        assert_eq!(ev.campaign, "");
        assert_eq!(ev.ip_hash, "");
    }
}
