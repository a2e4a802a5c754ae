use serde::Serialize;

use crate::models::tracking_event::EventKind;

/// Shown in place of an empty campaign or industry
pub const NONE_PLACEHOLDER: &str = "(none)";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StatRow {
    pub key: String,
    pub total: usize,
    pub unique_leads: usize,
}

#[derive(Serialize, Debug, Clone)]
pub struct KindStats {
    pub kind: EventKind,
    pub total: usize,
    pub by_campaign: Vec<StatRow>,
    pub by_industry: Vec<StatRow>,
}

#[derive(Serialize, Debug, Clone)]
pub struct StatsReport {
    pub generated_at: i64,
    pub total_events: usize,
    pub kinds: Vec<KindStats>,
}

#[cfg(test)]
impl StatsReport {
    pub fn kind(&self, kind: EventKind) -> Option<&KindStats> {
        self.kinds.iter().find(|k| k.kind == kind)
    }
}
