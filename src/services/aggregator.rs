use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::db::{EventStore, StoreError};
use crate::models::stats::{KindStats, NONE_PLACEHOLDER, StatRow, StatsReport};
use crate::models::tracking_event::{EventKind, TrackingEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Campaign,
    Industry,
}

impl GroupBy {
    fn key<'a>(&self, event: &'a TrackingEvent) -> &'a str {
        let raw = match self {
            GroupBy::Campaign => event.campaign.as_str(),
            GroupBy::Industry => event.industry.as_str(),
        };
        if raw.is_empty() { NONE_PLACEHOLDER } else { raw }
    }
}

/// Count events and distinct leads per key, highest total first.
///
/// Ties keep the order in which keys were first seen.
pub fn tally<'a, I>(events: I, group_by: GroupBy) -> Vec<StatRow>
where
    I: IntoIterator<Item = &'a TrackingEvent>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, usize, HashSet<&str>)> = Vec::new();

    for event in events {
        let key = group_by.key(event);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push((key, 0, HashSet::new()));
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.1 += 1;
        group.2.insert(event.lead_id.as_str());
    }

    let mut rows: Vec<StatRow> = groups
        .into_iter()
        .map(|(key, total, leads)| StatRow {
            key: key.to_string(),
            total,
            unique_leads: leads.len(),
        })
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows
}

/// Build the full report from an event list
pub fn build_report(events: &[TrackingEvent]) -> StatsReport {
    let kinds = EventKind::all()
        .into_iter()
        .map(|kind| {
            let of_kind: Vec<&TrackingEvent> = events.iter().filter(|e| e.kind == kind).collect();
            KindStats {
                kind,
                total: of_kind.len(),
                by_campaign: tally(of_kind.iter().copied(), GroupBy::Campaign),
                by_industry: tally(of_kind.iter().copied(), GroupBy::Industry),
            }
        })
        .collect();

    StatsReport {
        generated_at: chrono::Utc::now().timestamp_millis(),
        total_events: events.len(),
        kinds,
    }
}

#[derive(Clone)]
pub struct StatsAggregator {
    store: Arc<dyn EventStore>,
}

impl StatsAggregator {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Snapshot of the store at call time. Blocks on storage I/O.
    pub fn report(&self) -> Result<StatsReport, StoreError> {
        let events = self.store.load_all()?;
        Ok(build_report(&events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite_store::SqliteStore;

    fn click(lead: &str, campaign: &str) -> TrackingEvent {
        TrackingEvent::new(EventKind::Click, lead.to_string(), campaign.to_string(), String::new(), String::new())
    }

    #[test]
    fn counts_totals_and_unique_leads() {
        let events = vec![click("l1", "a"), click("l2", "a"), click("l1", "a"), click("l3", "b")];
        let rows = tally(&events, GroupBy::Campaign);
        assert_eq!(
            rows,
            vec![
                StatRow { key: "a".into(), total: 3, unique_leads: 2 },
                StatRow { key: "b".into(), total: 1, unique_leads: 1 },
            ]
        );
    }

    #[test]
    fn empty_keys_use_placeholder() {
        let events = vec![click("l1", ""), click("l2", "spring")];
        let by_campaign = tally(&events, GroupBy::Campaign);
        assert_eq!(by_campaign[0].key, NONE_PLACEHOLDER);

        let by_industry = tally(&events, GroupBy::Industry);
        assert_eq!(by_industry.len(), 1);
        assert_eq!(by_industry[0].key, NONE_PLACEHOLDER);
        assert_eq!(by_industry[0].total, 2);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let events = vec![click("l1", "z"), click("l2", "m"), click("l3", "a"), click("l4", "a")];
        let keys: Vec<String> = tally(&events, GroupBy::Campaign).into_iter().map(|r| r.key).collect();
        assert_eq!(keys, vec!["a", "z", "m"]);
    }

    #[test]
    fn groups_by_industry_across_versions() {
        let events = vec![click("l1", "dental_v1"), click("l1", "dental_v2"), click("l2", "gyms_v1")];
        let rows = tally(&events, GroupBy::Industry);
        assert_eq!(rows[0], StatRow { key: "dental".into(), total: 2, unique_leads: 1 });
        assert_eq!(rows[1].key, "gyms");
    }

    #[test]
    fn report_is_order_independent() {
        let mut events = vec![
            click("l1", "a"),
            click("l2", "b"),
            TrackingEvent::new(EventKind::Open, "l1".into(), "a".into(), String::new(), String::new()),
            click("l3", "b"),
        ];
        let forward = build_report(&events);
        events.reverse();
        let backward = build_report(&events);
        for kind in EventKind::all() {
            let mut f = forward.kind(kind).unwrap().by_campaign.clone();
            let mut b = backward.kind(kind).unwrap().by_campaign.clone();
            f.sort_by(|x, y| x.key.cmp(&y.key));
            b.sort_by(|x, y| x.key.cmp(&y.key));
            assert_eq!(f, b);
        }
    }

    #[test]
    fn empty_store_gives_empty_tables() {
        let store: Arc<dyn EventStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        let report = StatsAggregator::new(store).report().unwrap();
        assert_eq!(report.total_events, 0);
        assert_eq!(report.kinds.len(), 3);
        assert!(report.kinds.iter().all(|k| k.by_campaign.is_empty() && k.by_industry.is_empty()));
    }

    #[test]
    fn report_splits_by_kind() {
        let store: Arc<dyn EventStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        store.append(&click("l1", "a")).unwrap();
        store
            .append(&TrackingEvent::new(EventKind::Conversion, "l1".into(), "a".into(), String::new(), String::new()))
            .unwrap();
        let report = StatsAggregator::new(store).report().unwrap();
        assert_eq!(report.total_events, 2);
        assert_eq!(report.kind(EventKind::Click).unwrap().total, 1);
        assert_eq!(report.kind(EventKind::Open).unwrap().total, 0);
        assert_eq!(report.kind(EventKind::Conversion).unwrap().by_campaign[0].key, "a");
    }
}
