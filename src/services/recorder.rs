use actix_web::{HttpRequest, http, web};
use std::sync::Arc;

use crate::db::EventStore;
use crate::models::tracking_event::{EventKind, TrackingEvent};
use crate::utils::client_ip::client_ip;
use crate::utils::hash_ip::hash_ip;

/// Result of a best-effort write. Neither variant changes the HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded,
    Failed { reason: String },
}

#[cfg(test)]
impl RecordOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, RecordOutcome::Recorded)
    }
}

#[derive(Clone)]
pub struct Recorder {
    store: Arc<dyn EventStore>,
    ip_salt: String,
}

impl Recorder {
    pub fn new(store: Arc<dyn EventStore>, ip_salt: String) -> Self {
        Self { store, ip_salt }
    }

    /// Build the event for a request: hashed client IP, raw user agent, derived industry
    pub fn event_from_request(
        &self,
        kind: EventKind,
        lead_id: String,
        campaign: String,
        req: &HttpRequest,
    ) -> TrackingEvent {
        let ip = client_ip(req);
        let ip_hash = hash_ip(ip.as_deref(), &self.ip_salt);

        let user_agent = req
            .headers()
            .get(http::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        TrackingEvent::new(kind, lead_id, campaign, user_agent, ip_hash)
    }

    /// Append the event on the blocking pool. Failures are logged and returned, never raised.
    pub async fn record(&self, event: TrackingEvent) -> RecordOutcome {
        let store = Arc::clone(&self.store);
        let kind = event.kind;
        let outcome = match web::block(move || store.append(&event)).await {
            Ok(Ok(())) => RecordOutcome::Recorded,
            Ok(Err(e)) => RecordOutcome::Failed {
                reason: e.to_string(),
            },
            Err(e) => RecordOutcome::Failed {
                reason: format!("blocking task failed: {}", e),
            },
        };

        match &outcome {
            RecordOutcome::Recorded => log::debug!("Recorded {} event", kind),
            RecordOutcome::Failed { reason } => {
                log::warn!("Dropping {} event, store write failed: {}", kind, reason)
            }
        }
        outcome
    }

    /// Shorthand used by the handlers
    pub async fn track(
        &self,
        kind: EventKind,
        lead_id: String,
        campaign: String,
        req: &HttpRequest,
    ) -> RecordOutcome {
        let event = self.event_from_request(kind, lead_id, campaign, req);
        self.record(event).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::jsonl_store::JsonlStore;
    use crate::utils::hash_ip::IP_HASH_LEN;
    use actix_web::test::TestRequest;
    use tempfile::{NamedTempFile, tempdir};

    #[test]
    fn event_carries_hashed_ip_and_user_agent() {
        let dir = tempdir().unwrap();
        let recorder = Recorder::new(Arc::new(JsonlStore::new(dir.path())), "salt".to_string());
        let req = TestRequest::default()
            .insert_header((http::header::USER_AGENT, "Mail/1.0"))
            .peer_addr("192.0.2.1:1234".parse().unwrap())
            .to_http_request();

        let ev = recorder.event_from_request(EventKind::Open, "l1".into(), "hvac_v3".into(), &req);
        assert_eq!(ev.user_agent, "Mail/1.0");
        assert_eq!(ev.industry, "hvac");
        assert_eq!(ev.ip_hash.len(), IP_HASH_LEN);
        assert_eq!(ev.ip_hash, hash_ip(Some("192.0.2.1"), "salt"));
    }

    #[test]
    fn no_client_address_gives_empty_hash() {
        let dir = tempdir().unwrap();
        let recorder = Recorder::new(Arc::new(JsonlStore::new(dir.path())), "salt".to_string());
        let req = TestRequest::default().to_http_request();
        let ev = recorder.event_from_request(EventKind::Click, "l1".into(), String::new(), &req);
        assert_eq!(ev.ip_hash, "");
        assert_eq!(ev.user_agent, "");
    }

    #[actix_web::test]
    async fn record_reports_success() {
        let dir = tempdir().unwrap();
        let store = Arc::new(JsonlStore::new(dir.path()));
        let recorder = Recorder::new(store.clone(), "salt".to_string());
        let req = TestRequest::default().to_http_request();

        let outcome = recorder.track(EventKind::Click, "l1".into(), "a".into(), &req).await;
        assert_eq!(outcome, RecordOutcome::Recorded);
        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn record_swallows_write_failure() {
        let blocker = NamedTempFile::new().unwrap();
        let recorder = Recorder::new(Arc::new(JsonlStore::new(blocker.path())), "salt".to_string());
        let req = TestRequest::default().to_http_request();

        let outcome = recorder.track(EventKind::Click, "l1".into(), "a".into(), &req).await;
        assert!(!outcome.is_recorded());
        assert!(matches!(outcome, RecordOutcome::Failed { .. }));
    }
}
