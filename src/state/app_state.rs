use std::sync::Arc;

use crate::db::EventStore;
use crate::services::aggregator::StatsAggregator;
use crate::services::recorder::Recorder;

pub struct AppState {
    pub recorder: Recorder,
    pub aggregator: StatsAggregator,
    pub store: Arc<dyn EventStore>,
    pub landing_url: Option<String>,
    pub pixel: Vec<u8>, // Encoded once at startup, served for every open
}

impl AppState {
    pub fn new(
        store: Arc<dyn EventStore>,
        ip_salt: String,
        landing_url: Option<String>,
        pixel: Vec<u8>,
    ) -> Self {
        Self {
            recorder: Recorder::new(Arc::clone(&store), ip_salt),
            aggregator: StatsAggregator::new(Arc::clone(&store)),
            store,
            landing_url,
            pixel,
        }
    }
}
