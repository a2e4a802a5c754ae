pub mod stats;
pub mod tracking_event;
