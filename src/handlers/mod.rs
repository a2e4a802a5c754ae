pub mod health_handlers;
pub mod stats_handlers;
pub mod tracking_handlers;
