pub mod aggregator;
pub mod recorder;
