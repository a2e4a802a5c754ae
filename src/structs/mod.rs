pub mod tracking_query;
