use actix_web::web;

use crate::handlers::health_handlers::health_check;
use crate::handlers::stats_handlers::{index, stats_json, stats_page};
use crate::handlers::tracking_handlers::{track_click, track_conversion, track_open};

/// Configure the routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // Tracking routes, hit straight from emails
    cfg.route("/r/{lead_id}", web::get().to(track_click));
    cfg.route("/o/{pixel}", web::get().to(track_open));
    cfg.route("/conv", web::get().to(track_conversion));

    // Reporting
    cfg.route("/stats", web::get().to(stats_page))
        .route("/stats.json", web::get().to(stats_json))
        .route("/health", web::get().to(health_check))
        .route("/", web::get().to(index));
}
