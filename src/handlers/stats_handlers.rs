use actix_web::{HttpResponse, Result, error, http, web};

use crate::models::stats::StatsReport;
use crate::state::app_state::AppState;
use crate::views::stats_page::render_stats_page;

async fn load_report(app_state: &AppState) -> Result<StatsReport> {
    let aggregator = app_state.aggregator.clone();
    web::block(move || aggregator.report())
        .await
        .map_err(|e| error::ErrorInternalServerError(format!("Stats task failed: {}", e)))?
        .map_err(|e| {
            log::error!("Failed to read events for stats: {}", e);
            error::ErrorInternalServerError(format!("Failed to read events: {}", e))
        })
}

/// HTML report
pub async fn stats_page(app_state: web::Data<AppState>) -> Result<HttpResponse> {
    let report = load_report(&app_state).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render_stats_page(&report)))
}

/// Same report as JSON
pub async fn stats_json(app_state: web::Data<AppState>) -> Result<HttpResponse> {
    let report = load_report(&app_state).await?;
    Ok(HttpResponse::Ok().json(report))
}

pub async fn index() -> HttpResponse {
    HttpResponse::Found()
        .append_header((http::header::LOCATION, "/stats"))
        .finish()
}
