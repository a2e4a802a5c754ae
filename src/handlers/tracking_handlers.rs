use actix_web::{HttpRequest, HttpResponse, http, web};

use crate::models::tracking_event::EventKind;
use crate::state::app_state::AppState;
use crate::structs::tracking_query::TrackingQuery;
use crate::utils::landing::build_landing_url;
use crate::utils::pixel::PIXEL_CONTENT_TYPE;

const NO_CACHE: &str = "no-store, no-cache, must-revalidate";

/// Record a click, then redirect to the landing page
pub async fn track_click(
    app_state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    let lead_id = path.into_inner();
    let campaign = TrackingQuery::parse(req.query_string()).campaign();

    app_state
        .recorder
        .track(EventKind::Click, lead_id.clone(), campaign.clone(), &req)
        .await;

    // Fail closed: a redirect to nowhere is worse than an explicit error
    let base = match app_state.landing_url.as_deref() {
        Some(base) => base,
        None => {
            log::error!("Click for lead {:?} received but LANDING_URL is not set", lead_id);
            return HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body("Landing page is not configured (set LANDING_URL)");
        }
    };

    match build_landing_url(base, &lead_id, &campaign) {
        Ok(target) => HttpResponse::Found()
            .append_header((http::header::LOCATION, target))
            .finish(),
        Err(e) => {
            log::error!("LANDING_URL {:?} is not a valid absolute URL: {}", base, e);
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body(format!("Landing page URL is invalid: {}", e))
        }
    }
}

/// Record an open and serve the tracking pixel
pub async fn track_open(
    app_state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    let query = TrackingQuery::parse(req.query_string());
    let segment = path.into_inner();
    let lead_id = segment
        .strip_suffix(".png")
        .unwrap_or(&segment)
        .to_string();

    app_state
        .recorder
        .track(EventKind::Open, lead_id, query.campaign(), &req)
        .await;

    HttpResponse::Ok()
        .content_type(PIXEL_CONTENT_TYPE)
        .insert_header((http::header::CACHE_CONTROL, NO_CACHE))
        .insert_header((http::header::PRAGMA, "no-cache"))
        .insert_header((http::header::EXPIRES, "0"))
        .body(app_state.pixel.clone())
}

/// Record a conversion
pub async fn track_conversion(
    app_state: web::Data<AppState>,
    req: HttpRequest,
) -> HttpResponse {
    let query = TrackingQuery::parse(req.query_string());

    app_state
        .recorder
        .track(EventKind::Conversion, query.lead_id(), query.campaign(), &req)
        .await;

    HttpResponse::NoContent().finish()
}
