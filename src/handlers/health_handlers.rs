use actix_web::{HttpResponse, web};

use crate::state::app_state::AppState;

pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    // Probe the event store the same way a write or read would reach it
    let store = state.store.clone();
    let ping_result = web::block(move || store.ping()).await;

    match ping_result {
        Ok(Ok(())) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "store": state.store.describe(),
            "landing_configured": state.landing_url.is_some(),
        })),
        _ => HttpResponse::ServiceUnavailable()
            .json(serde_json::json!({ "success": false, "error": "Event store unavailable" })),
    }
}
