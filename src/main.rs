mod config;
mod db;
mod handlers;
mod models;
mod routes;
mod services;
mod state;
mod structs;
mod utils;
mod views;

use crate::config::settings::Settings;
use crate::state::app_state::AppState;
use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use db::open_store;
use dotenv::dotenv;
use env_logger::Env;
use routes::init_routes;
use utils::pixel::transparent_pixel_png;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let settings = Settings::from_env()?;

    // Open the event store
    let store = open_store(&settings.store).context("Failed to open event store")?;
    let pixel = transparent_pixel_png()?;

    match &settings.landing_url {
        Some(url) => log::info!("Clicks redirect to {}", url),
        None => log::warn!("LANDING_URL not set, click tracking will answer 500"),
    }
    log::info!(
        "Recording events to {}, listening on {}:{}",
        store.describe(),
        settings.bind_addr,
        settings.port
    );

    // Create shared state
    let app_state = web::Data::new(AppState::new(
        store,
        settings.ip_salt.clone(),
        settings.landing_url.clone(),
        pixel,
    ));

    // Start the Actix Web server
    HttpServer::new(move || {
        // Create a logger with a custom format instead
        let logger = Logger::new("%a \"%r\" %s %b \"%{Referer}i\" \"%{User-Agent}i\" %D ms");
        App::new()
            .wrap(logger)
            .app_data(app_state.clone())
            .configure(init_routes)
    })
    .bind((settings.bind_addr.as_str(), settings.port))?
    .run()
    .await?;

    Ok(())
}
