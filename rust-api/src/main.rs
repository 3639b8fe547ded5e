use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use surebet::core::DEFAULT_TOTAL_STAKE;
use surebet::handlers::{health, surebet as surebet_handlers, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("{}:{}", host, port);

    let default_stake = match std::env::var("SUREBET_DEFAULT_STAKE") {
        Ok(raw) => match raw.parse::<f64>() {
            Ok(stake) if stake.is_finite() && stake > 0.0 => stake,
            _ => {
                warn!(
                    "Invalid SUREBET_DEFAULT_STAKE '{}', using {}",
                    raw, DEFAULT_TOTAL_STAKE
                );
                DEFAULT_TOTAL_STAKE
            }
        },
        Err(_) => DEFAULT_TOTAL_STAKE,
    };

    let app_state = Arc::new(AppState { default_stake });

    info!(
        "Starting Surebet API server at http://{} (default stake {})",
        addr, default_stake
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(middleware::Logger::default())
            .route("/health", web::get().to(health::health_check))
            .route("/surebet", web::post().to(surebet_handlers::calculate))
            .route(
                "/surebet/batch",
                web::post().to(surebet_handlers::calculate_batch),
            )
    })
    .bind(&addr)?
    .run()
    .await
}
