mod config;
mod error;
mod inference;
mod models;
mod routes;
mod scratch;
mod service;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};

use config::Settings;
use inference::model::TorchClassifier;
use routes::configure_routes;
use service::VerifyService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    let settings = Settings::from_env();

    log::info!("Temporary directory is set to: {}", settings.temp_dir.display());
    scratch::purge_dir(&settings.temp_dir)?;

    let classifier = TorchClassifier::load(&settings.model_path).map_err(|e| {
        log::error!("Failed to preload model at startup: {e}");
        std::io::Error::other(format!("Model loading failed: {e}"))
    })?;
    let verify_service = VerifyService::new(Arc::new(classifier), settings.temp_dir.clone());

    let bind_address = format!("0.0.0.0:{}", settings.port);
    log::info!("Starting server on {}", bind_address);

    let outcome = HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(web::Data::new(verify_service.clone()))
            .configure(configure_routes)
    })
    .bind(&bind_address)?
    .run()
    .await;

    log::info!("Cleaning up temporary directory...");
    if let Err(e) = scratch::purge_dir(&settings.temp_dir) {
        log::error!("Error cleaning temporary directory: {e}");
    }

    outcome
}
