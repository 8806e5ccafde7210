mod config;
mod error;
mod model;
mod persona;
mod web;

use std::sync::Arc;

use actix_files as fs;
use actix_web::{middleware::Logger, web::Data, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use log::{info, warn};

use config::Config;
use model::{ChatCompletion, KimiClient};
use web::routes;

// App state structure
pub struct AppState {
    pub config: Config,
    pub client: Arc<dyn ChatCompletion>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().context("invalid environment configuration")?;
    info!(
        "Starting civilization-echo ({} profile)",
        config.profile.as_str()
    );

    if config.api_key.is_none() {
        warn!("KIMI_API_KEY is not set; persona endpoints will answer with fallback text");
    }

    let client: Arc<dyn ChatCompletion> = Arc::new(KimiClient::new(&config));
    let bind_addr = config.bind_addr();
    let origins = config.cors_origins.clone();
    let public_dir = config.public_dir.clone();

    let app_state = Data::new(AppState { config, client });

    info!("Listening on http://{}:{}", bind_addr.0, bind_addr.1);

    // Start web server
    HttpServer::new(move || {
        App::new()
            .wrap(routes::cors(&origins))
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .configure(routes::configure)
            .service(fs::Files::new("/", public_dir.clone()))
    })
    .bind(bind_addr)
    .with_context(|| format!("failed to bind {}:{}", bind_addr.0, bind_addr.1))?
    .run()
    .await
    .context("server stopped with an error")?;

    Ok(())
}
