//! Dog Finder
//!
//! Terminal client for a dog adoption service, plus the small cookie-consent
//! server its front end talks to.

mod api;
mod browse;
mod client;
mod config;
mod consent;
mod errors;
mod models;
mod search;
mod session;

use std::net::SocketAddr;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use clap::{Parser, Subcommand};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use errors::AppError;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the cookie-consent server
    Serve {
        /// Address to bind, overrides DOGS_BIND_ADDR
        #[clap(long)]
        bind: Option<SocketAddr>,
    },
    /// Search adoptable dogs interactively
    Browse,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env()?;

    // Initialize logging; stdout belongs to the shell, so logs go to stderr
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            serve(&config).await?;
        }
        Commands::Browse => {
            tracing::info!("Adoption service: {}", config.api_base_url);
            tracing::info!("Consent server: {}", config.consent_url);
            browse::run(&config).await?;
        }
    }

    Ok(())
}

async fn serve(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting consent server");
    tracing::info!("Allowed origin: {}", config.cors_origin);

    let app = create_router(config)?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the consent server router.
pub fn create_router(config: &Config) -> Result<Router, AppError> {
    // Credentialed CORS needs an explicit origin
    let origin: HeaderValue = config.cors_origin.parse()?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true);

    Ok(Router::new()
        .route("/check-cookies", get(api::check_cookies))
        .route("/allow-cookies", post(api::allow_cookies))
        .route("/health", get(api::health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}
