mod config;
mod errors;
mod models;
mod render;
mod routes;
mod sources;
mod state;
mod tailoring;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::render::PdfRenderer;
use crate::routes::build_router;
use crate::sources::{HttpJobSource, PdfResumeSource};
use crate::state::AppState;
use crate::tailoring::taxonomy::{SectionAliases, SkillTaxonomy};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tailor API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize job page fetcher
    let job_source = HttpJobSource::new(&config.fetch_user_agent, config.fetch_timeout)
        .context("failed to build HTTP client")?;
    info!(
        "Job source initialized (timeout: {:?}, url marker: {})",
        config.fetch_timeout, config.job_url_marker
    );

    // Initialize skill taxonomy (built-in labels + EXTRA_SKILLS)
    let mut taxonomy = SkillTaxonomy::default();
    taxonomy.extend(&config.extra_skills);
    info!("Skill taxonomy loaded: {} labels", taxonomy.labels().len());

    let renderer = PdfRenderer::default();

    let cors = build_cors(&config)?;

    // Build app state
    let state = AppState {
        config: config.clone(),
        job_source: Arc::new(job_source),
        resume_source: Arc::new(PdfResumeSource),
        renderer: Arc::new(renderer),
        taxonomy: Arc::new(taxonomy),
        aliases: Arc::new(SectionAliases::default()),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// `*` allows any origin; anything else is a single allowed origin.
fn build_cors(config: &Config) -> Result<CorsLayer> {
    if config.cors_origin.trim() == "*" {
        return Ok(CorsLayer::permissive());
    }

    let origin: HeaderValue = config
        .cors_origin
        .parse()
        .with_context(|| format!("CORS_ORIGIN '{}' is not a valid origin", config.cors_origin))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}
