//! Aura disaster-response console binary.
//!
//! Composition root: builds the dispatch engine over a terminal map
//! surface and runs the operator read-eval loop. The remote command
//! interpreter is reached over HTTP at the configured endpoint.

mod logging;
mod repl;
mod surface;

use std::sync::Arc;

use anyhow::Result;

use engine::{Engine, EngineConfig};
use surface::TermSurface;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = EngineConfig::from_env();
    logging::setup_logging()?;

    tracing::info!("Starting Aura console");
    tracing::info!("Interpreter endpoint: {}", config.interpreter_url);

    let engine = Engine::builder()
        .config(config)
        .surface(Arc::new(TermSurface::new()))
        .build()?;

    repl::run(engine.handle()).await?;

    engine.shutdown().await?;
    tracing::info!("Console shutdown complete");
    Ok(())
}
