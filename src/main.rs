//! Markwise · Answer Evaluation Backend
//!
//! - Axum HTTP API behind a static evaluation form (./static/index.html)
//! - Scores a student answer against a model answer: TF-IDF similarity,
//!   embedding-based plagiarism, spellcheck + readability, and highlighting
//! - Optional in-process sentence-embedding model (via environment variables)
//!
//! Important env variables:
//!   PORT                 : u16 (default 3000)
//!   EVAL_CONFIG_PATH     : path to TOML config (thresholds, feedback, data paths)
//!   EMBED_MODEL_PATH     : ONNX sentence-transformer export; enables the
//!                          embedding plagiarism path if present
//!   EMBED_TOKENIZER_PATH : tokenizer.json matching the model
//!   LOG_LEVEL            : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT           : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod config;
mod samples;
mod state;
mod protocol;
mod similarity;
mod embedding;
mod grammar;
mod highlight;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (reference texts, dictionary, embedder).
  let state = Arc::new(AppState::new());

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "markwise_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
