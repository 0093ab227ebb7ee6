//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! Behavior:
//! - LOG_LEVEL controls the filter (e.g. "debug" or detailed directives like
//!   "info,evaluation=debug,markwise_backend=debug,tower_http=info").
//! - LOG_FORMAT selects the output shape: "pretty" (default), "compact",
//!   or "json" structured logs.
//!
//! Targets are included in the output so the service lifecycle
//! (markwise_backend) and scoring flow (evaluation) logs stay tellable
//! apart. Tower HTTP's TraceLayer adds per-request spans on top.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str =
    "info,evaluation=debug,markwise_backend=debug,tower_http=info,axum=info";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // The builder types diverge per format, so finish each arm separately.
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        Ok("compact") => builder.compact().init(),
        _ => builder.init(),
    }
}
