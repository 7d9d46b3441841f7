pub mod capture;
pub mod config;
pub mod errors;
pub mod perception;

pub use errors::{DroidScopeError, DroidScopeResult};
pub use perception::pipeline::{capture_and_perceive, perceive};
pub use perception::types::{Bounds, Perception, Point, UiElement};

/// Installs the global tracing subscriber. Logs go to stderr so stdout carries
/// only the prompt and records.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
