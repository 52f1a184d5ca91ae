//! Error types for the journey emitter.
//!
//! Uses `thiserror` for typed errors from configuration and the NATS
//! transport. `main` wraps these in `anyhow` with context before they
//! reach the process boundary.

/// Errors that can occur while setting up or running the emitter.
#[derive(Debug, thiserror::Error)]
pub enum EmitterError {
    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Failed to connect to or communicate with the NATS server.
    #[error("NATS error: {0}")]
    Nats(String),
}
