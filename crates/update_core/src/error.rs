use thiserror::Error;

/// Failures surfaced by the external update service. Every failure is
/// terminal for the operation that caused it; the message is shown to the
/// user verbatim.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Service(String),
    #[error("the update service is only available on Windows")]
    Unsupported,
}
