use thiserror::Error;

/// Validation failures surfaced to a UI adapter instead of crashing the
/// process. Load and startup failures use `anyhow` and are fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashError {
    #[error("unknown launch site '{site}'")]
    UnknownSite { site: String },

    #[error("invalid payload interval [{low}, {high}]: bounds must be finite numbers")]
    InvalidInterval { low: f64, high: f64 },

    #[error("no callback registered for output '{id}'")]
    UnknownOutput { id: String },
}
