// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Probe error: {0}")]
    Probe(#[from] crate::port::ProbeError),

    #[error("Notification error: {0}")]
    Notify(#[from] crate::port::NotifyError),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
