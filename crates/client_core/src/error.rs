use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Non-success status or an `error` field in the body.
    #[error("server rejected request with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    /// Network failure or a body that could not be decoded.
    #[error("transport failure: {0:#}")]
    Transport(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Application,
    Transport,
}

/// Failure of a controller action. The message is exactly what the alert
/// region shows.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ControllerError {
    category: ErrorCategory,
    message: String,
}

impl ControllerError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            category: ErrorCategory::Validation,
            message: message.into(),
        }
    }

    pub fn application(message: impl Into<String>) -> Self {
        Self {
            category: ErrorCategory::Application,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            category: ErrorCategory::Transport,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
