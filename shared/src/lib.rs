#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

pub mod animator;
mod app;
pub mod buttons;
pub mod capabilities;
pub mod config;
pub mod event;
pub mod geometry;
pub mod markers;
pub mod model;
pub mod selection;
pub mod sheet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use config::{ConfigError, PanelConfig};
pub use crux_core::App as CruxApp;
pub use event::Event;
pub use markers::MarkerError;
pub use model::{Model, ViewModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Transient,
    Permanent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Network,
    Server,
    Decode,
    Configuration,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Network => "NETWORK_ERROR",
            Self::Server => "SERVER_ERROR",
            Self::Decode => "DECODE_ERROR",
            Self::Configuration => "CONFIG_ERROR",
        }
    }

    #[must_use]
    pub const fn default_severity(self) -> ErrorSeverity {
        match self {
            Self::Network | Self::Server => ErrorSeverity::Transient,
            Self::Decode | Self::Configuration => ErrorSeverity::Permanent,
        }
    }
}

/// Error value surfaced at the app boundary. `message` is for logs, never for the user.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[error("{}: {message}", .kind.code())]
pub struct AppError {
    pub kind: ErrorKind,
    pub severity: ErrorSeverity,
    pub message: String,
}

impl AppError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_severity(mut self, severity: ErrorSeverity) -> Self {
        self.severity = severity;
        self
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self.severity, ErrorSeverity::Transient)
    }

    #[must_use]
    pub fn user_facing_message(&self) -> String {
        match self.kind {
            ErrorKind::Network | ErrorKind::Server | ErrorKind::Decode => {
                markers::FAILURE_TOAST.into()
            }
            ErrorKind::Configuration => {
                "The place page is misconfigured. Please contact support.".into()
            }
        }
    }
}

impl From<MarkerError> for AppError {
    fn from(err: MarkerError) -> Self {
        let message = err.to_string();
        match err {
            MarkerError::Network(_) => Self::new(ErrorKind::Network, message),
            // 4xx will fail the same way again.
            MarkerError::Status(status) if status < 500 => {
                Self::new(ErrorKind::Server, message).with_severity(ErrorSeverity::Permanent)
            }
            MarkerError::Status(_) => Self::new(ErrorKind::Server, message),
            MarkerError::Decode(_) => Self::new(ErrorKind::Decode, message),
            MarkerError::InvalidUrl(_) => Self::new(ErrorKind::Configuration, message),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Configuration, err.to_string())
    }
}
