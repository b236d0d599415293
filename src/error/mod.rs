use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

pub mod codes;
pub mod helpers;

pub use codes::{describe_error_code, ErrorCode};
pub use helpers::{common, ErrorExt};

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// The unified error type for site-kpi
#[derive(Error, Debug)]
pub enum KpiError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("[E{code:04}] Source error: {message}")]
    Source {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("[E{code:04}] Data error: {message}")]
    Data {
        code: u16,
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("[E{code:04}] Computation error: {message}")]
    Computation {
        code: u16,
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("[E{code:04}] Report error: {message}")]
    Report {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl KpiError {
    /// Create a configuration error with specific code and file path
    pub fn config_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create an input source error with default code
    pub fn source_error(message: impl Into<String>) -> Self {
        Self::source_with_code(ErrorCode::SOURCE_GENERIC, message, None)
    }

    /// Create an input source error with specific code and path
    pub fn source_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Source {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn data_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Data {
            code,
            message: message.into(),
            source: None,
        }
    }

    pub fn computation_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Computation {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create a report error with default code
    pub fn report(message: impl Into<String>) -> Self {
        Self::report_with_code(ErrorCode::REPORT_GENERIC, message, None)
    }

    pub fn report_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Report {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Add a source error to this error
    pub fn with_source(mut self, source: impl Into<BoxedSource>) -> Self {
        match &mut self {
            Self::Config { source: src, .. }
            | Self::Source { source: src, .. }
            | Self::Data { source: src, .. }
            | Self::Computation { source: src, .. }
            | Self::Report { source: src, .. } => {
                *src = Some(source.into());
            }
        }
        self
    }

    /// Add context to the error message
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::Config { message, .. }
            | Self::Source { message, .. }
            | Self::Data { message, .. }
            | Self::Computation { message, .. }
            | Self::Report { message, .. } => {
                *message = format!("{}: {}", message, context);
            }
        }
        self
    }

    /// Attach the file path the error relates to
    pub fn with_path(mut self, new_path: impl Into<PathBuf>) -> Self {
        match &mut self {
            Self::Config { path, .. } | Self::Source { path, .. } | Self::Report { path, .. } => {
                *path = Some(new_path.into());
            }
            Self::Data { .. } | Self::Computation { .. } => {}
        }
        self
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::Source { .. } => 3,
            Self::Data { .. } => 4,
            Self::Computation { .. } => 5,
            Self::Report { .. } => 6,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::Source { code, .. }
            | Self::Data { code, .. }
            | Self::Computation { code, .. }
            | Self::Report { code, .. } => *code,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, path, .. } => match path {
                Some(p) => format!("Configuration problem in {}: {}", p.display(), message),
                None => format!("Configuration problem: {}", message),
            },
            Self::Source { message, path, .. } => match path {
                Some(p) => format!("Could not read {}: {}", p.display(), message),
                None => format!("Input error: {}", message),
            },
            Self::Data { message, .. } => format!("Input data problem: {}", message),
            Self::Computation { message, .. } => format!("Cannot compute KPIs: {}", message),
            Self::Report { message, path, .. } => match path {
                Some(p) => format!("Failed to write report at {}: {}", p.display(), message),
                None => format!("Failed to write report: {}", message),
            },
        }
    }

    /// Get a developer-friendly error message with full chain
    pub fn developer_message(&self) -> String {
        let mut out = format!("{}", self);
        let mut current = std::error::Error::source(self);
        while let Some(cause) = current {
            out.push_str(&format!("\n  caused by: {}", cause));
            current = std::error::Error::source(cause);
        }
        out
    }
}

/// Type alias for Results using KpiError
pub type Result<T> = std::result::Result<T, KpiError>;
