use thiserror::Error;

/// Value checks applied when records are built from upstream nodes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
    #[error("timestamp must be RFC3339 with an offset: '{value}'")]
    InvalidTimestamp { value: String },
}

/// Configuration and argument errors, raised before any network activity.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API token not found in environment variable '{variable}'")]
    MissingCredential { variable: &'static str },

    #[error("invalid series '{value}', expected one of consumption, production")]
    InvalidSeries { value: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("environment variable '{variable}' has invalid value '{value}'")]
    InvalidValue { variable: &'static str, value: String },
}

impl ConfigError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingCredential { .. } => "config.missing_credential",
            Self::InvalidSeries { .. } => "config.invalid_series",
            Self::InvalidArgument(_) => "config.invalid_argument",
            Self::InvalidValue { .. } => "config.invalid_value",
        }
    }
}

/// Errors surfaced by the paginated fetcher. None of them are retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error("transport error{}: {message}", status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    Transport {
        status: Option<u16>,
        message: String,
        body: Option<String>,
    },

    #[error("unexpected response from upstream: {0}")]
    Protocol(String),
}

impl FetchError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
            body: None,
        }
    }

    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(status),
            message: String::from("upstream returned a non-success status"),
            body: Some(body.into()),
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::Configuration(error) => error.code(),
            Self::Transport { .. } => "fetch.transport",
            Self::Protocol(_) => "fetch.protocol",
        }
    }

    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
