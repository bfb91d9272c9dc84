use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Configuration(#[from] kwhtally_core::ConfigError),

    #[error(transparent)]
    Fetch(#[from] kwhtally_core::FetchError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Configuration(_) => 2,
            Self::Fetch(kwhtally_core::FetchError::Configuration(_)) => 2,
            Self::Fetch(kwhtally_core::FetchError::Transport { .. }) => 3,
            Self::Fetch(kwhtally_core::FetchError::Protocol(_)) => 4,
            Self::Serialization(_) => 5,
            Self::Io(_) => 10,
        }
    }
}
