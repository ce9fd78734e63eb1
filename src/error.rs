use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't access config file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file")]
    Parse(#[from] toml::de::Error),

    #[error("couldn't encode config")]
    Serialize(#[from] toml::ser::Error),

    #[error("couldn't locate config file: set GATOR_CONFIG or HOME")]
    NoHome,

    #[error("config has no backing file")]
    NoPath,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse RSS feed: {0}")]
    Parse(String),
}

/// Opaque failure from the record store or the settings store.
///
/// Display strings name only their own layer; causes are reached through `source()`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Settings(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("usage: gator {0}")]
    Usage(&'static str),

    #[error("user '{0}' not found")]
    NotFound(String),

    #[error("user '{0}' already exists")]
    Conflict(String),

    #[error("no user is currently logged in")]
    NoCurrentUser,

    #[error("{context}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

impl CommandError {
    /// Wraps a store or settings failure with the handler's context.
    pub fn store(context: &'static str, source: impl Into<StoreError>) -> Self {
        CommandError::Store {
            context,
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CommandError>;
