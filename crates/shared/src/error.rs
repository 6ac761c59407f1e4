use thiserror::Error;

/// Outbound notification failure. Never fatal to the interaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    #[error("notification collaborator is not configured")]
    NotConfigured,
    #[error("notification transport failed: {0}")]
    Transport(String),
    #[error("notification service rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("invalid notification request: {0}")]
    InvalidRequest(String),
}

impl NotificationError {
    pub fn is_transient(&self) -> bool {
        match self {
            NotificationError::Transport(_) => true,
            NotificationError::Rejected { status, .. } => *status == 429 || *status >= 500,
            NotificationError::NotConfigured | NotificationError::InvalidRequest(_) => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file '{path}': {message}")]
    Parse { path: String, message: String },
    #[error("invalid presentation tuning: {0}")]
    InvalidTuning(String),
    #[error("invalid url for {field}: {message}")]
    InvalidUrl { field: &'static str, message: String },
}
