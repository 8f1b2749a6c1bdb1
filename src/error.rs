use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuardError {
    #[error("work item #{0} has no assignees to evaluate")]
    NoAssignees(String),

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("giving up after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: String },

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GuardError {
    /// Whether a retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, GuardError>;
