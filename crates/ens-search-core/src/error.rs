use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("history i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("history file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown name type: {0} (expected eth|box|dns|address|tld)")]
    UnknownNameType(String),
}
