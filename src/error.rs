use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankError {
    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("invalid criteria: {0}")]
    InvalidCriteria(String),

    #[error("missing credential: {0}")]
    MissingCredential(String),

    #[error("repository listing failed: {0}")]
    Listing(String),

    #[error("readme not found for {0}")]
    ReadmeNotFound(String),

    #[error("model did not use the requested tool (stop reason: {0})")]
    ToolNotUsed(String),

    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, RankError>;
