use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("no tools provided for batch analysis")]
    EmptyBatch,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("invalid policy: {0}")]
    InvalidPolicy(String),

    #[error("invalid rule pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
