use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryGenError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Arrow error: {0}")]
    ArrowError(String),

    #[error("Date parsing error: {0}")]
    DateError(#[from] chrono::ParseError),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, QueryGenError>;

// 用于从字符串创建错误
impl From<String> for QueryGenError {
    fn from(s: String) -> Self {
        QueryGenError::Unknown(s)
    }
}

// 用于从&str创建错误
impl From<&str> for QueryGenError {
    fn from(s: &str) -> Self {
        QueryGenError::Unknown(s.to_string())
    }
}
