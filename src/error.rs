use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoordinateError>;

#[derive(Error, Debug)]
pub enum CoordinateError {
    #[error("Invalid coordinate format: '{0}'")]
    InvalidFormat(String),

    #[error("{component} must be between {min} and {max}, got: {value}")]
    OutOfRange {
        component: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Date parsing error: {0}")]
    InvalidDate(#[from] chrono::ParseError),

    #[error("Invalid query parameter {name}: '{value}'")]
    InvalidParameter { name: &'static str, value: String },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
