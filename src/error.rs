use thiserror::Error;

/// Errors raised while loading state or settings, or while rendering the
/// exported script. Generation itself never fails.
#[derive(Error, Debug)]
pub enum RouterGenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

pub type Result<T> = std::result::Result<T, RouterGenError>;
