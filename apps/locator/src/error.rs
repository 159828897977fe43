use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocatorError {
    #[error("Failed to read location data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse location data: {0}")]
    Csv(#[from] csv::Error),

    // The header row parsed but a required column is absent
    #[error("Location data is missing the `{0}` column")]
    MissingColumn(&'static str),

    #[cfg(feature = "native")]
    #[error("Underlying request failed: {0}")]
    Http(#[from] reqwest::Error),

    // Failures reported by a non-reqwest transport (browser fetch, tests)
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid value for {key}: {value}")]
    InvalidConfig { key: &'static str, value: String },
}

pub type Result<T, E = LocatorError> = std::result::Result<T, E>;
