use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Missing input data: {0}")]
    MissingInputData(String),

    #[error("Value out of range: {0}")]
    InvalidRange(String),

    #[error("Crop {crop_id} is already adopted by farmer {farmer_id}")]
    AlreadyAdopted { farmer_id: i64, crop_id: i64 },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
