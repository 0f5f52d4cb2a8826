use std::path::PathBuf;

use crate::config::ConfigError;
use crate::extract::ExtractionFailure;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Extraction(#[from] ExtractionFailure),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid gesture script: {0}")]
    Script(#[from] serde_json::Error),

    #[error("usage: cropme <image> <script.json> <output.png>")]
    Usage,
}
