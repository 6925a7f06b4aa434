use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when talking to the episode API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request to {url} failed: {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to decode response from {url}: {source}")]
    DecodeFailed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur while turning a raw record into a view model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Episode '{id}' has an invalid duration: '{value}'")]
    InvalidDuration { id: String, value: String },

    #[error("Episode '{id}' has an invalid publish date: '{value}'")]
    InvalidDate { id: String, value: String },
}

/// Errors that can occur when writing generated pages to disk
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write page file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize page: {0}")]
    SerializeFailed(#[from] serde_json::Error),

    #[error("Slug '{0}' cannot be used as a file name")]
    InvalidSlug(String),

    #[error("Slug '{slug}' maps to {file}, which another page already wrote")]
    DuplicatePage { slug: String, file: String },
}

/// Top-level errors for page generation
#[derive(Error, Debug)]
pub enum PageError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Normalization error: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}
