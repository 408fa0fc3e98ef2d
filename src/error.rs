use thiserror::Error;

/// Everything that can go wrong while uploading a single file.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("failed to open image: {0}")]
    Open(#[source] std::io::Error),

    #[error("failed to read image: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to create form file: {0}")]
    Form(#[source] reqwest::Error),

    #[error("failed to create request: {0}")]
    BuildRequest(#[source] reqwest::Error),

    #[error("failed to send request: {0}")]
    Send(#[source] reqwest::Error),

    #[error("failed to read response: {0}")]
    ReadBody(#[source] reqwest::Error),

    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("upload failed: {msg}")]
    Rejected { status: i64, code: i64, msg: String },

    #[error("upload task aborted: {0}")]
    Aborted(String),
}

pub type Result<T> = std::result::Result<T, UploadError>;
