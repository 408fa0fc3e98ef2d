//! Uploads local images to an HTTP image host and prints their URLs.

pub mod auth;
pub mod batch;
pub mod config;
pub mod error;
pub mod logging;
pub mod mime;
pub mod report;
pub mod request;
pub mod response;
pub mod uploader;

pub use batch::{Batch, UploadOutcome};
pub use config::{Config, ConfigError};
pub use error::UploadError;
pub use uploader::{HttpUploader, Uploader};
