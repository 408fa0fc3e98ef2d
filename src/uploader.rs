use async_trait::async_trait;
use reqwest::Client;
use std::path::Path;
use tracing::{debug, instrument};

use crate::auth::Credentials;
use crate::config::Config;
use crate::error::{Result, UploadError};
use crate::{request, response};

static USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Uploads one file and returns its hosted URL.
#[async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(&self, path: &Path) -> Result<String>;
}

/// Uploads images to the configured endpoint over HTTP.
pub struct HttpUploader {
    client: Client,
    api_url: String,
    credentials: Credentials,
}

impl HttpUploader {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(UploadError::BuildRequest)?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            credentials: config.credentials(),
        })
    }
}

#[async_trait]
impl Uploader for HttpUploader {
    #[instrument(skip(self, path), fields(path = %path.display()))]
    async fn upload(&self, path: &Path) -> Result<String> {
        let form = request::image_form(path).await?;

        let req = self
            .credentials
            .apply(self.client.post(&self.api_url))
            .multipart(form)
            .build()
            .map_err(UploadError::BuildRequest)?;

        debug!(url = %req.url(), "sending upload request");
        let resp = self.client.execute(req).await.map_err(UploadError::Send)?;
        let status = resp.status();
        let body = resp.bytes().await.map_err(UploadError::ReadBody)?;
        debug!(%status, bytes = body.len(), "received response");

        let url = response::parse(&body)?;
        debug!(%url, "upload accepted");
        Ok(url)
    }
}
