use crate::error::{Result, UploadError};
use serde::Deserialize;

/// JSON envelope returned by the image host.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct ApiResponse {
    pub status: i64,
    pub code: i64,
    pub msg: Option<String>,
    pub data: Option<String>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200 && self.code == 1
    }

    /// The hosted URL, or the server's rejection message as an error.
    pub fn into_url(self) -> Result<String> {
        if !self.is_success() {
            return Err(UploadError::Rejected {
                status: self.status,
                code: self.code,
                msg: self.msg.unwrap_or_default(),
            });
        }
        Ok(self.data.unwrap_or_default())
    }
}

/// Decodes a raw response body. The HTTP status line plays no part here.
pub fn parse(body: &[u8]) -> Result<String> {
    let resp: ApiResponse = serde_json::from_slice(body)?;
    resp.into_url()
}
