use crate::error::{Result, UploadError};
use crate::mime;
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use std::io;
use std::path::Path;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

/// Multipart field carrying the image bytes.
pub static FILE_FIELD: &str = "file";
/// Text field the host reads the image's content type from.
pub static HEADERS_FIELD: &str = "headers";

static FILE_PART_MIME: &str = "application/octet-stream";

/// Streams the file at `path` into the upload form.
///
/// The file is opened and checked eagerly so a missing or unreadable path
/// fails here, before any connection is made. Its bytes are only read once
/// the request is sent. The part carries the file's length so the request
/// goes out with `Content-Length` rather than chunked.
pub async fn image_form(path: &Path) -> Result<Form> {
    let file = File::open(path).await.map_err(UploadError::Open)?;
    let meta = file.metadata().await.map_err(UploadError::Read)?;
    if !meta.is_file() {
        return Err(UploadError::Read(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let body = Body::wrap_stream(ReaderStream::new(file));
    let part = Part::stream_with_length(body, meta.len())
        .file_name(file_name)
        .mime_str(FILE_PART_MIME)
        .map_err(UploadError::Form)?;

    Ok(Form::new()
        .part(FILE_FIELD, part)
        .text(HEADERS_FIELD, headers_hint(path)))
}

/// Value of the `headers` field, e.g. `Content-Type: image/png`.
pub fn headers_hint(path: &Path) -> String {
    format!("Content-Type: {}", mime::content_type(path))
}
