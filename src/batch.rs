use indicatif::ProgressBar;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::warn;

use crate::error::UploadError;
use crate::uploader::Uploader;

/// Result of uploading one input path.
#[derive(Debug)]
pub struct UploadOutcome {
    pub path: PathBuf,
    pub result: Result<String, UploadError>,
}

impl UploadOutcome {
    pub fn url(&self) -> Option<&str> {
        self.result.as_deref().ok()
    }

    pub fn error(&self) -> Option<&UploadError> {
        self.result.as_ref().err()
    }
}

/// Fans a list of paths out to concurrent uploads.
pub struct Batch<U> {
    uploader: Arc<U>,
    limit: Option<Arc<Semaphore>>,
    progress: ProgressBar,
}

impl<U: Uploader + 'static> Batch<U> {
    pub fn new(uploader: U) -> Self {
        Self {
            uploader: Arc::new(uploader),
            limit: None,
            progress: ProgressBar::hidden(),
        }
    }

    /// Caps the number of uploads in flight. Zero means no cap.
    pub fn with_limit(mut self, jobs: usize) -> Self {
        self.limit = (jobs > 0).then(|| Arc::new(Semaphore::new(jobs)));
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Uploads every path and returns one outcome per path, in input order.
    ///
    /// All uploads start at once (subject to the limit). A failing or
    /// panicking upload does not affect its siblings.
    pub async fn run(&self, paths: Vec<PathBuf>) -> Vec<UploadOutcome> {
        self.progress.set_length(paths.len() as u64);

        let handles: Vec<_> = paths
            .iter()
            .cloned()
            .map(|path| {
                let uploader = Arc::clone(&self.uploader);
                let limit = self.limit.clone();
                let progress = self.progress.clone();
                tokio::spawn(async move {
                    let _permit = match limit {
                        Some(sem) => sem.acquire_owned().await.ok(),
                        None => None,
                    };
                    let result = uploader.upload(&path).await;
                    progress.inc(1);
                    result
                })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(paths.len());
        for (path, handle) in paths.into_iter().zip(handles) {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "upload task did not finish");
                    Err(UploadError::Aborted(e.to_string()))
                }
            };
            outcomes.push(UploadOutcome { path, result });
        }

        self.progress.finish_and_clear();
        outcomes
    }
}
