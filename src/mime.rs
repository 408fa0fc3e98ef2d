use std::path::Path;

/// Extension of the last path component, without the dot.
///
/// `a.tar.gz` yields `gz`, `.png` yields `png`, `photo` yields an empty string.
fn extension(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    match name.rfind('.') {
        Some(idx) => name[idx + 1..].to_lowercase(),
        None => String::new(),
    }
}

/// Image MIME type for a path, judged by its extension alone.
pub fn content_type(path: impl AsRef<Path>) -> String {
    let ext = extension(path.as_ref());
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        "png" => "image/png".to_string(),
        "gif" => "image/gif".to_string(),
        "svg" => "image/svg+xml".to_string(),
        "webp" => "image/webp".to_string(),
        _ => format!("image/{}", ext),
    }
}
