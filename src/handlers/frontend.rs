use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

/// Static files from the frontend build directory.
///
/// Paths that match no file get `index.html`, so client-side routes
/// survive a page reload.
pub fn frontend_service(build_dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(build_dir).fallback(ServeFile::new(build_dir.join("index.html")))
}
