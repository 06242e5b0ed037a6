use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};

const INDEX: &str = "index.html";

/// Static file router rooted at `root`.
///
/// Every request goes through the fallback; there are no API routes.
pub fn router(root: PathBuf) -> Router {
    Router::new()
        .fallback(serve_asset)
        .with_state(Arc::new(root))
}

/// Bind `host:port` and serve `root` until the process is stopped.
///
/// # Errors
///
/// Returns an I/O error if the listener cannot be bound.
pub async fn serve(root: PathBuf, host: &str, port: u16) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        root = %root.display(),
        "serving static files"
    );
    axum::serve(listener, router(root)).await
}

async fn serve_asset(State(root): State<Arc<PathBuf>>, uri: Uri) -> Response {
    serve_path(&root, uri.path()).await
}

/// Response for `request_path` under `root`.
pub async fn serve_path(root: &Path, request_path: &str) -> Response {
    let Some(path) = resolve(root, request_path) else {
        tracing::debug!(path = request_path, "rejected path");
        return not_found();
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            tracing::debug!(path = request_path, bytes = bytes.len(), "served");
            ([(header::CONTENT_TYPE, content_type_for(&path))], bytes).into_response()
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = request_path, "not found");
            not_found()
        }
        Err(err) => {
            tracing::warn!(path = request_path, error = %err, "read failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "File not found").into_response()
}

/// Map a URL path onto a file under `root`.
///
/// `/` becomes `/index.html`. Paths that climb out of `root` yield `None`.
#[must_use]
pub fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = match request_path.trim_start_matches('/') {
        "" => INDEX,
        rest => rest,
    };

    let mut resolved = root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(segment) => resolved.push(segment),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(resolved)
}

/// Content type by file extension; anything unrecognized is served as HTML.
#[must_use]
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("js") => "text/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") => "image/jpeg",
        _ => "text/html",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>quiz</h1>").unwrap();
        std::fs::create_dir(dir.path().join("js")).unwrap();
        std::fs::write(dir.path().join("js/game.js"), "start();").unwrap();
        std::fs::write(dir.path().join("game-features.json"), "[]").unwrap();
        dir
    }

    #[test]
    fn root_maps_to_index() {
        let root = Path::new("/srv/site");
        assert_eq!(resolve(root, "/"), Some(root.join("index.html")));
        assert_eq!(resolve(root, ""), Some(root.join("index.html")));
        assert_eq!(resolve(root, "/js/game.js"), Some(root.join("js/game.js")));
    }

    #[test]
    fn parent_segments_are_rejected() {
        let root = Path::new("/srv/site");
        assert_eq!(resolve(root, "/../etc/passwd"), None);
        assert_eq!(resolve(root, "/js/../../secret"), None);
    }

    #[test]
    fn content_types_follow_extension() {
        assert_eq!(content_type_for(Path::new("a.js")), "text/javascript");
        assert_eq!(content_type_for(Path::new("a.css")), "text/css");
        assert_eq!(content_type_for(Path::new("a.json")), "application/json");
        assert_eq!(content_type_for(Path::new("a.png")), "image/png");
        assert_eq!(content_type_for(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("a.svg")), "text/html");
        assert_eq!(content_type_for(Path::new("index.html")), "text/html");
    }

    #[tokio::test]
    async fn serves_files_with_content_type() {
        let dir = site();

        let index = serve_path(dir.path(), "/").await;
        assert_eq!(index.status(), StatusCode::OK);
        assert_eq!(index.headers()[header::CONTENT_TYPE], "text/html");
        assert_eq!(body_text(index).await, "<h1>quiz</h1>");

        let script = serve_path(dir.path(), "/js/game.js").await;
        assert_eq!(script.headers()[header::CONTENT_TYPE], "text/javascript");

        let catalog = serve_path(dir.path(), "/game-features.json").await;
        assert_eq!(catalog.headers()[header::CONTENT_TYPE], "application/json");
    }

    #[tokio::test]
    async fn missing_and_escaping_paths_are_not_found() {
        let dir = site();

        let missing = serve_path(dir.path(), "/nope.css").await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(missing).await, "File not found");

        let escape = serve_path(dir.path(), "/../index.html").await;
        assert_eq!(escape.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unreadable_path_is_server_error() {
        let dir = site();
        // directories exist but cannot be read as files
        let response = serve_path(dir.path(), "/js").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Server error");
    }
}
