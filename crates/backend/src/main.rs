mod api;
mod assets;
mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{response::Html, routing::get, Router};
use thiserror::Error;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::EnvFilter;

use assets::{AssetError, Assets};
use config::{Config, ConfigError};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Assets(#[from] AssetError),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build a cache-controlled static file router.
///
/// Separated so tests can exercise the caching layer with arbitrary directories.
fn cached_static_router(dir: &Path, cache_header: &'static str) -> Router {
    let layer = SetResponseHeaderLayer::overriding(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static(cache_header),
    );
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(layer)
}

const CACHE_1DAY: &str = "public, max-age=86400, must-revalidate";
const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Build the full application router.
fn build_app(assets: Arc<Assets>, config: &Config) -> Router {
    // Static file routers are stateless, merge them before adding app state
    let static_files = Router::new()
        .nest("/static", cached_static_router(&config.assets_dir, CACHE_1DAY))
        .nest("/dist", cached_static_router(&config.dist_dir, CACHE_IMMUTABLE))
        .nest(
            "/assets",
            cached_static_router(&config.dist_dir.join("assets"), CACHE_IMMUTABLE),
        );

    let index_path = config.dist_dir.join("index.html");

    Router::new()
        .route("/api/data", get(api::get_records))
        .route("/health", get(api::health))
        .route("/", get(move || serve_index(index_path.clone())))
        .with_state(assets)
        .merge(static_files)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;
    let assets = Arc::new(Assets::load(&config.assets_dir)?);
    let app = build_app(assets, &config);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(port = config.port, "Server running at http://localhost:{}", config.port);
    tracing::info!("Record data at http://localhost:{}/api/data", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn serve_index(index_path: PathBuf) -> Html<String> {
    // Try to serve the built frontend, fall back to a simple message
    match tokio::fs::read_to_string(&index_path).await {
        Ok(html) => Html(html),
        Err(_) => Html(
            r#"<!DOCTYPE html>
<html>
<head><title>Drone Monitoring</title></head>
<body>
<h1>Drone Monitoring</h1>
<p>Frontend not built yet. Record data is available at <a href="/api/data">/api/data</a>.</p>
</body>
</html>"#
                .to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn fixture_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets")
    }

    /// Build the full app against the bundled fixture and the given dist dir.
    fn test_app(dist_dir: &Path) -> Router {
        let config = Config {
            port: 0,
            assets_dir: fixture_dir(),
            dist_dir: dist_dir.to_path_buf(),
        };
        let assets = Arc::new(Assets::load(&config.assets_dir).unwrap());
        build_app(assets, &config)
    }

    /// Create a temp dir with a test file and return the dir path.
    fn temp_dir_with_file(file_name: &str, content: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(file_name), content).unwrap();
        dir
    }

    async fn get(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_data_endpoint_returns_envelope() {
        let dist = tempfile::tempdir().unwrap();
        let resp = get(test_app(dist.path()), "/api/data").await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["count"], 5);
        assert_eq!(json["data"].as_array().unwrap().len(), 5);
        assert_eq!(json["data"][0]["jumlah_orang"], 4);
        assert!(json["data"][0]["timestamp"]["$date"].is_string());
    }

    #[tokio::test]
    async fn test_data_endpoint_round_trips_into_envelope() {
        let dist = tempfile::tempdir().unwrap();
        let resp = get(test_app(dist.path()), "/api/data").await;
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let envelope: dronewatch_shared::models::DataEnvelope =
            serde_json::from_slice(&bytes).unwrap();
        assert_eq!(envelope.count, envelope.data.len());
        assert_eq!(envelope.data[4].person_count, 5);
    }

    #[tokio::test]
    async fn test_data_endpoint_allows_cross_origin() {
        let dist = tempfile::tempdir().unwrap();
        let resp = test_app(dist.path())
            .oneshot(
                Request::builder()
                    .uri("/api/data")
                    .header("origin", "http://localhost:8080")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(resp.headers().contains_key("access-control-allow-origin"));
    }

    #[tokio::test]
    async fn test_health_reports_running() {
        let dist = tempfile::tempdir().unwrap();
        let json = body_json(get(test_app(dist.path()), "/health").await).await;
        assert_eq!(json["status"], "running");
        assert_eq!(json["service"], "Drone Detection Backend");
        assert!(chrono::DateTime::parse_from_rfc3339(json["timestamp"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_index_falls_back_when_frontend_missing() {
        let dist = tempfile::tempdir().unwrap();
        let resp = get(test_app(dist.path()), "/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("Frontend not built yet"));
    }

    #[tokio::test]
    async fn test_index_serves_built_frontend() {
        let dist = temp_dir_with_file("index.html", "<html>dashboard</html>");
        let resp = get(test_app(dist.path()), "/").await;
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<html>dashboard</html>");
    }

    #[tokio::test]
    async fn test_static_assets_have_1day_cache() {
        let dist = tempfile::tempdir().unwrap();
        let resp = get(test_app(dist.path()), "/static/records.json").await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=86400, must-revalidate"
        );
    }

    #[tokio::test]
    async fn test_dist_bundles_have_immutable_cache() {
        let dist = temp_dir_with_file("app-abc123.js", "bundle()");
        let resp = get(test_app(dist.path()), "/dist/app-abc123.js").await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=31536000, immutable"
        );
    }

    #[tokio::test]
    async fn test_dist_assets_have_immutable_cache() {
        let dist = tempfile::tempdir().unwrap();
        std::fs::create_dir(dist.path().join("assets")).unwrap();
        std::fs::write(dist.path().join("assets/style-xyz.css"), "body{}").unwrap();

        let resp = get(test_app(dist.path()), "/assets/style-xyz.css").await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=31536000, immutable"
        );
    }

    #[tokio::test]
    async fn test_missing_static_file_returns_404() {
        let dist = tempfile::tempdir().unwrap();
        let resp = get(test_app(dist.path()), "/static/nonexistent.txt").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
