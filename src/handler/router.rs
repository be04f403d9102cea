//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: matches method and path,
//! then dispatches to exactly one handler. Exact path matches win over
//! the assets prefix match.

use crate::birds::handlers as birds;
use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

const HELLO_PATH: &str = "/hello";
const BIRD_PATH: &str = "/bird";

/// Main entry point for HTTP request handling
///
/// Generic over the body type so the server can feed it
/// `hyper::body::Incoming` while tests drive it with `Full<Bytes>`.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    if state.config.logging.access_log {
        logger::log_request(&method, &path);
    }

    let response = match (&method, path.as_str()) {
        (&Method::GET, HELLO_PATH) => greeting(),
        (&Method::GET, BIRD_PATH) => birds::list(&state).await,
        (&Method::POST, BIRD_PATH) => birds::create(req, &state).await,
        _ if path == HELLO_PATH || path == BIRD_PATH => method_not_allowed(&method, &path),
        _ if is_asset_path(&path, &state.config.assets.route_prefix) => {
            if method == Method::GET {
                static_files::serve(&path, &state.config.assets).await
            } else {
                method_not_allowed(&method, &path)
            }
        }
        _ => http::build_404_response(),
    };

    Ok(response)
}

/// `GET /hello`: fixed greeting, cannot fail.
fn greeting() -> Response<Full<Bytes>> {
    http::build_text_response("Hello world!")
}

/// Registered path hit with an unregistered method: 405, empty body.
fn method_not_allowed(method: &Method, path: &str) -> Response<Full<Bytes>> {
    logger::log_warning(&format!("Method not allowed: {method} {path}"));
    http::build_405_response(allowed_methods(path))
}

fn allowed_methods(path: &str) -> &'static str {
    if path == BIRD_PATH {
        "GET, POST"
    } else {
        "GET"
    }
}

/// True for the assets root and anything below it.
fn is_asset_path(path: &str, route_prefix: &str) -> bool {
    let prefix = route_prefix.trim_end_matches('/');
    path == prefix || path.starts_with(&format!("{prefix}/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::birds::Bird;
    use crate::config::{AssetsConfig, Config, LoggingConfig, ServerConfig};
    use http_body_util::BodyExt;

    fn test_state(assets_dir: &str) -> Arc<AppState> {
        Arc::new(AppState::new(Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                workers: None,
            },
            assets: AssetsConfig {
                dir: assets_dir.to_string(),
                route_prefix: "/assets/".to_string(),
                index_files: vec!["index.html".to_string()],
            },
            logging: LoggingConfig { access_log: false },
        }))
    }

    fn request(method: Method, path: &str, body: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(path)
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap()
    }

    async fn dispatch(
        state: &Arc<AppState>,
        method: Method,
        path: &str,
        body: &str,
    ) -> Response<Full<Bytes>> {
        handle_request(request(method, path, body), Arc::clone(state))
            .await
            .unwrap()
    }

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_hello() {
        let state = test_state("assets");
        let resp = dispatch(&state, Method::GET, "/hello", "").await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body_string(resp).await, "Hello world!");
    }

    #[tokio::test]
    async fn test_hello_ignores_store_state() {
        let state = test_state("assets");
        state
            .birds
            .push(Bird {
                species: "crow".to_string(),
                description: String::new(),
            })
            .await;
        let resp = dispatch(&state, Method::GET, "/hello", "").await;
        assert_eq!(body_string(resp).await, "Hello world!");
    }

    #[tokio::test]
    async fn test_wrong_method_is_405_with_empty_body() {
        let state = test_state("assets");
        let resp = dispatch(&state, Method::POST, "/hello", "").await;
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers().get("Allow").unwrap(), "GET");
        assert_eq!(body_string(resp).await, "");
    }

    #[tokio::test]
    async fn test_delete_bird_is_405() {
        let state = test_state("assets");
        let resp = dispatch(&state, Method::DELETE, "/bird", "").await;
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers().get("Allow").unwrap(), "GET, POST");
        assert_eq!(body_string(resp).await, "");
        assert!(state.birds.is_empty().await);
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let state = test_state("assets");
        let resp = dispatch(&state, Method::GET, "/nope", "").await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let state = test_state("assets");
        let resp = dispatch(&state, Method::GET, "/bird", "").await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "application/json"
        );
        assert_eq!(body_string(resp).await, "[]");
    }

    #[tokio::test]
    async fn test_create_then_list_preserves_order() {
        let state = test_state("assets");

        let resp = dispatch(
            &state,
            Method::POST,
            "/bird",
            "species=robin&description=red+breast",
        )
        .await;
        assert_eq!(resp.status(), 302);
        assert_eq!(resp.headers().get("Location").unwrap(), "/assets/");

        let resp = dispatch(
            &state,
            Method::POST,
            "/bird",
            "species=crow&description=all%20black",
        )
        .await;
        assert_eq!(resp.status(), 302);

        let resp = dispatch(&state, Method::GET, "/bird", "").await;
        let birds: Vec<Bird> = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(
            birds,
            vec![
                Bird {
                    species: "robin".to_string(),
                    description: "red breast".to_string(),
                },
                Bird {
                    species: "crow".to_string(),
                    description: "all black".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_create_missing_description_defaults_empty() {
        let state = test_state("assets");
        let resp = dispatch(&state, Method::POST, "/bird", "species=owl").await;
        assert_eq!(resp.status(), 302);

        let birds = state.birds.snapshot().await;
        assert_eq!(birds.len(), 1);
        assert_eq!(birds[0].species, "owl");
        assert_eq!(birds[0].description, "");
    }

    #[tokio::test]
    async fn test_create_malformed_body_appends_nothing() {
        let state = test_state("assets");
        let resp = dispatch(&state, Method::POST, "/bird", "species=%zz").await;
        assert_eq!(resp.status(), 500);
        assert_eq!(body_string(resp).await, "");
        assert!(state.birds.is_empty().await);
    }

    #[tokio::test]
    async fn test_repeated_list_is_idempotent() {
        let state = test_state("assets");
        dispatch(&state, Method::POST, "/bird", "species=wren").await;

        let first = body_string(dispatch(&state, Method::GET, "/bird", "").await).await;
        let second = body_string(dispatch(&state, Method::GET, "/bird", "").await).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_assets_index_served_as_html() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>aviary</h1>").unwrap();

        let state = test_state(dir.path().to_str().unwrap());
        let resp = dispatch(&state, Method::GET, "/assets/", "").await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "text/html; charset=utf-8"
        );
        assert_eq!(body_string(resp).await, "<h1>aviary</h1>");
    }

    #[tokio::test]
    async fn test_assets_missing_file_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path().to_str().unwrap());
        let resp = dispatch(&state, Method::GET, "/assets/missing.html", "").await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_post_to_assets_is_405() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path().to_str().unwrap());
        let resp = dispatch(&state, Method::POST, "/assets/index.html", "").await;
        assert_eq!(resp.status(), 405);
        assert_eq!(body_string(resp).await, "");
    }
}
