//! Bird resource handlers
//!
//! List serializes the store to a JSON array; create decodes a form
//! body, appends exactly one bird, and redirects to the asset root.

use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use std::sync::Arc;

use super::form;
use super::store::Bird;
use crate::config::AppState;
use crate::http;
use crate::logger;

/// `GET /bird`: the whole store as a JSON array, in insertion order.
///
/// An empty store serializes to `[]`. Serialization cannot fail for
/// plain string fields, but a failure still maps to a bodyless 500
/// rather than a partial write.
pub async fn list(state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let birds = state.birds.snapshot().await;
    match serde_json::to_vec(&birds) {
        Ok(json) => http::build_json_response(Bytes::from(json)),
        Err(e) => {
            logger::log_error(&format!("Failed to serialize bird list: {e}"));
            http::build_500_response()
        }
    }
}

/// `POST /bird`: decode the form body, append one bird, redirect.
///
/// Missing `species`/`description` keys default to the empty string.
/// Every failure path returns before the append, so a failed create
/// never leaves a partial bird behind.
pub async fn create<B>(req: Request<B>, state: &Arc<AppState>) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_error(&format!("Failed to read create request body: {e}"));
            return http::build_500_response();
        }
    };

    let fields = match form::decode(&body) {
        Ok(fields) => fields,
        Err(e) => {
            logger::log_error(&format!("Failed to decode create form: {e}"));
            return http::build_500_response();
        }
    };

    let bird = Bird {
        species: fields.get("species").cloned().unwrap_or_default(),
        description: fields.get("description").cloned().unwrap_or_default(),
    };
    state.birds.push(bird).await;

    http::build_redirect_response(&state.config.assets.route_prefix)
}
