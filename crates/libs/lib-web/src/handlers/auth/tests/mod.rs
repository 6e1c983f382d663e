//! Authentication handler tests, one module per flow.


use axum::body::Body;
use axum::http::Request;

/// JSON POST request to an auth endpoint.
pub(super) fn json_post(uri: &str, payload: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request should build")
}
