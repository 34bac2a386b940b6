//! HTTP response building module
//!
//! JSON response builders. Builder failures fall back to a bare response
//! instead of panicking.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{CONTENT_TYPE, SERVER};
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::logger;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Build a JSON response; the body is compact JSON followed by a newline
pub fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    server_name: &str,
) -> Response<Full<Bytes>> {
    let mut json = match serde_json::to_vec(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return build_500_response(server_name);
        }
    };
    json.push(b'\n');

    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
        .header(SERVER, server_name)
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 500 Internal Server Error response
pub fn build_500_response(server_name: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
        .header(SERVER, server_name)
        .body(Full::new(Bytes::from_static(
            b"{\"error\":\"Internal server error\"}\n",
        )))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

fn log_build_error(kind: &str, err: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {kind} response: {err}"));
}
