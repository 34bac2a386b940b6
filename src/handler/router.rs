//! Request dispatch module
//!
//! Every request, whatever its method or path, is answered with a fresh
//! discovery document.

use crate::config::AppState;
use crate::discovery::DiscoveryResponse;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::USER_AGENT;
use hyper::{Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// The request body is never read.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let server_name = state.config.http.server_name.as_str();

    let scan_state = Arc::clone(&state);
    let (response, projects) =
        match tokio::task::spawn_blocking(move || scan_state.scanner.scan()).await {
            Ok(projects) => {
                let count = projects.len();
                let doc = DiscoveryResponse {
                    main: state.advertised_addr.clone(),
                    root_directory: state.config.discovery.root_label.clone(),
                    projects,
                };
                (http::json_response(StatusCode::OK, &doc, server_name), count)
            }
            Err(e) => {
                logger::log_error(&format!("Project scan task failed: {e}"));
                (http::build_500_response(server_name), 0)
            }
        };

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            req.method().to_string(),
            req.uri().path().to_string(),
        );
        entry.query = req.uri().query().map(ToString::to_string);
        entry.http_version = version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.user_agent = req
            .headers()
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        entry.projects = projects;
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

const fn version_label(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
