// Server loop module
// Accepts connections until shutdown is requested

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Accept and serve connections until `shutdown` is notified.
///
/// Accept errors are logged and the loop keeps going. Connections already
/// being served are not awaited.
pub async fn serve(listener: TcpListener, state: Arc<AppState>, shutdown: Arc<Notify>) {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                logger::log_shutdown();
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::server::create_listener;
    use std::fs;
    use std::net::SocketAddr;
    use std::path::Path;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    fn test_config(root: &Path) -> Config {
        let mut cfg = Config::defaults().unwrap();
        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 0;
        cfg.discovery.root_dir = root.to_string_lossy().into_owned();
        cfg.logging.access_log = false;
        cfg
    }

    async fn raw_request(addr: SocketAddr, request: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).await.unwrap();
        String::from_utf8(raw).unwrap()
    }

    fn json_body(response: &str) -> serde_json::Value {
        let (_, body) = response.split_once("\r\n\r\n").unwrap();
        serde_json::from_str(body.trim()).unwrap()
    }

    #[tokio::test]
    async fn test_serves_discovery_document_over_tcp() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("svc")).unwrap();
        fs::write(dir.path().join("svc").join("service.marker"), "port := \"3000\"\n").unwrap();

        let cfg = test_config(dir.path());
        let listener = create_listener(cfg.get_socket_addr().unwrap()).unwrap();
        let local_addr = listener.local_addr().unwrap();
        let state = Arc::new(AppState::new(&cfg, local_addr));
        let shutdown = Arc::new(Notify::new());
        let server = tokio::spawn(serve(listener, state, Arc::clone(&shutdown)));

        let response = raw_request(
            local_addr,
            "GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await;
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "{response}");
        assert!(response
            .to_ascii_lowercase()
            .contains("content-type: application/json"));

        let body = json_body(&response);
        assert_eq!(body["main"], format!("localhost:{}", local_addr.port()));
        assert_eq!(body["rootDirectory"], "public_html/go_web/*");
        assert_eq!(body["projects"], serde_json::json!([{"name": "svc", "port": 3000}]));

        let response = raw_request(
            local_addr,
            "POST /whatever HTTP/1.1\r\nHost: localhost\r\nContent-Length: 4\r\nConnection: close\r\n\r\nbody",
        )
        .await;
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "{response}");
        assert_eq!(json_body(&response)["projects"][0]["name"], "svc");

        shutdown.notify_one();
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_stops_loop() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = test_config(dir.path());
        let listener = create_listener(cfg.get_socket_addr().unwrap()).unwrap();
        let local_addr = listener.local_addr().unwrap();
        let state = Arc::new(AppState::new(&cfg, local_addr));
        let shutdown = Arc::new(Notify::new());

        // A permit stored before the loop starts is honored
        shutdown.notify_one();
        tokio::time::timeout(
            std::time::Duration::from_secs(5),
            serve(listener, state, shutdown),
        )
        .await
        .unwrap();
    }
}
