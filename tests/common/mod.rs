//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::io::Write;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use quicksearch::config::QuickSearchConfig;
use quicksearch::intel::{DirectoryLookup, LookupError};
use quicksearch::lifecycle::{Services, Shutdown};
use quicksearch::HttpServer;
use tempfile::NamedTempFile;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start a programmable JSON backend with async support.
pub async fn start_programmable_backend<F, Fut>(addr: SocketAddr, f: F)
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await.unwrap();
    let f = std::sync::Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut request = [0u8; 4096];
                        let _ = socket.read(&mut request).await;

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Start a backend that always answers with `body`.
pub async fn start_json_backend(addr: SocketAddr, body: String) {
    start_programmable_backend(addr, move || {
        let body = body.clone();
        async move { (200, body) }
    })
    .await;
}

/// Serve `services` on `addr` until the returned coordinator triggers.
pub async fn start_server(addr: SocketAddr, config: QuickSearchConfig, services: Services) -> Shutdown {
    let shutdown = Shutdown::new();
    let server = HttpServer::with_services(config, services);
    let listener = TcpListener::bind(addr).await.unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    shutdown
}

/// Configuration that never touches the network on its own.
pub fn offline_config() -> QuickSearchConfig {
    let mut config = QuickSearchConfig::default();
    config.modules.network_intel = false;
    config.modules.train_journey = false;
    config.oui.registry_path = "/nonexistent/oui.txt".to_string();
    config
}

/// Vendor table file holding `lines`.
pub fn write_registry(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

/// Directory with fixed answers; anything else fails.
#[derive(Default)]
pub struct StaticDirectory {
    pub ptr: HashMap<IpAddr, String>,
    pub txt: HashMap<String, Vec<String>>,
}

impl StaticDirectory {
    pub fn with_ptr(mut self, addr: &str, name: &str) -> Self {
        self.ptr.insert(addr.parse().unwrap(), name.to_string());
        self
    }

    pub fn with_txt(mut self, name: &str, records: &[&str]) -> Self {
        self.txt
            .insert(name.to_string(), records.iter().map(|r| r.to_string()).collect());
        self
    }
}

#[async_trait]
impl DirectoryLookup for StaticDirectory {
    async fn reverse_name(&self, addr: IpAddr) -> Result<String, LookupError> {
        self.ptr.get(&addr).cloned().ok_or(LookupError::Empty("PTR"))
    }

    async fn txt(&self, name: &str) -> Result<Vec<String>, LookupError> {
        self.txt.get(name).cloned().ok_or(LookupError::Empty("TXT"))
    }
}
