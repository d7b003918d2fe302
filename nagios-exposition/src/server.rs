//! HTTP endpoint serving a fresh scrape per request.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use nagios_exposition::{MetricsServer, ScrapeHandler, ServerConfig};
//!
//! async fn run<H: ScrapeHandler>(handler: Arc<H>) -> Result<(), nagios_exposition::ServerError> {
//!     let config = ServerConfig::builder()
//!         .listen_addr("0.0.0.0:9111")
//!         .metrics_path("/metrics")
//!         .build();
//!
//!     let server = MetricsServer::new(config, handler);
//!     let listener = server.bind().await?;
//!     server.serve(listener).await;
//!     Ok(())
//! }
//! ```

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{debug, warn};

use crate::{format_prometheus, MetricDesc, ServerError, Snapshot};

const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Produces one snapshot per scrape request.
#[async_trait]
pub trait ScrapeHandler: Send + Sync + 'static {
    /// Every family the handler may emit, in output order.
    fn descriptors(&self) -> &[MetricDesc];

    /// Run a complete scrape. Must not panic on backend failures.
    async fn scrape(&self) -> Snapshot;
}

/// Configuration for the metrics endpoint.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:9111")
    pub listen_addr: String,
    /// Path for metrics endpoint (e.g., "/metrics")
    pub metrics_path: String,
    /// Title shown on the landing page
    pub title: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:9111".to_string(),
            metrics_path: "/metrics".to_string(),
            title: "Nagios Exporter".to_string(),
        }
    }
}

impl ServerConfig {
    /// Create a new builder for ServerConfig.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }
}

/// Builder for ServerConfig.
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    listen_addr: Option<String>,
    metrics_path: Option<String>,
    title: Option<String>,
}

impl ServerConfigBuilder {
    /// Set the listen address.
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.listen_addr = Some(addr.into());
        self
    }

    /// Set the metrics path.
    pub fn metrics_path(mut self, path: impl Into<String>) -> Self {
        self.metrics_path = Some(path.into());
        self
    }

    /// Set the landing page title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Build the ServerConfig.
    pub fn build(self) -> ServerConfig {
        let defaults = ServerConfig::default();
        ServerConfig {
            listen_addr: self.listen_addr.unwrap_or(defaults.listen_addr),
            metrics_path: self.metrics_path.unwrap_or(defaults.metrics_path),
            title: self.title.unwrap_or(defaults.title),
        }
    }
}

/// Serves the landing page, health checks and the metrics path.
#[derive(Debug)]
pub struct MetricsServer<H> {
    config: Arc<ServerConfig>,
    handler: Arc<H>,
}

impl<H: ScrapeHandler> MetricsServer<H> {
    pub fn new(config: ServerConfig, handler: Arc<H>) -> Self {
        Self {
            config: Arc::new(config),
            handler,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Bind the configured listen address. Host names are resolved.
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        let addr = self.config.listen_addr.as_str();
        check_host_port(addr).map_err(|reason| ServerError::InvalidAddress {
            addr: addr.to_string(),
            reason: reason.to_string(),
        })?;

        TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: self.config.listen_addr.clone(),
                source,
            })
    }

    /// Accept connections on `listener` forever, one task per connection.
    ///
    /// Dropping the connection task (client disconnect) drops the in-flight
    /// scrape future along with its outstanding backend requests.
    pub async fn serve(self, listener: TcpListener) {
        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(conn) => conn,
                Err(e) => {
                    // Typically EMFILE; back off instead of spinning.
                    warn!(error = %e, "Failed to accept connection");
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    continue;
                }
            };
            let io = TokioIo::new(stream);

            let config = self.config.clone();
            let handler = self.handler.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req: Request<hyper::body::Incoming>| {
                    let config = config.clone();
                    let handler = handler.clone();

                    async move {
                        let path = req.uri().path().to_owned();
                        handle_request(&path, &config, &*handler).await
                    }
                });

                if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                    debug!(%peer, error = %e, "Connection closed with error");
                }
            });
        }
    }
}

/// Shape check for `host:port`; resolution is left to the bind.
fn check_host_port(addr: &str) -> Result<(), &'static str> {
    let (host, port) = addr.rsplit_once(':').ok_or("missing port")?;
    if host.is_empty() {
        return Err("missing host");
    }
    port.parse::<u16>().map_err(|_| "invalid port")?;
    Ok(())
}

async fn handle_request<H: ScrapeHandler>(
    path: &str,
    config: &ServerConfig,
    handler: &H,
) -> Result<Response<Full<Bytes>>, Infallible> {
    if path == config.metrics_path {
        let snapshot = handler.scrape().await;
        let body = format_prometheus(handler.descriptors(), &snapshot);
        Ok(response(StatusCode::OK, EXPOSITION_CONTENT_TYPE, body))
    } else if path == "/" {
        Ok(response(
            StatusCode::OK,
            "text/html; charset=utf-8",
            landing_page(config),
        ))
    } else if path == "/health" || path == "/healthz" {
        Ok(response(StatusCode::OK, "text/plain", "OK".to_string()))
    } else {
        Ok(response(
            StatusCode::NOT_FOUND,
            "text/plain",
            "Not Found".to_string(),
        ))
    }
}

fn response(status: StatusCode, content_type: &'static str, body: String) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

fn landing_page(config: &ServerConfig) -> String {
    format!(
        "<html>\n\
         <head><title>{title}</title></head>\n\
         <body>\n\
         <h1>{title}</h1>\n\
         <p><a href='{path}'>Metrics</a></p>\n\
         </body>\n\
         </html>\n",
        title = escape_html(&config.title),
        path = escape_html(&config.metrics_path),
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
