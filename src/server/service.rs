//! Relay HTTP server.
//!
//! Serves the reachability endpoint plus the portfolio data endpoints on a
//! single listener.

use crate::config::MetricsConfig;
use crate::metrics::{MetricsCollector, ProbeOutcome};
use crate::portfolio::Portfolio;
use crate::probe::Prober;
use crate::util::RequestId;
use bytes::Bytes;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use prometheus_client::encoding::text::encode;
use serde::Serialize;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{debug, error, info};

/// Shared state for the relay's request handlers.
pub struct AppState {
    /// Reachability prober.
    pub prober: Arc<Prober>,
    /// Portfolio data sources.
    pub portfolio: Portfolio,
    /// Metrics collector.
    pub metrics: MetricsCollector,
    /// Metrics exposition settings.
    pub metrics_config: MetricsConfig,
}

/// Relay HTTP server.
pub struct RelayServer {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl RelayServer {
    /// Bind the server to an address.
    pub async fn bind(address: SocketAddr, state: Arc<AppState>) -> std::io::Result<Self> {
        let listener = TcpListener::bind(address).await?;

        info!(address = %listener.local_addr()?, "relay server bound");

        Ok(Self { listener, state })
    }

    /// The address the server is actually listening on.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Run the server, accepting connections until shutdown.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        info!("relay server starting");

        loop {
            tokio::select! {
                accept_result = self.listener.accept() => {
                    match accept_result {
                        Ok((stream, _addr)) => {
                            let state = Arc::clone(&self.state);

                            tokio::spawn(async move {
                                let io = TokioIo::new(stream);
                                let service = service_fn(move |req| {
                                    let state = Arc::clone(&state);
                                    async move { handle_request(req, &state).await }
                                });

                                if let Err(e) = http1::Builder::new()
                                    .serve_connection(io, service)
                                    .await
                                {
                                    debug!(error = %e, "relay connection error");
                                }
                            });
                        }
                        Err(e) => {
                            error!(error = %e, "failed to accept relay connection");
                        }
                    }
                }

                _ = shutdown.recv() => {
                    info!("relay server shutting down");
                    break;
                }
            }
        }
    }
}

/// Handle one incoming request.
async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let request_id = RequestId::short();
    let path = req.uri().path().to_string();
    let method = req.method().clone();
    let query = req.uri().query().map(str::to_string);

    debug!(request_id = %request_id, path = %path, method = %method, "relay request");

    let response = route(&method, &path, query.as_deref(), state).await;

    state
        .metrics
        .record_request(&path, response.status().as_u16());

    debug!(
        request_id = %request_id,
        path = %path,
        status = response.status().as_u16(),
        "relay response"
    );

    Ok(response)
}

/// Dispatch a request to its handler.
async fn route(
    method: &Method,
    path: &str,
    query: Option<&str>,
    state: &AppState,
) -> Response<Full<Bytes>> {
    if method != Method::GET {
        return json_error(StatusCode::METHOD_NOT_ALLOWED, "method not allowed");
    }

    match path {
        "/check-url" => handle_check_url(query, state).await,
        "/api/skills" => json_response(StatusCode::OK, &state.portfolio.skills().await),
        "/api/projects" => handle_projects(query, state).await,
        "/health" | "/healthz" => Response::builder()
            .status(StatusCode::OK)
            .body(Full::new(Bytes::from("OK\n")))
            .unwrap(),
        _ if state.metrics_config.enabled && path == state.metrics_config.path => {
            handle_metrics(state)
        }
        "/" => {
            let body = format!(
                "linkrelay\n\nEndpoints:\n  /check-url?url=<url> - URL reachability probe\n  /api/skills - skills list\n  /api/projects - project list (?check=true probes each URL)\n  /healthz - relay liveness\n  {} - Prometheus metrics\n",
                state.metrics_config.path
            );
            Response::builder()
                .status(StatusCode::OK)
                .header("content-type", "text/plain")
                .body(Full::new(Bytes::from(body)))
                .unwrap()
        }
        _ => json_error(StatusCode::NOT_FOUND, "not found"),
    }
}

/// Handle the reachability endpoint.
///
/// Validation failures come back as 400 with a structured error and never
/// reach the network; everything else is a 200 with the probe report.
async fn handle_check_url(query: Option<&str>, state: &AppState) -> Response<Full<Bytes>> {
    let raw = query_param(query, "url").unwrap_or_default();

    let started = Instant::now();
    match state.prober.probe(&raw).await {
        Ok(report) => {
            state
                .metrics
                .record_probe(ProbeOutcome::from_report(&report), started.elapsed());
            json_response(StatusCode::OK, &report)
        }
        Err(rejection) => {
            state.metrics.record_rejected_probe();
            json_error(StatusCode::BAD_REQUEST, &rejection.to_string())
        }
    }
}

/// Handle the project list endpoint.
async fn handle_projects(query: Option<&str>, state: &AppState) -> Response<Full<Bytes>> {
    let check = matches!(
        query_param(query, "check").as_deref(),
        Some("true") | Some("1")
    );

    if check {
        json_response(StatusCode::OK, &state.portfolio.projects_with_health().await)
    } else {
        json_response(StatusCode::OK, &state.portfolio.projects().await)
    }
}

/// Encode the metrics registry in Prometheus text format.
fn handle_metrics(state: &AppState) -> Response<Full<Bytes>> {
    let mut buffer = String::new();
    if let Err(e) = encode(&mut buffer, state.metrics.registry()) {
        error!(error = %e, "failed to encode metrics");
        return Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .body(Full::new(Bytes::from("Failed to encode metrics\n")))
            .unwrap();
    }

    Response::builder()
        .status(StatusCode::OK)
        .header("content-type", "text/plain; version=0.0.4; charset=utf-8")
        .body(Full::new(Bytes::from(buffer)))
        .unwrap()
}

/// Extract a query parameter, percent-decoded.
fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Build a JSON response from a serializable value.
fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(value) {
        Ok(body) => Response::builder()
            .status(status)
            .header("content-type", "application/json")
            .body(Full::new(Bytes::from(body)))
            .unwrap(),
        Err(e) => {
            error!(error = %e, "failed to serialize response body");
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(Full::new(Bytes::from("serialization failure\n")))
                .unwrap()
        }
    }
}

/// Build a JSON error body in the relay's `{"error": …}` shape.
fn json_error(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    json_response(status, &serde_json::json!({ "error": message }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param_decodes() {
        let query = Some("url=https%3A%2F%2Fexample.com%2Fa%20b&check=true");
        assert_eq!(
            query_param(query, "url").as_deref(),
            Some("https://example.com/a b")
        );
        assert_eq!(query_param(query, "check").as_deref(), Some("true"));
    }

    #[test]
    fn test_query_param_missing() {
        assert_eq!(query_param(None, "url"), None);
        assert_eq!(query_param(Some("a=1&b=2"), "url"), None);
    }

    #[test]
    fn test_query_param_empty_value() {
        assert_eq!(query_param(Some("url="), "url").as_deref(), Some(""));
    }

    #[test]
    fn test_json_error_shape() {
        let response = json_error(StatusCode::BAD_REQUEST, "no URL provided");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
