//! Outbound URL reachability probing.
//!
//! One probe is a single header-only request against a candidate URL,
//! following redirects up to a configured cap, bounded by independent
//! connect and total-operation timeouts. The outcome is always a
//! [`ProbeReport`]; transport failures never escape as errors.

use crate::config::ProbeConfig;
use crate::probe::report::{parse_status_line, render_header_text, ProbeReport};
use reqwest::redirect::Policy;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Rejections raised before any network activity.
///
/// These are caller errors, surfaced as a client-error condition at the
/// relay boundary, and are never folded into a "probe ran and failed"
/// report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeRequestError {
    #[error("no URL provided")]
    MissingInput,

    #[error("invalid URL format: {0}")]
    InvalidFormat(String),
}

/// Performs reachability probes.
///
/// Stateless across calls: every probe builds a fresh client and owns its
/// own connection and timers.
pub struct Prober {
    config: ProbeConfig,
}

impl Prober {
    /// Create a new prober.
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    /// Validate a candidate URL without touching the network.
    ///
    /// Accepts only absolute http/https URLs with a host.
    pub fn validate_url(raw: &str) -> Result<Url, ProbeRequestError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProbeRequestError::MissingInput);
        }

        let parsed = Url::parse(trimmed)
            .map_err(|e| ProbeRequestError::InvalidFormat(e.to_string()))?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ProbeRequestError::InvalidFormat(format!(
                    "unsupported scheme '{other}'"
                )));
            }
        }

        if parsed.host_str().is_none() {
            return Err(ProbeRequestError::InvalidFormat(
                "missing host".to_string(),
            ));
        }

        Ok(parsed)
    }

    /// Probe a URL and return a normalized report.
    ///
    /// Returns `Err` only for input rejected before probing; every network
    /// outcome, including transport failures, is an `Ok` report.
    pub async fn probe(&self, raw: &str) -> Result<ProbeReport, ProbeRequestError> {
        let target = Self::validate_url(raw)?;
        Ok(self.probe_target(target).await)
    }

    async fn probe_target(&self, target: Url) -> ProbeReport {
        let url_text = target.to_string();

        let client = match self.build_client() {
            Ok(client) => client,
            Err(e) => {
                warn!(url = %url_text, error = %e, "probe client setup failed");
                return ProbeReport::failed(url_text, format!("client setup failed: {e}"));
            }
        };

        match client.head(target).send().await {
            Ok(response) => {
                let transport_status = response.status().as_u16();
                let header_text =
                    render_header_text(response.version(), response.status(), response.headers());

                // Prefer the code re-parsed from the raw status line when it
                // is present; the transport value is the fallback.
                let status = parse_status_line(&header_text).unwrap_or(transport_status);

                debug!(
                    url = %url_text,
                    status = status,
                    final_url = %response.url(),
                    "probe completed"
                );
                ProbeReport::from_status(url_text, status, header_text)
            }
            Err(e) => {
                let message = flatten_error(&e);
                warn!(url = %url_text, error = %message, "probe transport failure");
                ProbeReport::failed(url_text, message)
            }
        }
    }

    /// Build the single-use client for one probe.
    fn build_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .redirect(Policy::limited(self.config.max_redirects))
            .connect_timeout(self.config.connect_timeout)
            .timeout(self.config.request_timeout)
            .user_agent(&self.config.user_agent)
            .danger_accept_invalid_certs(!self.config.verify_tls)
            .build()
    }
}

/// Flatten an error and its source chain into one description.
///
/// reqwest wraps the interesting cause (timeout, refused connection, DNS)
/// in outer context; a single line keeps the report readable.
fn flatten_error(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_empty_url() {
        assert_eq!(
            Prober::validate_url(""),
            Err(ProbeRequestError::MissingInput)
        );
        assert_eq!(
            Prober::validate_url("   "),
            Err(ProbeRequestError::MissingInput)
        );
    }

    #[test]
    fn test_validate_malformed_url() {
        assert!(matches!(
            Prober::validate_url("not a url"),
            Err(ProbeRequestError::InvalidFormat(_))
        ));
        assert!(matches!(
            Prober::validate_url("http//missing-colon.example"),
            Err(ProbeRequestError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_validate_rejects_non_http_schemes() {
        assert!(matches!(
            Prober::validate_url("ftp://example.com/file"),
            Err(ProbeRequestError::InvalidFormat(_))
        ));
        assert!(matches!(
            Prober::validate_url("mailto:someone@example.com"),
            Err(ProbeRequestError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_validate_accepts_http_and_https() {
        assert!(Prober::validate_url("http://example.com").is_ok());
        assert!(Prober::validate_url("https://example.com/path?q=1").is_ok());
        // Surrounding whitespace is tolerated
        assert!(Prober::validate_url("  https://example.com  ").is_ok());
    }

    #[test]
    fn test_build_client_honors_config() {
        let prober = Prober::new(crate::config::ProbeConfig::default());
        assert!(prober.build_client().is_ok());
    }

    #[tokio::test]
    async fn test_probe_rejects_before_network() {
        let prober = Prober::new(crate::config::ProbeConfig::default());

        let result = prober.probe("").await;
        assert_eq!(result, Err(ProbeRequestError::MissingInput));

        let result = prober.probe("definitely not a url").await;
        assert!(matches!(result, Err(ProbeRequestError::InvalidFormat(_))));
    }
}
