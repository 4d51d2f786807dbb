//! Probe outcome types and status classification.

use hyper::{HeaderMap, StatusCode, Version};
use serde::{Deserialize, Serialize};

/// Diagnostic header text is truncated to this many characters.
pub const MAX_DIAGNOSTIC_CHARS: usize = 500;

/// Normalized outcome of one reachability probe.
///
/// Field names on the wire match the relay's original JSON contract:
/// `isHealthy`, `status`, `error`, `url`, `responseHeaders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeReport {
    /// True iff a final status in [200, 400) was obtained.
    pub is_healthy: bool,

    /// Final status code after following redirects; absent when the probe
    /// failed before any response was parsed.
    pub status: Option<u16>,

    /// Transport failure description; absent on any completed response,
    /// including ones with a status of 400 or above.
    pub error: Option<String>,

    /// The probed URL, echoed back.
    pub url: String,

    /// Rendered response status line and headers, truncated. Never used
    /// for health determination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_headers: Option<String>,
}

impl ProbeReport {
    /// Build a report from a completed response.
    pub fn from_status(url: String, status: u16, response_headers: String) -> Self {
        Self {
            is_healthy: is_healthy_status(status),
            status: Some(status),
            error: None,
            url,
            response_headers: Some(response_headers),
        }
    }

    /// Build a report for a probe that failed before a response was parsed.
    pub fn failed(url: String, error: String) -> Self {
        Self {
            is_healthy: false,
            status: None,
            error: Some(error),
            url,
            response_headers: None,
        }
    }
}

/// A status code counts as healthy when it lies in [200, 400).
///
/// 3xx values remain healthy: redirects are followed automatically, so a
/// lingering 3xx means the remote host is alive and responding.
pub fn is_healthy_status(status: u16) -> bool {
    (200..400).contains(&status)
}

/// Parse a status code from raw header text starting with a status line.
///
/// Accepts only the shape `HTTP/<ver> <3-digit-code> ...`; anything else
/// yields `None` so the caller can fall back to the transport-reported
/// code.
pub fn parse_status_line(raw: &str) -> Option<u16> {
    let mut parts = raw.split_whitespace();
    let version = parts.next()?;
    if !version.starts_with("HTTP/") {
        return None;
    }
    let code = parts.next()?;
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    code.parse().ok()
}

/// Render a response's status line and headers as diagnostic text,
/// truncated to [`MAX_DIAGNOSTIC_CHARS`].
pub fn render_header_text(version: Version, status: StatusCode, headers: &HeaderMap) -> String {
    let mut text = format!("{:?} {}\r\n", version, status);
    for (name, value) in headers {
        text.push_str(name.as_str());
        text.push_str(": ");
        text.push_str(value.to_str().unwrap_or("<binary>"));
        text.push_str("\r\n");
    }

    if text.chars().count() > MAX_DIAGNOSTIC_CHARS {
        text.chars().take(MAX_DIAGNOSTIC_CHARS).collect()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::HeaderValue;

    #[test]
    fn test_healthy_range_boundaries() {
        assert!(!is_healthy_status(199));
        assert!(is_healthy_status(200));
        assert!(is_healthy_status(204));
        assert!(is_healthy_status(301));
        assert!(is_healthy_status(399));
        assert!(!is_healthy_status(400));
        assert!(!is_healthy_status(404));
        assert!(!is_healthy_status(503));
    }

    #[test]
    fn test_parse_status_line() {
        assert_eq!(parse_status_line("HTTP/1.1 200 OK\r\n"), Some(200));
        assert_eq!(parse_status_line("HTTP/1.0 404 Not Found\r\n"), Some(404));
        assert_eq!(
            parse_status_line("HTTP/2.0 503 Service Unavailable"),
            Some(503)
        );
    }

    #[test]
    fn test_parse_status_line_rejects_garbage() {
        assert_eq!(parse_status_line(""), None);
        assert_eq!(parse_status_line("invalid"), None);
        assert_eq!(parse_status_line("HTTP/1.1"), None);
        assert_eq!(parse_status_line("HTTP/1.1 20 OK"), None);
        assert_eq!(parse_status_line("HTTP/1.1 2000 OK"), None);
        assert_eq!(parse_status_line("HTTP/1.1 abc OK"), None);
        assert_eq!(parse_status_line("FTP/1.1 200 OK"), None);
    }

    #[test]
    fn test_render_header_text_truncates() {
        let mut headers = HeaderMap::new();
        let long = "x".repeat(2_000);
        headers.insert("x-filler", HeaderValue::from_str(&long).unwrap());

        let text = render_header_text(Version::HTTP_11, StatusCode::OK, &headers);
        assert_eq!(text.chars().count(), MAX_DIAGNOSTIC_CHARS);
        assert!(text.starts_with("HTTP/1.1 200 OK"));
    }

    #[test]
    fn test_render_header_text_reparses() {
        let mut headers = HeaderMap::new();
        headers.insert("server", HeaderValue::from_static("nginx"));

        let text = render_header_text(Version::HTTP_11, StatusCode::NOT_FOUND, &headers);
        assert_eq!(parse_status_line(&text), Some(404));
        assert!(text.contains("server: nginx"));
    }

    #[test]
    fn test_report_json_field_names() {
        let report = ProbeReport::from_status(
            "https://example.com/".to_string(),
            200,
            "HTTP/1.1 200 OK\r\n".to_string(),
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["isHealthy"], true);
        assert_eq!(json["status"], 200);
        assert_eq!(json["error"], serde_json::Value::Null);
        assert_eq!(json["url"], "https://example.com/");
        assert!(json["responseHeaders"]
            .as_str()
            .unwrap()
            .starts_with("HTTP/1.1"));
    }

    #[test]
    fn test_failed_report_shape() {
        let report = ProbeReport::failed(
            "https://example.com/".to_string(),
            "connection refused".to_string(),
        );
        assert!(!report.is_healthy);
        assert_eq!(report.status, None);
        assert_eq!(report.error.as_deref(), Some("connection refused"));

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("responseHeaders").is_none());
    }

    #[test]
    fn test_unhealthy_status_has_no_error() {
        let report = ProbeReport::from_status(
            "https://example.com/missing".to_string(),
            404,
            "HTTP/1.1 404 Not Found\r\n".to_string(),
        );
        assert!(!report.is_healthy);
        assert_eq!(report.status, Some(404));
        assert_eq!(report.error, None);
    }
}
