//! Minimal HTTP client for fetching listing markup with safe logging.
//!
//! - Request options: extra headers; one client-wide optional timeout
//! - Strict success check: only `200 OK` is accepted, redirects are not followed
//! - Never retries; a failed request is reported once to the caller
//! - Bodies are decoded leniently: invalid UTF-8 becomes U+FFFD, not an error
//! - Optional *raw* request/response logging via `MEEPLE_HTTP_RAW=1`
//!
//! Example (no_run):
//! ```no_run
//! # async fn demo() -> Result<(), meeple_http::HttpError> {
//! let client = meeple_http::HttpClient::new()?;
//! let html = client
//!     .get_text("https://hobbygames.ru/nastolnie/ekbg?page=1", meeple_http::RequestOpts::default())
//!     .await?;
//! assert!(!html.is_empty());
//! # Ok(()) }
//! ```
//!
//! Observability: structured `tracing` events are emitted for request start,
//! response headers, body snippets (truncated), final errors, and (optionally)
//! raw request/response lines (target `http.raw`) when `MEEPLE_HTTP_RAW=1`.

use reqwest::header::USER_AGENT;
use reqwest::{Client, Method, StatusCode, Url};
use std::env;
use std::time::Duration;
use thiserror::Error;

pub use reqwest::header::HeaderMap;

// ==============================
// Raw logging toggles
// ==============================

const RAW_ENV: &str = "MEEPLE_HTTP_RAW";
const RAW_MAX_BODY: usize = 64 * 1024; // cap raw body logs (64 KiB)
const SNIPPET_MAX: usize = 500;

fn raw_enabled() -> bool {
    matches!(
        env::var(RAW_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

/// Render a best-effort curl command for repro/debug, with secrets redacted.
fn make_curl(method: &Method, url: &Url, headers: &HeaderMap) -> String {
    let mut parts = vec!["curl".to_string(), format!("-X{}", method)];
    for (name, val) in redact_headers(headers) {
        parts.push(format!("-H '{}: {}'", name, val.replace('\'', r"'\''")));
    }
    parts.push(format!("'{}'", url.as_str()));
    parts.join(" ")
}

/// Redact sensitive headers for logging
fn redact_headers(h: &HeaderMap) -> Vec<(String, String)> {
    h.iter()
        .map(|(k, v)| {
            let key = k.as_str().to_string();
            let mut val = v.to_str().unwrap_or("").to_string();
            if is_sensitive_header(&key) {
                val = "<redacted>".into();
            }
            (key, val)
        })
        .collect()
}

fn is_sensitive_header(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "authorization" | "cookie" | "set-cookie" | "proxy-authorization"
    )
}

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    /// The server could not be reached or the body could not be read.
    #[error("network error: {0}")]
    Network(String),
    /// Anything but `200 OK`, including other 2xx codes and redirects.
    #[error("server returned {status} for {url}, body_snippet: {snippet}")]
    Status {
        status: StatusCode,
        url: String,
        snippet: String,
    },
}

impl HttpError {
    /// The HTTP status, when the failure came from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ==============================
// Request Options
// ==============================

/// Per-request tuning knobs for the HTTP client.
///
/// ```
/// use meeple_http::{RequestOpts, default_headers};
///
/// let opts = RequestOpts {
///     headers: Some(default_headers("meeple/0.1")),
/// };
/// assert!(opts.headers.is_some());
/// assert!(RequestOpts::default().headers.is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts {
    /// Sent on top of the client defaults.
    pub headers: Option<HeaderMap>,
}

// ==============================
// Client
// ==============================

#[derive(Clone)]
pub struct HttpClient {
    inner: Client,
    /// `None` means a request may block for as long as the server keeps the
    /// connection open.
    pub default_timeout: Option<Duration>,
}

impl HttpClient {
    /// Construct a client that never follows redirects and has no timeout.
    ///
    /// ```no_run
    /// use meeple_http::{HttpClient, HttpError};
    ///
    /// let client = HttpClient::new()?;
    /// assert!(client.default_timeout.is_none());
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new() -> Result<Self, HttpError> {
        let inner = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            inner,
            default_timeout: None,
        })
    }

    /// Apply a timeout to every request.
    ///
    /// ```no_run
    /// use meeple_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new()?.with_timeout(Some(Duration::from_secs(2)));
    /// assert_eq!(client.default_timeout, Some(Duration::from_secs(2)));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn with_timeout(mut self, dur: Option<Duration>) -> Self {
        self.default_timeout = dur;
        self
    }

    /// GET `url` and return the body as text.
    ///
    /// Only `200 OK` counts as success. The response is consumed in full
    /// before returning, on the error paths as well. Invalid UTF-8 sequences
    /// are replaced with U+FFFD so the markup still reaches the parser.
    pub async fn get_text(&self, url: &str, opts: RequestOpts) -> Result<String, HttpError> {
        let url = Url::parse(url).map_err(|e| HttpError::Url(e.to_string()))?;
        let bytes = self.request_bytes(Method::GET, url.clone(), opts).await?;
        match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::warn!(
                    url=%url,
                    error=%e.utf8_error(),
                    body_snippet=%snip_body(e.as_bytes()),
                    "http.response.lossy_utf8"
                );
                Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
            }
        }
    }

    // ==============================
    // Core request implementation
    // ==============================

    async fn request_bytes(
        &self,
        method: Method,
        url: Url,
        opts: RequestOpts,
    ) -> Result<Vec<u8>, HttpError> {
        let mut rb = self.inner.request(method.clone(), url.clone());

        if let Some(t) = self.default_timeout {
            rb = rb.timeout(t);
        }

        if let Some(hdrs) = &opts.headers {
            rb = rb.headers(hdrs.clone());
        }

        // Lightweight request id without extra deps
        let req_id = format!(
            "r{:x}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        );

        tracing::debug!(
            req_id=%req_id,
            method=%method,
            host_path=%format!("{}{}", url.host_str().unwrap_or("-"), url.path()),
            url_query=?url.query(),
            timeout_ms=?self.default_timeout.map(|t| t.as_millis() as u64),
            "http.request.start"
        );

        if raw_enabled() {
            let mut merged = HeaderMap::new();
            if let Some(h) = &opts.headers {
                for (k, v) in h.iter() {
                    merged.append(k, v.clone());
                }
            }
            let curl = make_curl(&method, &url, &merged);
            tracing::debug!(target: "http.raw", %req_id, %curl, "request");
        }

        // ----- Send -----
        let t0 = std::time::Instant::now();
        let resp = rb.send().await.map_err(|err| {
            let message = err.to_string();
            tracing::warn!(req_id=%req_id, message=%message, "http.network_error.send");
            HttpError::Network(message)
        })?;

        let status = resp.status();
        let final_url = resp.url().to_string();
        let headers = resp.headers().clone();
        let bytes = resp.bytes().await.map_err(|err| {
            let message = err.to_string();
            tracing::warn!(req_id=%req_id, %status, message=%message, "http.network_error.body");
            HttpError::Network(message)
        })?;
        let dur_ms = t0.elapsed().as_millis() as u64;

        tracing::debug!(
            req_id=%req_id,
            %status,
            duration_ms=dur_ms,
            body_len=bytes.len(),
            content_type=?headers.get(reqwest::header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            server=?headers.get("server").and_then(|v| v.to_str().ok()),
            "http.response.headers"
        );

        if raw_enabled() {
            let hdrs = redact_headers(&headers);
            let truncated = bytes.len() > RAW_MAX_BODY;
            let text = String::from_utf8_lossy(&bytes[..bytes.len().min(RAW_MAX_BODY)]);
            tracing::info!(
                target:"http.raw",
                %req_id,
                status=%status,
                duration_ms=dur_ms,
                headers=?hdrs,
                body=%text,
                truncated
            );
        }

        let snippet = snip_body(&bytes);
        tracing::trace!(req_id=%req_id, body_snippet=%snippet, "http.response.body_snippet");

        if status == StatusCode::OK {
            return Ok(bytes.to_vec());
        }

        tracing::warn!(
            req_id=%req_id,
            %status,
            url=%final_url,
            location=?headers.get(reqwest::header::LOCATION).and_then(|v| v.to_str().ok()),
            body_snippet=%snippet,
            "http.error"
        );
        Err(HttpError::Status {
            status,
            url: final_url,
            snippet,
        })
    }
}

/// Headers that identify this crawler to the remote site.
pub fn default_headers(agent: &str) -> HeaderMap {
    let mut h = HeaderMap::new();
    if let Ok(v) = agent.parse() {
        h.insert(USER_AGENT, v);
    }
    h
}

// ==============================
// Helpers
// ==============================

fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > SNIPPET_MAX {
        let mut cut = SNIPPET_MAX;
        while !snip.is_char_boundary(cut) {
            cut -= 1;
        }
        snip.truncate(cut);
        snip.push_str("...");
    }
    snip
}
