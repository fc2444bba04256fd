// src/checker/probe.rs
// =============================================================================
// The liveness probe: decides the request method and performs the actual
// reachability check for one URI.
//
// Remote probes run a small state machine over two attempts at most:
// HEAD first (unless the origin prefers GET), then GET when the HEAD attempt
// comes back non-2xx or fails at the transport level. Redirects are handled
// in two steps — a request with redirects disabled to capture the original
// redirect status, then the same request with redirects followed to learn
// the final destination.
//
// Local probes are a single filesystem access check, no retries.
// =============================================================================

use anyhow::Result;
use reqwest::{redirect::Policy, Client, ClientBuilder, Method, StatusCode};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::config::Config;

/// Outcome of probing exactly one URI.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub ok: bool,
    pub redirected: bool,
    pub redirect_target: Option<String>,
    pub message: String,
}

impl ProbeResult {
    fn alive(message: String) -> Self {
        ProbeResult {
            ok: true,
            redirected: false,
            redirect_target: None,
            message,
        }
    }

    fn dead(message: String) -> Self {
        ProbeResult {
            ok: false,
            redirected: false,
            redirect_target: None,
            message,
        }
    }
}

/// What one request attempt concluded.
enum Attempt {
    Done(ProbeResult),
    RetryWithGet,
}

/// Issues the remote probes. Holds two clients over the same settings: one
/// that never follows redirects and one that follows them to completion.
pub struct Prober {
    manual: Client,
    following: Client,
    prefer_get_origins: Vec<String>,
}

impl Prober {
    pub fn new(config: &Config) -> Result<Self> {
        let manual = base_client().redirect(Policy::none()).build()?;
        let following = base_client().redirect(Policy::limited(10)).build()?;

        // Canonicalize the configured origins once; comparison is on
        // scheme + host + port only.
        let prefer_get_origins = config
            .prefer_get
            .iter()
            .filter_map(|entry| Url::parse(entry).ok())
            .map(|parsed| parsed.origin().ascii_serialization())
            .collect();

        Ok(Prober {
            manual,
            following,
            prefer_get_origins,
        })
    }

    /// HEAD by default; GET when the target's origin is in `preferGET`.
    pub fn select_method(&self, target: &Url) -> Method {
        let origin = target.origin().ascii_serialization();
        if self.prefer_get_origins.iter().any(|entry| *entry == origin) {
            Method::GET
        } else {
            Method::HEAD
        }
    }

    /// Probes a remote URI. Never errors: every failure mode degrades to an
    /// `ok: false` result.
    pub async fn probe_remote(&self, target: &str) -> ProbeResult {
        let url = match Url::parse(target) {
            Ok(url) => url,
            Err(error) => return ProbeResult::dead(error.to_string()),
        };

        let mut method = self.select_method(&url);
        loop {
            match self.attempt(method.clone(), &url).await {
                Ok(Attempt::Done(result)) => return result,
                Ok(Attempt::RetryWithGet) => method = Method::GET,
                Err(error) => {
                    // Transport failure: HEAD gets one more chance as GET,
                    // GET failures are final.
                    if method == Method::HEAD {
                        method = Method::GET;
                    } else {
                        return ProbeResult::dead(error.to_string());
                    }
                }
            }
        }
    }

    async fn attempt(&self, method: Method, url: &Url) -> Result<Attempt, reqwest::Error> {
        let response = self.manual.request(method.clone(), url.clone()).send().await?;
        let status = response.status();

        if is_redirect_status(status) {
            // Re-issue with redirects followed to learn the final
            // destination; the reported status stays the original one.
            let final_response = self.following.request(method, url.clone()).send().await?;
            return Ok(Attempt::Done(ProbeResult {
                ok: final_response.status().is_success(),
                redirected: true,
                redirect_target: Some(final_response.url().to_string()),
                message: status_line(status),
            }));
        }

        if !status.is_success() && method == Method::HEAD {
            return Ok(Attempt::RetryWithGet);
        }

        Ok(Attempt::Done(ProbeResult {
            ok: status.is_success(),
            redirected: false,
            redirect_target: None,
            message: status_line(status),
        }))
    }
}

fn base_client() -> ClientBuilder {
    Client::builder()
        .timeout(Duration::from_secs(10))
        .user_agent(concat!("deadlink/", env!("CARGO_PKG_VERSION")))
        // Some servers serve truncated HEAD/redirect responses that break
        // when the client tries to decompress them.
        .no_gzip()
        .no_brotli()
        .no_deflate()
}

fn is_redirect_status(status: StatusCode) -> bool {
    matches!(status.as_u16(), 301 | 302 | 303 | 307 | 308)
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// Probes a local path: any trailing query/fragment suffix is stripped, then
/// the path is checked for existence.
pub async fn probe_local(target: &str) -> ProbeResult {
    let path = local_path(target);
    match tokio::fs::metadata(&path).await {
        Ok(_) => ProbeResult::alive("OK".to_string()),
        Err(error) => ProbeResult::dead(error.to_string()),
    }
}

fn local_path(target: &str) -> PathBuf {
    if let Ok(url) = Url::parse(target) {
        if url.scheme() == "file" {
            if let Ok(path) = url.to_file_path() {
                return path;
            }
        }
    }
    let end = target.find(|c| c == '?' || c == '#').unwrap_or(target.len());
    PathBuf::from(&target[..end])
}
