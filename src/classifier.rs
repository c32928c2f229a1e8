/// Classification client: asks the backend whether a URL is distracting
use crate::config::ApiConfig;
use crate::error::CheckError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Status and raw body of an HTTP exchange
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends HTTP requests.
///
/// `Err` means the request itself was rejected (offline, CORS, DNS...);
/// any status the server answered with comes back as `Ok`.
#[async_trait(?Send)]
pub trait Transport {
    async fn get(&self, url: &str) -> Result<HttpReply, CheckError>;

    async fn post_json(&self, url: &str, body: &str) -> Result<HttpReply, CheckError>;
}

/// Millisecond wall clock used to time requests
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// `Date.now()` from the JS host
#[derive(Debug, Clone, Copy, Default)]
pub struct HostClock;

impl Clock for HostClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

/// Body of `GET /api/check`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckResponse {
    pub distraction: bool,
    #[serde(default)]
    pub url: Option<String>,
    // Raw model output, only sent by some backend builds
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Serialize)]
struct ProtectionRequest {
    enabled: bool,
}

/// Outcome of a successful check
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub url: String,
    pub distracting: bool,
    pub elapsed_ms: u32,
}

pub struct ClassificationClient<T, C = HostClock> {
    config: ApiConfig,
    transport: T,
    clock: C,
}

impl<T: Transport> ClassificationClient<T, HostClock> {
    pub fn new(config: ApiConfig, transport: T) -> Self {
        ClassificationClient::with_clock(config, transport, HostClock)
    }
}

impl<T: Transport, C: Clock> ClassificationClient<T, C> {
    pub fn with_clock(config: ApiConfig, transport: T, clock: C) -> Self {
        ClassificationClient {
            config,
            transport,
            clock,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Classify a URL. No retries and no timeout.
    pub async fn check(&self, url: &str) -> Result<Verdict, CheckError> {
        let url = url.trim();
        if url.is_empty() {
            log::info!("check: no URL provided");
            return Err(CheckError::EmptyUrl);
        }

        let endpoint = self.config.check_url(url)?;
        log::debug!("check: fetching {}", endpoint);

        let started = self.clock.now_ms();
        let reply = self.transport.get(endpoint.as_str()).await?;
        if !reply.is_success() {
            return Err(CheckError::Status(reply.status));
        }

        let response: CheckResponse =
            serde_json::from_str(&reply.body).map_err(|e| CheckError::Decode(e.to_string()))?;
        let elapsed_ms = elapsed_since(started, self.clock.now_ms());

        log::info!(
            "check: {} distracting={} ({}ms)",
            url,
            response.distraction,
            elapsed_ms
        );
        if let Some(output) = &response.output {
            log::debug!("check: model output: {}", output);
        }

        Ok(Verdict {
            url: url.to_string(),
            distracting: response.distraction,
            elapsed_ms,
        })
    }

    /// Tell the backend that protection was switched on or off
    pub async fn set_protection(&self, enabled: bool) -> Result<(), CheckError> {
        let endpoint = self.config.enable_protection_url()?;
        let body = serde_json::to_string(&ProtectionRequest { enabled })
            .map_err(|e| CheckError::Decode(e.to_string()))?;

        let reply = self.transport.post_json(endpoint.as_str(), &body).await?;
        if reply.is_success() {
            Ok(())
        } else {
            Err(CheckError::Status(reply.status))
        }
    }
}

fn elapsed_since(started: f64, now: f64) -> u32 {
    (now - started).max(0.0).round() as u32
}
