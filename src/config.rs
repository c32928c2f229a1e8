/// Build-time configuration for the classification backend and logging
use crate::error::CheckError;
use url::Url;

/// Endpoint used when `FOCUSFLOW_API_ENDPOINT` is not set at build time
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

const CHECK_PATH: &str = "api/check";
const ENABLE_PROTECTION_PATH: &str = "api/enable-protection";

/// Where the classification API lives
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    // Always ends with '/', so Url::join appends instead of replacing the last segment
    base: String,
}

impl ApiConfig {
    pub fn new(endpoint: &str) -> Result<ApiConfig, CheckError> {
        let mut base = Url::parse(endpoint.trim())
            .map_err(|e| CheckError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

        if base.cannot_be_a_base() {
            return Err(CheckError::InvalidEndpoint(endpoint.to_string()));
        }

        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(ApiConfig { base: base.into() })
    }

    /// Config from the build environment, falling back to the local backend
    pub fn from_env() -> ApiConfig {
        let endpoint = option_env!("FOCUSFLOW_API_ENDPOINT").unwrap_or(DEFAULT_ENDPOINT);
        ApiConfig::new(endpoint).unwrap_or_else(|e| {
            log::warn!("{}; using {}", e, DEFAULT_ENDPOINT);
            ApiConfig::default()
        })
    }

    /// `GET <endpoint>/api/check?url=<candidate>` with the candidate percent-encoded
    pub fn check_url(&self, candidate: &str) -> Result<Url, CheckError> {
        let mut url = self.endpoint(CHECK_PATH)?;
        url.query_pairs_mut().append_pair("url", candidate);
        Ok(url)
    }

    pub fn enable_protection_url(&self) -> Result<Url, CheckError> {
        self.endpoint(ENABLE_PROTECTION_PATH)
    }

    fn endpoint(&self, path: &str) -> Result<Url, CheckError> {
        Url::parse(&self.base)
            .and_then(|base| base.join(path))
            .map_err(|e| CheckError::InvalidEndpoint(e.to_string()))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base: format!("{}/", DEFAULT_ENDPOINT),
        }
    }
}

/// Log level from `FOCUSFLOW_LOG`, defaulting to debug in dev builds
pub fn log_level() -> log::Level {
    let default = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };

    option_env!("FOCUSFLOW_LOG")
        .and_then(|level| level.parse().ok())
        .unwrap_or(default)
}
