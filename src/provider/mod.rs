//! Translation provider clients
//!
//! Every provider speaks its own HTTP dialect but satisfies one contract:
//! translate a string between two language codes, report a numeric status on
//! failure, declare its per-request character limit, and map its own status
//! codes onto the shared [`ErrorKind`] taxonomy. The orchestrator only ever
//! talks to the trait.

pub mod deepl;
pub mod google;
pub mod mock;
pub mod papago;

pub use deepl::DeepLProvider;
pub use google::GoogleProvider;
pub use mock::{MockMode, MockProvider};
pub use papago::PapagoProvider;

use crate::error::{TranslateError, TranslateResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Request timeout applied to every provider call
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Synthetic status for transport-level failures that produced no response
pub const SYNTHETIC_CLIENT_STATUS: u16 = 400;
/// Synthetic status for timeouts, mapped to a server error to trigger fallback
pub const SYNTHETIC_TIMEOUT_STATUS: u16 = 504;

/// Identifies a concrete provider variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Papago,
    Google,
    DeepL,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Papago => write!(f, "papago"),
            ProviderKind::Google => write!(f, "google"),
            ProviderKind::DeepL => write!(f, "deepl"),
        }
    }
}

/// API credentials supplied by the caller
///
/// Papago needs both fields (client id and secret); DeepL uses only the key;
/// Google's keyless endpoint ignores both.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_secret: String,
}

impl std::fmt::Display for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never echo secrets
        write!(f, "Credentials(***)")
    }
}

// Hand-written so a derived Debug (including TranslateRequest's) can never
// print the secrets
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"***")
            .field("api_secret", &"***")
            .finish()
    }
}

/// Normalized failure classes shared by all providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AuthFailed,
    RateLimitExceeded,
    QuotaExceeded,
    ClientError,
    ServerError,
    Unknown,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::AuthFailed => write!(f, "Authentication failed"),
            ErrorKind::RateLimitExceeded => write!(f, "Rate limit exceeded"),
            ErrorKind::QuotaExceeded => write!(f, "Usage quota exceeded"),
            ErrorKind::ClientError => write!(f, "Request rejected by provider"),
            ErrorKind::ServerError => write!(f, "Provider server error"),
            ErrorKind::Unknown => write!(f, "Unknown provider error"),
        }
    }
}

/// A failed provider call, carrying the (possibly synthetic) HTTP status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    pub status: u16,
    pub detail: String,
}

impl ProviderFailure {
    pub fn new(status: u16, detail: impl Into<String>) -> Self {
        ProviderFailure {
            status,
            detail: detail.into(),
        }
    }

    /// Build a failure from a transport-level error (no HTTP response)
    pub fn from_transport(err: &reqwest::Error) -> Self {
        let status = if err.is_timeout() {
            SYNTHETIC_TIMEOUT_STATUS
        } else {
            SYNTHETIC_CLIENT_STATUS
        };
        ProviderFailure::new(status, err.to_string())
    }
}

/// Common contract for every provider variant
///
/// A call succeeds iff the provider returned HTTP 200 and the expected
/// translated-text field was present in the body; anything else is a
/// [`ProviderFailure`] with the numeric status. Implementations never retry;
/// the single fallback hop belongs to the orchestrator.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate `text` from `source` to `target` language code
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderFailure>;

    /// Map a status code from this provider onto the shared taxonomy
    fn error_kind(&self, status: u16) -> ErrorKind;

    /// Documented per-request character limit, when one exists
    fn max_chars(&self) -> Option<usize>;

    fn kind(&self) -> ProviderKind;

    /// Human-readable provider name for logging
    fn name(&self) -> &str;
}

/// Build the reqwest client shared by the real provider variants
pub(crate) fn build_http_client() -> TranslateResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| TranslateError::ConfigError(format!("Failed to create HTTP client: {}", e)))
}

/// Default status-to-kind mapping; variants override specific codes first
pub(crate) fn default_error_kind(status: u16) -> ErrorKind {
    match status {
        401 => ErrorKind::AuthFailed,
        429 => ErrorKind::RateLimitExceeded,
        400..=499 => ErrorKind::ClientError,
        500..=599 => ErrorKind::ServerError,
        _ => ErrorKind::Unknown,
    }
}
