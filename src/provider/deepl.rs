//! DeepL API provider
//!
//! JSON POST to the v2 endpoint with an auth-key header. DeepL wants
//! upper-cased language codes and signals an exhausted quota with its own
//! status 456, which is why the status-to-kind mapping is per provider.

use crate::error::{TranslateError, TranslateResult};
use crate::provider::{
    Credentials, ErrorKind, ProviderFailure, ProviderKind, TranslationProvider, build_http_client,
    default_error_kind,
};
use async_trait::async_trait;
use serde_json::json;

const BASE_URL: &str = "https://api-free.deepl.com/v2/translate";

/// Conservative per-request character bound
const MAX_CHARS: usize = 30_000;

#[derive(Clone)]
pub struct DeepLProvider {
    api_key: String,
    client: reqwest::Client,
    base_url: String,
}

impl DeepLProvider {
    pub fn new(credentials: Credentials) -> TranslateResult<Self> {
        if credentials.api_key.trim().is_empty() {
            return Err(TranslateError::ConfigError(
                "DeepL requires an auth key".to_string(),
            ));
        }

        Ok(DeepLProvider {
            api_key: credentials.api_key,
            client: build_http_client()?,
            base_url: BASE_URL.to_string(),
        })
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }
}

impl std::fmt::Debug for DeepLProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeepLProvider")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl TranslationProvider for DeepLProvider {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderFailure> {
        let body = json!({
            "text": [text],
            "source_lang": source.to_uppercase(),
            "target_lang": target.to_uppercase(),
        });

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderFailure::from_transport(&e))?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderFailure::new(status, body));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderFailure::from_transport(&e))?;

        json["translations"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                ProviderFailure::new(200, "Response missing 'translations[0].text'".to_string())
            })
    }

    fn error_kind(&self, status: u16) -> ErrorKind {
        match status {
            403 => ErrorKind::AuthFailed,
            456 => ErrorKind::QuotaExceeded,
            _ => default_error_kind(status),
        }
    }

    fn max_chars(&self) -> Option<usize> {
        Some(MAX_CHARS)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::DeepL
    }

    fn name(&self) -> &str {
        "DeepL"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> DeepLProvider {
        DeepLProvider::new(Credentials {
            api_key: "auth-key".to_string(),
            api_secret: String::new(),
        })
        .unwrap()
    }

    #[test]
    fn test_new_requires_key() {
        assert!(DeepLProvider::new(Credentials::default()).is_err());
    }

    #[test]
    fn test_error_kind_mapping_includes_456() {
        let p = provider();
        assert_eq!(p.error_kind(403), ErrorKind::AuthFailed);
        assert_eq!(p.error_kind(456), ErrorKind::QuotaExceeded);
        assert_eq!(p.error_kind(429), ErrorKind::RateLimitExceeded);
        assert_eq!(p.error_kind(500), ErrorKind::ServerError);
    }

    #[test]
    fn test_limit_and_identity() {
        let p = provider();
        assert_eq!(p.max_chars(), Some(30_000));
        assert_eq!(p.kind(), ProviderKind::DeepL);
        assert_eq!(p.name(), "DeepL");
    }

    #[test]
    fn test_debug_masks_key() {
        assert!(!format!("{:?}", provider()).contains("auth-key"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_failure() {
        let p = provider().with_base_url("http://127.0.0.1:1/deepl");
        let err = p.translate("hello", "en", "ko").await.unwrap_err();
        assert_eq!(err.status, crate::provider::SYNTHETIC_CLIENT_STATUS);
    }
}
