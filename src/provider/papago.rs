//! Papago (Naver) NMT provider
//!
//! POSTs form data to the Papago n2mt endpoint with the caller's client
//! id/secret headers. Success is HTTP 200 with the translated text at
//! `message.result.translatedText`.

use crate::error::{TranslateError, TranslateResult};
use crate::provider::{
    Credentials, ErrorKind, ProviderFailure, ProviderKind, TranslationProvider, build_http_client,
    default_error_kind,
};
use async_trait::async_trait;

const BASE_URL: &str = "https://openapi.naver.com/v1/papago/n2mt";

/// Documented Papago per-request limit
const MAX_CHARS: usize = 5_000;

#[derive(Clone)]
pub struct PapagoProvider {
    credentials: Credentials,
    client: reqwest::Client,
    base_url: String,
}

impl PapagoProvider {
    pub fn new(credentials: Credentials) -> TranslateResult<Self> {
        if credentials.api_key.trim().is_empty() || credentials.api_secret.trim().is_empty() {
            return Err(TranslateError::ConfigError(
                "Papago requires both a client id and a client secret".to_string(),
            ));
        }

        Ok(PapagoProvider {
            credentials,
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

impl std::fmt::Debug for PapagoProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PapagoProvider")
            .field("credentials", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl TranslationProvider for PapagoProvider {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderFailure> {
        let form = [("text", text), ("source", source), ("target", target)];

        let response = self
            .client
            .post(&self.base_url)
            .header("X-Naver-Client-Id", &self.credentials.api_key)
            .header("X-Naver-Client-Secret", &self.credentials.api_secret)
            .form(&form)
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

        json["message"]["result"]["translatedText"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                ProviderFailure::new(
                    200,
                    "Response missing 'message.result.translatedText'".to_string(),
                )
            })
    }

    fn error_kind(&self, status: u16) -> ErrorKind {
        match status {
            401 | 403 => ErrorKind::AuthFailed,
            _ => default_error_kind(status),
        }
    }

    fn max_chars(&self) -> Option<usize> {
        Some(MAX_CHARS)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Papago
    }

    fn name(&self) -> &str {
        "Papago"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> PapagoProvider {
        PapagoProvider::new(Credentials {
            api_key: "client-id".to_string(),
            api_secret: "client-secret".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_new_requires_both_credentials() {
        let missing_secret = Credentials {
            api_key: "id".to_string(),
            api_secret: "".to_string(),
        };
        assert!(PapagoProvider::new(missing_secret).is_err());

        let missing_id = Credentials {
            api_key: "  ".to_string(),
            api_secret: "secret".to_string(),
        };
        assert!(PapagoProvider::new(missing_id).is_err());
    }

    #[test]
    fn test_error_kind_mapping() {
        let p = provider();
        assert_eq!(p.error_kind(401), ErrorKind::AuthFailed);
        assert_eq!(p.error_kind(403), ErrorKind::AuthFailed);
        assert_eq!(p.error_kind(429), ErrorKind::RateLimitExceeded);
        assert_eq!(p.error_kind(400), ErrorKind::ClientError);
        assert_eq!(p.error_kind(500), ErrorKind::ServerError);
    }

    #[test]
    fn test_limit_and_identity() {
        let p = provider();
        assert_eq!(p.max_chars(), Some(5_000));
        assert_eq!(p.kind(), ProviderKind::Papago);
        assert_eq!(p.name(), "Papago");
    }

    #[test]
    fn test_debug_masks_credentials() {
        let shown = format!("{:?}", provider());
        assert!(!shown.contains("client-secret"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_failure() {
        let p = provider().with_base_url("http://127.0.0.1:1/papago");
        let err = p.translate("hello", "en", "ko").await.unwrap_err();
        assert_eq!(err.status, crate::provider::SYNTHETIC_CLIENT_STATUS);
    }
}
