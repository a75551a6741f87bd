//! Google web translate provider (keyless `gtx` endpoint)
//!
//! Needs no credentials, which is exactly why it serves as the universal
//! fallback: a run whose keyed provider rejects the caller's credentials can
//! still complete here. The response is Google's nested-array shape; the
//! translated text is the concatenation of the `[0][i][0]` segments.

use crate::error::TranslateResult;
use crate::provider::{
    ErrorKind, ProviderFailure, ProviderKind, TranslationProvider, build_http_client,
    default_error_kind,
};
use async_trait::async_trait;

const BASE_URL: &str = "https://translate.googleapis.com/translate_a/single";

#[derive(Clone)]
pub struct GoogleProvider {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleProvider {
    pub fn new() -> TranslateResult<Self> {
        Ok(GoogleProvider {
            client: build_http_client()?,
            base_url: BASE_URL.to_string(),
        })
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Join the translated segments out of the nested response array
    fn extract_text(json: &serde_json::Value) -> Option<String> {
        let segments = json.get(0)?.as_array()?;
        let mut text = String::new();
        for segment in segments {
            if let Some(part) = segment.get(0).and_then(|s| s.as_str()) {
                text.push_str(part);
            }
        }
        if text.is_empty() { None } else { Some(text) }
    }
}

impl std::fmt::Debug for GoogleProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleProvider")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl TranslationProvider for GoogleProvider {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderFailure> {
        let form = [
            ("client", "gtx"),
            ("sl", source),
            ("tl", target),
            ("dt", "t"),
            ("q", text),
        ];

        let response = self
            .client
            .post(&self.base_url)
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

        Self::extract_text(&json).ok_or_else(|| {
            ProviderFailure::new(200, "Response missing translated segments".to_string())
        })
    }

    fn error_kind(&self, status: u16) -> ErrorKind {
        match status {
            403 => ErrorKind::QuotaExceeded,
            _ => default_error_kind(status),
        }
    }

    fn max_chars(&self) -> Option<usize> {
        // No documented limit; the server rejects what it will not take
        None
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Google
    }

    fn name(&self) -> &str {
        "Google"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_text_single_segment() {
        let body = json!([[["안녕하세요", "Hello", null, null]], null, "en"]);
        assert_eq!(
            GoogleProvider::extract_text(&body),
            Some("안녕하세요".to_string())
        );
    }

    #[test]
    fn test_extract_text_joins_segments() {
        let body = json!([
            [["First. ", "one", null], ["Second.", "two", null]],
            null,
            "en"
        ]);
        assert_eq!(
            GoogleProvider::extract_text(&body),
            Some("First. Second.".to_string())
        );
    }

    #[test]
    fn test_extract_text_missing_segments() {
        assert_eq!(GoogleProvider::extract_text(&json!([])), None);
        assert_eq!(GoogleProvider::extract_text(&json!({"error": 1})), None);
    }

    #[test]
    fn test_error_kind_mapping() {
        let p = GoogleProvider::new().unwrap();
        assert_eq!(p.error_kind(403), ErrorKind::QuotaExceeded);
        assert_eq!(p.error_kind(401), ErrorKind::AuthFailed);
        assert_eq!(p.error_kind(429), ErrorKind::RateLimitExceeded);
        assert_eq!(p.error_kind(503), ErrorKind::ServerError);
    }

    #[test]
    fn test_no_char_limit() {
        let p = GoogleProvider::new().unwrap();
        assert_eq!(p.max_chars(), None);
        assert_eq!(p.kind(), ProviderKind::Google);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_failure() {
        let p = GoogleProvider::new()
            .unwrap()
            .with_base_url("http://127.0.0.1:1/gtx");
        let err = p.translate("hello", "en", "ko").await.unwrap_err();
        assert_eq!(err.status, crate::provider::SYNTHETIC_CLIENT_STATUS);
    }
}
