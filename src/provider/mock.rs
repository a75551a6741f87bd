//! Deterministic scripted provider for tests
//!
//! Stands in for a real HTTP provider so orchestrator behavior (fallback,
//! both-fail, entity round-trips) can be exercised without network access.

use crate::provider::{
    ErrorKind, ProviderFailure, ProviderKind, TranslationProvider, default_error_kind,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Scripted behaviors
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Return the input unchanged (identity translator)
    Echo,
    /// Append `_{target}` to the input
    Suffix,
    /// Always return this exact text
    Fixed(String),
    /// Always fail with this HTTP status
    Fail(u16),
}

#[derive(Debug)]
pub struct MockProvider {
    mode: MockMode,
    kind: ProviderKind,
    limit: Option<usize>,
    calls: AtomicUsize,
}

impl MockProvider {
    pub fn new(mode: MockMode, kind: ProviderKind) -> Self {
        MockProvider {
            mode,
            kind,
            limit: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Number of `translate` calls received so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    async fn translate(
        &self,
        text: &str,
        _source: &str,
        target: &str,
    ) -> Result<String, ProviderFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.mode {
            MockMode::Echo => Ok(text.to_string()),
            MockMode::Suffix => Ok(format!("{}_{}", text, target)),
            MockMode::Fixed(output) => Ok(output.clone()),
            MockMode::Fail(status) => Err(ProviderFailure::new(
                *status,
                format!("scripted failure ({})", status),
            )),
        }
    }

    fn error_kind(&self, status: u16) -> ErrorKind {
        default_error_kind(status)
    }

    fn max_chars(&self) -> Option<usize> {
        self.limit
    }

    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn name(&self) -> &str {
        "Mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo_returns_input() {
        let mock = MockProvider::new(MockMode::Echo, ProviderKind::Papago);
        let result = mock.translate("@0N forks @1S", "en", "ko").await.unwrap();
        assert_eq!(result, "@0N forks @1S");
    }

    #[tokio::test]
    async fn test_suffix_appends_target() {
        let mock = MockProvider::new(MockMode::Suffix, ProviderKind::Google);
        assert_eq!(mock.translate("hello", "en", "ko").await.unwrap(), "hello_ko");
    }

    #[tokio::test]
    async fn test_fail_reports_status() {
        let mock = MockProvider::new(MockMode::Fail(429), ProviderKind::Papago);
        let err = mock.translate("hello", "en", "ko").await.unwrap_err();
        assert_eq!(err.status, 429);
        assert_eq!(mock.error_kind(err.status), ErrorKind::RateLimitExceeded);
    }

    #[tokio::test]
    async fn test_call_count_increments() {
        let mock = MockProvider::new(MockMode::Echo, ProviderKind::Google);
        assert_eq!(mock.call_count(), 0);
        let _ = mock.translate("a", "en", "ko").await;
        let _ = mock.translate("b", "en", "ko").await;
        assert_eq!(mock.call_count(), 2);
    }

    #[test]
    fn test_limit_configurable() {
        let mock = MockProvider::new(MockMode::Echo, ProviderKind::Papago).with_limit(10);
        assert_eq!(mock.max_chars(), Some(10));
    }
}
