//! Translation orchestrator
//!
//! Drives one run: language detection → preprocessing → entity protection →
//! provider call → error mapping → single fallback hop → restoration. Runs
//! are stateless apart from the shared read-only term dictionary, so any
//! number may execute concurrently; each run performs at most two sequential
//! provider calls (the fallback decision needs the primary's outcome) and
//! each call is bounded by the provider client's request timeout.

use crate::entity::{EntityDetector, post_correction, protect, restore};
use crate::error::{TranslateError, TranslateResult};
use crate::lang::{LANG_EN, LanguageDetector, identify_language, is_supported};
use crate::preprocess::truncate_to_limit;
use crate::provider::{
    Credentials, DeepLProvider, GoogleProvider, PapagoProvider, ProviderKind, TranslationProvider,
};
use crate::terms::TermDictionary;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

fn default_provider() -> ProviderKind {
    ProviderKind::Papago
}

fn default_main_target() -> String {
    "ko".to_string()
}

fn default_sub_target() -> String {
    "en".to_string()
}

/// One inbound translation request (as consumed from the HTTP layer)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub source_text: String,
    /// Explicit target language; when absent the main/sub pair decides
    #[serde(default)]
    pub target_lang: Option<String>,
    #[serde(default = "default_provider")]
    pub provider: ProviderKind,
    #[serde(default)]
    pub credentials: Credentials,
    /// Language shown when the clicked text is not already in it
    #[serde(default = "default_main_target")]
    pub main_target_lang: String,
    /// Target used when the source already is the main language
    #[serde(default = "default_sub_target")]
    pub sub_target_lang: String,
}

/// Outcome of a run, ready for the HTTP layer to serialize
///
/// `http_status` is 200 for success and for every locally-recognized error
/// (the caller renders `status_message` as an explanatory popup); only the
/// both-providers-failed terminal state reports 503.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translated_text: Option<String>,
    pub status_message: Option<String>,
    pub provider_used: ProviderKind,
    pub http_status: u16,
}

/// Process-wide translation service
///
/// Construct once at startup with the loaded term dictionary; the entity
/// detector patterns are compiled here and reused by every run. Providers are
/// normally built per request from the request's selection and credentials;
/// tests inject a scripted chain with [`Orchestrator::with_providers`].
pub struct Orchestrator {
    detector: EntityDetector,
    language_detector: Option<Arc<dyn LanguageDetector>>,
    injected_chain: Option<Vec<Arc<dyn TranslationProvider>>>,
}

impl Orchestrator {
    pub fn new(terms: Arc<TermDictionary>) -> TranslateResult<Self> {
        Ok(Orchestrator {
            detector: EntityDetector::new(terms)?,
            language_detector: None,
            injected_chain: None,
        })
    }

    /// Attach an external statistical language detector
    pub fn with_language_detector(mut self, detector: Arc<dyn LanguageDetector>) -> Self {
        self.language_detector = Some(detector);
        self
    }

    /// Replace per-request provider construction with a fixed attempt chain
    /// (first entry is the primary, an optional second entry the fallback)
    pub fn with_providers(mut self, providers: Vec<Arc<dyn TranslationProvider>>) -> Self {
        self.injected_chain = Some(providers);
        self
    }

    /// Providers to attempt in order: the selected one, then the keyless
    /// Google endpoint as the universal fallback (unless it already is the
    /// selection). A selected provider whose construction fails (missing
    /// credentials, bad client) does not end the run: its failure is recorded
    /// and the fallback is still attempted.
    fn provider_chain(
        &self,
        request: &TranslateRequest,
    ) -> (Vec<Arc<dyn TranslationProvider>>, Vec<String>) {
        if let Some(chain) = &self.injected_chain {
            return (chain.clone(), Vec::new());
        }

        let mut chain: Vec<Arc<dyn TranslationProvider>> = Vec::new();
        let mut failures: Vec<String> = Vec::new();

        let primary: TranslateResult<Arc<dyn TranslationProvider>> = match request.provider {
            ProviderKind::Papago => {
                PapagoProvider::new(request.credentials.clone()).map(|p| Arc::new(p) as _)
            }
            ProviderKind::Google => GoogleProvider::new().map(|p| Arc::new(p) as _),
            ProviderKind::DeepL => {
                DeepLProvider::new(request.credentials.clone()).map(|p| Arc::new(p) as _)
            }
        };
        match primary {
            Ok(provider) => chain.push(provider),
            Err(e) => {
                warn!(provider = %request.provider, "Provider construction failed: {}", e);
                failures.push(format!("{}: {}", request.provider, e));
            }
        }

        if request.provider != ProviderKind::Google {
            match GoogleProvider::new() {
                Ok(provider) => chain.push(Arc::new(provider)),
                Err(e) => failures.push(format!("google: {}", e)),
            }
        }

        (chain, failures)
    }

    /// Execute one translation run
    pub async fn run(&self, request: &TranslateRequest) -> TranslateResponse {
        info!(provider = %request.provider, "Starting translation run");

        if request.source_text.trim().is_empty() {
            return terminal(request.provider, &TranslateError::EmptyInput);
        }

        let source_lang =
            identify_language(&request.source_text, self.language_detector.as_deref());
        if !is_supported(&source_lang) {
            return terminal(
                request.provider,
                &TranslateError::UnsupportedLanguage(source_lang),
            );
        }

        let target_lang = request.target_lang.clone().unwrap_or_else(|| {
            if source_lang == request.main_target_lang {
                request.sub_target_lang.clone()
            } else {
                request.main_target_lang.clone()
            }
        });
        debug!(%source_lang, %target_lang, "Language detection complete");

        let (chain, mut failures) = self.provider_chain(request);
        let attempts = chain.len() + failures.len();
        for provider in &chain {
            let prepared = truncate_to_limit(&request.source_text, provider.max_chars());

            // Capitalization heuristics and the term dictionary are tuned for
            // English; for Korean sources protection is a passthrough
            let (payload, entities) = if source_lang == LANG_EN {
                let spans = self.detector.detect(&prepared);
                let protected = protect(&prepared, &spans);
                debug!(entities = spans.len(), "Protected source text");
                (protected, spans)
            } else {
                (prepared, Vec::new())
            };

            match provider
                .translate(&payload, &source_lang, &target_lang)
                .await
            {
                Ok(translated) => {
                    let trimmed = translated.trim();
                    let result = if source_lang == LANG_EN {
                        restore(&post_correction(trimmed), &entities)
                    } else {
                        trimmed.to_string()
                    };
                    info!(provider = provider.name(), "Translation succeeded");
                    return TranslateResponse {
                        translated_text: Some(result),
                        status_message: None,
                        provider_used: provider.kind(),
                        http_status: 200,
                    };
                }
                Err(failure) => {
                    let kind = provider.error_kind(failure.status);
                    warn!(
                        provider = provider.name(),
                        status = failure.status,
                        %kind,
                        "Provider call failed"
                    );
                    failures.push(format!(
                        "{}: {} (status {})",
                        provider.name(),
                        kind,
                        failure.status
                    ));
                }
            }
        }

        let combined = failures.join("; ");
        let last_kind = chain.last().map_or(request.provider, |p| p.kind());

        if attempts > 1 {
            // Primary and fallback both failed
            terminal_with_status(
                last_kind,
                &TranslateError::BothProvidersFailed(combined),
                503,
            )
        } else {
            // The sole provider was already the universal fallback
            TranslateResponse {
                translated_text: None,
                status_message: Some(combined),
                provider_used: last_kind,
                http_status: 200,
            }
        }
    }
}

fn terminal(provider: ProviderKind, error: &TranslateError) -> TranslateResponse {
    terminal_with_status(provider, error, 200)
}

fn terminal_with_status(
    provider: ProviderKind,
    error: &TranslateError,
    http_status: u16,
) -> TranslateResponse {
    TranslateResponse {
        translated_text: None,
        status_message: Some(error.to_string()),
        provider_used: provider,
        http_status,
    }
}
