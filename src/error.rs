/// Error types for the translation pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// Source text is empty (or became empty after trimming)
    EmptyInput,
    /// Detected source language is outside the supported pair
    UnsupportedLanguage(String),
    /// Term dictionary file was empty or unreadable
    TermDictionaryError(String),
    /// A detector rule pattern failed to compile
    PatternError(String),
    /// Provider-level configuration problem (missing credentials, bad client)
    ConfigError(String),
    /// Both the selected provider and the fallback provider failed
    BothProvidersFailed(String),
    /// General error with context
    Other(String),
}

impl std::fmt::Display for TranslateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslateError::EmptyInput => write!(f, "Source text is empty"),
            TranslateError::UnsupportedLanguage(lang) => {
                write!(f, "Unsupported source language: {}", lang)
            }
            TranslateError::TermDictionaryError(msg) => {
                write!(f, "Term dictionary error: {}", msg)
            }
            TranslateError::PatternError(msg) => write!(f, "Pattern error: {}", msg),
            TranslateError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            TranslateError::BothProvidersFailed(msg) => {
                write!(f, "All providers failed: {}", msg)
            }
            TranslateError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TranslateError {}

/// Result type for translation operations
pub type TranslateResult<T> = Result<T, TranslateError>;
