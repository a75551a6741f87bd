//! On-the-spot translation core
//!
//! Translates short user-selected text between Korean and English while
//! keeping proper nouns, code identifiers, and domain jargon intact. Entities
//! are detected with conservative string-boundary rules (no trained NER
//! model), swapped for reversible placeholder tokens before the provider call,
//! and swapped back afterwards. Provider clients are interchangeable behind
//! one trait; a failed call falls back once to the keyless Google endpoint.
//!
//! # Example
//!
//! ```ignore
//! use spot_translate::{Orchestrator, TermDictionary, TranslateRequest};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let terms = Arc::new(TermDictionary::load("terms_en.txt")?);
//!     let orchestrator = Orchestrator::new(terms)?;
//!
//!     let request: TranslateRequest =
//!         serde_json::from_str(r#"{"sourceText": "Gunicorn forks worker_processes"}"#)?;
//!     let response = orchestrator.run(&request).await;
//!     println!("{:?}", response.translated_text);
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;
pub mod lang;
pub mod orchestrator;
pub mod preprocess;
pub mod provider;
pub mod terms;

pub use entity::{EntityDetector, EntitySpan};
pub use error::{TranslateError, TranslateResult};
pub use lang::{LanguageDetector, contains_hangul, identify_language};
pub use orchestrator::{Orchestrator, TranslateRequest, TranslateResponse};
pub use provider::{
    Credentials, DeepLProvider, ErrorKind, GoogleProvider, MockMode, MockProvider, PapagoProvider,
    ProviderFailure, ProviderKind, TranslationProvider,
};
pub use terms::TermDictionary;
