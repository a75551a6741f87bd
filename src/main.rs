use clap::Parser;
use spot_translate::{
    Credentials, Orchestrator, ProviderKind, TermDictionary, TranslateRequest, TranslateResponse,
};
use std::sync::Arc;
use tracing::info;

/// Terms used when no dictionary file is supplied
const DEFAULT_TERMS: [&str; 8] = [
    "batch", "epoch", "dyno", "tensor", "pipeline", "gradient descent", "embedding", "token",
];

/// Translate selected text between Korean and English, preserving entities
#[derive(Debug, Parser)]
#[command(name = "spot-translate", version)]
struct Args {
    /// Text to translate
    text: String,

    /// Newline-delimited term dictionary file
    #[arg(long)]
    term_file: Option<std::path::PathBuf>,

    /// Provider to try first: papago, google, or deepl
    #[arg(long, default_value = "google")]
    provider: String,

    /// API key (Papago client id / DeepL auth key)
    #[arg(long, default_value = "")]
    api_key: String,

    /// API secret (Papago client secret)
    #[arg(long, default_value = "")]
    api_secret: String,

    /// Explicit target language code
    #[arg(long)]
    target: Option<String>,

    /// Language shown when the source is not already in it
    #[arg(long, default_value = "ko")]
    main_lang: String,

    /// Target used when the source already is the main language
    #[arg(long, default_value = "en")]
    sub_lang: String,
}

/// Shell exit code for a finished run: only the non-200 terminal state (both
/// providers failed) is a hard failure; recognized errors like empty input
/// still exit 0 with the explanatory message
fn exit_code(response: &TranslateResponse) -> i32 {
    if response.http_status == 200 { 0 } else { 1 }
}

fn parse_provider(name: &str) -> Result<ProviderKind, String> {
    match name.to_lowercase().as_str() {
        "papago" => Ok(ProviderKind::Papago),
        "google" => Ok(ProviderKind::Google),
        "deepl" => Ok(ProviderKind::DeepL),
        other => Err(format!("Unknown provider: {}", other)),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();

    let terms = match &args.term_file {
        Some(path) => Arc::new(TermDictionary::load(path)?),
        None => Arc::new(TermDictionary::from_terms(DEFAULT_TERMS)),
    };
    info!(terms = terms.len(), "Term dictionary loaded");

    let orchestrator = Orchestrator::new(terms)?;
    let request = TranslateRequest {
        source_text: args.text,
        target_lang: args.target,
        provider: parse_provider(&args.provider)?,
        credentials: Credentials {
            api_key: args.api_key,
            api_secret: args.api_secret,
        },
        main_target_lang: args.main_lang,
        sub_target_lang: args.sub_lang,
    };

    let response = orchestrator.run(&request).await;
    let code = exit_code(&response);
    if code != 0 {
        eprintln!(
            "Translation failed ({}): {}",
            response.http_status,
            response.status_message.unwrap_or_default()
        );
        std::process::exit(code);
    }

    match response.translated_text {
        Some(text) => println!("{}", text),
        None => eprintln!("{}", response.status_message.unwrap_or_default()),
    }
    Ok(())
}
