use anyhow::{anyhow, Result};
use clap::Parser;
use engine::{
    BackendConfig, HttpPreprocessor, LanguageCode, Pipeline, PipelineConfig, SummarizeRequest,
};
use std::io::Read;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "summarize")]
#[command(about = "Extract a TextRank summary from a text file or stdin", long_about = None)]
struct Cli {
    /// Input file; reads stdin when omitted
    #[arg(long)]
    input: Option<String>,
    /// Fraction of sentences to keep, in (0, 1]
    #[arg(long, default_value_t = 0.3)]
    ratio: f64,
    /// Pin the language (ko|en) instead of detecting it
    #[arg(long)]
    language: Option<String>,
    /// Keep stopwords in the backend's token arrays
    #[arg(long, default_value_t = false)]
    keep_stopwords: bool,
    /// Korean preprocessing backend base URL
    #[arg(long, default_value = "http://localhost:3000")]
    ko_backend: String,
    /// English preprocessing backend base URL
    #[arg(long, default_value = "http://localhost:3001")]
    en_backend: String,
    /// Preprocessing request timeout in seconds
    #[arg(long, default_value_t = 10)]
    backend_timeout_secs: u64,
}

fn parse_language(s: &str) -> Result<LanguageCode> {
    match s {
        "ko" => Ok(LanguageCode::Ko),
        "en" => Ok(LanguageCode::En),
        other => Err(anyhow!("unsupported language {other:?} (expected ko|en)")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Cli::parse();

    let text = match &args.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    tracing::debug!(chars = text.chars().count(), "input loaded");

    let language = args.language.as_deref().map(parse_language).transpose()?;
    let preprocessor = HttpPreprocessor::new(&BackendConfig {
        ko_url: args.ko_backend,
        en_url: args.en_backend,
        timeout: Duration::from_secs(args.backend_timeout_secs),
    })?;
    let pipeline = Pipeline::new(preprocessor, PipelineConfig::default());

    let response = pipeline
        .run(&SummarizeRequest {
            text,
            ratio: Some(args.ratio),
            language,
            remove_stopwords: !args.keep_stopwords,
        })
        .await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
