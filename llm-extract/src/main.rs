//! Demo binary: extracts and translates one text and prints the record as JSON.

use std::io::Read;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use llm_extract::{ClientConfig, ExtractionConfig, Extractor, Provider};
use tracing_subscriber::EnvFilter;

const SAMPLE_TEXT: &str = "Contact John Doe at john@example.com. Born 1990-07-14. \
Website: https://example.com.";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Provider to call: anthropic, google or openai
    #[arg(long, default_value = "anthropic")]
    provider: String,

    /// Language to translate into
    #[arg(long, default_value = "Swedish")]
    language: String,

    /// Text to process; `-` reads it from stdin
    #[arg(long, default_value = SAMPLE_TEXT)]
    text: String,

    /// Model identifier (defaults to the provider's default model)
    #[arg(long)]
    model: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// Requests allowed per extraction; values above 1 enable the repair turn
    #[arg(long, default_value_t = 1)]
    max_attempts: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let provider: Provider = cli.provider.parse()?;
    let text = if cli.text == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read text from stdin")?;
        buf
    } else {
        cli.text
    };

    let mut client = ClientConfig::new().with_timeout(Duration::from_secs(cli.timeout_secs));
    client.model = cli.model;

    let extractor = Extractor::new()
        .with_client_config(client)
        .with_extraction_config(ExtractionConfig::default().with_max_attempts(cli.max_attempts));

    let record = extractor
        .extract_with_provider(&text, &cli.language, provider)
        .await
        .with_context(|| format!("extraction with {provider} failed"))?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
