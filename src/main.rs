use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wikiextract::{
    config::Config,
    pipeline::{CascadeExtractor, ScrapeExtractor},
};

/// Extract study notes from a Wikipedia article.
#[derive(Debug, Parser)]
#[command(name = "wikiextract", version, about)]
struct Cli {
    /// Article URL, e.g. https://en.wikipedia.org/wiki/Rocket
    url: String,

    /// Scrape the page only and fail instead of printing fallback content
    #[arg(long)]
    strict: bool,

    /// Write the document to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log each extraction stage to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "wikiextract=debug" } else { "wikiextract=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;

    let content = if cli.strict {
        let extractor = ScrapeExtractor::from_config(&config)?;
        extractor
            .extract(&cli.url)
            .await
            .with_context(|| format!("Failed to extract {}", cli.url))?
            .into_text()
    } else {
        let extractor = CascadeExtractor::from_config(&config)?;
        let extraction = extractor.extract(&cli.url).await;
        if let Some(message) = &extraction.message {
            eprintln!("warning: {}", message);
        }
        extraction.document.into_text()
    };

    match cli.output {
        Some(path) => std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", content),
    }

    Ok(())
}
