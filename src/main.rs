//! sentrank CLI - rank a document's sentences against a query.
//!
//! Reads plain text from a file (or stdin), splits it into sentences,
//! ranks them against the query, and prints the top-k in rank order.
//! The bundled hashed-unigram embedder keeps the binary self-contained;
//! it captures lexical overlap only, so treat the CLI as a demo and
//! diagnostics surface for the library, which accepts any embedding
//! backend.
//!
//! Examples:
//!   sentrank --query "What are cats?" document.txt
//!   cat document.txt | sentrank --query "ownership rules" --top 3
//!   sentrank --query "..." --json document.txt | jq '.[0]'

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;

use sentrank::{CachedEmbedder, Config, HashedEmbedder, SentenceRanker};

/// Query-focused sentence ranking
///
/// sentrank builds a similarity graph over a document's sentences, runs
/// weighted PageRank over it, blends the structural score with direct
/// query similarity, and returns the most relevant sentences first.
#[derive(Parser, Debug)]
#[command(name = "sentrank")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// Plain-text file to rank. Reads stdin when omitted or "-".
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// The question to rank sentences against
    #[arg(short, long)]
    query: String,

    /// Number of sentences to return
    ///
    /// Overrides the top-k from sentrank.toml. If it exceeds the
    /// number of sentences in the document, all sentences are returned.
    #[arg(short = 'k', long)]
    top: Option<usize>,

    /// Emit results as a JSON array instead of the text listing
    #[arg(long)]
    json: bool,

    /// Show configuration and cache statistics
    #[arg(short, long)]
    verbose: bool,
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            Ok(text)
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("resolving working directory")?;
    let config = Config::load(&cwd);
    if cli.verbose {
        eprintln!("{}", config.display_summary());
    }

    let text = read_input(cli.file.as_ref())?;
    let sentences = sentrank::segment::split_sentences(&text);
    if sentences.is_empty() {
        anyhow::bail!("no sentences found in input");
    }

    let k = cli.top.unwrap_or(config.ranking.top_k);
    let provider = CachedEmbedder::new(HashedEmbedder::new(), config.ranking.embedding_cache_size);
    let ranker = SentenceRanker::new(provider, config.ranking.clone());

    // Same degradation policy as the library orchestrator, kept explicit
    // here so the scored listing can show when the fallback fired.
    let (ranked, fell_back) = match ranker.rank(&cli.query, &sentences) {
        Ok(ranked) => (ranked.into_iter().take(k).collect::<Vec<_>>(), false),
        Err(err) if err.is_contract_violation() => return Err(err.into()),
        Err(err) => {
            tracing::warn!(error = %err, "ranking failed, falling back to document order");
            let fallback = sentences
                .iter()
                .take(k)
                .enumerate()
                .map(|(i, s)| sentrank::RankedSentence::new(0.0, i, s.clone()))
                .collect();
            (fallback, true)
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else {
        for (position, sentence) in ranked.iter().enumerate() {
            let score = format!("{:>6.4}", sentence.score);
            if fell_back {
                println!("{:>3}. {}", position + 1, sentence.text);
            } else {
                println!(
                    "{:>3}. {} {}",
                    position + 1,
                    score.green(),
                    sentence.text
                );
            }
        }
        if fell_back {
            eprintln!("{}", "(ranking unavailable - document order shown)".yellow());
        }
    }

    if cli.verbose {
        let stats = ranker.provider().stats();
        eprintln!(
            "   Sentences: {} | cache: {} hits / {} misses",
            sentences.len(),
            stats.hits,
            stats.misses
        );
    }

    Ok(())
}
