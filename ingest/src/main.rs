use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lontar_core::corpus::{CorpusRecord, CorpusStore};
use lontar_core::persist::JsonCorpusStore;
use lontar_core::search::Searcher;
use lontar_core::tokenizer::{extract_stopwords, preprocess};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lontar-ingest")]
#[command(about = "Ingest text documents into a BIM-ranked corpus", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append .txt files to the corpus
    Ingest {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Corpus file
        #[arg(long, default_value = "./corpus.json")]
        corpus: String,
        /// Directory for per-document term and stopword count reports
        #[arg(long)]
        reports: Option<String>,
    },
    /// Rank the corpus against a query and print the matches
    Search {
        /// Corpus file
        #[arg(long, default_value = "./corpus.json")]
        corpus: String,
        query: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest { input, corpus, reports } => {
            run_ingest(&input, &corpus, reports.as_deref().map(Path::new))
        }
        Commands::Search { corpus, query } => run_search(&corpus, &query),
    }
}

fn run_ingest(input: &str, corpus: &str, reports: Option<&Path>) -> Result<()> {
    let input_path = Path::new(input);
    let store = JsonCorpusStore::new(corpus);

    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("txt") {
                files.push(p.to_path_buf());
            }
        }
        files.sort();
    } else if input_path.is_file() {
        files.push(input_path.to_path_buf());
    }

    if let Some(dir) = reports {
        fs::create_dir_all(dir)?;
    }

    let mut ingested = 0usize;
    for file in files {
        let raw = fs::read_to_string(&file)
            .with_context(|| format!("reading {}", file.display()))?;
        let (preprocessed, tokens) = preprocess(&raw);
        let filename = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unnamed.txt")
            .to_string();

        if let Some(dir) = reports {
            write_count_report(&dir.join(format!("processed_{filename}")), &tokens)?;
            write_count_report(
                &dir.join(format!("stopwords_{filename}")),
                &extract_stopwords(&raw),
            )?;
        }

        tracing::info!(file = %filename, tokens = tokens.len(), "ingesting document");
        store.append(CorpusRecord {
            filename,
            original_content: raw,
            preprocessed_content: preprocessed,
            timestamp: now_timestamp(),
        })?;
        ingested += 1;
    }

    tracing::info!(ingested, corpus, "ingest complete");
    Ok(())
}

/// One `word: count` line per distinct token, sorted for stable output.
fn write_count_report(path: &Path, tokens: &[String]) -> Result<()> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    let mut lines: Vec<(&str, usize)> = counts.into_iter().collect();
    lines.sort();
    let body: String = lines
        .into_iter()
        .map(|(word, count)| format!("{word}: {count}\n"))
        .collect();
    fs::write(path, body).with_context(|| format!("writing report {}", path.display()))
}

fn run_search(corpus: &str, query: &str) -> Result<()> {
    let searcher = Searcher::new(JsonCorpusStore::new(corpus));
    let results = searcher.search(query)?;
    if results.is_empty() {
        println!("no matches");
        return Ok(());
    }
    for (rank, doc) in results.iter().enumerate() {
        println!("{:>3}. {}  ({})", rank + 1, doc.filename, doc.created_at);
    }
    Ok(())
}

fn now_timestamp() -> String {
    let format =
        time::macros::format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    time::OffsetDateTime::now_utc()
        .format(&format)
        .unwrap_or_else(|_| String::new())
}
