use anyhow::{bail, Context, Result};
use clap::Parser;
use flate2::read::GzDecoder;
use searchserver::{DocumentId, DocumentStatus, SearchOptions, SearchServer};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "In-memory TF-IDF search server", long_about = None)]
struct Args {
    /// JSON lines corpus, gzip-compressed if the path ends in .gz
    #[arg(short, long)]
    corpus: String,

    /// Space-separated stop words
    #[arg(short, long, default_value = "")]
    stop_words: String,

    /// Query text; prefix a word with '-' to exclude documents containing it
    #[arg(short, long)]
    query: String,

    /// Only return documents with this status
    #[arg(long, default_value = "actual")]
    status: DocumentStatus,

    /// Maximum number of results
    #[arg(short, long, default_value_t = searchserver::MAX_RESULT_DOCUMENT_COUNT)]
    limit: usize,

    /// Report the query words found in this document instead of searching
    #[arg(short, long)]
    match_id: Option<DocumentId>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

// One corpus line
#[derive(Debug, Deserialize)]
struct CorpusRecord {
    id: DocumentId,
    text: String,
    #[serde(default)]
    status: DocumentStatus,
    #[serde(default)]
    ratings: Vec<i32>,
}

fn open_corpus(path: &str) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).with_context(|| format!("Failed to open corpus '{}'", path))?;
    let reader: Box<dyn Read> = if Path::new(path).extension().map_or(false, |ext| ext == "gz") {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    Ok(Box::new(BufReader::new(reader)))
}

// Index every corpus record, returning the number of documents added
fn load_corpus(server: &mut SearchServer, reader: impl BufRead) -> Result<usize> {
    let mut added = 0;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read corpus line {}", line_no + 1))?;
        if line.trim().is_empty() {
            continue;
        }

        let record: CorpusRecord = serde_json::from_str(&line)
            .with_context(|| format!("Invalid corpus record on line {}", line_no + 1))?;
        server
            .add_document(record.id, &record.text, record.status, &record.ratings)
            .with_context(|| format!("Failed to index corpus line {}", line_no + 1))?;
        added += 1;
    }
    Ok(added)
}

fn run_search(server: &SearchServer, args: &Args) -> Result<()> {
    let start = Instant::now();
    let results = server.find_top_documents_with_status(&args.query, args.status)?;
    info!("Search found {} documents in {:?}", results.len(), start.elapsed());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for document in &results {
            println!("{}", document);
        }
    }
    Ok(())
}

fn run_match(server: &SearchServer, args: &Args, doc_id: DocumentId) -> Result<()> {
    let matched = server.match_document(&args.query, doc_id)?;

    if args.json {
        let value = serde_json::json!({
            "document_id": doc_id,
            "status": matched.status,
            "words": matched.words,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!(
            "{{ document_id = {}, status = {}, words = {} }}",
            doc_id,
            matched.status,
            matched.words.join(" ")
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.limit == 0 {
        bail!("--limit must be at least 1");
    }

    let mut server = SearchServer::with_options(SearchOptions { limit: args.limit });
    server.set_stop_words(&args.stop_words);

    let start = Instant::now();
    let added = load_corpus(&mut server, open_corpus(&args.corpus)?)?;
    let stats = server.stats();
    info!(
        "Indexed {} documents ({} terms) in {:?}",
        added,
        stats.total_terms,
        start.elapsed()
    );

    match args.match_id {
        Some(doc_id) => run_match(&server, &args, doc_id),
        None => run_search(&server, &args),
    }
}
