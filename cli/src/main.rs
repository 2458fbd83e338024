use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use retrieval_core::{load_documents, parse, Collection, Hit, DEFAULT_QUERY};
use std::fmt::Write as _;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "boolq")]
#[command(about = "Answer Boolean AND/OR/NOT queries over a document collection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a query and print the matching documents
    Search {
        /// Form file (`id: text` per line) or a directory of documents.
        /// The built-in sample collection is used when omitted.
        #[arg(long)]
        docs: Option<String>,
        /// Boolean query, e.g. "boolean AND NOT mining"
        #[arg(long, default_value = DEFAULT_QUERY)]
        query: String,
    },
    /// Print the postfix form of a query
    Explain {
        #[arg(long)]
        query: String,
    },
    /// Print the inverted index
    Terms {
        #[arg(long)]
        docs: Option<String>,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    let out = match cli.command {
        Commands::Search { docs, query } => {
            let collection = open_collection(docs.as_deref())?;
            let hits = collection.search(&query)?;
            tracing::info!(query, total_hits = hits.len(), "query evaluated");
            render_hits(&query, &hits)
        }
        Commands::Explain { query } => {
            let postfix = parse(&query)?;
            postfix.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(" ")
        }
        Commands::Terms { docs } => render_terms(&open_collection(docs.as_deref())?),
    };
    println!("{out}");
    Ok(())
}

fn open_collection(path: Option<&str>) -> Result<Collection> {
    let collection = match path {
        Some(path) => {
            let docs = load_documents(path).with_context(|| format!("loading documents from {path}"))?;
            Collection::new(docs)?
        }
        None => Collection::sample()?,
    };
    tracing::debug!(num_docs = collection.len(), num_terms = collection.index().num_terms(), "collection ready");
    Ok(collection)
}

fn render_hits(query: &str, hits: &[Hit]) -> String {
    if hits.is_empty() {
        return "No documents matched the query.".to_string();
    }
    let ids: Vec<&str> = hits.iter().map(|h| h.doc_id.as_str()).collect();
    let mut out = format!("Documents matching the query '{query}': {}\n", ids.join(", "));
    for hit in hits {
        let _ = write!(out, "\n{}: {}", hit.doc_id, hit.text);
    }
    out
}

fn render_terms(collection: &Collection) -> String {
    collection
        .index()
        .terms()
        .map(|(term, ids)| format!("{term}: {}", ids.iter().cloned().collect::<Vec<_>>().join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}
