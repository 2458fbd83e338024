use anyhow::Result;
use axum::Router;
use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};
use server::{build_app, load_collection};
use tokio::net::TcpListener;

#[derive(Parser)]
struct Args {
    /// Form file (`id: text` per line) or directory of documents; sample collection if omitted
    #[arg(long)]
    docs: Option<String>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let collection = load_collection(args.docs.as_deref())?;
    tracing::info!(num_docs = collection.len(), num_terms = collection.index().num_terms(), "collection loaded");
    let app: Router = build_app(collection);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
