//! DocSearch dev backend binary — thin CLI shell over the [`docsearch_server`] library crate.

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, warn};

use docsearch_server::catalog::Catalog;
use docsearch_server::router;
use docsearch_server::types::{AppContext, DEFAULT_PORT, DEFAULT_RESULT_LIMIT};

// ---------------------------------------------------------------------------
// CLI definition (clap derive)
// ---------------------------------------------------------------------------

/// Local development backend for the DocSearch widget.
#[derive(Parser)]
#[command(name = "docsearch-server", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Port to listen on
    #[arg(long, default_value_t = DEFAULT_PORT, env = "PORT")]
    port: u16,

    /// Bind to 0.0.0.0 instead of 127.0.0.1 (localhost)
    #[arg(long)]
    bind_all: bool,

    /// Document catalog: a JSON array file, a Reuters `.sgm` file, or a directory of
    /// `.sgm` files (default: built-in sample headlines)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Maximum number of documents returned per search
    #[arg(long, default_value_t = DEFAULT_RESULT_LIMIT)]
    limit: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Graceful shutdown signal
// ---------------------------------------------------------------------------

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to register SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => info!("Received SIGINT, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await.expect("failed to listen for Ctrl+C");
        info!("Received Ctrl+C, shutting down...");
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("docsearch=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "docsearch-server", &mut std::io::stdout());
        return;
    }

    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path).unwrap_or_else(|e| {
            error!(error = e.as_str(), "Could not load catalog");
            std::process::exit(1);
        }),
        None => Catalog::builtin(),
    };
    if catalog.is_empty() {
        warn!("Catalog has no documents; every search will return []");
    } else {
        info!(documents = catalog.len(), "Catalog loaded");
    }

    let ctx = AppContext::new(catalog, cli.limit);
    let app = router(ctx);

    // Bind address: 127.0.0.1 by default, --bind-all for 0.0.0.0
    let bind_addr = if cli.bind_all { "0.0.0.0" } else { "127.0.0.1" };
    let listener =
        tokio::net::TcpListener::bind(format!("{bind_addr}:{}", cli.port)).await.unwrap_or_else(|e| {
            error!(port = cli.port, error = %e, "Could not bind to port");
            eprintln!("  Try: docsearch-server --port <port>");
            std::process::exit(1);
        });

    let port = listener.local_addr().map(|a| a.port()).unwrap_or(cli.port);
    info!(port = port, "Search endpoint at http://localhost:{port}/search/");
    // Machine-readable line for scripts (not through tracing)
    eprintln!("DOCSEARCH_PORT={port}");

    if let Err(e) = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
