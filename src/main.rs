//! Mini KV - An embeddable in-memory key-value store
//!
//! Host binary: embeds one store, sweeps it in the background and drives it
//! with commands read line by line from stdin.

use anyhow::Context;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_kv::shell::execute_line;
use mini_kv::{spawn_cleanup_task, Config, SharedStore};

/// Main entry point for the Mini KV shell.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the store with configured capacity and eviction policy
/// 4. Start background expiry sweep task
/// 5. Execute commands from stdin until EOF, `QUIT` or Ctrl+C
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so replies on stdout stay clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_kv=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Mini KV");

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_entries={}, cleanup_interval={}s, eviction_policy={}",
        config.max_entries, config.cleanup_interval, config.eviction_policy
    );

    let store = SharedStore::from_config(&config);

    let cleanup_handle = (config.cleanup_interval > 0)
        .then(|| spawn_cleanup_task(store.clone(), config.cleanup_interval));
    if cleanup_handle.is_none() {
        warn!("Expiry sweep disabled, expired entries stay until CLEANUP is issued");
    }

    tokio::select! {
        result = run_shell(&store) => result?,
        _ = signal::ctrl_c() => info!("Received Ctrl+C, shutting down..."),
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
    }

    info!("Shutdown complete");
    Ok(())
}

/// Reads commands from stdin and writes one reply per command to stdout.
async fn run_shell(store: &SharedStore) -> anyhow::Result<()> {
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }

        let output = match execute_line(store, line).await {
            Ok(reply) => reply.to_string(),
            Err(e) => format!("(error) {}", e),
        };

        stdout.write_all(output.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    Ok(())
}
