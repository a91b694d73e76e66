//! Compara+ search proxy.
//!
//! Proxies product searches to the Mercado Livre search API, reshapes the
//! results into a flat product list with affiliate-tagged links, and serves
//! them with permissive CORS headers.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client                 ┌──────────────────────────────────────────────────┐
//!   GET /search?q=...  ───▶│ request id → trace → timeout → CORS/cache headers│
//!                          │                    │                             │
//!                          │                    ▼                             │
//!                          │  http::request  (q / limit / sort normalization) │
//!                          │                    │                             │
//!                          │                    ▼                             │
//!                          │  upstream::client ──── one GET ─────────────────┼──▶ Marketplace
//!                          │                    │                             │     search API
//!                          │                    ▼                             │
//!                          │  catalog::mapping (FIELD_MAP, affiliate, thumbs) │
//!   JSON array / error ◀───│                                                  │
//!                          └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use compara_proxy::config::load_or_default;
use compara_proxy::lifecycle::startup;
use compara_proxy::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "compara-proxy")]
#[command(version, about = "Marketplace search proxy with affiliate tagging", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_or_default(args.config.as_deref())?;
    init_logging(&config.observability)?;

    tracing::info!("compara-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        error_policy = ?config.upstream.error_policy,
        max_limit = config.search.max_limit,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if let Err(e) = startup::run(config).await {
        tracing::error!(error = %e, "Fatal error");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
