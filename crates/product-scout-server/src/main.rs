// Copyright 2026 Product Scout Contributors
// SPDX-License-Identifier: MIT

//! Product Scout: entry point.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use product_scout::report::{render_report, write_report};
use product_scout::{Coordinator, ScoutConfig};
use product_scout_server::AppState;

#[derive(Parser)]
#[command(
    name = "product-scout",
    about = "Discover product page URLs on e-commerce sites",
    version
)]
struct Cli {
    /// Domains crawled at once (overrides SCOUT_WORKERS).
    #[arg(long, global = true)]
    workers: Option<usize>,

    /// Scroll iterations per rendered page (overrides SCOUT_MAX_SCROLLS).
    #[arg(long, global = true)]
    max_scrolls: Option<usize>,

    /// Never launch a browser; static HTML only.
    #[arg(long, global = true)]
    no_render: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST API (default).
    Serve {
        /// Listen address (host:port).
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
    },

    /// Crawl the given domains once and print what was found.
    Crawl {
        /// Domains or URLs, e.g. `example.com` or `https://shop.test/catalog`.
        #[arg(required = true)]
        domains: Vec<String>,

        /// Print JSON instead of the text report.
        #[arg(long)]
        json: bool,

        /// Also write the text report here (overrides SCOUT_REPORT_PATH).
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   product-scout completions bash > ~/.local/share/bash-completion/completions/product-scout
    ///   product-scout completions zsh > ~/.zfunc/_product-scout
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

impl Cli {
    /// Environment and defaults, then flags on top.
    fn config(&self) -> ScoutConfig {
        let mut config = ScoutConfig::from_env();
        if let Some(workers) = self.workers {
            config.workers = workers.max(1);
        }
        if let Some(max_scrolls) = self.max_scrolls {
            config.max_scroll_attempts = max_scrolls;
        }
        if self.no_render {
            config.render = false;
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = cli.config();

    match cli.command.unwrap_or(Commands::Serve {
        addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
    }) {
        Commands::Serve { addr } => {
            tracing::info!(
                "product-scout {} with {} workers, rendering {}",
                env!("CARGO_PKG_VERSION"),
                config.workers,
                if config.render { "on" } else { "off" }
            );
            let state = Arc::new(AppState::from_config(&config)?);
            product_scout_server::start(addr, state).await?;
        }

        Commands::Crawl {
            domains,
            json,
            report,
        } => {
            if report.is_some() {
                config.report_path = report;
            }
            let coordinator = Coordinator::from_config(&config)?;
            let results = coordinator.crawl(&domains).await;

            if let Some(path) = &config.report_path {
                if let Err(e) = write_report(path, &results).await {
                    tracing::warn!("failed to write report to {}: {e}", path.display());
                }
            }

            if json {
                let sorted: BTreeMap<_, _> = results.into_iter().collect();
                println!("{}", serde_json::to_string_pretty(&sorted)?);
            } else {
                print!("{}", render_report(&results));
            }
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "product-scout", &mut std::io::stdout());
        }
    }

    Ok(())
}
