use std::path::PathBuf;

use clap::{Parser, Subcommand};

use avgcalc_service::{GatewaySettings, RuntimeSettings, UpstreamSettings, WindowSettings};

#[derive(Parser)]
#[command(name = "avgcalc")]
#[command(about = "Average calculator: per-category sliding windows of upstream numbers over HTTP.")]
pub(crate) struct Cli {
    /// Directory holding the operator `avgcalc.yaml`.
    #[arg(long, global = true)]
    pub(crate) conf: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run HTTP server (GET /numbers/{category}). Default bind: 0.0.0.0:9876
    Gateway {
        /// Listen address (e.g. 0.0.0.0:9876)
        #[arg(long)]
        bind: Option<String>,

        /// Numbers kept per category window (default: 10)
        #[arg(long)]
        window_size: Option<usize>,

        /// Upstream fetch deadline in milliseconds (default: 450)
        #[arg(long)]
        fetch_timeout_ms: Option<u64>,

        /// Handling time above which a warning is logged (default: 500)
        #[arg(long)]
        response_budget_ms: Option<u64>,

        /// Skip TLS certificate verification for the upstream host
        #[arg(long)]
        accept_invalid_certs: bool,

        /// Debug logging (ignored when RUST_LOG is set)
        #[arg(long, short)]
        verbose: bool,
    },
}

impl Command {
    pub(crate) fn verbose(&self) -> bool {
        match self {
            Self::Gateway { verbose, .. } => *verbose,
        }
    }

    /// Flags as a settings overlay; unset flags leave file settings in place.
    pub(crate) fn settings_overlay(&self) -> RuntimeSettings {
        match self {
            Self::Gateway {
                bind,
                window_size,
                fetch_timeout_ms,
                response_budget_ms,
                accept_invalid_certs,
                verbose: _,
            } => RuntimeSettings {
                gateway: GatewaySettings {
                    bind: bind.clone(),
                    response_budget_ms: *response_budget_ms,
                },
                window: WindowSettings { size: *window_size },
                upstream: UpstreamSettings {
                    timeout_ms: *fetch_timeout_ms,
                    accept_invalid_certs: accept_invalid_certs.then_some(true),
                    ..UpstreamSettings::default()
                },
            },
        }
    }
}
