//! avgcalc CLI: run the number window gateway.
//!
//! Settings from `conf/avgcalc.yaml` and the operator `avgcalc.yaml` (see `--conf`);
//! command-line flags override both.
//!
//! Logging: set `RUST_LOG=avgcalc_service=info` (or `warn`, `debug`) to see logs on stderr.

mod cli;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use avgcalc_service::{
    NumbersHandler, ServiceConfig, load_runtime_settings, run_http, set_config_home_override,
};

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(conf_dir) = cli.conf.clone() {
        set_config_home_override(conf_dir);
    }

    // RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.command.verbose() {
            "avgcalc_service=debug,avgcalc=debug"
        } else {
            "avgcalc_service=info,avgcalc=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let settings = load_runtime_settings().merge(cli.command.settings_overlay());
    let config = ServiceConfig::from_settings(&settings);

    match cli.command {
        Command::Gateway { .. } => run_gateway_mode(&config).await,
    }
}

async fn run_gateway_mode(config: &ServiceConfig) -> anyhow::Result<()> {
    if config.upstream.accept_invalid_certs {
        tracing::warn!("upstream TLS certificate verification disabled");
    }
    let handler =
        NumbersHandler::from_config(config).context("failed to build upstream http client")?;
    run_http(handler, &config.bind_addr).await
}
