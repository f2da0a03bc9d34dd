#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Gatekeeper server: loads configuration, wires both gates into the
//! gateway and serves until interrupted.

mod config;
mod logging;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use api_gateway::ApiGateway;
use authz_gate_sdk::CapabilitySet;
use clap::Parser;
use gatekeeper_cache::InMemoryCacheBackend;

use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "gatekeeper-server", version, about = "Authenticating, authorizing API gateway")]
struct Cli {
    /// YAML configuration file.
    #[arg(short, long, env = "GATEKEEPER_CONFIG")]
    config: Option<PathBuf>,

    /// Print the effective configuration and exit.
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("failed to load configuration")?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&cfg)?);
        return Ok(());
    }

    logging::init(&cfg.logging).context("failed to initialise logging")?;
    tracing::info!(
        config = ?cli.config,
        bind_addr = %cfg.server.bind_addr,
        "starting gatekeeper"
    );

    run(cfg).await
}

async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let validity = Arc::new(InMemoryCacheBackend::<bool>::new());
    let capabilities = Arc::new(InMemoryCacheBackend::<Arc<CapabilitySet>>::new());

    let authority = static_authority_plugin::init(&cfg.static_authority);
    let authn = authn_gate::init(&cfg.authn, authority, validity.clone());

    let source = static_permission_plugin::init(&cfg.static_permissions)
        .context("invalid static permission configuration")?;
    let authz = authz_gate::init(&cfg.authz, source, capabilities.clone())?;

    if cfg.housekeeping.purge_interval_secs > 0 {
        let period = Duration::from_secs(cfg.housekeeping.purge_interval_secs);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let purged = validity.purge_expired() + capabilities.purge_expired();
                if purged > 0 {
                    tracing::debug!(purged, "purged expired cache entries");
                }
            }
        });
    }

    let gateway = routes::register(ApiGateway::new(cfg.server, authn, authz))?;
    gateway.serve(shutdown_signal()).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => tracing::error!(error = %e, "failed to listen for shutdown signal"),
    }
}
