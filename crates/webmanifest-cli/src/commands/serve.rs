//! `webmanifest serve`: serve the dev route until interrupted

use crate::errors::CliError;
use crate::GlobalOpts;
use anyhow::Context;
use axum::Router;
use clap::Parser;
use webmanifest_core::Mode;
use webmanifest_logger as logger;
use webmanifest_plugin::{BuildPlugin, HostConfig, ManifestPlugin};

#[derive(Parser, Debug)]
pub struct ServeCommand {
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    #[arg(short, long, default_value_t = 5173)]
    pub port: u16,
}

pub fn handle_serve(cmd: ServeCommand, opts: &GlobalOpts) -> Result<(), CliError> {
    let options = opts.load_options()?;
    let mut plugin = ManifestPlugin::new(options);
    plugin.config_resolved(&HostConfig {
        root: std::env::current_dir()?,
        mode: Mode::Development,
    });

    // Refresh the mirror once at startup; the write is not awaited
    plugin.build_start()?;

    let route = plugin.builder().options().route_path();
    let Some(router) = plugin.configure_server() else {
        return Err(CliError::Server("plugin provided no routes".to_string()));
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime
        .block_on(run_server(router, &cmd.host, cmd.port, &route))
        .map_err(|e| CliError::Server(format!("{:#}", e)))
}

async fn run_server(router: Router, host: &str, port: u16, route: &str) -> anyhow::Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    let local = listener.local_addr().context("failed to read bound address")?;

    logger::success(&format!("Serving http://{}{}", local, route));
    tracing::info!("Dev server listening on {}", local);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    logger::info("Dev server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}
