pub mod routes;
pub mod state;

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use rw_worker::worker::Scheduler;

use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(
	version = rw_cli::VERSION,
	rename_all = "kebab",
	styles = rw_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = rw_config::load(&args.config)?;

	init_tracing(&config);

	let http_addr: SocketAddr = config.service.http_bind.parse()?;
	let state = AppState::new(&config).await?;
	let scheduler = if config.tracker.enabled {
		Some(Scheduler::from_config(state.service.clone(), &config.tracker).spawn())
	} else {
		tracing::info!("Embedded rank scheduler disabled.");

		None
	};
	let app = routes::router(state);
	let http_listener = TcpListener::bind(http_addr).await?;

	tracing::info!(%http_addr, "HTTP server listening.");

	axum::serve(http_listener, app).with_graceful_shutdown(shutdown_signal()).await?;

	if let Some(handle) = scheduler {
		handle.shutdown().await?;
	}

	Ok(())
}

fn init_tracing(config: &rw_config::Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
	match tokio::signal::ctrl_c().await {
		Ok(()) => tracing::info!("Shutdown signal received."),
		Err(err) => {
			tracing::error!(error = %err, "Failed to listen for the shutdown signal.");

			std::future::pending::<()>().await;
		},
	}
}
