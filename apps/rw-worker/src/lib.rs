pub mod worker;

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rw_service::RankService;
use rw_storage::db::Db;

use crate::worker::Scheduler;

/// Runs the rank scheduler without the HTTP API.
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
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();

	let db = Db::connect(&config.storage.postgres).await?;

	db.ensure_schema().await?;

	let service = Arc::new(RankService::new(&config, db)?);
	let handle = Scheduler::from_config(service, &config.tracker).spawn();

	tokio::signal::ctrl_c().await?;
	tracing::info!("Shutdown signal received.");
	handle.shutdown().await?;

	Ok(())
}
