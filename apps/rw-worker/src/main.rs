use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = rw_worker::Args::parse();

	rw_worker::run(args).await
}
