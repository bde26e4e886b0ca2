use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = rw_api::Args::parse();

	rw_api::run(args).await
}
