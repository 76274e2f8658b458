use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = pace_api::Args::parse();
	pace_api::run(args).await
}
