use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = kbsearch_api::Args::parse();

	kbsearch_api::run(args).await
}
