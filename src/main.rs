use anyhow::Result;
use clap::Parser;
use moneymate::cli::Cli;
use moneymate::config;

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = config::load_dotenv();
    let cli = Cli::parse();
    cli.run(dotenv.err()).await
}
