use clap::Parser;
use dotenvy::dotenv;
use registrar::cli::{self, Cli};
use registrar::logging::{LogFormat, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    init_tracing(if cli.json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    });

    cli::run(cli).await
}
