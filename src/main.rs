use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    booklisting::logging::init().context("init logging")?;

    let cli = booklisting::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        booklisting::cli::Command::Search(args) => {
            booklisting::search::run(args).await.context("search")?;
        }
        booklisting::cli::Command::Interactive(args) => {
            booklisting::interactive::run(args)
                .await
                .context("interactive")?;
        }
    }

    Ok(())
}
