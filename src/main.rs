use anyhow::Result;
use clap::Parser;
use plans_maintenance::{
    cli::Cli,
    commands,
    error::{FailureKind, failure_line},
    observability,
};
use tracing::debug;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(error) = run(&cli).await {
        let kind = FailureKind::classify(&error);
        debug!(
            command = cli.command.component(),
            kind = ?kind,
            "plans-maintenance exited with error: {:#}",
            error
        );
        eprintln!("{}", failure_line(&error));
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    dotenvy::dotenv().ok();
    observability::init_observability(cli.command.component())?;

    commands::execute(cli).await
}
