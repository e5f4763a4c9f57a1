use clap::Parser;
use cost_trax::{
    cli::{self, Cli},
    config::database::{create_connection, database_url_for_path, get_database_url},
    core::registry::CostTrax,
    errors::Result,
};
use dotenvy::dotenv;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

async fn run(args: Cli) -> Result<String> {
    // --database wins over DATABASE_URL
    let database_url = args
        .database
        .as_deref()
        .map_or_else(get_database_url, database_url_for_path);

    let db = create_connection(&database_url)
        .await
        .inspect(|_| info!("Connected to {database_url}"))
        .inspect_err(|e| error!("Failed to connect to {database_url}: {e}"))?;
    let trax = CostTrax::open(db).await?;

    cli::run(&trax, args.command).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Parse arguments, connect and dispatch
    let args = Cli::parse();
    match run(args).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Command failed: {e}");
            eprintln!("{}", cli::describe_error(&e));
            ExitCode::FAILURE
        }
    }
}
