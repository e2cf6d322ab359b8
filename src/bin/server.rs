use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use trivia_api::db;
use trivia_api::server::app::run_server;
use trivia_api::settings::get_configuration;
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Overrides `database.path` from the configuration
    #[clap(long)]
    db_path: Option<PathBuf>,
    /// Start without applying pending migrations
    #[clap(long)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    let mut settings = get_configuration().context("Failed to read configuration")?;
    if let Some(path) = cli.db_path {
        settings.database.path = path;
    }
    let pool = db::establish_connection(&settings.database)
        .await
        .with_context(|| format!("Cannot open {}", settings.database.path.display()))?;

    if !cli.skip_migrations {
        tracing::info!("Running db migrations...");
        db::run_migrations(&pool).await?;
    }

    run_server(pool, &settings.application).await
}
