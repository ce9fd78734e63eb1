use anyhow::{bail, Context};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gator::commands::Command;
use gator::config::Config;
use gator::db::Database;
use gator::fetcher::Fetcher;
use gator::handlers::{default_commands, State};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gator=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let commands = default_commands();

    let Some(command) = Command::from_args(std::env::args().skip(1)) else {
        bail!(
            "not enough arguments provided\nusage: gator <command> [args...]\ncommands: {}",
            commands.names().join(", ")
        );
    };

    // Load configuration
    let config = Config::read().context("couldn't read config")?;
    debug!("Loaded config from {:?}", config.path());

    // Initialize database
    let db = Database::new(&config.db_url)
        .await
        .with_context(|| format!("couldn't connect to database at {}", config.db_url))?;
    db.initialize().await.context("couldn't initialize database")?;

    let fetcher = Fetcher::new().context("couldn't create HTTP client")?;

    let mut state = State {
        db,
        config,
        fetcher,
    };

    commands.run(&mut state, command).await?;

    Ok(())
}
