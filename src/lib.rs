pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod notifications;
pub mod services;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, Console, TerminalConsole};
use clients::jikan::JikanClient;
pub use config::Config;
use db::Store;
use notifications::DesktopNotifier;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(Config::discover);
    let config = match &config_path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::default(),
    };
    config.validate()?;

    init_tracing(&config.general.log_level);

    match &config_path {
        Some(path) => info!("Using config {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    let mut console = TerminalConsole;

    match cli.command {
        Some(Commands::InitConfig) => {
            let path = cli.config.unwrap_or_else(Config::default_config_path);
            if Config::create_default_if_missing(&path)? {
                console.success(&format!("Config file created at {}.", path.display()));
            } else {
                console.warning(&format!("Config file already exists at {}.", path.display()));
            }
            Ok(())
        }

        Some(Commands::InitDb { yes }) => {
            let store = open_store(&config, false).await?;
            cli::cmd_init_db(&store, &mut console, yes).await
        }

        Some(Commands::AddAnime { mal_id }) => {
            let store = open_store(&config, true).await?;
            let catalog = JikanClient::new(&config.catalog)?;
            cli::cmd_add_anime(&store, &catalog, &mut console, mal_id).await
        }

        Some(Commands::AddUser { mal_user_id }) => {
            let store = open_store(&config, true).await?;
            cli::cmd_add_user(&store, &mut console, mal_user_id).await
        }

        Some(Commands::AddToWatchlist {
            user_id,
            anime_id,
            last_watched_episode,
        }) => {
            let store = open_store(&config, true).await?;
            cli::cmd_add_to_watchlist(&store, &mut console, user_id, anime_id, last_watched_episode)
                .await
        }

        Some(Commands::Watchlist { user_id }) => {
            let store = open_store(&config, true).await?;
            cli::cmd_show_watchlist(&store, &mut console, user_id).await
        }

        Some(Commands::NotifyDue { user_id, date }) => {
            let store = open_store(&config, true).await?;
            let notifier = DesktopNotifier::new(&config.notifications);
            cli::cmd_notify_due(&store, &notifier, &mut console, user_id, date).await
        }

        Some(Commands::Interactive) | None => {
            let store = open_store(&config, true).await?;
            let catalog = JikanClient::new(&config.catalog)?;
            console.heading("Welcome to anitrack!");
            cli::run_interactive(&store, &catalog, &mut console).await
        }
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    // stdout belongs to the prompts.
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

async fn open_store(config: &Config, ensure_schema: bool) -> anyhow::Result<Store> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await
    .with_context(|| format!("Failed to open database {}", config.general.database_path))?;

    if ensure_schema {
        store.initialize_schema().await?;
    }

    debug!("Using database {}", config.general.database_path);
    Ok(store)
}
