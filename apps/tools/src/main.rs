use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use events_core::{
    config::resolve_settings, load_state, persistence::RECORD_KEYS, save_state,
    seed::sample_events,
};
use storage::{KeyValueStore, Storage};

/// Opens the same store as `campus`: `campus.toml`, then `CAMPUS_DATABASE_URL`
/// / `APP__DATABASE_URL`, then `--database-url`.
#[derive(Parser, Debug)]
struct Cli {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the sample catalogue. Without `--force` an existing catalogue is kept.
    Seed {
        #[arg(long)]
        force: bool,
    },
    /// Remove one record, or every app record when no key is given.
    Reset { key: Option<String> },
    /// Print every stored record.
    Dump,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let cli = Cli::parse();
    let database_url = cli.database_url();
    tracing::info!(%database_url, "opening store");
    let storage = Storage::new(&database_url).await?;

    match cli.command {
        Command::Seed { force } => {
            let count = seed(&storage, force).await?;
            println!("catalogue holds {count} events");
        }
        Command::Reset { key } => {
            let removed = reset(&storage, key.as_deref()).await?;
            println!("removed {}", removed.join(", "));
        }
        Command::Dump => {
            for entry in storage.entries().await? {
                println!("{} ({}): {}", entry.key, entry.updated_at, entry.value);
            }
        }
    }

    Ok(())
}

impl Cli {
    fn database_url(&self) -> String {
        resolve_settings(self.config.as_deref(), self.database_url.clone())
            .resolved_database_url()
    }
}

/// Returns the number of events stored afterwards.
async fn seed(store: &dyn KeyValueStore, force: bool) -> Result<usize> {
    let mut state = load_state(store).await?.into_app_state();
    if force || state.events.is_empty() {
        state.events = sample_events();
        save_state(store, &state).await?;
        tracing::info!(count = state.events.len(), force, "seeded sample events");
    }
    Ok(state.events.len())
}

async fn reset(store: &dyn KeyValueStore, key: Option<&str>) -> Result<Vec<String>> {
    let keys: Vec<&str> = match key {
        Some(key) if RECORD_KEYS.contains(&key) => vec![key],
        Some(key) => bail!("unknown record '{key}', expected one of {}", RECORD_KEYS.join(", ")),
        None => RECORD_KEYS.to_vec(),
    };
    for key in &keys {
        store.remove(key).await?;
    }
    Ok(keys.into_iter().map(String::from).collect())
}
