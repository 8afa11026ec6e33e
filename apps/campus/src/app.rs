//! Runtime glue: owns the store and controller, runs command effects.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use events_core::{
    bootstrap, config::Settings, save_state, AppController, Clock, Command, ControllerOptions,
    Effect, FixedClock, SystemClock,
};
use shared::domain::RequesterId;
use storage::{KeyValueStore, Storage};
use url::Url;

pub struct App<S: KeyValueStore = Storage> {
    store: S,
    controller: AppController,
    share_base: Url,
}

impl App<Storage> {
    pub async fn open(settings: &Settings, today: Option<NaiveDate>) -> Result<Self> {
        let database_url = settings.resolved_database_url();
        let store = Storage::new(&database_url).await.map_err(|error| {
            tracing::error!(
                %database_url,
                %error,
                "failed to open SQLite database; verify parent directory exists and permissions are correct"
            );
            error
        })?;
        Self::with_store(store, settings, today).await
    }
}

impl<S: KeyValueStore> App<S> {
    pub async fn with_store(store: S, settings: &Settings, today: Option<NaiveDate>) -> Result<Self> {
        let clock: Box<dyn Clock> = match today {
            Some(date) => Box::new(FixedClock(date)),
            None => Box::new(SystemClock),
        };
        let options = ControllerOptions {
            current_user: RequesterId::new(settings.current_user_id.clone()),
            admin_mode: settings.admin_mode,
        };
        let controller = bootstrap(&store, clock, options).await?;
        Ok(Self {
            store,
            controller,
            share_base: settings.share_base()?,
        })
    }

    pub fn controller(&self) -> &AppController {
        &self.controller
    }

    pub fn share_base(&self) -> &Url {
        &self.share_base
    }

    /// Dispatches a command and persists a full snapshot when it asks for one.
    ///
    /// Rejected commands surface as a [`shared::error::CoreError`] inside the
    /// returned error and leave the state untouched.
    pub async fn apply(&mut self, command: Command) -> Result<Vec<Effect>> {
        let effects = self.controller.dispatch(command)?;
        if effects.contains(&Effect::Persist) {
            save_state(&self.store, self.controller.state())
                .await
                .context("failed to persist state")?;
        }
        Ok(effects)
    }

    pub async fn apply_all(&mut self, commands: impl IntoIterator<Item = Command>) -> Result<Vec<Effect>> {
        let mut effects = Vec::new();
        for command in commands {
            effects.extend(self.apply(command).await?);
        }
        Ok(effects)
    }
}

/// Notifications produced by a batch of effects, in order.
pub fn notifications(effects: &[Effect]) -> impl Iterator<Item = &str> {
    effects.iter().filter_map(|effect| match effect {
        Effect::Notify(message) => Some(message.as_str()),
        _ => None,
    })
}
