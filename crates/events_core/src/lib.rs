//! State and view controller for the campus events app.
//!
//! [`AppController`] owns all mutable state. Render layers read from it and
//! feed user actions back as [`Command`]s; the returned [`Effect`]s tell the
//! runtime when to persist and re-render.

pub mod calendar;
pub mod commands;
pub mod config;
pub mod controller;
pub mod filter;
pub mod matching;
pub mod persistence;
pub mod seed;
pub mod share;
pub mod state;

pub use commands::{requires_persist, Command, Effect};
pub use controller::{AppController, Clock, ControllerOptions, FixedClock, SystemClock};
pub use persistence::{load_state, save_state, LoadedState};
pub use state::{AppState, EventRequests, FilterState, RegistrationSet, ViewState};

use anyhow::Result;
use storage::KeyValueStore;

/// Loads persisted state and reseeds an empty catalogue. The seed is only
/// written back when no stored events record is left that failed to decode.
pub async fn bootstrap(
    store: &dyn KeyValueStore,
    clock: Box<dyn Clock>,
    options: ControllerOptions,
) -> Result<AppController> {
    let loaded = load_state(store).await?;
    let keep_stored_events = loaded.unreadable_events || !loaded.retained_events.is_empty();
    let mut controller = AppController::new(loaded.into_app_state(), clock, options);
    if requires_persist(&controller.ensure_seeded()) {
        if keep_stored_events {
            tracing::warn!("stored events could not be decoded; seed kept in memory only");
        } else {
            save_state(store, controller.state()).await?;
        }
    }
    Ok(controller)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
