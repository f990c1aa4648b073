//! Theme slice: a light/dark preference persisted as a raw string.

use std::sync::Arc;

use shopfront_core::{SmallVec, smallvec};
use shopfront_core::effect::Effect;
use shopfront_core::environment::KeyValueStore;
use shopfront_core::reducer::Reducer;

use crate::constants::THEME_KEY;
use crate::types::ThemeMode;

#[derive(Clone)]
pub struct ThemeEnvironment {
    pub storage: Arc<dyn KeyValueStore>,
}

impl ThemeEnvironment {
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeState {
    pub mode: ThemeMode,
    pub loading: bool,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self { mode: ThemeMode::Light, loading: true }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ThemeAction {
    /// Restore the persisted preference.
    LoadPreference,
    PreferenceLoaded { mode: ThemeMode },
    /// Switch modes. Applied once the preference has been written
    /// (or the write has failed and been logged).
    SetMode(ThemeMode),
    ModeSet(ThemeMode),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeReducer;

impl ThemeReducer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for ThemeReducer {
    type State = ThemeState;
    type Action = ThemeAction;
    type Environment = ThemeEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        environment: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ThemeAction::LoadPreference => {
                let storage = Arc::clone(&environment.storage);
                smallvec![Effect::Future(Box::pin(async move {
                    let stored = match storage.get(THEME_KEY).await {
                        Ok(stored) => stored,
                        Err(error) => {
                            tracing::warn!(%error, "Failed to read theme preference, using light");
                            None
                        }
                    };
                    let mode = ThemeMode::from_stored(stored.as_deref());
                    Some(ThemeAction::PreferenceLoaded { mode })
                }))]
            }
            ThemeAction::PreferenceLoaded { mode } => {
                state.loading = false;
                state.mode = mode;
                SmallVec::new()
            }
            ThemeAction::SetMode(mode) => {
                let storage = Arc::clone(&environment.storage);
                smallvec![Effect::Future(Box::pin(async move {
                    if let Err(error) = storage.set(THEME_KEY, mode.as_str().to_string()).await {
                        tracing::warn!(%error, "Failed to persist theme preference");
                    }
                    Some(ThemeAction::ModeSet(mode))
                }))]
            }
            ThemeAction::ModeSet(mode) => {
                state.mode = mode;
                SmallVec::new()
            }
        }
    }
}
