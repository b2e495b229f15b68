//! crates/cinesphere_core/src/theme.rs
//!
//! Light/dark preference: read once from storage at startup, written back
//! only when it actually changes.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, warn};

use crate::domain::Theme;
use crate::ports::ThemeStore;

#[derive(Clone)]
pub struct ThemeState {
    store: Arc<dyn ThemeStore>,
    tx: Arc<watch::Sender<Theme>>,
}

impl ThemeState {
    /// Stored preference first, then the system preference, then light.
    pub fn init(store: Arc<dyn ThemeStore>, prefers_dark: bool) -> Self {
        let stored = store.load().unwrap_or_else(|e| {
            warn!("Could not read stored theme: {:?}", e);
            None
        });
        let initial = stored.unwrap_or(if prefers_dark { Theme::Dark } else { Theme::Light });
        let (tx, _rx) = watch::channel(initial);
        Self { store, tx: Arc::new(tx) }
    }

    pub fn current(&self) -> Theme {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.tx.subscribe()
    }

    pub fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        self.set(next);
        next
    }

    /// Applies `theme`; storage is only touched when the value changes.
    pub fn set(&self, theme: Theme) {
        let changed = self.tx.send_if_modified(|current| {
            if *current == theme {
                false
            } else {
                *current = theme;
                true
            }
        });
        if changed {
            if let Err(e) = self.store.save(theme) {
                error!("Failed to persist theme {}: {:?}", theme.as_str(), e);
            }
        }
    }
}
