//! services/client/src/app.rs
//!
//! Defines the application's shared state: every port adapter plus the
//! observable session, theme and rating state the views share.

use crate::adapters::{
    ConsoleNotifier, FileThemeStore, IdentityToolkitAdapter, RestCatalogAdapter, StdinConfirmer,
};
use crate::config::Config;
use crate::error::ClientError;
use cinesphere_core::ports::{CatalogService, Confirmer, IdentityService, Notifier, ThemeStore};
use cinesphere_core::{RatingSelection, SessionHolder, ThemeState};
use std::sync::Arc;
use tracing::info;

//=========================================================================================
// AppState (Shared Across All Views)
//=========================================================================================

/// The shared application state, created once at startup and handed to each view.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<dyn CatalogService>,
    pub notifier: Arc<dyn Notifier>,
    pub confirmer: Arc<dyn Confirmer>,
    pub session: SessionHolder,
    pub theme: ThemeState,
    pub rating: RatingSelection,
}

impl AppState {
    /// Wires the production adapters from the loaded configuration.
    pub fn build(config: Arc<Config>, assume_yes: bool) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("cinesphere/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let catalog = Arc::new(RestCatalogAdapter::new(http.clone(), config.api_base_url.clone()));
        let identity = Arc::new(IdentityToolkitAdapter::new(
            http,
            config.identity_base_url.clone(),
            config.identity_api_key.clone(),
        ));
        let store = Arc::new(FileThemeStore::new(config.theme_path.clone()));
        info!("Catalog backend at {}", config.api_base_url);

        Ok(Self::from_parts(
            config,
            catalog,
            identity,
            store,
            Arc::new(ConsoleNotifier),
            Arc::new(StdinConfirmer::new(assume_yes)),
        ))
    }

    /// Assembles the state around arbitrary adapters.
    pub fn from_parts(
        config: Arc<Config>,
        catalog: Arc<dyn CatalogService>,
        identity: Arc<dyn IdentityService>,
        theme_store: Arc<dyn ThemeStore>,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Self {
        let theme = ThemeState::init(theme_store, config.prefers_dark);
        Self {
            catalog,
            notifier,
            confirmer,
            session: SessionHolder::new(identity),
            theme,
            rating: RatingSelection::new(),
            config,
        }
    }
}
