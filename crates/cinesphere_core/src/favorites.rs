//! crates/cinesphere_core/src/favorites.rs
//!
//! The "my favorites" page: the session user's favorite records, each showing
//! the snapshot taken when it was favorited.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::{FavoriteRecord, SessionUser};
use crate::loader::{Loadable, ViewScope};
use crate::ports::{CatalogService, Notification, Notifier};

pub struct MyFavoritesView {
    catalog: Arc<dyn CatalogService>,
    notifier: Arc<dyn Notifier>,
    scope: ViewScope,
    user: SessionUser,
    favorites: Loadable<Vec<FavoriteRecord>>,
}

impl MyFavoritesView {
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        notifier: Arc<dyn Notifier>,
        user: SessionUser,
    ) -> Self {
        Self { catalog, notifier, scope: ViewScope::new(), user, favorites: Loadable::Loading }
    }

    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }

    pub fn favorites(&self) -> &Loadable<Vec<FavoriteRecord>> {
        &self.favorites
    }

    /// Loads every favorite and keeps the ones stored for the session user.
    pub async fn load(&mut self) {
        let Some(result) = self.scope.run(self.catalog.list_favorites()).await else {
            return;
        };
        self.favorites = match result {
            Ok(records) => {
                let mine: Vec<FavoriteRecord> =
                    records.into_iter().filter(|r| r.user_email == self.user.email).collect();
                info!("Loaded {} favorites for {}", mine.len(), self.user.email);
                Loadable::Ready(mine)
            }
            Err(e) => {
                error!("Error fetching favorites: {:?}", e);
                self.notifier.notify(Notification::error("Failed to load favorites"));
                Loadable::Failed(e.to_string())
            }
        };
    }

    pub async fn remove(&mut self, movie_id: &str) -> bool {
        let Some(result) = self.scope.run(self.catalog.remove_favorite(movie_id)).await else {
            return false;
        };
        match result {
            Ok(()) => {
                if let Some(records) = self.favorites.ready_mut() {
                    records.retain(|r| r.movie_id != movie_id);
                }
                self.notifier.notify(Notification::success("Removed from favorites"));
                true
            }
            Err(e) => {
                error!("Error removing favorite: {:?}", e);
                self.notifier.notify(Notification::error("Failed to remove from favorites"));
                false
            }
        }
    }
}
