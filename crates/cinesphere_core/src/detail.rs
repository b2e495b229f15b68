//! crates/cinesphere_core/src/detail.rs
//!
//! The movie detail view. It reconciles three independently fetched facts
//! (the movie, whether the session user has favorited it, and whether the
//! session user owns it) into the actions the page offers.
//!
//! The ownership gate only decides what the page lets a user attempt. It is
//! not access control: the backend must enforce ownership on its own.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::{FavoriteRecord, Movie, SessionUser};
use crate::loader::{Loadable, ViewScope};
use crate::ports::{CatalogService, Confirmer, Notification, Notifier, PortError};
use crate::router::Route;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this movie?";

/// What happened after a user action on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Done,
    Navigate(Route),
    /// Stopped on the client with an explanatory notification.
    Blocked,
    /// The user declined the confirmation prompt.
    Cancelled,
    /// The request failed; local state is unchanged.
    Failed,
    /// The view was torn down or has nothing to act on.
    Ignored,
}

pub struct MovieDetailView {
    catalog: Arc<dyn CatalogService>,
    notifier: Arc<dyn Notifier>,
    confirmer: Arc<dyn Confirmer>,
    scope: ViewScope,
    movie_id: String,
    session: Option<SessionUser>,
    movie: Loadable<Movie>,
    is_favorite: bool,
    is_owner: bool,
}

impl MovieDetailView {
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
        movie_id: impl Into<String>,
        session: Option<SessionUser>,
    ) -> Self {
        Self {
            catalog,
            notifier,
            confirmer,
            scope: ViewScope::new(),
            movie_id: movie_id.into(),
            session,
            movie: Loadable::Loading,
            is_favorite: false,
            is_owner: false,
        }
    }

    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }

    pub fn movie(&self) -> &Loadable<Movie> {
        &self.movie
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    pub fn is_owner(&self) -> bool {
        self.is_owner
    }

    /// Fetches the movie, then its favorite status, then derives ownership.
    /// A missing or unreachable movie stops the sequence at "not found".
    pub async fn load(&mut self) {
        self.movie = Loadable::Loading;
        let Some(result) = self.scope.run(self.catalog.get_movie(&self.movie_id)).await else {
            return;
        };
        let movie = match result {
            Ok(movie) => movie,
            Err(PortError::NotFound(_)) => {
                info!("Movie {} does not exist", self.movie_id);
                self.movie = Loadable::NotFound;
                return;
            }
            Err(e) => {
                error!("Error fetching movie details: {:?}", e);
                self.notifier.notify(Notification::error("Failed to load movie details"));
                self.movie = Loadable::NotFound;
                return;
            }
        };
        self.is_owner = self.session.as_ref().is_some_and(|user| user.email == movie.owner_email);
        self.movie = Loadable::Ready(movie);

        let Some(user) = self.session.clone() else {
            return;
        };
        let Some(status) = self.scope.run(self.catalog.favorite_status(&self.movie_id)).await else {
            return;
        };
        match status {
            // Both the movie and the user have to match the stored record.
            Ok(record) => {
                self.is_favorite = record.is_some_and(|r| r.belongs_to(&self.movie_id, &user.email));
            }
            Err(e) => {
                error!("Error checking favorite status: {:?}", e);
                self.notifier.notify(Notification::error("Failed to check favorite status"));
            }
        }
    }

    /// Adds or removes the favorite. The local flag flips only after the
    /// backend confirms.
    pub async fn toggle_favorite(&mut self) -> ActionOutcome {
        let (Some(movie), Some(user)) = (self.movie.ready(), self.session.as_ref()) else {
            return ActionOutcome::Ignored;
        };
        let adding = !self.is_favorite;
        let catalog = Arc::clone(&self.catalog);
        let request = async move {
            if adding {
                let record = FavoriteRecord::snapshot(movie, user);
                catalog.add_favorite(&record).await
            } else {
                catalog.remove_favorite(&movie.id).await
            }
        };
        let Some(result) = self.scope.run(request).await else {
            return ActionOutcome::Ignored;
        };
        match result {
            Ok(()) => {
                self.is_favorite = adding;
                let message = if adding { "Added to favorites" } else { "Removed from favorites" };
                self.notifier.notify(Notification::success(message));
                ActionOutcome::Done
            }
            Err(e) => {
                error!("Error toggling favorite: {:?}", e);
                self.notifier.notify(Notification::error("Failed to update favorites"));
                ActionOutcome::Failed
            }
        }
    }

    pub fn request_update(&self) -> ActionOutcome {
        if self.movie.ready().is_none() {
            return ActionOutcome::Ignored;
        }
        if !self.is_owner {
            warn!("Blocked update of movie {} by a non-owner", self.movie_id);
            self.notifier.notify(Notification::warning("You can only update movies you added"));
            return ActionOutcome::Blocked;
        }
        ActionOutcome::Navigate(Route::UpdateMovie(self.movie_id.clone()))
    }

    /// Deletes after an explicit confirmation; non-owners never get a request.
    pub async fn request_delete(&mut self) -> ActionOutcome {
        if self.movie.ready().is_none() {
            return ActionOutcome::Ignored;
        }
        if !self.is_owner {
            warn!("Blocked delete of movie {} by a non-owner", self.movie_id);
            self.notifier.notify(Notification::warning("You can only delete movies you added"));
            return ActionOutcome::Blocked;
        }
        if !self.confirmer.confirm(DELETE_PROMPT) {
            return ActionOutcome::Cancelled;
        }
        let Some(result) = self.scope.run(self.catalog.delete_movie(&self.movie_id)).await else {
            return ActionOutcome::Ignored;
        };
        match result {
            Ok(()) => {
                info!("Deleted movie {}", self.movie_id);
                self.notifier.notify(Notification::success("Movie deleted successfully"));
                ActionOutcome::Navigate(Route::AllMovies)
            }
            Err(e) => {
                error!("Error deleting movie: {:?}", e);
                self.notifier.notify(Notification::error("Failed to delete movie"));
                ActionOutcome::Failed
            }
        }
    }
}
