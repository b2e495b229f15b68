//! crates/cinesphere_core/src/editor.rs
//!
//! The add-movie and update-movie pages. Both validate locally before any
//! request and read the rating from the shared selection.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::{Movie, SessionUser};
use crate::forms::{FormErrors, FormMode, MovieForm};
use crate::loader::{Loadable, ViewScope};
use crate::ports::{CatalogService, Notification, Notifier, PortError};
use crate::rating::{RatingSelection, RatingSelector};
use crate::router::Route;

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Navigate(Route),
    /// Inline errors; nothing was sent.
    Invalid(FormErrors),
    Blocked,
    Failed,
    Ignored,
}

pub struct AddMovieView {
    catalog: Arc<dyn CatalogService>,
    notifier: Arc<dyn Notifier>,
    scope: ViewScope,
    selector: RatingSelector,
    user: SessionUser,
}

impl AddMovieView {
    /// Mounting resets the shared rating to 0.
    pub fn mount(
        catalog: Arc<dyn CatalogService>,
        notifier: Arc<dyn Notifier>,
        selection: RatingSelection,
        user: SessionUser,
    ) -> Self {
        Self {
            catalog,
            notifier,
            scope: ViewScope::new(),
            selector: RatingSelector::mount(selection),
            user,
        }
    }

    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }

    pub fn selector(&mut self) -> &mut RatingSelector {
        &mut self.selector
    }

    pub async fn submit(&self, form: &MovieForm) -> SubmitOutcome {
        let draft = match form.validate(FormMode::Add, self.selector.selection(), &self.user.email)
        {
            Ok(draft) => draft,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };
        let Some(result) = self.scope.run(self.catalog.create_movie(&draft)).await else {
            return SubmitOutcome::Ignored;
        };
        match result {
            Ok(()) => {
                info!("Added movie '{}'", draft.title);
                self.notifier.notify(Notification::success("Movie added successfully"));
                SubmitOutcome::Navigate(Route::AllMovies)
            }
            Err(e) => {
                error!("Error adding movie: {:?}", e);
                self.notifier.notify(Notification::error("Failed to add movie"));
                SubmitOutcome::Failed
            }
        }
    }
}

pub struct UpdateMovieView {
    catalog: Arc<dyn CatalogService>,
    notifier: Arc<dyn Notifier>,
    scope: ViewScope,
    selector: RatingSelector,
    movie_id: String,
    user: SessionUser,
    movie: Loadable<Movie>,
}

impl UpdateMovieView {
    pub fn mount(
        catalog: Arc<dyn CatalogService>,
        notifier: Arc<dyn Notifier>,
        selection: RatingSelection,
        movie_id: impl Into<String>,
        user: SessionUser,
    ) -> Self {
        Self {
            catalog,
            notifier,
            scope: ViewScope::new(),
            selector: RatingSelector::mount(selection),
            movie_id: movie_id.into(),
            user,
            movie: Loadable::Loading,
        }
    }

    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }

    pub fn selector(&mut self) -> &mut RatingSelector {
        &mut self.selector
    }

    pub fn movie(&self) -> &Loadable<Movie> {
        &self.movie
    }

    /// Fetches the movie and seeds the rating selection with its rating.
    pub async fn load(&mut self) {
        let Some(result) = self.scope.run(self.catalog.get_movie(&self.movie_id)).await else {
            return;
        };
        self.movie = match result {
            Ok(movie) => {
                self.selector.selection().commit(movie.rating);
                Loadable::Ready(movie)
            }
            Err(PortError::NotFound(_)) => Loadable::NotFound,
            Err(e) => {
                error!("Error fetching movie: {:?}", e);
                self.notifier.notify(Notification::error("Failed to load movie data"));
                Loadable::NotFound
            }
        };
    }

    /// The form prefilled from the loaded movie.
    pub fn form(&self) -> Option<MovieForm> {
        self.movie.ready().map(MovieForm::from_movie)
    }

    pub async fn submit(&self, form: &MovieForm) -> SubmitOutcome {
        let Some(movie) = self.movie.ready() else {
            return SubmitOutcome::Ignored;
        };
        if movie.owner_email != self.user.email {
            warn!("Blocked update of movie {} by a non-owner", self.movie_id);
            self.notifier.notify(Notification::warning("You can only update movies you added"));
            return SubmitOutcome::Blocked;
        }
        let selection = self.selector.selection();
        let draft = match form.validate(FormMode::Update, selection, &movie.owner_email) {
            Ok(draft) => draft,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };
        let Some(result) = self.scope.run(self.catalog.update_movie(&self.movie_id, &draft)).await
        else {
            return SubmitOutcome::Ignored;
        };
        match result {
            Ok(()) => {
                info!("Updated movie {}", self.movie_id);
                self.notifier.notify(Notification::success("Movie updated successfully!"));
                SubmitOutcome::Navigate(Route::MovieDetail(self.movie_id.clone()))
            }
            Err(e) => {
                error!("Error updating movie: {:?}", e);
                let message = e.server_message().unwrap_or("Failed to update movie").to_string();
                self.notifier.notify(Notification::error(message));
                SubmitOutcome::Failed
            }
        }
    }
}
