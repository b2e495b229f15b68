//! crates/cinesphere_core/src/list.rs
//!
//! The all-movies view and the home page's featured strip. The collection is
//! fetched once per mount; all narrowing happens locally via `MovieFilter`.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::{Movie, FILTER_GENRES};
use crate::filter::{GenreFilter, MovieFilter};
use crate::loader::{Loadable, ViewScope};
use crate::ports::{CatalogService, Notification, Notifier};

/// What the list area should show right now.
#[derive(Debug, PartialEq)]
pub enum ListState<'a> {
    Loading,
    Failed,
    /// Nothing satisfies the active filters.
    NoResults,
    Results(Vec<&'a Movie>),
}

pub struct MovieListView {
    catalog: Arc<dyn CatalogService>,
    notifier: Arc<dyn Notifier>,
    scope: ViewScope,
    movies: Loadable<Vec<Movie>>,
    filter: MovieFilter,
}

impl MovieListView {
    /// Mounts the view, seeding the genre filter from the URL query if any.
    pub fn mount(
        catalog: Arc<dyn CatalogService>,
        notifier: Arc<dyn Notifier>,
        query: Option<&str>,
    ) -> Self {
        let filter = query.map(MovieFilter::from_query).unwrap_or_default();
        Self { catalog, notifier, scope: ViewScope::new(), movies: Loadable::Loading, filter }
    }

    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }

    pub async fn load(&mut self) {
        self.movies = Loadable::Loading;
        let Some(result) = self.scope.run(self.catalog.list_movies()).await else {
            return;
        };
        match result {
            Ok(movies) => {
                info!("Loaded {} movies", movies.len());
                self.movies = Loadable::Ready(movies);
            }
            Err(e) => {
                error!("Error fetching movies: {:?}", e);
                self.notifier.notify(Notification::error("Failed to load movies"));
                self.movies = Loadable::Failed(e.to_string());
            }
        }
    }

    /// Re-evaluated on every keystroke; no request is issued.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filter.text = text.into();
    }

    /// Applies a genre button and returns the query string the URL should now
    /// carry, or `None` when the parameter must be cleared.
    pub fn select_genre(&mut self, genre: &str) -> Option<String> {
        self.filter.genre = GenreFilter::parse(genre);
        self.filter.to_query()
    }

    /// The genre buttons in display order, each flagged when it is the active one.
    pub fn genre_buttons(&self) -> Vec<(&'static str, bool)> {
        let active = self.filter.genre.label();
        FILTER_GENRES.iter().map(|genre| (*genre, *genre == active)).collect()
    }

    pub fn filter(&self) -> &MovieFilter {
        &self.filter
    }

    pub fn visible(&self) -> ListState<'_> {
        match &self.movies {
            Loadable::Loading => ListState::Loading,
            Loadable::Failed(_) | Loadable::NotFound => ListState::Failed,
            Loadable::Ready(movies) => {
                let shown = self.filter.apply(movies);
                if shown.is_empty() {
                    ListState::NoResults
                } else {
                    ListState::Results(shown)
                }
            }
        }
    }
}

/// The featured strip on the home page.
pub struct FeaturedView {
    catalog: Arc<dyn CatalogService>,
    scope: ViewScope,
    movies: Loadable<Vec<Movie>>,
}

impl FeaturedView {
    pub fn mount(catalog: Arc<dyn CatalogService>) -> Self {
        Self { catalog, scope: ViewScope::new(), movies: Loadable::Loading }
    }

    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }

    // The home page treats a failed strip as empty, so no notification here.
    pub async fn load(&mut self) {
        let Some(result) = self.scope.run(self.catalog.featured_movies()).await else {
            return;
        };
        self.movies = match result {
            Ok(movies) => Loadable::Ready(movies),
            Err(e) => {
                error!("Error fetching featured movies: {:?}", e);
                Loadable::Failed(e.to_string())
            }
        };
    }

    pub fn movies(&self) -> &Loadable<Vec<Movie>> {
        &self.movies
    }
}
