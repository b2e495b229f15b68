//! crates/cinesphere_core/src/router.rs
//!
//! Maps client paths to views and gates the session-only ones.

use crate::session::SessionStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    AllMovies,
    MovieDetail(String),
    AddMovie,
    UpdateMovie(String),
    MyFavorites,
    Blogs,
    BlogDetail(String),
    Login,
    Register,
    NotFound,
}

impl Route {
    /// Parses a path, ignoring any query string and trailing slash.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["all-movies"] => Route::AllMovies,
            ["all-movies", id] => Route::MovieDetail(id.to_string()),
            ["add-movie"] => Route::AddMovie,
            ["update-movie", id] => Route::UpdateMovie(id.to_string()),
            ["my-favorites"] => Route::MyFavorites,
            ["blog"] | ["blogs"] => Route::Blogs,
            ["blogs", id] => Route::BlogDetail(id.to_string()),
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::AllMovies => "/all-movies".to_string(),
            Route::MovieDetail(id) => format!("/all-movies/{id}"),
            Route::AddMovie => "/add-movie".to_string(),
            Route::UpdateMovie(id) => format!("/update-movie/{id}"),
            Route::MyFavorites => "/my-favorites".to_string(),
            Route::Blogs => "/blogs".to_string(),
            Route::BlogDetail(id) => format!("/blogs/{id}"),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::NotFound => "/404".to_string(),
        }
    }

    pub fn requires_session(&self) -> bool {
        matches!(
            self,
            Route::MovieDetail(_) | Route::AddMovie | Route::UpdateMovie(_) | Route::MyFavorites
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Render(Route),
    /// The session is still being resolved; show a spinner.
    Pending,
    /// Send the user to `to`, returning to `from` after sign-in.
    Redirect { to: Route, from: String },
}

pub fn resolve(path: &str, session: &SessionStatus) -> RouteDecision {
    let route = Route::parse(path);
    if !route.requires_session() {
        return RouteDecision::Render(route);
    }
    match session {
        SessionStatus::Active(_) => RouteDecision::Render(route),
        SessionStatus::Resolving => RouteDecision::Pending,
        SessionStatus::Anonymous => {
            RouteDecision::Redirect { to: Route::Login, from: path.to_string() }
        }
    }
}
