//! crates/cinesphere_core/src/ports.rs
//!
//! Defines the service contracts (traits) for every collaborator the client
//! talks to: the catalog backend, the identity provider, local storage, the
//! notification surface and the confirmation prompt. The views depend only on
//! these traits, so the core stays independent of HTTP and terminals.

use async_trait::async_trait;

use crate::domain::{Blog, FavoriteRecord, Movie, MovieDraft, SessionUser, Theme};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    /// The request never produced a response (offline, DNS, refused connection).
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    /// The backend answered with a non-2xx status.
    #[error("Request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl PortError {
    /// The backend-supplied explanation, if the error carries one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            PortError::Rejected { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait CatalogService: Send + Sync {
    // --- Movies ---
    async fn list_movies(&self) -> PortResult<Vec<Movie>>;

    async fn featured_movies(&self) -> PortResult<Vec<Movie>>;

    /// Fails with `PortError::NotFound` when the backend has no such movie.
    async fn get_movie(&self, id: &str) -> PortResult<Movie>;

    async fn create_movie(&self, draft: &MovieDraft) -> PortResult<()>;

    async fn update_movie(&self, id: &str, draft: &MovieDraft) -> PortResult<()>;

    async fn delete_movie(&self, id: &str) -> PortResult<()>;

    // --- Favorites ---
    /// The stored favorite for `movie_id`, if any. Callers decide whose it is.
    async fn favorite_status(&self, movie_id: &str) -> PortResult<Option<FavoriteRecord>>;

    async fn list_favorites(&self) -> PortResult<Vec<FavoriteRecord>>;

    async fn add_favorite(&self, record: &FavoriteRecord) -> PortResult<()>;

    async fn remove_favorite(&self, movie_id: &str) -> PortResult<()>;

    // --- Blogs ---
    async fn list_blogs(&self) -> PortResult<Vec<Blog>>;

    async fn get_blog(&self, id: &str) -> PortResult<Blog>;
}

#[async_trait]
pub trait IdentityService: Send + Sync {
    /// The user the provider currently considers signed in.
    async fn current_user(&self) -> PortResult<Option<SessionUser>>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> PortResult<SessionUser>;

    /// Exchanges a Google ID token for a provider session.
    async fn sign_in_with_google(&self, id_token: &str) -> PortResult<SessionUser>;

    async fn create_user(&self, email: &str, password: &str) -> PortResult<SessionUser>;

    async fn update_profile(&self, display_name: &str, photo_url: &str) -> PortResult<SessionUser>;

    async fn sign_out(&self) -> PortResult<()>;
}

/// Durable storage for the light/dark preference.
pub trait ThemeStore: Send + Sync {
    fn load(&self) -> PortResult<Option<Theme>>;
    fn save(&self, theme: Theme) -> PortResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
}

/// A transient user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Error, message: message.into() }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Asks the user to confirm a destructive action.
pub trait Confirmer: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}
