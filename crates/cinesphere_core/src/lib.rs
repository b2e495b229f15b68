pub mod blogs;
pub mod detail;
pub mod domain;
pub mod editor;
pub mod favorites;
pub mod filter;
pub mod forms;
pub mod list;
pub mod loader;
pub mod ports;
pub mod rating;
pub mod router;
pub mod session;
pub mod theme;

#[cfg(test)]
pub(crate) mod testing;

pub use domain::{Blog, FavoriteRecord, Movie, MovieDraft, SessionUser, Theme};
pub use loader::{Loadable, ViewScope};
pub use ports::{
    CatalogService, Confirmer, IdentityService, Notification, NotificationKind, Notifier,
    PortError, PortResult, ThemeStore,
};
pub use rating::{RatingSelection, RatingSelector};
pub use router::{resolve, Route, RouteDecision};
pub use session::{SessionHolder, SessionStatus};
pub use theme::ThemeState;
