pub mod console;
pub mod identity;
pub mod rest;
pub mod theme_file;

pub use console::{ConsoleNotifier, StdinConfirmer};
pub use identity::IdentityToolkitAdapter;
pub use rest::RestCatalogAdapter;
pub use theme_file::FileThemeStore;
