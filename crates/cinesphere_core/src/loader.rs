//! crates/cinesphere_core/src/loader.rs
//!
//! Per-view data loading state and the teardown guard that keeps a view from
//! applying responses that arrive after it has been navigated away from.

use std::future::Future;

use tokio_util::sync::CancellationToken;

/// The lifecycle of one piece of fetched view data.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Loadable<T> {
    #[default]
    Loading,
    Ready(T),
    NotFound,
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }
}

/// Lifetime of a mounted view. Cloning shares the same teardown signal.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the view as unmounted. Pending and future `run` calls yield `None`.
    pub fn teardown(&self) {
        self.token.cancel();
    }

    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Drives `fut` unless the view is torn down first.
    ///
    /// Returns `None` when teardown wins the race or has already happened, in
    /// which case the caller must drop the result instead of applying it.
    pub async fn run<F, T>(&self, fut: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        if self.token.is_cancelled() {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            value = fut => {
                if self.token.is_cancelled() { None } else { Some(value) }
            }
        }
    }
}
