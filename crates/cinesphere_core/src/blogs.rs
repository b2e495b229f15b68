//! crates/cinesphere_core/src/blogs.rs
//!
//! Blog list with a category filter, and the single-post view.

use std::sync::Arc;

use tracing::error;

use crate::domain::{Blog, ALL_GENRES};
use crate::loader::{Loadable, ViewScope};
use crate::ports::{CatalogService, Notification, Notifier, PortError};

pub struct BlogsView {
    catalog: Arc<dyn CatalogService>,
    notifier: Arc<dyn Notifier>,
    scope: ViewScope,
    blogs: Loadable<Vec<Blog>>,
    category: String,
}

impl BlogsView {
    pub fn mount(catalog: Arc<dyn CatalogService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            catalog,
            notifier,
            scope: ViewScope::new(),
            blogs: Loadable::Loading,
            category: ALL_GENRES.to_string(),
        }
    }

    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }

    pub async fn load(&mut self) {
        let Some(result) = self.scope.run(self.catalog.list_blogs()).await else {
            return;
        };
        self.blogs = match result {
            Ok(blogs) => Loadable::Ready(blogs),
            Err(e) => {
                error!("Error fetching blogs: {:?}", e);
                self.notifier.notify(Notification::error("Failed to load blogs"));
                Loadable::Failed(e.to_string())
            }
        };
    }

    /// "All" followed by each category in the order first seen.
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_GENRES.to_string()];
        for blog in self.blogs.ready().into_iter().flatten() {
            if !categories.contains(&blog.category) {
                categories.push(blog.category.clone());
            }
        }
        categories
    }

    pub fn select_category(&mut self, category: &str) {
        self.category = category.to_string();
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn visible(&self) -> Vec<&Blog> {
        self.blogs
            .ready()
            .into_iter()
            .flatten()
            .filter(|blog| self.category == ALL_GENRES || blog.category == self.category)
            .collect()
    }

    pub fn blogs(&self) -> &Loadable<Vec<Blog>> {
        &self.blogs
    }
}

pub struct BlogDetailView {
    catalog: Arc<dyn CatalogService>,
    scope: ViewScope,
    blog_id: String,
    blog: Loadable<Blog>,
}

impl BlogDetailView {
    pub const NOT_FOUND: &'static str = "Blog post not found";

    pub fn new(catalog: Arc<dyn CatalogService>, blog_id: impl Into<String>) -> Self {
        Self { catalog, scope: ViewScope::new(), blog_id: blog_id.into(), blog: Loadable::Loading }
    }

    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }

    pub async fn load(&mut self) {
        let Some(result) = self.scope.run(self.catalog.get_blog(&self.blog_id)).await else {
            return;
        };
        self.blog = match result {
            Ok(blog) => Loadable::Ready(blog),
            Err(PortError::NotFound(_)) => Loadable::NotFound,
            Err(e) => {
                error!("Error fetching blog details: {:?}", e);
                Loadable::NotFound
            }
        };
    }

    pub fn blog(&self) -> &Loadable<Blog> {
        &self.blog
    }
}
