//! crates/cinesphere_core/src/testing.rs
//!
//! In-memory port implementations shared by the unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Blog, FavoriteRecord, Movie, MovieDraft, SessionUser, Theme};
use crate::ports::{
    CatalogService, Confirmer, IdentityService, Notification, NotificationKind, Notifier,
    PortError, PortResult, ThemeStore,
};

pub fn movie(id: &str, title: &str, genres: &[&str], owner: &str) -> Movie {
    Movie {
        id: id.to_string(),
        poster: format!("https://img.example.com/{id}.jpg"),
        title: title.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        duration: 120,
        release_year: 2021,
        rating: 8.2,
        summary: format!("{title} summary text"),
        owner_email: owner.to_string(),
    }
}

pub fn user(email: &str) -> SessionUser {
    SessionUser { email: email.to_string(), display_name: None, photo_url: None }
}

pub fn blog(id: &str, category: &str) -> Blog {
    Blog {
        id: id.to_string(),
        title: format!("Post {id}"),
        author: "Critic".to_string(),
        category: category.to_string(),
        ..Blog::default()
    }
}

//=========================================================================================
// Catalog
//=========================================================================================

#[derive(Default)]
struct CatalogState {
    movies: Vec<Movie>,
    featured: Vec<Movie>,
    favorites: Vec<FavoriteRecord>,
    blogs: Vec<Blog>,
    calls: Vec<String>,
    failing: HashSet<&'static str>,
    rejection: Option<String>,
}

/// A backend kept in memory. Every request is logged as `"METHOD /path"`.
#[derive(Default)]
pub struct FakeCatalog {
    state: Mutex<CatalogState>,
    offline: AtomicBool,
}

impl FakeCatalog {
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        let catalog = Self::default();
        catalog.state.lock().unwrap().movies = movies;
        catalog
    }

    pub fn set_featured(&self, movies: Vec<Movie>) {
        self.state.lock().unwrap().featured = movies;
    }

    pub fn set_blogs(&self, blogs: Vec<Blog>) {
        self.state.lock().unwrap().blogs = blogs;
    }

    pub fn insert_favorite(&self, record: FavoriteRecord) {
        self.state.lock().unwrap().favorites.push(record);
    }

    /// Every request fails as if the network were down.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Requests whose label starts with `op` (e.g. `"GET /favorites"`) fail.
    pub fn fail(&self, op: &'static str) {
        self.state.lock().unwrap().failing.insert(op);
    }

    /// Non-2xx responses carry `message`.
    pub fn reject_with(&self, message: &str) {
        self.state.lock().unwrap().rejection = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn favorites(&self) -> Vec<FavoriteRecord> {
        self.state.lock().unwrap().favorites.clone()
    }

    pub fn movies(&self) -> Vec<Movie> {
        self.state.lock().unwrap().movies.clone()
    }

    fn enter(&self, call: String) -> PortResult<std::sync::MutexGuard<'_, CatalogState>> {
        let mut state = self.state.lock().unwrap();
        let failing = state.failing.iter().any(|op| call.starts_with(op));
        state.calls.push(call);
        if self.offline.load(Ordering::SeqCst) {
            return Err(PortError::Unavailable("network is unreachable".to_string()));
        }
        if failing {
            let message = state.rejection.clone().unwrap_or_default();
            return Err(PortError::Rejected { status: 500, message });
        }
        Ok(state)
    }
}

fn movie_from_draft(id: String, draft: &MovieDraft) -> Movie {
    Movie {
        id,
        poster: draft.poster.clone(),
        title: draft.title.clone(),
        genres: draft.genres.clone(),
        duration: draft.duration,
        release_year: draft.release_year,
        rating: draft.rating,
        summary: draft.summary.clone(),
        owner_email: draft.owner_email.clone(),
    }
}

#[async_trait]
impl CatalogService for FakeCatalog {
    async fn list_movies(&self) -> PortResult<Vec<Movie>> {
        let state = self.enter("GET /movies".to_string())?;
        Ok(state.movies.clone())
    }

    async fn featured_movies(&self) -> PortResult<Vec<Movie>> {
        let state = self.enter("GET /movies/featured".to_string())?;
        Ok(state.featured.clone())
    }

    async fn get_movie(&self, id: &str) -> PortResult<Movie> {
        let state = self.enter(format!("GET /movies/{id}"))?;
        state
            .movies
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Movie {id} not found")))
    }

    async fn create_movie(&self, draft: &MovieDraft) -> PortResult<()> {
        let mut state = self.enter("POST /movies".to_string())?;
        let id = format!("m{}", state.movies.len() + 1);
        state.movies.push(movie_from_draft(id, draft));
        Ok(())
    }

    async fn update_movie(&self, id: &str, draft: &MovieDraft) -> PortResult<()> {
        let mut state = self.enter(format!("PUT /movies/{id}"))?;
        let slot = state
            .movies
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| PortError::NotFound(format!("Movie {id} not found")))?;
        *slot = movie_from_draft(id.to_string(), draft);
        Ok(())
    }

    async fn delete_movie(&self, id: &str) -> PortResult<()> {
        let mut state = self.enter(format!("DELETE /movies/{id}"))?;
        state.movies.retain(|m| m.id != id);
        Ok(())
    }

    async fn favorite_status(&self, movie_id: &str) -> PortResult<Option<FavoriteRecord>> {
        let state = self.enter(format!("GET /favorites/{movie_id}"))?;
        Ok(state.favorites.iter().find(|f| f.movie_id == movie_id).cloned())
    }

    async fn list_favorites(&self) -> PortResult<Vec<FavoriteRecord>> {
        let state = self.enter("GET /favorites".to_string())?;
        Ok(state.favorites.clone())
    }

    async fn add_favorite(&self, record: &FavoriteRecord) -> PortResult<()> {
        let mut state = self.enter("POST /favorites".to_string())?;
        state.favorites.push(record.clone());
        Ok(())
    }

    async fn remove_favorite(&self, movie_id: &str) -> PortResult<()> {
        let mut state = self.enter(format!("DELETE /favorites/{movie_id}"))?;
        state.favorites.retain(|f| f.movie_id != movie_id);
        Ok(())
    }

    async fn list_blogs(&self) -> PortResult<Vec<Blog>> {
        let state = self.enter("GET /blogs".to_string())?;
        Ok(state.blogs.clone())
    }

    async fn get_blog(&self, id: &str) -> PortResult<Blog> {
        let state = self.enter(format!("GET /blogs/{id}"))?;
        state
            .blogs
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Blog {id} not found")))
    }
}

//=========================================================================================
// Notifications and prompts
//=========================================================================================

#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.all().into_iter().map(|n| n.message).collect()
    }

    pub fn count(&self, kind: NotificationKind) -> usize {
        self.all().iter().filter(|n| n.kind == kind).count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

/// Answers every prompt with a fixed reply and counts how often it was asked.
pub struct ScriptedConfirmer {
    answer: bool,
    asked: AtomicUsize,
}

impl ScriptedConfirmer {
    pub fn answering(answer: bool) -> Self {
        Self { answer, asked: AtomicUsize::new(0) }
    }

    pub fn asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

//=========================================================================================
// Theme storage
//=========================================================================================

#[derive(Default)]
pub struct MemoryThemeStore {
    stored: Mutex<Option<Theme>>,
    writes: AtomicUsize,
    broken: AtomicBool,
}

impl MemoryThemeStore {
    pub fn holding(theme: Theme) -> Self {
        let store = Self::default();
        *store.stored.lock().unwrap() = Some(theme);
        store
    }

    pub fn break_writes(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    pub fn stored(&self) -> Option<Theme> {
        *self.stored.lock().unwrap()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> PortResult<Option<Theme>> {
        Ok(*self.stored.lock().unwrap())
    }

    fn save(&self, theme: Theme) -> PortResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.broken.load(Ordering::SeqCst) {
            return Err(PortError::Unexpected("storage is full".to_string()));
        }
        *self.stored.lock().unwrap() = Some(theme);
        Ok(())
    }
}

//=========================================================================================
// Identity
//=========================================================================================

#[derive(Default)]
pub struct FakeIdentity {
    accounts: Mutex<HashMap<String, (String, SessionUser)>>,
    current: Mutex<Option<SessionUser>>,
    offline: AtomicBool,
}

impl FakeIdentity {
    pub fn with_account(email: &str, password: &str) -> Self {
        let identity = Self::default();
        identity
            .accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), (password.to_string(), user(email)));
        identity
    }

    pub fn signed_in_as(email: &str) -> Self {
        let identity = Self::with_account(email, "Secret1");
        *identity.current.lock().unwrap() = Some(user(email));
        identity
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> PortResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(PortError::Unavailable("identity provider unreachable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityService for FakeIdentity {
    async fn current_user(&self) -> PortResult<Option<SessionUser>> {
        self.check_online()?;
        Ok(self.current.lock().unwrap().clone())
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> PortResult<SessionUser> {
        self.check_online()?;
        let accounts = self.accounts.lock().unwrap();
        match accounts.get(email) {
            Some((stored, account)) if stored == password => {
                *self.current.lock().unwrap() = Some(account.clone());
                Ok(account.clone())
            }
            _ => Err(PortError::Unauthorized),
        }
    }

    async fn sign_in_with_google(&self, id_token: &str) -> PortResult<SessionUser> {
        self.check_online()?;
        if id_token.is_empty() {
            return Err(PortError::Unauthorized);
        }
        let account = user(&format!("{id_token}@gmail.com"));
        *self.current.lock().unwrap() = Some(account.clone());
        Ok(account)
    }

    async fn create_user(&self, email: &str, password: &str) -> PortResult<SessionUser> {
        self.check_online()?;
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email) {
            return Err(PortError::Rejected { status: 400, message: "EMAIL_EXISTS".to_string() });
        }
        let account = user(email);
        accounts.insert(email.to_string(), (password.to_string(), account.clone()));
        *self.current.lock().unwrap() = Some(account.clone());
        Ok(account)
    }

    async fn update_profile(&self, display_name: &str, photo_url: &str) -> PortResult<SessionUser> {
        self.check_online()?;
        let mut current = self.current.lock().unwrap();
        let account = current.as_mut().ok_or(PortError::Unauthorized)?;
        account.display_name = Some(display_name.to_string());
        account.photo_url = Some(photo_url.to_string());
        Ok(account.clone())
    }

    async fn sign_out(&self) -> PortResult<()> {
        self.check_online()?;
        *self.current.lock().unwrap() = None;
        Ok(())
    }
}
