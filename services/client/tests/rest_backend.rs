//! services/client/tests/rest_backend.rs
//!
//! Runs the REST catalog adapter, and the core views on top of it, against an
//! in-process axum backend that speaks the same JSON shapes as the real one.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use cinesphere_core::detail::{ActionOutcome, MovieDetailView};
use cinesphere_core::domain::{FavoriteRecord, MovieDraft, SessionUser};
use cinesphere_core::editor::{SubmitOutcome, UpdateMovieView};
use cinesphere_core::forms::MovieForm;
use cinesphere_core::ports::{
    CatalogService, Confirmer, Notification, NotificationKind, Notifier, PortError,
};
use cinesphere_core::RatingSelection;
use client_lib::adapters::RestCatalogAdapter;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;
use url::Url;
use uuid::Uuid;

//=========================================================================================
// Fake Backend
//=========================================================================================

#[derive(Default)]
struct Backend {
    movies: Vec<Value>,
    favorites: Vec<Value>,
}

type Db = Arc<Mutex<Backend>>;

fn movie_json(id: &str, title: &str, owner: &str) -> Value {
    json!({
        "_id": id,
        "Movie_Poster": format!("https://img.example.com/{id}.jpg"),
        "Movie_Title": title,
        "Genre": ["Drama"],
        "Duration": 118,
        "Release_Year": 2019,
        "Rating": 7.4,
        "Summary": "A long enough summary.",
        "User_Email": owner
    })
}

fn find<'a>(items: &'a mut [Value], key: &str, id: &str) -> Option<&'a mut Value> {
    items.iter_mut().find(|item| item[key] == id)
}

async fn list_movies(State(db): State<Db>) -> Json<Value> {
    Json(Value::Array(db.lock().await.movies.clone()))
}

async fn featured(State(db): State<Db>) -> Json<Value> {
    Json(Value::Array(db.lock().await.movies.iter().take(1).cloned().collect()))
}

async fn get_movie(State(db): State<Db>, Path(id): Path<String>) -> Json<Value> {
    let mut backend = db.lock().await;
    Json(find(&mut backend.movies, "_id", &id).cloned().unwrap_or(Value::Null))
}

async fn create_movie(State(db): State<Db>, Json(mut body): Json<Value>) -> Response {
    let id = Uuid::new_v4().to_string();
    body["_id"] = json!(id);
    db.lock().await.movies.push(body);
    (StatusCode::CREATED, Json(json!({ "insertedId": id }))).into_response()
}

async fn update_movie(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    if body["Movie_Title"] == "Forbidden" {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "Title is reserved" })))
            .into_response();
    }
    let mut backend = db.lock().await;
    match find(&mut backend.movies, "_id", &id) {
        Some(stored) => {
            body["_id"] = json!(id);
            *stored = body;
            Json(json!({ "modifiedCount": 1 })).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_movie(State(db): State<Db>, Path(id): Path<String>) -> Json<Value> {
    db.lock().await.movies.retain(|m| m["_id"] != id.as_str());
    Json(json!({ "deletedCount": 1 }))
}

async fn list_favorites(State(db): State<Db>) -> Json<Value> {
    Json(Value::Array(db.lock().await.favorites.clone()))
}

async fn add_favorite(State(db): State<Db>, Json(body): Json<Value>) -> StatusCode {
    db.lock().await.favorites.push(body);
    StatusCode::CREATED
}

async fn favorite_status(State(db): State<Db>, Path(id): Path<String>) -> Json<Value> {
    let mut backend = db.lock().await;
    Json(find(&mut backend.favorites, "movieId", &id).cloned().unwrap_or(Value::Null))
}

async fn remove_favorite(State(db): State<Db>, Path(id): Path<String>) -> Json<Value> {
    db.lock().await.favorites.retain(|f| f["movieId"] != id.as_str());
    Json(json!({ "deletedCount": 1 }))
}

fn blogs_json() -> Value {
    json!([
        { "id": 1, "title": "Festival notes", "author": "Ana", "category": "News",
          "readTime": "5 min read", "content": "Cannes.", "tags": ["festivals"] },
        { "id": 2, "title": "Ten thrillers", "author": "Ben", "category": "Lists",
          "readTime": 7, "content": "Tense.", "tags": [] }
    ])
}

async fn list_blogs() -> Json<Value> {
    Json(blogs_json())
}

async fn get_blog(Path(id): Path<String>) -> Response {
    let blogs = blogs_json();
    match blogs.as_array().and_then(|all| all.iter().find(|b| b["id"].to_string() == id)) {
        Some(blog) => Json(blog.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn spawn_backend(movies: Vec<Value>) -> (Url, Db) {
    let db: Db = Arc::new(Mutex::new(Backend { movies, favorites: Vec::new() }));
    let app = Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/featured", get(featured))
        .route("/movies/{id}", get(get_movie).put(update_movie).delete(delete_movie))
        .route("/favorites", get(list_favorites).post(add_favorite))
        .route("/favorites/{id}", get(favorite_status).delete(remove_favorite))
        .route("/blogs", get(list_blogs))
        .route("/blogs/{id}", get(get_blog))
        .with_state(db.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (Url::parse(&format!("http://{}", addr)).unwrap(), db)
}

fn adapter(base: Url) -> Arc<RestCatalogAdapter> {
    Arc::new(RestCatalogAdapter::new(reqwest::Client::new(), base))
}

//=========================================================================================
// Recording Collaborators
//=========================================================================================

#[derive(Default)]
struct Recorder {
    seen: StdMutex<Vec<Notification>>,
}

impl Recorder {
    fn messages(&self) -> Vec<String> {
        self.seen.lock().unwrap().iter().map(|n| n.message.clone()).collect()
    }
}

impl Notifier for Recorder {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

struct AlwaysYes;

impl Confirmer for AlwaysYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

fn user(email: &str) -> SessionUser {
    SessionUser { email: email.to_string(), display_name: None, photo_url: None }
}

//=========================================================================================
// Tests
//=========================================================================================

#[tokio::test]
async fn lists_and_fetches_movies() {
    let (base, _db) = spawn_backend(vec![
        movie_json("m1", "Parasite", "bong@example.com"),
        movie_json("m2", "Roma", "alfonso@example.com"),
    ])
    .await;
    let catalog = adapter(base);

    let movies = catalog.list_movies().await.unwrap();
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].title, "Parasite");
    assert_eq!(movies[0].owner_email, "bong@example.com");

    let featured = catalog.featured_movies().await.unwrap();
    assert_eq!(featured.len(), 1);

    let roma = catalog.get_movie("m2").await.unwrap();
    assert_eq!(roma.duration, 118);
    assert_eq!(roma.genres, vec!["Drama".to_string()]);
}

#[tokio::test]
async fn null_movie_body_is_not_found() {
    let (base, _db) = spawn_backend(Vec::new()).await;
    let err = adapter(base).get_movie("missing").await.unwrap_err();
    assert!(matches!(err, PortError::NotFound(_)));
}

#[tokio::test]
async fn create_update_delete_round_trip() {
    let (base, db) = spawn_backend(Vec::new()).await;
    let catalog = adapter(base);
    let mut draft = MovieDraft {
        poster: "https://img.example.com/her.jpg".into(),
        title: "Her".into(),
        genres: vec!["Romance".into()],
        duration: 126,
        release_year: 2013,
        rating: 8.0,
        summary: "An operating system falls in love.".into(),
        owner_email: "spike@example.com".into(),
    };

    catalog.create_movie(&draft).await.unwrap();
    let id = catalog.list_movies().await.unwrap()[0].id.clone();
    assert_eq!(db.lock().await.movies[0]["User_Email"], "spike@example.com");

    draft.rating = 8.6;
    catalog.update_movie(&id, &draft).await.unwrap();
    assert_eq!(catalog.get_movie(&id).await.unwrap().rating, 8.6);

    catalog.delete_movie(&id).await.unwrap();
    assert!(catalog.list_movies().await.unwrap().is_empty());

    let err = catalog.update_movie(&id, &draft).await.unwrap_err();
    assert!(matches!(err, PortError::NotFound(_)));
}

#[tokio::test]
async fn rejected_update_surfaces_the_backend_message() {
    let (base, _db) = spawn_backend(vec![movie_json("m1", "Roma", "me@example.com")]).await;
    let notifier = Arc::new(Recorder::default());
    let mut view = UpdateMovieView::mount(
        adapter(base),
        notifier.clone(),
        RatingSelection::new(),
        "m1",
        user("me@example.com"),
    );
    view.load().await;
    let mut form: MovieForm = view.form().unwrap();
    form.title = "Forbidden".into();

    let outcome = view.submit(&form).await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(notifier.messages(), vec!["Title is reserved".to_string()]);
}

#[tokio::test]
async fn favorites_are_stored_checked_and_removed() {
    let (base, _db) = spawn_backend(vec![movie_json("m1", "Roma", "a@example.com")]).await;
    let catalog = adapter(base);
    let movie = catalog.get_movie("m1").await.unwrap();
    let me = user("me@example.com");

    assert_eq!(catalog.favorite_status("m1").await.unwrap(), None);
    catalog.add_favorite(&FavoriteRecord::snapshot(&movie, &me)).await.unwrap();

    let stored = catalog.favorite_status("m1").await.unwrap().unwrap();
    assert!(stored.belongs_to("m1", "me@example.com"));
    assert_eq!(stored.title, "Roma");
    assert_eq!(catalog.list_favorites().await.unwrap().len(), 1);

    catalog.remove_favorite("m1").await.unwrap();
    assert!(catalog.list_favorites().await.unwrap().is_empty());
}

#[tokio::test]
async fn detail_view_toggles_and_deletes_over_http() {
    let (base, db) = spawn_backend(vec![movie_json("m1", "Roma", "me@example.com")]).await;
    let notifier = Arc::new(Recorder::default());
    let mut view = MovieDetailView::new(
        adapter(base),
        notifier.clone(),
        Arc::new(AlwaysYes),
        "m1",
        Some(user("me@example.com")),
    );
    view.load().await;
    assert!(view.is_owner());
    assert!(!view.is_favorite());

    assert_eq!(view.toggle_favorite().await, ActionOutcome::Done);
    assert!(view.is_favorite());
    assert_eq!(db.lock().await.favorites[0]["User_Email"], "me@example.com");

    let outcome = view.request_delete().await;
    assert_eq!(outcome, ActionOutcome::Navigate(cinesphere_core::Route::AllMovies));
    assert!(db.lock().await.movies.is_empty());
    assert_eq!(
        notifier.messages(),
        vec!["Added to favorites".to_string(), "Movie deleted successfully".to_string()]
    );
}

#[tokio::test]
async fn blogs_with_numeric_ids_are_listed_and_fetched() {
    let (base, _db) = spawn_backend(Vec::new()).await;
    let catalog = adapter(base);

    let blogs = catalog.list_blogs().await.unwrap();
    assert_eq!(blogs.len(), 2);
    assert_eq!(blogs[0].id, "1");
    assert_eq!(blogs[0].read_time, Some(5));
    assert_eq!(blogs[1].read_time, Some(7));

    assert_eq!(catalog.get_blog("2").await.unwrap().title, "Ten thrillers");
    assert!(matches!(catalog.get_blog("99").await, Err(PortError::NotFound(_))));
}

#[tokio::test]
async fn unreachable_backend_is_unavailable_and_notified() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let catalog = adapter(Url::parse(&format!("http://{}", addr)).unwrap());

    let err = catalog.list_movies().await.unwrap_err();
    assert!(matches!(err, PortError::Unavailable(_)));

    let notifier = Arc::new(Recorder::default());
    let mut view =
        cinesphere_core::list::MovieListView::mount(catalog, notifier.clone(), None);
    view.load().await;
    assert_eq!(notifier.messages(), vec!["Failed to load movies".to_string()]);
    assert!(notifier
        .seen
        .lock()
        .unwrap()
        .iter()
        .all(|n| n.kind == NotificationKind::Error));
}
