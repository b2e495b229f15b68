//! services/client/src/adapters/rest.rs
//!
//! This module contains the catalog adapter, the concrete implementation of
//! the `CatalogService` port from the core crate. It talks to the movie
//! backend's REST API with `reqwest` and maps its JSON shapes onto the domain.
//!
//! No timeouts and no retries: a failed request is reported once and left to
//! the calling view.

use async_trait::async_trait;
use cinesphere_core::domain::{Blog, FavoriteRecord, Movie, MovieDraft};
use cinesphere_core::ports::{CatalogService, PortError, PortResult};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A REST adapter that implements the `CatalogService` port.
#[derive(Clone)]
pub struct RestCatalogAdapter {
    http: Client,
    base_url: Url,
}

impl RestCatalogAdapter {
    /// Creates a new `RestCatalogAdapter` rooted at `base_url`.
    pub fn new(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    fn endpoint(&self, segments: &[&str]) -> PortResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PortError::Unexpected(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> PortResult<T> {
        let url = self.endpoint(segments)?;
        debug!("GET {}", url);
        let response = self.http.get(url).send().await.map_err(transport)?;
        let response = check(response).await?;
        response.json::<T>().await.map_err(decode)
    }
}

//=========================================================================================
// Error Mapping
//=========================================================================================

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn transport(e: reqwest::Error) -> PortError {
    PortError::Unavailable(e.to_string())
}

fn decode(e: reqwest::Error) -> PortError {
    PortError::Unexpected(format!("Malformed response body: {}", e))
}

/// Turns non-2xx responses into port errors, keeping the backend's message.
async fn check(response: Response) -> PortResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().clone();
    match status {
        StatusCode::NOT_FOUND => Err(PortError::NotFound(url.path().to_string())),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(PortError::Unauthorized),
        _ => {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_default();
            Err(PortError::Rejected { status: status.as_u16(), message })
        }
    }
}

//=========================================================================================
// Wire Records
//=========================================================================================

#[derive(Deserialize)]
struct MovieRecord {
    #[serde(rename = "_id", deserialize_with = "string_or_number")]
    id: String,
    #[serde(rename = "Movie_Poster", default)]
    poster: String,
    #[serde(rename = "Movie_Title")]
    title: String,
    #[serde(rename = "Genre", default)]
    genre: Vec<String>,
    #[serde(rename = "Duration", default)]
    duration: u32,
    #[serde(rename = "Release_Year", default)]
    release_year: i32,
    #[serde(rename = "Rating", default)]
    rating: f64,
    #[serde(rename = "Summary", default)]
    summary: String,
    #[serde(rename = "User_Email", default)]
    user_email: String,
}
impl MovieRecord {
    fn to_domain(self) -> Movie {
        Movie {
            id: self.id,
            poster: self.poster,
            title: self.title,
            genres: self.genre,
            duration: self.duration,
            release_year: self.release_year,
            rating: self.rating,
            summary: self.summary,
            owner_email: self.user_email,
        }
    }
}

#[derive(Serialize)]
struct MovieDraftRecord<'a> {
    #[serde(rename = "Movie_Poster")]
    poster: &'a str,
    #[serde(rename = "Movie_Title")]
    title: &'a str,
    #[serde(rename = "Genre")]
    genre: &'a [String],
    #[serde(rename = "Duration")]
    duration: u32,
    #[serde(rename = "Release_Year")]
    release_year: i32,
    #[serde(rename = "Rating")]
    rating: f64,
    #[serde(rename = "Summary")]
    summary: &'a str,
    #[serde(rename = "User_Email")]
    user_email: &'a str,
}
impl<'a> MovieDraftRecord<'a> {
    fn from_domain(draft: &'a MovieDraft) -> Self {
        Self {
            poster: &draft.poster,
            title: &draft.title,
            genre: &draft.genres,
            duration: draft.duration,
            release_year: draft.release_year,
            rating: draft.rating,
            summary: &draft.summary,
            user_email: &draft.owner_email,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct FavoriteWire {
    #[serde(rename = "movieId", deserialize_with = "string_or_number")]
    movie_id: String,
    #[serde(rename = "User_Email", default)]
    user_email: String,
    #[serde(rename = "Movie_Poster", default)]
    poster: String,
    #[serde(rename = "Movie_Title", default)]
    title: String,
    #[serde(rename = "Genre", default)]
    genre: Vec<String>,
    #[serde(rename = "Duration", default)]
    duration: u32,
    #[serde(rename = "Release_Year", default)]
    release_year: i32,
    #[serde(rename = "Rating", default)]
    rating: f64,
    #[serde(rename = "Summary", default)]
    summary: String,
}
impl FavoriteWire {
    fn to_domain(self) -> FavoriteRecord {
        FavoriteRecord {
            movie_id: self.movie_id,
            user_email: self.user_email,
            poster: self.poster,
            title: self.title,
            genres: self.genre,
            duration: self.duration,
            release_year: self.release_year,
            rating: self.rating,
            summary: self.summary,
        }
    }

    fn from_domain(record: &FavoriteRecord) -> Self {
        Self {
            movie_id: record.movie_id.clone(),
            user_email: record.user_email.clone(),
            poster: record.poster.clone(),
            title: record.title.clone(),
            genre: record.genres.clone(),
            duration: record.duration,
            release_year: record.release_year,
            rating: record.rating,
            summary: record.summary.clone(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlogRecord {
    #[serde(alias = "_id", deserialize_with = "string_or_number")]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
    author_bio: Option<String>,
    author_image: Option<String>,
    #[serde(default)]
    date: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    excerpt: String,
    image: Option<String>,
    #[serde(default)]
    read_time: Option<Value>,
    #[serde(default)]
    content: String,
    #[serde(default)]
    tags: Vec<String>,
}
impl BlogRecord {
    fn to_domain(self) -> Blog {
        Blog {
            id: self.id,
            title: self.title,
            author: self.author,
            author_bio: self.author_bio,
            author_image: self.author_image,
            date: self.date,
            category: self.category,
            excerpt: self.excerpt,
            image: self.image,
            read_time: self.read_time.as_ref().and_then(minutes),
            content: self.content,
            tags: self.tags,
        }
    }
}

/// Read times arrive either as a number or as text like "8 min".
fn minutes(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.split_whitespace().next().and_then(|n| n.parse().ok()),
        _ => None,
    }
}

/// Identifiers are strings for database records and numbers for static content.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("expected an id, found {}", other))),
    }
}

//=========================================================================================
// `CatalogService` Trait Implementation
//=========================================================================================

#[async_trait]
impl CatalogService for RestCatalogAdapter {
    async fn list_movies(&self) -> PortResult<Vec<Movie>> {
        let records: Vec<MovieRecord> = self.get_json(&["movies"]).await?;
        Ok(records.into_iter().map(MovieRecord::to_domain).collect())
    }

    async fn featured_movies(&self) -> PortResult<Vec<Movie>> {
        let records: Vec<MovieRecord> = self.get_json(&["movies", "featured"]).await?;
        Ok(records.into_iter().map(MovieRecord::to_domain).collect())
    }

    async fn get_movie(&self, id: &str) -> PortResult<Movie> {
        let record: Option<MovieRecord> = self.get_json(&["movies", id]).await?;
        record
            .map(MovieRecord::to_domain)
            .ok_or_else(|| PortError::NotFound(format!("Movie {} not found", id)))
    }

    async fn create_movie(&self, draft: &MovieDraft) -> PortResult<()> {
        let url = self.endpoint(&["movies"])?;
        let response = self
            .http
            .post(url)
            .json(&MovieDraftRecord::from_domain(draft))
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }

    async fn update_movie(&self, id: &str, draft: &MovieDraft) -> PortResult<()> {
        let url = self.endpoint(&["movies", id])?;
        let response = self
            .http
            .put(url)
            .json(&MovieDraftRecord::from_domain(draft))
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }

    async fn delete_movie(&self, id: &str) -> PortResult<()> {
        let url = self.endpoint(&["movies", id])?;
        let response = self.http.delete(url).send().await.map_err(transport)?;
        check(response).await?;
        Ok(())
    }

    async fn favorite_status(&self, movie_id: &str) -> PortResult<Option<FavoriteRecord>> {
        match self.get_json::<Option<FavoriteWire>>(&["favorites", movie_id]).await {
            Ok(record) => Ok(record.map(FavoriteWire::to_domain)),
            Err(PortError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn list_favorites(&self) -> PortResult<Vec<FavoriteRecord>> {
        let records: Vec<FavoriteWire> = self.get_json(&["favorites"]).await?;
        Ok(records.into_iter().map(FavoriteWire::to_domain).collect())
    }

    async fn add_favorite(&self, record: &FavoriteRecord) -> PortResult<()> {
        let url = self.endpoint(&["favorites"])?;
        let response = self
            .http
            .post(url)
            .json(&FavoriteWire::from_domain(record))
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }

    async fn remove_favorite(&self, movie_id: &str) -> PortResult<()> {
        let url = self.endpoint(&["favorites", movie_id])?;
        let response = self.http.delete(url).send().await.map_err(transport)?;
        check(response).await?;
        Ok(())
    }

    async fn list_blogs(&self) -> PortResult<Vec<Blog>> {
        let records: Vec<BlogRecord> = self.get_json(&["blogs"]).await?;
        Ok(records.into_iter().map(BlogRecord::to_domain).collect())
    }

    async fn get_blog(&self, id: &str) -> PortResult<Blog> {
        let record: Option<BlogRecord> = self.get_json(&["blogs", id]).await?;
        record
            .map(BlogRecord::to_domain)
            .ok_or_else(|| PortError::NotFound(format!("Blog {} not found", id)))
    }
}
