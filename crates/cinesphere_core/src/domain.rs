//! crates/cinesphere_core/src/domain.rs
//!
//! Defines the pure, core data structures for the catalog client.
//! These structs are independent of any wire or storage format; the adapters
//! translate to and from the backend's JSON shapes.

/// Sentinel genre that disables genre filtering.
pub const ALL_GENRES: &str = "All";

/// Genres offered by the movie list filter, sentinel first.
pub const FILTER_GENRES: [&str; 10] = [
    ALL_GENRES,
    "Action",
    "Comedy",
    "Drama",
    "Horror",
    "Sci-Fi",
    "Romance",
    "Thriller",
    "Documentary",
    "Animation",
];

/// Genres a movie may be tagged with through the add/update forms.
pub const FORM_GENRES: [&str; 20] = [
    "Action",
    "Adventure",
    "Animation",
    "Biography",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "History",
    "Horror",
    "Musical",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Sports",
    "Thriller",
    "War",
    "Western",
];

/// A movie as stored by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: String,
    pub poster: String,
    pub title: String,
    pub genres: Vec<String>,
    /// Runtime in minutes.
    pub duration: u32,
    pub release_year: i32,
    /// 0-10 with one decimal of precision.
    pub rating: f64,
    pub summary: String,
    /// Email of the account that created the movie.
    pub owner_email: String,
}

impl Movie {
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

/// A validated movie payload for create and update requests.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDraft {
    pub poster: String,
    pub title: String,
    pub genres: Vec<String>,
    pub duration: u32,
    pub release_year: i32,
    pub rating: f64,
    pub summary: String,
    pub owner_email: String,
}

/// A user-to-movie pairing with a copy of the movie's display fields taken
/// when the favorite was created. The copy is never refreshed.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteRecord {
    pub movie_id: String,
    pub user_email: String,
    pub poster: String,
    pub title: String,
    pub genres: Vec<String>,
    pub duration: u32,
    pub release_year: i32,
    pub rating: f64,
    pub summary: String,
}

impl FavoriteRecord {
    /// Captures the display fields of `movie` for `user`.
    pub fn snapshot(movie: &Movie, user: &SessionUser) -> Self {
        Self {
            movie_id: movie.id.clone(),
            user_email: user.email.clone(),
            poster: movie.poster.clone(),
            title: movie.title.clone(),
            genres: movie.genres.clone(),
            duration: movie.duration,
            release_year: movie.release_year,
            rating: movie.rating,
            summary: movie.summary.clone(),
        }
    }

    /// True when this record marks `movie_id` as a favorite of `email`.
    pub fn belongs_to(&self, movie_id: &str, email: &str) -> bool {
        self.movie_id == movie_id && self.user_email == email
    }
}

/// A blog/spotlight post. Content is passed through as fetched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Blog {
    pub id: String,
    pub title: String,
    pub author: String,
    pub author_bio: Option<String>,
    pub author_image: Option<String>,
    pub date: String,
    pub category: String,
    pub excerpt: String,
    pub image: Option<String>,
    pub read_time: Option<u32>,
    pub content: String,
    pub tags: Vec<String>,
}

// Represents the signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    /// Doubles as the user identifier for ownership and favorites.
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parses the persisted form; anything other than "light"/"dark" is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}
