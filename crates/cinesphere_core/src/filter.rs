//! crates/cinesphere_core/src/filter.rs
//!
//! Client-side narrowing of an already-fetched movie collection by a
//! free-text title match and a single genre.

use url::form_urlencoded;

use crate::domain::{Movie, ALL_GENRES};

const GENRE_PARAM: &str = "genre";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenreFilter {
    #[default]
    All,
    Only(String),
}

impl GenreFilter {
    /// `""` and the `"All"` sentinel both disable genre filtering.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_GENRES {
            GenreFilter::All
        } else {
            GenreFilter::Only(value.to_string())
        }
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Only(genre) => movie.has_genre(genre),
        }
    }

    /// The label of the active genre button.
    pub fn label(&self) -> &str {
        match self {
            GenreFilter::All => ALL_GENRES,
            GenreFilter::Only(genre) => genre,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MovieFilter {
    pub text: String,
    pub genre: GenreFilter,
}

impl MovieFilter {
    pub fn new(text: impl Into<String>, genre: GenreFilter) -> Self {
        Self { text: text.into(), genre }
    }

    /// Seeds the genre from a URL query such as `genre=Sci-Fi`.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let genre = form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == GENRE_PARAM)
            .map(|(_, value)| GenreFilter::parse(&value))
            .unwrap_or_default();
        Self { text: String::new(), genre }
    }

    /// The query string reflecting the genre, or `None` when it should be cleared.
    pub fn to_query(&self) -> Option<String> {
        match &self.genre {
            GenreFilter::All => None,
            GenreFilter::Only(genre) => Some(
                form_urlencoded::Serializer::new(String::new())
                    .append_pair(GENRE_PARAM, genre)
                    .finish(),
            ),
        }
    }

    fn title_matches(&self, movie: &Movie) -> bool {
        movie.title.to_lowercase().contains(&self.text.to_lowercase())
    }

    /// Both the title text and the genre must match.
    pub fn matches(&self, movie: &Movie) -> bool {
        self.title_matches(movie) && self.genre.matches(movie)
    }

    pub fn apply<'a>(&self, movies: &'a [Movie]) -> Vec<&'a Movie> {
        movies.iter().filter(|movie| self.matches(movie)).collect()
    }
}
