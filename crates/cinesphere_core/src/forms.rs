//! crates/cinesphere_core/src/forms.rs
//!
//! Client-side validation for the movie, login and register forms. Errors are
//! inline field messages; a form that fails validation is never submitted.

use std::collections::BTreeMap;

use chrono::{Datelike, Utc};
use url::Url;

use crate::domain::{Movie, MovieDraft, FORM_GENRES};
use crate::rating::RatingSelection;

/// Lowest rating a new movie may be submitted with.
pub const MIN_NEW_RATING: f64 = 1.0;

/// Number of selectable release years, ending at the current year.
pub const RELEASE_YEAR_SPAN: i32 = 150;
pub const MIN_DURATION: u32 = 60;
pub const MIN_TITLE_CHARS: usize = 2;
pub const MIN_SUMMARY_CHARS: usize = 10;
pub const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Poster,
    Title,
    Genres,
    Duration,
    ReleaseYear,
    Rating,
    Summary,
    Name,
    Email,
    PhotoUrl,
    Password,
}

/// Inline messages keyed by field. At most one message per field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormErrors {
    fields: BTreeMap<FormField, String>,
}

impl FormErrors {
    fn add(&mut self, field: FormField, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.fields.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

fn is_absolute_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

fn is_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@') && !value.contains(' ')
        }
        None => false,
    }
}

//=========================================================================================
// Movie Form
//=========================================================================================

/// Which page the movie form is submitted from. The add page demands a rating
/// of at least `MIN_NEW_RATING`; the update page only rejects an unset rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Update,
}

impl FormMode {
    fn accepts_rating(self, rating: f64) -> bool {
        match self {
            FormMode::Add => rating >= MIN_NEW_RATING,
            FormMode::Update => rating > 0.0,
        }
    }
}

/// Raw values as typed into the add/update form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovieForm {
    pub poster: String,
    pub title: String,
    pub genres: Vec<String>,
    pub duration: String,
    pub release_year: String,
    pub summary: String,
}

impl MovieForm {
    /// A blank form with the release year preset to the current year.
    pub fn blank() -> Self {
        Self { release_year: Utc::now().year().to_string(), ..Self::default() }
    }

    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            poster: movie.poster.clone(),
            title: movie.title.clone(),
            genres: movie.genres.clone(),
            duration: movie.duration.to_string(),
            release_year: movie.release_year.to_string(),
            summary: movie.summary.clone(),
        }
    }

    pub fn validate(
        &self,
        mode: FormMode,
        rating: &RatingSelection,
        owner_email: &str,
    ) -> Result<MovieDraft, FormErrors> {
        self.validate_for_year(mode, rating.value(), owner_email, Utc::now().year())
    }

    /// Validation against an explicit current year.
    pub fn validate_for_year(
        &self,
        mode: FormMode,
        rating: f64,
        owner_email: &str,
        current_year: i32,
    ) -> Result<MovieDraft, FormErrors> {
        let mut errors = FormErrors::default();

        let poster = self.poster.trim();
        if poster.is_empty() {
            errors.add(FormField::Poster, "Poster URL is required");
        } else if !is_absolute_url(poster) {
            errors.add(FormField::Poster, "Please enter a valid URL");
        }

        let title = self.title.trim();
        if title.is_empty() {
            errors.add(FormField::Title, "Title is required");
        } else if title.chars().count() < MIN_TITLE_CHARS {
            errors.add(FormField::Title, "Title must have at least 2 characters");
        }

        if self.genres.is_empty() {
            errors.add(FormField::Genres, "Please select at least one genre");
        } else if let Some(unknown) = self.genres.iter().find(|g| !FORM_GENRES.contains(&g.as_str())) {
            errors.add(FormField::Genres, format!("Unknown genre: {unknown}"));
        }

        let duration = self.duration.trim();
        let mut minutes = 0;
        if duration.is_empty() {
            errors.add(FormField::Duration, "Duration is required");
        } else {
            match duration.parse::<u32>() {
                Ok(value) if value >= MIN_DURATION => minutes = value,
                Ok(_) => errors.add(FormField::Duration, "Duration must be at least 60 minutes"),
                Err(_) => errors.add(FormField::Duration, "Duration must be a number"),
            }
        }

        let year = self.release_year.trim();
        let mut release_year = 0;
        if year.is_empty() {
            errors.add(FormField::ReleaseYear, "Release year is required");
        } else {
            let earliest = current_year - RELEASE_YEAR_SPAN + 1;
            match year.parse::<i32>() {
                Ok(value) if (earliest..=current_year).contains(&value) => release_year = value,
                _ => errors.add(FormField::ReleaseYear, "Please select a valid release year"),
            }
        }

        if !mode.accepts_rating(rating) {
            errors.add(FormField::Rating, "Please select a rating");
        }

        let summary = self.summary.trim();
        if summary.is_empty() {
            errors.add(FormField::Summary, "Summary is required");
        } else if summary.chars().count() < MIN_SUMMARY_CHARS {
            errors.add(FormField::Summary, "Summary must have at least 10 characters");
        }

        errors.into_result(|| MovieDraft {
            poster: poster.to_string(),
            title: title.to_string(),
            genres: self.genres.clone(),
            duration: minutes,
            release_year,
            rating,
            summary: summary.to_string(),
            owner_email: owner_email.to_string(),
        })
    }
}

//=========================================================================================
// Auth Forms
//=========================================================================================

/// The first password rule `password` breaks, if any.
pub fn password_problem(password: &str) -> Option<&'static str> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Some("Password must be at least 6 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Some("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Some("Password must contain at least one lowercase letter");
    }
    None
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub photo_url: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        if self.name.trim().is_empty() {
            errors.add(FormField::Name, "Name is required");
        }
        validate_email(&self.email, &mut errors);
        if self.photo_url.trim().is_empty() {
            errors.add(FormField::PhotoUrl, "Photo URL is required");
        } else if !is_absolute_url(self.photo_url.trim()) {
            errors.add(FormField::PhotoUrl, "Please enter a valid URL");
        }
        if let Some(problem) = password_problem(&self.password) {
            errors.add(FormField::Password, problem);
        }
        errors.into_result(|| ())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        validate_email(&self.email, &mut errors);
        if self.password.is_empty() {
            errors.add(FormField::Password, "Password is required");
        }
        errors.into_result(|| ())
    }
}

fn validate_email(email: &str, errors: &mut FormErrors) {
    let email = email.trim();
    if email.is_empty() {
        errors.add(FormField::Email, "Email is required");
    } else if !is_email(email) {
        errors.add(FormField::Email, "Please enter a valid email");
    }
}
