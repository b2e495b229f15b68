//! services/client/src/cli.rs
//!
//! The terminal front-end. Each subcommand maps to a client path, is gated by
//! the router exactly like a page navigation, and then drives the matching
//! core view before printing what the page would show.

use crate::app::AppState;
use crate::error::ClientError;
use cinesphere_core::blogs::{BlogDetailView, BlogsView};
use cinesphere_core::detail::{ActionOutcome, MovieDetailView};
use cinesphere_core::domain::{Blog, FavoriteRecord, Movie, Theme, FILTER_GENRES};
use cinesphere_core::editor::{AddMovieView, SubmitOutcome, UpdateMovieView};
use cinesphere_core::favorites::MyFavoritesView;
use cinesphere_core::filter::{GenreFilter, MovieFilter};
use cinesphere_core::forms::{FormErrors, LoginForm, MovieForm, RegisterForm};
use cinesphere_core::list::{FeaturedView, ListState, MovieListView};
use cinesphere_core::rating::{format_rating, zone_for_value, RatingSelector};
use cinesphere_core::session::{AuthOutcome, LoginView, RegisterView};
use cinesphere_core::{resolve, Loadable, Route, RouteDecision};
use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

//=========================================================================================
// Command Line Definition
//=========================================================================================

#[derive(Debug, Parser)]
#[command(name = "cinesphere", version, about = "Browse and curate the CineSphere movie catalog")]
pub struct Cli {
    /// Sign in with this email before running the command.
    #[arg(long, global = true, env = "CINESPHERE_EMAIL")]
    pub email: Option<String>,

    #[arg(long, global = true, env = "CINESPHERE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Sign in with a Google ID token instead of a password.
    #[arg(long, global = true, env = "CINESPHERE_GOOGLE_TOKEN", hide_env_values = true)]
    pub google_token: Option<String>,

    /// Answer yes to confirmation prompts.
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the catalog, narrowed by title text and genre.
    Movies {
        /// Case-insensitive title substring.
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_parser = PossibleValuesParser::new(FILTER_GENRES))]
        genre: Option<String>,
    },
    /// Show the home page's featured movies.
    Featured,
    /// Show one movie with its favorite and ownership state.
    Movie { id: String },
    /// Toggle a movie in or out of your favorites.
    Favorite { id: String },
    /// List your favorites.
    Favorites,
    /// Remove a movie from your favorites list.
    Unfavorite { id: String },
    /// Add a movie to the catalog.
    Add(MovieArgs),
    /// Update a movie you added. Omitted fields keep their current value.
    Update {
        id: String,
        #[command(flatten)]
        fields: MovieArgs,
    },
    /// Delete a movie you added.
    Delete { id: String },
    /// List blog posts, optionally within one category.
    Blogs {
        #[arg(long)]
        category: Option<String>,
    },
    /// Read one blog post.
    Blog { id: String },
    /// Show or change the colour theme.
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },
    /// Create an account using the global --email and --password.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        photo_url: String,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct MovieArgs {
    #[arg(long)]
    pub poster: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    /// Repeat for several genres.
    #[arg(long = "genre")]
    pub genres: Vec<String>,
    /// Minutes.
    #[arg(long)]
    pub duration: Option<String>,
    #[arg(long)]
    pub year: Option<String>,
    #[arg(long)]
    pub summary: Option<String>,
    /// 0 to 10, snapped to the selector's tenths.
    #[arg(long)]
    pub rating: Option<f64>,
}

impl MovieArgs {
    fn apply_to(&self, form: &mut MovieForm) {
        if let Some(poster) = &self.poster {
            form.poster = poster.clone();
        }
        if let Some(title) = &self.title {
            form.title = title.clone();
        }
        if !self.genres.is_empty() {
            form.genres = self.genres.clone();
        }
        if let Some(duration) = &self.duration {
            form.duration = duration.clone();
        }
        if let Some(year) = &self.year {
            form.release_year = year.clone();
        }
        if let Some(summary) = &self.summary {
            form.summary = summary.clone();
        }
    }

    /// Plays the typed rating through the selector as a hover plus click.
    fn apply_rating(&self, selector: &mut RatingSelector) {
        if let Some(rating) = self.rating {
            let zone = zone_for_value(rating);
            selector.pointer_enter(zone);
            selector.click(zone);
            selector.pointer_leave();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeAction {
    Toggle,
    Dark,
    Light,
}

impl Command {
    /// The client path the command corresponds to.
    pub fn path(&self) -> String {
        match self {
            Command::Movies { genre, .. } => {
                let filter = MovieFilter::new("", GenreFilter::parse(genre.as_deref().unwrap_or("")));
                match filter.to_query() {
                    Some(query) => format!("{}?{}", Route::AllMovies.path(), query),
                    None => Route::AllMovies.path(),
                }
            }
            Command::Featured | Command::Theme { .. } => Route::Home.path(),
            Command::Movie { id } | Command::Favorite { id } | Command::Delete { id } => {
                Route::MovieDetail(id.clone()).path()
            }
            Command::Favorites | Command::Unfavorite { .. } => Route::MyFavorites.path(),
            Command::Add(_) => Route::AddMovie.path(),
            Command::Update { id, .. } => Route::UpdateMovie(id.clone()).path(),
            Command::Blogs { .. } => Route::Blogs.path(),
            Command::Blog { id } => Route::BlogDetail(id.clone()).path(),
            Command::Register { .. } => Route::Register.path(),
        }
    }
}

//=========================================================================================
// Dispatch
//=========================================================================================

/// Restores the session, signs in if asked, gates the path, then runs the command.
pub async fn run(cli: Cli, state: &AppState) -> Result<(), ClientError> {
    state.session.restore().await;
    let path = cli.command.path();

    if !matches!(cli.command, Command::Register { .. }) {
        sign_in(&cli, state, &path).await;
    }

    let route = match resolve(&path, &state.session.status()) {
        RouteDecision::Render(route) => route,
        RouteDecision::Pending => {
            return Err(ClientError::Internal("Session is still being resolved".to_string()));
        }
        RouteDecision::Redirect { to, from } => {
            warn!("{} requires a session", from);
            println!(
                "Sign in required: redirected to {} (you will return to {}).",
                to.path(),
                from
            );
            println!("Pass --email and --password, or --google-token.");
            return Ok(());
        }
    };
    info!("Rendering {}", route.path());

    match cli.command {
        Command::Movies { search, .. } => list_movies(state, &path, search.as_deref()).await,
        Command::Featured => featured(state).await,
        Command::Movie { id } => show_movie(state, &id).await,
        Command::Favorite { id } => toggle_favorite(state, &id).await,
        Command::Favorites => list_favorites(state).await,
        Command::Unfavorite { id } => unfavorite(state, &id).await,
        Command::Add(args) => add_movie(state, &args).await,
        Command::Update { id, fields } => update_movie(state, &id, &fields).await,
        Command::Delete { id } => delete_movie(state, &id).await,
        Command::Blogs { category } => list_blogs(state, category.as_deref()).await,
        Command::Blog { id } => show_blog(state, &id).await,
        Command::Theme { action } => theme(state, action),
        Command::Register { name, photo_url } => {
            let form = RegisterForm {
                name,
                email: cli.email.unwrap_or_default(),
                photo_url,
                password: cli.password.unwrap_or_default(),
            };
            register(state, &form).await
        }
    }
    Ok(())
}

async fn sign_in(cli: &Cli, state: &AppState, path: &str) {
    let view = LoginView::new(state.session.clone(), state.notifier.clone());
    let outcome = if let Some(token) = &cli.google_token {
        view.google(token, Some(path)).await
    } else if let Some(email) = &cli.email {
        let form = LoginForm {
            email: email.clone(),
            password: cli.password.clone().unwrap_or_default(),
        };
        view.submit(&form, Some(path)).await
    } else {
        return;
    };
    if let AuthOutcome::Invalid(errors) = outcome {
        print_errors(&errors);
    }
}

//=========================================================================================
// Movie Commands
//=========================================================================================

async fn list_movies(state: &AppState, path: &str, search: Option<&str>) {
    let query = path.split_once('?').map(|(_, query)| query);
    let mut view = MovieListView::mount(state.catalog.clone(), state.notifier.clone(), query);
    view.load().await;
    if let Some(text) = search {
        view.set_search(text);
    }
    let buttons: Vec<String> = view
        .genre_buttons()
        .into_iter()
        .map(|(genre, active)| if active { format!("[{genre}]") } else { genre.to_string() })
        .collect();
    println!("Genres: {}", buttons.join(" "));
    match view.visible() {
        ListState::Loading | ListState::Failed => {}
        ListState::NoResults => println!("No movies found matching your criteria"),
        ListState::Results(movies) => movies.into_iter().for_each(print_movie_row),
    }
}

async fn featured(state: &AppState) {
    let mut view = FeaturedView::mount(state.catalog.clone());
    view.load().await;
    match view.movies() {
        Loadable::Ready(movies) => movies.iter().for_each(print_movie_row),
        _ => println!("No featured movies right now"),
    }
}

async fn detail_view(state: &AppState, id: &str) -> MovieDetailView {
    let mut view = MovieDetailView::new(
        state.catalog.clone(),
        state.notifier.clone(),
        state.confirmer.clone(),
        id,
        state.session.current_user(),
    );
    view.load().await;
    view
}

async fn show_movie(state: &AppState, id: &str) {
    let view = detail_view(state, id).await;
    match view.movie() {
        Loadable::Ready(movie) => {
            print_movie(movie);
            println!("Favorite: {}", if view.is_favorite() { "yes" } else { "no" });
            if view.is_owner() {
                println!("You added this movie; update and delete are available.");
            }
        }
        _ => println!("Movie not found"),
    }
}

async fn toggle_favorite(state: &AppState, id: &str) {
    let mut view = detail_view(state, id).await;
    if view.movie().ready().is_none() {
        println!("Movie not found");
        return;
    }
    if view.toggle_favorite().await == ActionOutcome::Done {
        println!("Favorite: {}", if view.is_favorite() { "yes" } else { "no" });
    }
}

async fn delete_movie(state: &AppState, id: &str) {
    let mut view = detail_view(state, id).await;
    match view.request_delete().await {
        ActionOutcome::Navigate(route) => println!("-> {}", route.path()),
        ActionOutcome::Cancelled => println!("Nothing was deleted."),
        ActionOutcome::Ignored => println!("Movie not found"),
        _ => {}
    }
}

async fn add_movie(state: &AppState, args: &MovieArgs) {
    let Some(user) = state.session.current_user() else {
        return;
    };
    let mut view = AddMovieView::mount(
        state.catalog.clone(),
        state.notifier.clone(),
        state.rating.clone(),
        user,
    );
    args.apply_rating(view.selector());
    let mut form = MovieForm::blank();
    args.apply_to(&mut form);
    report_submit(view.submit(&form).await);
}

async fn update_movie(state: &AppState, id: &str, args: &MovieArgs) {
    let Some(user) = state.session.current_user() else {
        return;
    };
    let mut view = UpdateMovieView::mount(
        state.catalog.clone(),
        state.notifier.clone(),
        state.rating.clone(),
        id,
        user,
    );
    view.load().await;
    let Some(mut form) = view.form() else {
        println!("Movie not found");
        return;
    };
    args.apply_rating(view.selector());
    args.apply_to(&mut form);
    report_submit(view.submit(&form).await);
}

fn report_submit(outcome: SubmitOutcome) {
    match outcome {
        SubmitOutcome::Navigate(route) => println!("-> {}", route.path()),
        SubmitOutcome::Invalid(errors) => print_errors(&errors),
        SubmitOutcome::Blocked | SubmitOutcome::Failed | SubmitOutcome::Ignored => {}
    }
}

//=========================================================================================
// Favorites, Blogs, Theme and Registration
//=========================================================================================

async fn list_favorites(state: &AppState) {
    let Some(user) = state.session.current_user() else {
        return;
    };
    let mut view = MyFavoritesView::new(state.catalog.clone(), state.notifier.clone(), user);
    view.load().await;
    if let Loadable::Ready(records) = view.favorites() {
        if records.is_empty() {
            println!("You have no favorites yet");
        }
        records.iter().for_each(print_favorite_row);
    }
}

async fn unfavorite(state: &AppState, id: &str) {
    let Some(user) = state.session.current_user() else {
        return;
    };
    let mut view = MyFavoritesView::new(state.catalog.clone(), state.notifier.clone(), user);
    view.load().await;
    if view.remove(id).await {
        if let Loadable::Ready(records) = view.favorites() {
            println!("{} favorites left", records.len());
        }
    }
}

async fn list_blogs(state: &AppState, category: Option<&str>) {
    let mut view = BlogsView::mount(state.catalog.clone(), state.notifier.clone());
    view.load().await;
    if let Some(category) = category {
        view.select_category(category);
    }
    println!("Categories: {}", view.categories().join(" | "));
    for blog in view.visible() {
        print_blog_row(blog);
    }
}

async fn show_blog(state: &AppState, id: &str) {
    let mut view = BlogDetailView::new(state.catalog.clone(), id);
    view.load().await;
    match view.blog() {
        Loadable::Ready(blog) => print_blog(blog),
        _ => println!("{}", BlogDetailView::NOT_FOUND),
    }
}

fn theme(state: &AppState, action: Option<ThemeAction>) {
    match action {
        Some(ThemeAction::Toggle) => {
            state.theme.toggle();
        }
        Some(ThemeAction::Dark) => state.theme.set(Theme::Dark),
        Some(ThemeAction::Light) => state.theme.set(Theme::Light),
        None => {}
    }
    println!("Theme: {}", state.theme.current().as_str());
}

async fn register(state: &AppState, form: &RegisterForm) {
    let view = RegisterView::new(state.session.clone(), state.notifier.clone());
    match view.submit(form).await {
        AuthOutcome::Navigate(route) => println!("-> {}", route.path()),
        AuthOutcome::Invalid(errors) => print_errors(&errors),
        AuthOutcome::Failed => {}
    }
}

//=========================================================================================
// Rendering
//=========================================================================================

fn print_errors(errors: &FormErrors) {
    for (field, message) in errors.iter() {
        println!("  {:?}: {}", field, message);
    }
}

fn print_movie_row(movie: &Movie) {
    println!(
        "{:<26} {} ({}) [{}] {}",
        movie.id,
        movie.title,
        movie.release_year,
        movie.genres.join(", "),
        format_rating(movie.rating)
    );
}

fn print_movie(movie: &Movie) {
    println!("{} ({})", movie.title, movie.release_year);
    println!("Genres: {}", movie.genres.join(", "));
    println!("Duration: {} min", movie.duration);
    println!("Rating: {} / 10", format_rating(movie.rating));
    println!("Poster: {}", movie.poster);
    println!();
    println!("{}", movie.summary);
}

fn print_favorite_row(record: &FavoriteRecord) {
    println!(
        "{:<26} {} ({}) {}",
        record.movie_id,
        record.title,
        record.release_year,
        format_rating(record.rating)
    );
}

fn print_blog_row(blog: &Blog) {
    let read_time = blog.read_time.map(|m| format!(" - {} min read", m)).unwrap_or_default();
    println!("{:<6} [{}] {} by {}{}", blog.id, blog.category, blog.title, blog.author, read_time);
}

fn print_blog(blog: &Blog) {
    println!("{}", blog.title);
    println!("{} | {} | {}", blog.author, blog.date, blog.category);
    if let Some(bio) = &blog.author_bio {
        println!("{}", bio);
    }
    println!();
    println!("{}", blog.content);
    if !blog.tags.is_empty() {
        println!();
        println!("Tags: {}", blog.tags.join(", "));
    }
}
