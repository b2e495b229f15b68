//! crates/cinesphere_core/src/session.rs
//!
//! The session holder and the login/register views. The identity provider
//! owns the session; this module mirrors it into an observable status.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::domain::SessionUser;
use crate::forms::{FormErrors, LoginForm, RegisterForm};
use crate::ports::{IdentityService, Notification, Notifier, PortResult};
use crate::router::Route;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// The provider has not answered yet.
    #[default]
    Resolving,
    Anonymous,
    Active(SessionUser),
}

impl SessionStatus {
    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            SessionStatus::Active(user) => Some(user),
            _ => None,
        }
    }
}

/// Observable wrapper around the identity provider.
#[derive(Clone)]
pub struct SessionHolder {
    identity: Arc<dyn IdentityService>,
    tx: Arc<watch::Sender<SessionStatus>>,
}

impl SessionHolder {
    pub fn new(identity: Arc<dyn IdentityService>) -> Self {
        let (tx, _rx) = watch::channel(SessionStatus::Resolving);
        Self { identity, tx: Arc::new(tx) }
    }

    pub fn status(&self) -> SessionStatus {
        self.tx.borrow().clone()
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.tx.borrow().user().cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.tx.subscribe()
    }

    fn publish(&self, user: Option<SessionUser>) {
        let status = match user {
            Some(user) => SessionStatus::Active(user),
            None => SessionStatus::Anonymous,
        };
        self.tx.send_replace(status);
    }

    /// Asks the provider who is signed in. An unreachable provider leaves the
    /// session anonymous.
    pub async fn restore(&self) -> SessionStatus {
        match self.identity.current_user().await {
            Ok(user) => self.publish(user),
            Err(e) => {
                warn!("Could not restore session: {:?}", e);
                self.publish(None);
            }
        }
        self.status()
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> PortResult<SessionUser> {
        let user = self.identity.sign_in_with_password(email, password).await?;
        info!("Signed in as {}", user.email);
        self.publish(Some(user.clone()));
        Ok(user)
    }

    pub async fn sign_in_with_google(&self, id_token: &str) -> PortResult<SessionUser> {
        let user = self.identity.sign_in_with_google(id_token).await?;
        info!("Signed in with Google as {}", user.email);
        self.publish(Some(user.clone()));
        Ok(user)
    }

    /// Creates the account, then attaches the display name and photo.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
        photo_url: &str,
    ) -> PortResult<SessionUser> {
        let created = self.identity.create_user(email, password).await?;
        self.publish(Some(created));
        let user = self.identity.update_profile(display_name, photo_url).await?;
        self.publish(Some(user.clone()));
        Ok(user)
    }

    pub async fn sign_out(&self) -> PortResult<()> {
        self.identity.sign_out().await?;
        self.publish(None);
        Ok(())
    }
}

//=========================================================================================
// Login and Register Views
//=========================================================================================

/// Result of submitting an auth form.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    Navigate(Route),
    Invalid(FormErrors),
    Failed,
}

pub struct LoginView {
    session: SessionHolder,
    notifier: Arc<dyn Notifier>,
}

impl LoginView {
    pub fn new(session: SessionHolder, notifier: Arc<dyn Notifier>) -> Self {
        Self { session, notifier }
    }

    /// Signs in and returns to `from`, or home when there is no return path.
    pub async fn submit(&self, form: &LoginForm, from: Option<&str>) -> AuthOutcome {
        if let Err(errors) = form.validate() {
            return AuthOutcome::Invalid(errors);
        }
        match self.session.sign_in(form.email.trim(), &form.password).await {
            Ok(_) => {
                self.notifier.notify(Notification::success("Login successful!"));
                AuthOutcome::Navigate(return_route(from))
            }
            Err(e) => {
                error!("Login failed: {:?}", e);
                self.notifier.notify(Notification::error("Invalid email or password"));
                AuthOutcome::Failed
            }
        }
    }

    pub async fn google(&self, id_token: &str, from: Option<&str>) -> AuthOutcome {
        match self.session.sign_in_with_google(id_token).await {
            Ok(_) => {
                self.notifier.notify(Notification::success("Login successful!"));
                AuthOutcome::Navigate(return_route(from))
            }
            Err(e) => {
                error!("Google sign-in failed: {:?}", e);
                self.notifier.notify(Notification::error("Something went wrong. Try again"));
                AuthOutcome::Failed
            }
        }
    }
}

fn return_route(from: Option<&str>) -> Route {
    match from.map(Route::parse) {
        Some(Route::NotFound) | Some(Route::Login) | None => Route::Home,
        Some(route) => route,
    }
}

pub struct RegisterView {
    session: SessionHolder,
    notifier: Arc<dyn Notifier>,
}

impl RegisterView {
    pub fn new(session: SessionHolder, notifier: Arc<dyn Notifier>) -> Self {
        Self { session, notifier }
    }

    pub async fn submit(&self, form: &RegisterForm) -> AuthOutcome {
        if let Err(errors) = form.validate() {
            return AuthOutcome::Invalid(errors);
        }
        let result = self
            .session
            .register(form.email.trim(), &form.password, form.name.trim(), form.photo_url.trim())
            .await;
        match result {
            Ok(_) => {
                self.notifier.notify(Notification::success("Registration successful!"));
                AuthOutcome::Navigate(Route::Home)
            }
            Err(e) => {
                error!("Registration failed: {:?}", e);
                let message = e.server_message().unwrap_or("Registration failed").to_string();
                self.notifier.notify(Notification::error(message));
                AuthOutcome::Failed
            }
        }
    }
}
