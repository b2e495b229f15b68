//! services/client/src/adapters/identity.rs
//!
//! Implements the `IdentityService` port against the Identity Toolkit REST API
//! (the email/password and Google account service behind the web client's
//! sign-in). The adapter keeps the signed-in user's ID token in memory; it is
//! never written to disk, so every process starts signed out.

use async_trait::async_trait;
use cinesphere_core::domain::SessionUser;
use cinesphere_core::ports::{IdentityService, PortError, PortResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::{form_urlencoded, Url};

/// Provider error codes that mean the credentials were wrong.
const CREDENTIAL_ERRORS: &[&str] = &[
    "EMAIL_NOT_FOUND",
    "INVALID_PASSWORD",
    "INVALID_LOGIN_CREDENTIALS",
    "USER_DISABLED",
    "INVALID_ID_TOKEN",
    "INVALID_IDP_RESPONSE",
];

#[derive(Default)]
struct SignedIn {
    id_token: Option<String>,
    user: Option<SessionUser>,
}

/// An adapter that implements the `IdentityService` port.
pub struct IdentityToolkitAdapter {
    http: Client,
    base_url: Url,
    api_key: Option<String>,
    state: Mutex<SignedIn>,
}

impl IdentityToolkitAdapter {
    pub fn new(http: Client, base_url: Url, api_key: Option<String>) -> Self {
        Self { http, base_url, api_key, state: Mutex::new(SignedIn::default()) }
    }

    fn endpoint(&self, method: &str) -> PortResult<Url> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| PortError::Unexpected("No identity API key is configured".to_string()))?;
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PortError::Unexpected(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(["v1", method]);
        url.query_pairs_mut().append_pair("key", key);
        Ok(url)
    }

    async fn call<B: Serialize + Sync>(&self, method: &str, body: &B) -> PortResult<AccountPayload> {
        let url = self.endpoint(method)?;
        debug!("POST identity {}", method);
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| PortError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<AccountPayload>()
                .await
                .map_err(|e| PortError::Unexpected(format!("Malformed identity response: {}", e)));
        }

        let code = response
            .json::<ErrorEnvelope>()
            .await
            .map(|envelope| envelope.error.message)
            .unwrap_or_default();
        warn!("Identity call {} failed with {}: {}", method, status, code);
        if CREDENTIAL_ERRORS.iter().any(|known| code.starts_with(known)) {
            Err(PortError::Unauthorized)
        } else {
            Err(PortError::Rejected { status: status.as_u16(), message: code })
        }
    }

    /// Stores the session from a sign-in style response and returns its user.
    async fn remember(&self, payload: AccountPayload, fallback_email: &str) -> SessionUser {
        let mut state = self.state.lock().await;
        if payload.id_token.is_some() {
            state.id_token = payload.id_token.clone();
        }
        let previous = state.user.take();
        let user = payload.into_user(fallback_email, previous.as_ref());
        state.user = Some(user.clone());
        user
    }
}

//=========================================================================================
// Wire Records
//=========================================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdpRequest {
    post_body: String,
    request_uri: &'static str,
    return_idp_credential: bool,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileRequest<'a> {
    id_token: &'a str,
    display_name: &'a str,
    photo_url: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct AccountPayload {
    id_token: Option<String>,
    email: Option<String>,
    display_name: Option<String>,
    #[serde(alias = "profilePicture")]
    photo_url: Option<String>,
    #[serde(default)]
    users: Vec<AccountPayload>,
}

impl AccountPayload {
    fn into_user(self, fallback_email: &str, previous: Option<&SessionUser>) -> SessionUser {
        let email = self
            .email
            .filter(|e| !e.is_empty())
            .or_else(|| previous.map(|u| u.email.clone()))
            .unwrap_or_else(|| fallback_email.to_string());
        SessionUser {
            email,
            display_name: self.display_name.or_else(|| previous.and_then(|u| u.display_name.clone())),
            photo_url: self.photo_url.or_else(|| previous.and_then(|u| u.photo_url.clone())),
        }
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
}

//=========================================================================================
// `IdentityService` Trait Implementation
//=========================================================================================

#[async_trait]
impl IdentityService for IdentityToolkitAdapter {
    async fn current_user(&self) -> PortResult<Option<SessionUser>> {
        let Some(token) = self.state.lock().await.id_token.clone() else {
            return Ok(None);
        };
        let mut payload = self.call("accounts:lookup", &LookupRequest { id_token: &token }).await?;
        let Some(account) = payload.users.pop() else {
            return Ok(None);
        };
        Ok(Some(self.remember(account, "").await))
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> PortResult<SessionUser> {
        let payload = self
            .call(
                "accounts:signInWithPassword",
                &PasswordRequest { email, password, return_secure_token: true },
            )
            .await?;
        Ok(self.remember(payload, email).await)
    }

    async fn sign_in_with_google(&self, id_token: &str) -> PortResult<SessionUser> {
        if id_token.trim().is_empty() {
            return Err(PortError::Unauthorized);
        }
        let post_body = form_urlencoded::Serializer::new(String::new())
            .append_pair("id_token", id_token)
            .append_pair("providerId", "google.com")
            .finish();
        let payload = self
            .call(
                "accounts:signInWithIdp",
                &IdpRequest {
                    post_body,
                    request_uri: "http://localhost",
                    return_idp_credential: true,
                    return_secure_token: true,
                },
            )
            .await?;
        Ok(self.remember(payload, "").await)
    }

    async fn create_user(&self, email: &str, password: &str) -> PortResult<SessionUser> {
        let payload = self
            .call("accounts:signUp", &PasswordRequest { email, password, return_secure_token: true })
            .await?;
        Ok(self.remember(payload, email).await)
    }

    async fn update_profile(&self, display_name: &str, photo_url: &str) -> PortResult<SessionUser> {
        let token = self.state.lock().await.id_token.clone().ok_or(PortError::Unauthorized)?;
        let payload = self
            .call(
                "accounts:update",
                &ProfileRequest { id_token: &token, display_name, photo_url, return_secure_token: true },
            )
            .await?;
        Ok(self.remember(payload, "").await)
    }

    async fn sign_out(&self) -> PortResult<()> {
        *self.state.lock().await = SignedIn::default();
        Ok(())
    }
}
