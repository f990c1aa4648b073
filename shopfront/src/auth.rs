//! Auth slice: demo-credential sign-in with a persisted session.
//!
//! Commands (`CheckAuthStatus`, `Login`, `Logout`) validate and schedule
//! storage work; events (`StatusLoaded`, `LoginSucceeded`, `LoginFailed`,
//! `LoggedOut`) apply the resulting transition. Validation failures are
//! applied synchronously, so a rejected `Login` is observable in state as
//! soon as `reduce` returns.

use std::sync::Arc;

use shopfront_core::{SmallVec, smallvec};
use shopfront_core::effect::Effect;
use shopfront_core::environment::KeyValueStore;
use shopfront_core::reducer::Reducer;

use crate::constants::{DEMO_EMAILS, DEMO_PASSWORD, USER_KEY};
use crate::error::AuthError;
use crate::types::AuthUser;

/// Decides whether an email/password pair is acceptable.
///
/// The storefront ships with [`DemoVerifier`]; a real backend check slots
/// in behind the same trait.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, email: &str, password: &str) -> bool;
}

/// Accepts the fixed demo accounts and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoVerifier;

impl CredentialVerifier for DemoVerifier {
    fn verify(&self, email: &str, password: &str) -> bool {
        DEMO_EMAILS.contains(&email) && password == DEMO_PASSWORD
    }
}

#[derive(Clone)]
pub struct AuthEnvironment {
    pub storage: Arc<dyn KeyValueStore>,
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl AuthEnvironment {
    /// Environment backed by the given storage and the demo verifier.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            verifier: Arc::new(DemoVerifier),
        }
    }

    #[must_use]
    pub fn with_verifier(storage: Arc<dyn KeyValueStore>, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { storage, verifier }
    }
}

/// Session state. `loading` starts true and drops on the first
/// `StatusLoaded`, so the UI can hold a splash until restore finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub last_error: Option<AuthError>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            loading: true,
            last_error: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum AuthAction {
    /// Restore a previously persisted session, if any.
    CheckAuthStatus,
    /// Result of the restore. `None` means signed out.
    StatusLoaded { user: Option<AuthUser> },
    /// Attempt a sign-in.
    Login { email: String, password: String },
    /// The session was persisted and the user is now signed in.
    LoginSucceeded { user: AuthUser },
    /// The sign-in was rejected.
    LoginFailed { error: AuthError },
    /// Sign out and forget the persisted session.
    Logout,
    LoggedOut,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AuthReducer;

impl AuthReducer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn apply_event(state: &mut AuthState, action: AuthAction) {
        match action {
            AuthAction::StatusLoaded { user } => {
                state.loading = false;
                state.is_authenticated = user.is_some();
                state.user = user;
            }
            AuthAction::LoginSucceeded { user } => {
                state.user = Some(user);
                state.is_authenticated = true;
                state.last_error = None;
            }
            AuthAction::LoginFailed { error } => {
                state.last_error = Some(error);
            }
            AuthAction::LoggedOut => {
                state.user = None;
                state.is_authenticated = false;
            }
            AuthAction::CheckAuthStatus | AuthAction::Login { .. } | AuthAction::Logout => {}
        }
    }
}

impl Reducer for AuthReducer {
    type State = AuthState;
    type Action = AuthAction;
    type Environment = AuthEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        environment: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AuthAction::CheckAuthStatus => {
                let storage = Arc::clone(&environment.storage);
                smallvec![Effect::Future(Box::pin(async move {
                    let user = match storage.get(USER_KEY).await {
                        Ok(Some(raw)) => match serde_json::from_str::<AuthUser>(&raw) {
                            Ok(user) => Some(user),
                            Err(error) => {
                                tracing::warn!(%error, "Stored user is unreadable, treating as signed out");
                                None
                            }
                        },
                        Ok(None) => None,
                        Err(error) => {
                            tracing::warn!(%error, "Failed to read stored user, treating as signed out");
                            None
                        }
                    };
                    Some(AuthAction::StatusLoaded { user })
                }))]
            }
            AuthAction::Login { email, password } => {
                if email.is_empty() || password.is_empty() {
                    Self::apply_event(
                        state,
                        AuthAction::LoginFailed { error: AuthError::MissingFields },
                    );
                    return SmallVec::new();
                }
                if !environment.verifier.verify(&email, &password) {
                    Self::apply_event(
                        state,
                        AuthAction::LoginFailed { error: AuthError::InvalidCredentials },
                    );
                    return SmallVec::new();
                }
                let user = AuthUser { email };
                let storage = Arc::clone(&environment.storage);
                smallvec![Effect::Future(Box::pin(async move {
                    match serde_json::to_string(&user) {
                        Ok(raw) => {
                            if let Err(error) = storage.set(USER_KEY, raw).await {
                                tracing::warn!(%error, "Failed to persist session, signing in anyway");
                            }
                        }
                        Err(error) => {
                            tracing::warn!(%error, "Failed to encode session, signing in anyway");
                        }
                    }
                    Some(AuthAction::LoginSucceeded { user })
                }))]
            }
            AuthAction::Logout => {
                let storage = Arc::clone(&environment.storage);
                smallvec![Effect::Future(Box::pin(async move {
                    if let Err(error) = storage.remove(USER_KEY).await {
                        tracing::warn!(%error, "Failed to clear persisted session");
                    }
                    Some(AuthAction::LoggedOut)
                }))]
            }
            event => {
                Self::apply_event(state, event);
                SmallVec::new()
            }
        }
    }
}
