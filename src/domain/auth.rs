//! Caller identity resolution and admin authorization.
//!
//! The service never inspects HTTP headers itself. The API layer extracts
//! [`Credentials`] from the request, an [`AuthContext`] turns them into an
//! [`Identity`], and an [`Authorization`] decides whether that identity is a
//! system administrator.

use std::collections::{HashMap, HashSet};
use std::fmt;

use async_trait::async_trait;

use crate::error::CarouselError;

/// Raw credentials presented by a caller.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    token: Option<String>,
}

impl Credentials {
    /// Credentials carrying no token.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { token: None }
    }

    /// Credentials carrying a bearer token.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Returns the presented token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    /// Unique username of the caller.
    pub username: String,
}

impl Identity {
    /// Creates an identity for `username`.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Resolves request credentials to a caller identity.
#[async_trait]
pub trait AuthContext: Send + Sync + fmt::Debug {
    /// Returns the identity behind `credentials`.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::AuthenticationRequired`] when no identity
    /// can be resolved.
    async fn resolve_identity(&self, credentials: &Credentials) -> Result<Identity, CarouselError>;
}

/// Decides whether an identity holds system-administrator privileges.
pub trait Authorization: Send + Sync + fmt::Debug {
    /// Returns `true` if `identity` is a system administrator.
    fn is_system_admin(&self, identity: &Identity) -> bool;
}

/// [`AuthContext`] backed by a static `token -> username` table.
#[derive(Clone, Default)]
pub struct TokenAuthenticator {
    tokens: HashMap<String, String>,
}

impl TokenAuthenticator {
    /// Creates an authenticator from a `token -> username` table.
    #[must_use]
    pub const fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }

    /// Registers `token` for `username`, replacing any previous owner.
    pub fn insert(&mut self, token: impl Into<String>, username: impl Into<String>) {
        self.tokens.insert(token.into(), username.into());
    }
}

impl fmt::Debug for TokenAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuthenticator")
            .field("token_count", &self.tokens.len())
            .finish()
    }
}

#[async_trait]
impl AuthContext for TokenAuthenticator {
    async fn resolve_identity(&self, credentials: &Credentials) -> Result<Identity, CarouselError> {
        credentials
            .token()
            .and_then(|token| self.tokens.get(token))
            .map(Identity::new)
            .ok_or(CarouselError::AuthenticationRequired)
    }
}

/// [`Authorization`] backed by a fixed set of admin usernames.
#[derive(Debug, Clone, Default)]
pub struct AdminRoster {
    admins: HashSet<String>,
}

impl AdminRoster {
    /// Creates a roster from admin usernames.
    pub fn new<I, S>(admins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            admins: admins.into_iter().map(Into::into).collect(),
        }
    }
}

impl Authorization for AdminRoster {
    fn is_system_admin(&self, identity: &Identity) -> bool {
        self.admins.contains(&identity.username)
    }
}
