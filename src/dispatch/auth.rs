//! Credential handling for tool security requirements.
//!
//! The dispatcher never acquires tokens itself; it asks a
//! [`CredentialProvider`] for credentials per auth scheme and checks the
//! granted scopes against the tool's requirement sets. Token material is
//! kept out of `Debug` output and error messages.

use indexmap::IndexMap;

/// The scopes a credential grants.
#[derive(Clone, PartialEq, Eq)]
pub enum ScopeGrant {
    /// The credential grants every scope (workspace API tokens).
    All,
    /// The credential grants exactly these scopes.
    Scopes(Vec<String>),
}

/// Credentials for one auth scheme.
#[derive(Clone)]
pub struct Credentials {
    secret: String,
    grant: ScopeGrant,
}

impl Credentials {
    /// Credentials granting an explicit scope list.
    #[must_use]
    pub fn with_scopes(secret: impl Into<String>, scopes: Vec<String>) -> Self {
        Self {
            secret: secret.into(),
            grant: ScopeGrant::Scopes(scopes),
        }
    }

    /// Credentials granting every scope, as Attio workspace API tokens do.
    #[must_use]
    pub fn bearer(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            grant: ScopeGrant::All,
        }
    }

    /// Whether this credential grants the given scope.
    #[must_use]
    pub fn grants(&self, scope: &str) -> bool {
        match &self.grant {
            ScopeGrant::All => true,
            ScopeGrant::Scopes(scopes) => scopes.iter().any(|s| s == scope),
        }
    }

    /// The `Authorization` header this credential produces.
    #[must_use]
    pub fn authorization_header(&self) -> (String, String) {
        ("Authorization".to_string(), format!("Bearer {}", self.secret))
    }
}

// Token material must never leak through Debug output
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("secret", &"<redacted>")
            .field(
                "grant",
                &match &self.grant {
                    ScopeGrant::All => "all scopes".to_string(),
                    ScopeGrant::Scopes(scopes) => format!("{} scope(s)", scopes.len()),
                },
            )
            .finish()
    }
}

/// Supplies credentials for auth schemes named in tool descriptors.
pub trait CredentialProvider: Send + Sync {
    /// Returns the credentials for a scheme, or `None` when unavailable.
    fn credentials_for(&self, scheme: &str) -> Option<Credentials>;
}

/// A fixed scheme → credentials mapping, built once at startup.
#[derive(Debug, Default)]
pub struct StaticCredentialProvider {
    by_scheme: IndexMap<String, Credentials>,
}

impl StaticCredentialProvider {
    /// Creates an empty provider (no tool with requirements will pass).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds credentials for a scheme, replacing any previous entry.
    #[must_use]
    pub fn with(mut self, scheme: impl Into<String>, credentials: Credentials) -> Self {
        self.by_scheme.insert(scheme.into(), credentials);
        self
    }
}

impl CredentialProvider for StaticCredentialProvider {
    fn credentials_for(&self, scheme: &str) -> Option<Credentials> {
        self.by_scheme.get(scheme).cloned()
    }
}
