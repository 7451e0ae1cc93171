//! Credential acquisition for cluster connections.
//!
//! The identity protocol itself is never implemented here. A
//! [`CredentialProvider`] only decides *which* identity material the connector
//! should use: either the ambient Azure credential chain (environment
//! variables, Azure CLI login, managed identity, ...) driven by the Kusto
//! client library, or an explicit bearer token.
//!
//! # Security
//! - Access tokens are stored in `Zeroizing` containers
//! - `Debug` output never includes token material

use crate::error::{KustoTreeError, Result};
use std::fmt;
use zeroize::Zeroizing;

/// Environment variable holding an explicit bearer token for the cluster.
pub const ACCESS_TOKEN_ENV: &str = "KUSTO_ACCESS_TOKEN";

/// Identity material handed to a [`crate::Connector`].
#[derive(Clone)]
pub enum Credential {
    /// Delegate to the ambient Azure default credential chain.
    Ambient,
    /// A pre-acquired bearer token for the cluster resource.
    AccessToken(Zeroizing<String>),
}

impl Credential {
    /// Wraps a bearer token, rejecting blank values.
    ///
    /// # Errors
    /// Returns [`KustoTreeError::Credential`] if the token is empty or whitespace.
    pub fn access_token(token: impl Into<String>) -> Result<Self> {
        let token = Zeroizing::new(token.into());
        if token.trim().is_empty() {
            return Err(KustoTreeError::credential("access token is empty"));
        }
        Ok(Self::AccessToken(token))
    }

    /// Short description for logs; never contains secrets.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ambient => "ambient Azure credential chain",
            Self::AccessToken(_) => "explicit access token",
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ambient => f.write_str("Credential::Ambient"),
            Self::AccessToken(_) => f.write_str("Credential::AccessToken(****)"),
        }
    }
}

/// Supplies the credential used to open a cluster connection.
///
/// Injected into the run pipeline so tests can substitute a fake source
/// without touching process environment.
pub trait CredentialProvider: Send + Sync {
    /// Produces the credential for this run.
    ///
    /// # Errors
    /// Returns an error when no usable credential is available; the caller
    /// treats this as a fatal connection failure.
    fn acquire(&self) -> Result<Credential>;
}

/// Always hands out [`Credential::Ambient`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AmbientCredentialProvider;

impl CredentialProvider for AmbientCredentialProvider {
    fn acquire(&self) -> Result<Credential> {
        Ok(Credential::Ambient)
    }
}

/// Prefers an explicit token from the environment, then the ambient chain.
#[derive(Debug, Clone)]
pub struct ChainedCredentialProvider {
    token_variable: String,
}

impl Default for ChainedCredentialProvider {
    fn default() -> Self {
        Self {
            token_variable: ACCESS_TOKEN_ENV.to_string(),
        }
    }
}

impl ChainedCredentialProvider {
    /// Provider reading the token from `KUSTO_ACCESS_TOKEN`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the token from a different environment variable.
    pub fn with_token_variable(mut self, variable: impl Into<String>) -> Self {
        self.token_variable = variable.into();
        self
    }
}

impl CredentialProvider for ChainedCredentialProvider {
    fn acquire(&self) -> Result<Credential> {
        match std::env::var(&self.token_variable) {
            Ok(token) if !token.trim().is_empty() => {
                tracing::debug!("Using access token from {}", self.token_variable);
                Credential::access_token(token)
            }
            Ok(_) | Err(std::env::VarError::NotPresent) => {
                tracing::debug!("Using ambient Azure credential chain");
                AmbientCredentialProvider.acquire()
            }
            Err(std::env::VarError::NotUnicode(_)) => Err(KustoTreeError::credential(format!(
                "{} is not valid unicode",
                self.token_variable
            ))),
        }
    }
}
