//! Client traits for talking to a Kusto cluster.
//!
//! The management wire protocol is delegated to an external client library;
//! these traits are the seam between that library and the rest of the crate.
//! The production implementation lives in [`kusto`] behind the `kusto`
//! feature.

use crate::Result;
use crate::credentials::Credential;
use crate::models::{ClusterAddress, ResultTable};
use async_trait::async_trait;

#[cfg(feature = "kusto")]
pub mod kusto;

/// An opened, authenticated handle to a cluster.
///
/// # Object Safety
/// This trait is object-safe; the pipeline holds a `Box<dyn ManagementClient>`
/// for the duration of a run.
#[async_trait]
pub trait ManagementClient: Send + Sync {
    /// Executes a management (control-plane) command.
    ///
    /// An empty `database` scopes the command to the cluster itself.
    ///
    /// # Returns
    /// The result tables in the order the server returned them; the first one
    /// is the primary result.
    ///
    /// # Errors
    /// Returns an error if the command cannot be sent or the server rejects it.
    async fn execute_management(&self, database: &str, command: &str) -> Result<Vec<ResultTable>>;
}

/// Opens client handles from an address and a credential.
pub trait Connector: Send + Sync {
    /// Builds a client for `cluster` authenticated with `credential`.
    ///
    /// # Errors
    /// Returns [`crate::KustoTreeError::Connection`] if the client cannot be
    /// constructed (for example, a malformed cluster address).
    fn connect(
        &self,
        cluster: &ClusterAddress,
        credential: Credential,
    ) -> Result<Box<dyn ManagementClient>>;
}
