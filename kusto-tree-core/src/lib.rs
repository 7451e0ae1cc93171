//! Core data structures and utilities for kusto-tree.
//!
//! This crate provides the building blocks used by the `kusto-tree` binary:
//! connecting to a Kusto cluster, listing its databases and tables with
//! management commands, and rendering the result as a tree.
//!
//! # Security Guarantees
//! - Only read-only `.show` management commands are issued
//! - Access tokens are held in zeroizing memory and never logged
//! - Cluster URLs are redacted before they reach the run log
//!
//! # Architecture
//! The core library follows these patterns:
//! - Trait seams (`CredentialProvider`, `Connector`, `ManagementClient`) so
//!   every collaborator with a side effect can be swapped in tests
//! - Listing operations return `Result` so failures never look like emptiness
//! - An explicitly constructed, scoped logging context instead of a global one

pub mod adapters;
pub mod collect;
pub mod config;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod models;
pub mod render;

// Re-export commonly used types
pub use adapters::{Connector, ManagementClient};
pub use collect::{collect_database_tables, list_databases, list_tables};
pub use config::RunConfig;
pub use credentials::{
    AmbientCredentialProvider, ChainedCredentialProvider, Credential, CredentialProvider,
};
pub use error::{KustoTreeError, Result};
pub use logging::{RunLog, init_run_log};
pub use models::{ClusterAddress, DatabaseEntry, DatabaseTableMap, ResultTable, TableListing};
pub use render::{TreeStyle, render_lines, write_tree};

#[cfg(feature = "kusto")]
pub use adapters::kusto::KustoConnector;
