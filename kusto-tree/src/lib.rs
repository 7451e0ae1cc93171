//! Library module for kusto-tree
//!
//! Exposes the CLI definition and the run pipeline so they can be tested
//! without a live cluster. The binary entry point is in main.rs.

use clap::Parser;
use kusto_tree_core::{
    ClusterAddress, Connector, CredentialProvider, TableListing, TreeStyle,
    collect_database_tables, list_databases, write_tree,
};
use std::io::Write;
use tracing::{error, info};

/// Tree rendered, or no databases found.
pub const EXIT_SUCCESS: u8 = 0;
/// Unexpected error (run log setup, output write failure, ...).
pub const EXIT_UNEXPECTED: u8 = 1;
/// Usage error; emitted by clap itself.
pub const EXIT_USAGE: u8 = 2;
/// Credential acquisition or client construction failed.
pub const EXIT_CONNECTION_FAILED: u8 = 3;
/// The database listing failed.
pub const EXIT_LISTING_FAILED: u8 = 4;
/// Interrupted by the user (Ctrl-C).
pub const EXIT_INTERRUPTED: u8 = 130;

/// CLI argument structure
#[derive(Parser, Debug)]
#[command(name = "kusto-tree")]
#[command(about = "Display Kusto databases and tables in a tree format")]
#[command(version)]
#[command(long_about = "
kusto-tree - Kusto cluster explorer

Lists every database of a Kusto (Azure Data Explorer) cluster and the tables
of each database, and prints them as a tree.

AUTHENTICATION:
  Uses the ambient Azure credential chain (environment variables, Azure CLI
  login, managed identity). Set KUSTO_ACCESS_TOKEN to use an explicit token.

LOGGING:
  Each run writes a timestamped log file to logs/ next to the executable.
  Override with KUSTO_TREE_LOG_DIR; set the filter with KUSTO_TREE_LOG.

EXIT CODES:
  0    tree rendered or no databases found
  1    unexpected error
  2    usage error
  3    connection failure
  4    database listing failed
  130  interrupted

  Ambient credentials are resolved on the first request, so a failing Azure
  credential chain is reported as a database listing failure (4).

EXAMPLES:
  kusto-tree https://help.kusto.windows.net
  kusto-tree https://mycluster.westus2.kusto.windows.net
")]
pub struct Cli {
    /// Kusto cluster URL
    #[arg(help = "Kusto cluster URL (e.g., https://mycluster.westus2.kusto.windows.net)")]
    pub cluster_url: String,
}

/// How a completed run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The tree was written to the output.
    Rendered,
    /// The cluster reported no databases.
    NothingFound,
    /// No client could be opened; nothing was queried.
    ConnectionFailed,
    /// The database listing failed; no tables were queried.
    ListingFailed,
}

impl Outcome {
    /// Process exit code for this outcome.
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Rendered | Self::NothingFound => EXIT_SUCCESS,
            Self::ConnectionFailed => EXIT_CONNECTION_FAILED,
            Self::ListingFailed => EXIT_LISTING_FAILED,
        }
    }
}

/// Output streams of a run.
pub struct Console<'a> {
    /// Receives the tree and the "nothing found" message.
    pub out: &'a mut dyn Write,
    /// Receives error and status lines.
    pub err: &'a mut dyn Write,
}

/// Connects to the cluster, lists databases and tables, and renders the tree.
///
/// Connection and listing failures are reported on `console.err` and mapped
/// to an [`Outcome`]; only output failures are returned as errors.
///
/// # Errors
/// Returns an error if writing to the console fails.
pub async fn explore(
    cluster: &ClusterAddress,
    credentials: &dyn CredentialProvider,
    connector: &dyn Connector,
    style: TreeStyle,
    console: Console<'_>,
) -> anyhow::Result<Outcome> {
    let Console { out, err } = console;

    info!("Connecting to Kusto cluster: {}", cluster.redacted());
    let client = match credentials
        .acquire()
        .and_then(|credential| connector.connect(cluster, credential))
    {
        Ok(client) => client,
        Err(e) => {
            let message = e.full_message();
            error!("Error connecting to Kusto cluster: {}", message);
            writeln!(err, "Error connecting to Kusto cluster: {message}")?;
            return Ok(Outcome::ConnectionFailed);
        }
    };
    info!("Successfully connected to Kusto cluster");

    let databases = match list_databases(client.as_ref()).await {
        Ok(databases) => databases,
        Err(e) => {
            writeln!(err, "Error fetching databases: {}", e.full_message())?;
            return Ok(Outcome::ListingFailed);
        }
    };

    if databases.is_empty() {
        info!("No databases found");
        writeln!(out, "No databases found.")?;
        return Ok(Outcome::NothingFound);
    }

    let tree = collect_database_tables(client.as_ref(), &databases).await;

    for failure in tree.failures() {
        if let TableListing::Failed { reason } = &failure.tables {
            writeln!(
                err,
                "Error fetching tables for database {}: {}",
                failure.name, reason
            )?;
        }
    }

    write_tree(out, cluster, &tree, style)?;

    info!(
        "Tree display completed successfully: {} databases, {} tables, {} failed listings",
        tree.len(),
        tree.table_count(),
        tree.failures().count()
    );
    Ok(Outcome::Rendered)
}
