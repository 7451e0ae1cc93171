//! Kusto cluster explorer.
//!
//! Connects to a Kusto (Azure Data Explorer) cluster, lists its databases and
//! the tables of each database, and prints them as a tree.
//!
//! # Guarantees
//! - Only read-only `.show` management commands are issued
//! - Requests run one at a time on a single thread
//! - Access tokens are never logged

use clap::Parser;
use kusto_tree::{Cli, EXIT_UNEXPECTED};
use kusto_tree_core::{ClusterAddress, RunConfig, init_run_log};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match RunConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Unexpected error: {}", e.full_message());
            return ExitCode::from(EXIT_UNEXPECTED);
        }
    };

    // Held until exit; dropping it closes the run log.
    let _run_log = match init_run_log(&config) {
        Ok(run_log) => run_log,
        Err(e) => {
            eprintln!("Unexpected error: {}", e.full_message());
            return ExitCode::from(EXIT_UNEXPECTED);
        }
    };

    run(ClusterAddress::new(cli.cluster_url)).await
}

/// Runs the explorer, racing it against Ctrl-C.
#[cfg(feature = "kusto")]
async fn run(cluster: ClusterAddress) -> ExitCode {
    use kusto_tree::{Console, EXIT_INTERRUPTED, explore};
    use kusto_tree_core::{ChainedCredentialProvider, KustoConnector, TreeStyle};
    use tracing::{error, info};

    let credentials = ChainedCredentialProvider::new();
    let connector = KustoConnector::new();
    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr();
    let console = Console {
        out: &mut stdout,
        err: &mut stderr,
    };

    tokio::select! {
        result = explore(&cluster, &credentials, &connector, TreeStyle::detect(), console) => {
            match result {
                Ok(outcome) => ExitCode::from(outcome.exit_code()),
                Err(e) => {
                    error!("Unexpected error: {:?}", e);
                    eprintln!("Unexpected error: {e:#}");
                    ExitCode::from(EXIT_UNEXPECTED)
                }
            }
        }
        Ok(()) = tokio::signal::ctrl_c() => {
            info!("Execution interrupted by user");
            eprintln!("\nExecution interrupted by user");
            ExitCode::from(EXIT_INTERRUPTED)
        }
    }
}

#[cfg(not(feature = "kusto"))]
async fn run(_cluster: ClusterAddress) -> ExitCode {
    tracing::error!("Kusto support not compiled in");
    eprintln!("Kusto support not available. Compile with --features kusto");
    ExitCode::from(EXIT_UNEXPECTED)
}
