//! Metadata collection: databases of a cluster and tables of each database.
//!
//! Requests are issued strictly one at a time, in server order. Listing
//! failures are returned as errors (or recorded as [`TableListing::Failed`]),
//! never collapsed into empty lists.

use crate::adapters::ManagementClient;
use crate::error::{KustoTreeError, Result};
use crate::models::{DatabaseTableMap, ResultTable, TableListing};
use tracing::{error, info};

/// Management command listing the databases of a cluster.
pub const SHOW_DATABASES: &str = ".show databases";
/// Management command listing the tables of the database in scope.
pub const SHOW_TABLES: &str = ".show tables";

const DATABASE_NAME_COLUMN: &str = "DatabaseName";
const TABLE_NAME_COLUMN: &str = "TableName";

/// Lists database names in the order the cluster returns them.
///
/// # Errors
/// Returns an error if the command fails or its primary result has no
/// `DatabaseName` column.
pub async fn list_databases(client: &dyn ManagementClient) -> Result<Vec<String>> {
    info!("Fetching databases");

    let result = fetch_names(client, "", SHOW_DATABASES, DATABASE_NAME_COLUMN).await;
    match &result {
        Ok(databases) => info!("Found {} databases", databases.len()),
        Err(e) => error!("Error fetching databases: {}", e.full_message()),
    }
    result
}

/// Lists table names of `database` in the order the cluster returns them.
///
/// # Errors
/// Returns an error if the command fails or its primary result has no
/// `TableName` column.
pub async fn list_tables(client: &dyn ManagementClient, database: &str) -> Result<Vec<String>> {
    info!("Fetching tables for database: {}", database);

    let result = fetch_names(client, database, SHOW_TABLES, TABLE_NAME_COLUMN).await;
    match &result {
        Ok(tables) => info!("Found {} tables in database {}", tables.len(), database),
        Err(e) => error!(
            "Error fetching tables for database {}: {}",
            database,
            e.full_message()
        ),
    }
    result
}

/// Lists the tables of every database, one request after another.
///
/// A failure for one database is recorded in its entry and does not stop the
/// remaining databases from being listed.
pub async fn collect_database_tables(
    client: &dyn ManagementClient,
    databases: &[String],
) -> DatabaseTableMap {
    let mut map = DatabaseTableMap::new();

    for database in databases {
        let listing = match list_tables(client, database).await {
            Ok(tables) => TableListing::Listed(tables),
            Err(e) => TableListing::Failed {
                reason: e.full_message(),
            },
        };
        map.push(database.clone(), listing);
    }

    map
}

async fn fetch_names(
    client: &dyn ManagementClient,
    database: &str,
    command: &str,
    column: &str,
) -> Result<Vec<String>> {
    let tables = client.execute_management(database, command).await?;
    primary_result(&tables, command)?.string_column(column)
}

fn primary_result<'a>(tables: &'a [ResultTable], command: &str) -> Result<&'a ResultTable> {
    tables.first().ok_or_else(|| {
        KustoTreeError::unexpected_result(format!("'{command}' returned no result tables"))
    })
}
