//! Kusto (Azure Data Explorer) adapter backed by `azure_kusto_data`.
//!
//! Management commands go through the V1 REST endpoint of the cluster. Token
//! acquisition for ambient credentials is performed by the client library's
//! default Azure credential chain.

use super::{Connector, ManagementClient};
use crate::Result;
use crate::credentials::Credential;
use crate::error::KustoTreeError;
use crate::models::{ClusterAddress, ResultTable};
use async_trait::async_trait;
use azure_kusto_data::models::TableV1;
use azure_kusto_data::prelude::{ConnectionString, KustoClient, KustoClientOptions};

/// Connector producing [`KustoManagementClient`] handles.
#[derive(Debug, Clone, Copy, Default)]
pub struct KustoConnector;

impl KustoConnector {
    /// Creates a connector; clients are built per [`Connector::connect`] call.
    pub fn new() -> Self {
        Self
    }
}

impl Connector for KustoConnector {
    fn connect(
        &self,
        cluster: &ClusterAddress,
        credential: Credential,
    ) -> Result<Box<dyn ManagementClient>> {
        tracing::debug!(
            "Building Kusto connection string with {}",
            credential.kind()
        );

        let connection_string = match credential {
            Credential::Ambient => ConnectionString::with_default_auth(cluster.as_str()),
            Credential::AccessToken(token) => {
                ConnectionString::with_token_auth(cluster.as_str(), token.as_str())
            }
        };

        let client = KustoClient::new(connection_string, KustoClientOptions::default())
            .map_err(|e| KustoTreeError::connection_failed(cluster.redacted(), e))?;

        Ok(Box::new(KustoManagementClient { client }))
    }
}

/// Authenticated Kusto client handle.
pub struct KustoManagementClient {
    client: KustoClient,
}

#[async_trait]
impl ManagementClient for KustoManagementClient {
    async fn execute_management(&self, database: &str, command: &str) -> Result<Vec<ResultTable>> {
        let response = self
            .client
            .execute_command(database, command, None)
            .await
            .map_err(|e| KustoTreeError::query_failed(format!("'{command}' failed"), e))?;

        Ok(response.tables.into_iter().map(result_table).collect())
    }
}

/// Converts a V1 response table: column names in order, rows untouched.
fn result_table(table: TableV1) -> ResultTable {
    ResultTable::new(
        table
            .columns
            .into_iter()
            .map(|column| column.column_name)
            .collect(),
        table.rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Primary table of a `.show tables` response, as returned by the V1
    /// management endpoint of `help.kusto.windows.net`.
    const SHOW_TABLES_TABLE: &str = r#"{
        "TableName": "Table_0",
        "Columns": [
            {"ColumnName": "TableName", "DataType": "String", "ColumnType": "string"},
            {"ColumnName": "DatabaseName", "DataType": "String", "ColumnType": "string"},
            {"ColumnName": "Folder", "DataType": "String", "ColumnType": "string"},
            {"ColumnName": "DocString", "DataType": "String", "ColumnType": "string"}
        ],
        "Rows": [
            ["StormEvents", "Samples", "Storm_Events", "US storm events"],
            ["Covid19", "Samples", "", ""],
            ["demo_make_series1", "Samples", null, null]
        ]
    }"#;

    #[test]
    fn test_result_table_from_show_tables_payload() {
        let table: TableV1 = serde_json::from_str(SHOW_TABLES_TABLE).unwrap();

        let result = result_table(table);

        assert_eq!(
            result.columns,
            vec!["TableName", "DatabaseName", "Folder", "DocString"]
        );
        assert_eq!(result.rows.len(), 3);
        assert_eq!(
            result.rows[2],
            vec![
                json!("demo_make_series1"),
                json!("Samples"),
                json!(null),
                json!(null)
            ]
        );
        assert_eq!(
            result.string_column("TableName").unwrap(),
            vec!["StormEvents", "Covid19", "demo_make_series1"]
        );
    }
}
