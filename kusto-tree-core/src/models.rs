//! Data model for cluster metadata listings.
//!
//! All sequences keep the order in which the server returned them. Nothing
//! here is ever sorted.

use crate::error::{KustoTreeError, Result, redact_cluster_url};
use std::fmt;

/// Network address of a Kusto cluster, e.g.
/// `https://mycluster.westus2.kusto.windows.net`.
///
/// The address is opaque to this crate; malformed addresses surface as
/// connection failures from the connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterAddress(String);

impl ClusterAddress {
    /// Wraps a cluster address without validating it.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// The address exactly as given on the command line.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The address with any embedded password masked, for logs.
    pub fn redacted(&self) -> String {
        redact_cluster_url(&self.0)
    }
}

impl fmt::Display for ClusterAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One tabular result returned by a management command.
///
/// Rows are positional; values are looked up through the column names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    /// Column names in result order.
    pub columns: Vec<String>,
    /// Rows as JSON cells, positionally matching `columns`.
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl ResultTable {
    /// Creates a result table from column names and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<serde_json::Value>>) -> Self {
        Self { columns, rows }
    }

    /// Position of the named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Extracts every row's value of the named column as a string.
    ///
    /// String cells are taken verbatim; any other JSON value is rendered with
    /// its JSON text.
    ///
    /// # Errors
    /// Returns [`KustoTreeError::UnexpectedResult`] when the column does not
    /// exist or a row is too short to contain it.
    pub fn string_column(&self, name: &str) -> Result<Vec<String>> {
        let index = self.column_index(name).ok_or_else(|| {
            KustoTreeError::unexpected_result(format!("column '{name}' not found in result"))
        })?;

        self.rows
            .iter()
            .enumerate()
            .map(|(row_number, row)| {
                row.get(index)
                    .map(|value| match value {
                        serde_json::Value::String(text) => text.clone(),
                        other => other.to_string(),
                    })
                    .ok_or_else(|| {
                        KustoTreeError::unexpected_result(format!(
                            "row {row_number} has no value for column '{name}'"
                        ))
                    })
            })
            .collect()
    }
}

/// Outcome of listing the tables of one database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableListing {
    /// The listing succeeded; tables in server order (possibly empty).
    Listed(Vec<String>),
    /// The listing failed; the database's tables are unknown.
    Failed {
        /// Error message with its full cause chain.
        reason: String,
    },
}

impl TableListing {
    /// Tables of a successful listing, `None` for a failed one.
    pub fn tables(&self) -> Option<&[String]> {
        match self {
            Self::Listed(tables) => Some(tables),
            Self::Failed { .. } => None,
        }
    }

    /// Whether the listing failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// A database and the outcome of listing its tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseEntry {
    /// Database name as reported by the cluster.
    pub name: String,
    /// Tables of the database, or why they could not be listed.
    pub tables: TableListing,
}

/// Ordered mapping from database name to its table listing.
///
/// Entry order is insertion order, which the collector keeps equal to the
/// server's database order. Duplicate names are kept as separate entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseTableMap {
    entries: Vec<DatabaseEntry>,
}

impl DatabaseTableMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a database after every entry already present.
    pub fn push(&mut self, name: impl Into<String>, tables: TableListing) {
        self.entries.push(DatabaseEntry {
            name: name.into(),
            tables,
        });
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[DatabaseEntry] {
        &self.entries
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, DatabaseEntry> {
        self.entries.iter()
    }

    /// Number of databases, failed listings included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no database has been added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose table listing failed, in map order.
    pub fn failures(&self) -> impl Iterator<Item = &DatabaseEntry> {
        self.entries.iter().filter(|entry| entry.tables.is_failed())
    }

    /// Total number of tables across all successful listings.
    pub fn table_count(&self) -> usize {
        self.entries
            .iter()
            .filter_map(|entry| entry.tables.tables())
            .map(<[String]>::len)
            .sum()
    }
}

impl<'a> IntoIterator for &'a DatabaseTableMap {
    type Item = &'a DatabaseEntry;
    type IntoIter = std::slice::Iter<'a, DatabaseEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(String, TableListing)> for DatabaseTableMap {
    fn from_iter<I: IntoIterator<Item = (String, TableListing)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, tables) in iter {
            map.push(name, tables);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn databases_result() -> ResultTable {
        ResultTable::new(
            vec!["DatabaseName".to_string(), "PersistentStorage".to_string()],
            vec![
                vec![json!("Samples"), json!("https://storage/a")],
                vec![json!("ContosoSales"), json!("https://storage/b")],
            ],
        )
    }

    #[test]
    fn test_string_column_by_name() {
        let result = databases_result();
        assert_eq!(result.column_index("PersistentStorage"), Some(1));
        assert_eq!(
            result.string_column("DatabaseName").unwrap(),
            vec!["Samples", "ContosoSales"]
        );
    }

    #[test]
    fn test_string_column_missing_column() {
        let error = databases_result().string_column("TableName").unwrap_err();
        assert!(matches!(error, KustoTreeError::UnexpectedResult { .. }));
        assert!(error.to_string().contains("TableName"));
    }

    #[test]
    fn test_string_column_short_row() {
        let result = ResultTable::new(
            vec!["Folder".to_string(), "TableName".to_string()],
            vec![vec![json!("")]],
        );
        assert!(result.string_column("TableName").is_err());
    }

    #[test]
    fn test_string_column_non_string_values() {
        let result = ResultTable::new(vec!["Value".to_string()], vec![vec![json!(42)]]);
        assert_eq!(result.string_column("Value").unwrap(), vec!["42"]);
    }

    #[test]
    fn test_map_preserves_insertion_order() {
        let mut map = DatabaseTableMap::new();
        map.push("zeta", TableListing::Listed(vec!["b".into(), "a".into()]));
        map.push("alpha", TableListing::Listed(Vec::new()));
        map.push(
            "mid",
            TableListing::Failed {
                reason: "forbidden".into(),
            },
        );

        let names: Vec<&str> = map.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(map.len(), 3);
        assert_eq!(map.table_count(), 2);
        assert_eq!(map.failures().count(), 1);
        assert_eq!(
            map.entries()[0].tables.tables(),
            Some(&["b".to_string(), "a".to_string()][..])
        );
    }

    #[test]
    fn test_cluster_address_redaction() {
        let cluster = ClusterAddress::new("https://user:pw@help.kusto.windows.net");
        assert_eq!(cluster.as_str(), "https://user:pw@help.kusto.windows.net");
        assert!(!cluster.redacted().contains(":pw@"));
        assert_eq!(cluster.to_string(), cluster.as_str());
    }
}
