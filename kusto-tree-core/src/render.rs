//! Tree rendering of a cluster's databases and tables.
//!
//! The tree always has three levels (cluster, database, table), so two nested
//! loops are enough. Whether a node is the last of its siblings decides its
//! connector, and a database's position decides the prefix of its tables.

use crate::models::{ClusterAddress, DatabaseTableMap, TableListing};
use colored::Colorize;
use std::io::{self, IsTerminal, Write};

const CLUSTER: &str = "🌐 ";
const DATABASE: &str = "📁 ";
const TABLE: &str = "📋 ";
const PIPE: &str = "│ ";
const TEE: &str = "├─";
const ELBOW: &str = "└─";
const SPACE: &str = "  ";
const FAILED: &str = "✗ ";

/// How tree lines are decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeStyle {
    /// Markers and names only, no escape sequences.
    Plain,
    /// Same text wrapped in ANSI colors.
    Colored,
}

impl TreeStyle {
    /// `Colored` when stdout is a terminal and colors are not disabled
    /// (`NO_COLOR`, `CLICOLOR=0`), `Plain` otherwise.
    pub fn detect() -> Self {
        if io::stdout().is_terminal() && colored::control::SHOULD_COLORIZE.should_colorize() {
            Self::Colored
        } else {
            Self::Plain
        }
    }

    fn cluster(self, name: &str) -> String {
        match self {
            Self::Plain => format!("{CLUSTER}{name}"),
            Self::Colored => format!("{CLUSTER}{name}").cyan().bold().to_string(),
        }
    }

    fn database(self, name: &str) -> String {
        match self {
            Self::Plain => format!("{DATABASE}{name}"),
            Self::Colored => format!("{DATABASE}{name}").green().bold().to_string(),
        }
    }

    fn table(self, name: &str) -> String {
        match self {
            Self::Plain => format!("{TABLE}{name}"),
            Self::Colored => format!("{TABLE}{name}").yellow().to_string(),
        }
    }

    fn failure(self, reason: &str) -> String {
        let text = format!("{FAILED}table listing failed: {}", single_line(reason));
        match self {
            Self::Plain => text,
            Self::Colored => text.red().dimmed().to_string(),
        }
    }

    fn branch(self, marker: &'static str) -> String {
        match self {
            Self::Plain => marker.to_string(),
            Self::Colored => marker.white().to_string(),
        }
    }
}

/// Folds a possibly multi-line message into one line so it cannot break the
/// tree's prefixes. Each line is trimmed and blank lines are dropped.
fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders the tree as lines without trailing newlines.
///
/// The output depends only on the arguments; rendering the same map twice
/// yields identical lines.
pub fn render_lines(
    cluster: &ClusterAddress,
    databases: &DatabaseTableMap,
    style: TreeStyle,
) -> Vec<String> {
    let mut lines = vec![style.cluster(cluster.as_str())];

    let mut entries = databases.iter().peekable();
    while let Some(entry) = entries.next() {
        let is_last_db = entries.peek().is_none();

        let (connector, prefix) = if is_last_db {
            (ELBOW, SPACE)
        } else {
            (TEE, PIPE)
        };
        lines.push(format!(
            "{}{}",
            style.branch(connector),
            style.database(&entry.name)
        ));
        let prefix = style.branch(prefix);

        match &entry.tables {
            TableListing::Listed(tables) => {
                let mut tables = tables.iter().peekable();
                while let Some(table) = tables.next() {
                    let connector = if tables.peek().is_none() { ELBOW } else { TEE };
                    lines.push(format!(
                        "{prefix}{}{}",
                        style.branch(connector),
                        style.table(table)
                    ));
                }
            }
            TableListing::Failed { reason } => {
                lines.push(format!(
                    "{prefix}{}{}",
                    style.branch(ELBOW),
                    style.failure(reason)
                ));
            }
        }
    }

    lines
}

/// Writes the rendered tree to `out`, one line per node.
///
/// # Errors
/// Returns any I/O error raised by the writer.
pub fn write_tree<W: Write + ?Sized>(
    out: &mut W,
    cluster: &ClusterAddress,
    databases: &DatabaseTableMap,
    style: TreeStyle,
) -> io::Result<()> {
    for line in render_lines(cluster, databases, style) {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
