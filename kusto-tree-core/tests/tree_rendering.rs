//! Rendering tests for the cluster/database/table tree.
//!
//! These tests exercise the public rendering API against maps built the same
//! way the collector builds them.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use kusto_tree_core::{
    ClusterAddress, DatabaseTableMap, TableListing, TreeStyle, render_lines, write_tree,
};

fn listed(tables: &[&str]) -> TableListing {
    TableListing::Listed(tables.iter().map(ToString::to_string).collect())
}

fn two_database_map() -> DatabaseTableMap {
    let mut map = DatabaseTableMap::new();
    map.push("A", listed(&["t1"]));
    map.push("B", listed(&[]));
    map
}

#[test]
fn test_two_databases_exact_output() {
    let cluster = ClusterAddress::new("https://mycluster.westus2.kusto.windows.net");
    let mut out = Vec::new();

    write_tree(&mut out, &cluster, &two_database_map(), TreeStyle::Plain).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "🌐 https://mycluster.westus2.kusto.windows.net\n\
         ├─📁 A\n\
         │ └─📋 t1\n\
         └─📁 B\n"
    );
}

#[test]
fn test_rendering_is_idempotent() {
    let cluster = ClusterAddress::new("https://help.kusto.windows.net");
    let map = two_database_map();

    let mut first = Vec::new();
    let mut second = Vec::new();
    write_tree(&mut first, &cluster, &map, TreeStyle::Plain).unwrap();
    write_tree(&mut second, &cluster, &map, TreeStyle::Plain).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_order_follows_map_not_alphabet() {
    let cluster = ClusterAddress::new("c");
    let mut map = DatabaseTableMap::new();
    map.push("zulu", listed(&["yankee", "alpha"]));
    map.push("bravo", listed(&["zebra", "aardvark", "mango"]));

    assert_eq!(
        render_lines(&cluster, &map, TreeStyle::Plain),
        vec![
            "🌐 c",
            "├─📁 zulu",
            "│ ├─📋 yankee",
            "│ └─📋 alpha",
            "└─📁 bravo",
            "  ├─📋 zebra",
            "  ├─📋 aardvark",
            "  └─📋 mango",
        ]
    );
}

#[test]
fn test_duplicate_database_names_are_kept() {
    let cluster = ClusterAddress::new("c");
    let mut map = DatabaseTableMap::new();
    map.push("same", listed(&["first"]));
    map.push("same", listed(&["second"]));

    let lines = render_lines(&cluster, &map, TreeStyle::Plain);
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[1], "├─📁 same");
    assert_eq!(lines[3], "└─📁 same");
    assert_eq!(lines[4], "  └─📋 second");
}

#[test]
fn test_failed_last_database_uses_blank_prefix() {
    let cluster = ClusterAddress::new("c");
    let mut map = DatabaseTableMap::new();
    map.push("ok", listed(&["t"]));
    map.push(
        "broken",
        TableListing::Failed {
            reason: "Query execution failed: '.show tables' failed: Forbidden (403)".to_string(),
        },
    );

    let lines = render_lines(&cluster, &map, TreeStyle::Plain);
    assert_eq!(
        lines.last().map(String::as_str),
        Some(
            "  └─✗ table listing failed: Query execution failed: '.show tables' failed: \
             Forbidden (403)"
        )
    );
}

#[test]
fn test_multi_line_failure_reason_stays_on_one_line() {
    let cluster = ClusterAddress::new("c");
    let mut map = DatabaseTableMap::new();
    map.push(
        "broken",
        TableListing::Failed {
            reason: "Forbidden (403)\r\n{\n  \"error\": \"denied\"\n}\n".to_string(),
        },
    );
    map.push("ok", listed(&["t"]));

    assert_eq!(
        render_lines(&cluster, &map, TreeStyle::Plain),
        vec![
            "🌐 c",
            "├─📁 broken",
            "│ └─✗ table listing failed: Forbidden (403) { \"error\": \"denied\" }",
            "└─📁 ok",
            "  └─📋 t",
        ]
    );
}
