//! Storefront links for collections in a target export.

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use plp_migrate_core::{TargetField, TargetTable};
use serde::Serialize;

use crate::error::MigrateError;

/// Storefront URL of a collection: `{base_url}/collections/{handle}`.
pub fn collection_url(base_url: &str, handle: &str) -> String {
    format!("{}/collections/{}", base_url.trim_end_matches('/'), handle)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionLink {
    pub handle: String,
    pub title: String,
    pub url: String,
}

/// Links for every row with a non-empty handle, in table order.
///
/// With `unique`, only the first row for each handle is listed.
pub fn collection_links(table: &TargetTable, base_url: &str, unique: bool) -> Vec<CollectionLink> {
    let mut seen = HashSet::new();
    table
        .handles()
        .filter(|(_, handle)| !handle.is_empty())
        .filter(|(_, handle)| !unique || seen.insert(*handle))
        .map(|(row, handle)| CollectionLink {
            handle: handle.to_string(),
            title: table.field(row, TargetField::Title).trim().to_string(),
            url: collection_url(base_url, handle),
        })
        .collect()
}

/// Write one `title: url` line per link.
pub fn write_link_list<W: Write>(out: &mut W, links: &[CollectionLink]) -> std::io::Result<()> {
    for link in links {
        let label = if link.title.is_empty() {
            &link.handle
        } else {
            &link.title
        };
        writeln!(out, "{}: {}", label, link.url)?;
    }
    Ok(())
}

/// Save the link list to `path`, replacing any existing file.
pub fn save_link_list(path: &Path, links: &[CollectionLink]) -> Result<(), MigrateError> {
    let mut buf = Vec::new();
    write_link_list(&mut buf, links)?;
    crate::csv_io::write_atomic(path, &buf)
}
