#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub const TARGET_HEADER: &str = "Handle,Command,Title,Body HTML,Sort Order,Metafield: custom.collection_subheading [single_line_text_field]";

pub const SOURCE_HEADER: &str = "URL,Title,Description,Sub-heading,Content under product listing";

/// Write `lines` joined by newlines to `dir/name` and return the path.
pub fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut contents = lines.join("\n");
    contents.push('\n');
    std::fs::write(&path, contents).unwrap();
    path
}

pub fn standard_source(dir: &Path) -> PathBuf {
    write_csv(
        dir,
        "content.csv",
        &[
            SOURCE_HEADER,
            "https://example.com/diamonds-engagement-rings/tacori.html,Tacori,Fine jewelry.,,",
            "https://example.com/watches.html,Watches,<b>Swiss</b> made,Timepieces,Free shipping",
            "https://example.com/gifts/unused.html,Unused,Nobody links here,,",
        ],
    )
}

pub fn standard_target(dir: &Path) -> PathBuf {
    write_csv(
        dir,
        "collections.csv",
        &[
            TARGET_HEADER,
            "tacori,MERGE,Old Tacori,<p>old</p>,manual,",
            "watches,MERGE,Old Watches,,best-selling,old sub",
            "bracelets,MERGE,Bracelets,\"<p>keep, this</p>\",manual,",
            "watches,MERGE,Watches Copy,,manual,",
        ],
    )
}
