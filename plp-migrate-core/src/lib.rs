//! Core data model for migrating PLP content into a collections export.
//!
//! Everything in this crate is pure: deriving handles from source URLs,
//! indexing and matching source content against target rows, rendering the
//! collection description HTML, and writing rendered fields back into rows.
//! File I/O and settings live in `plp-migrate-lib`.

pub mod error;
pub mod handle;
pub mod matcher;
pub mod merge;
pub mod record;
pub mod render;

pub use error::RecordError;
pub use handle::{DEFAULT_URL_SUFFIX, Handle, HandleExtractor, extract_handle};
pub use matcher::{
    CaseMismatch, Collision, CollisionPolicy, ContentIndex, MalformedSource, MatchPair, MatchSet, MatchStats,
    PolicyParseError,
};
pub use merge::{FieldChange, apply_content, compare_fields, find_discrepancies};
pub use record::{SourceRecord, TargetColumns, TargetField, TargetRecord, TargetTable};
pub use render::{
    ContentFormat, ContentFormatParseError, RenderOptions, RenderedContent, escape_html,
    looks_like_html, render, render_body_html,
};
