//! Writing rendered content into target rows, and comparing rows field by field.

use serde::Serialize;

use crate::record::{TargetField, TargetTable};
use crate::render::RenderedContent;

/// A content field whose value differs between two versions of a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    pub field: TargetField,
    pub before: String,
    pub after: String,
}

impl FieldChange {
    /// One-line description, e.g. `Title: 'Old' → 'New'`.
    ///
    /// Body HTML is summarized rather than printed.
    pub fn describe(&self) -> String {
        match self.field {
            TargetField::BodyHtml => "Body HTML: updated with new content".to_string(),
            field => format!("{}: '{}' \u{2192} '{}'", field.label(), self.before, self.after),
        }
    }
}

/// Write `content` into row `target` of `table`.
///
/// Fields that `content` leaves as `None` are untouched, as is every other
/// column. Returns the fields whose value actually changed.
pub fn apply_content(table: &mut TargetTable, target: usize, content: &RenderedContent) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    for field in TargetField::ALL {
        let Some(value) = content.get(field) else {
            continue;
        };
        if let Some(before) = table.set_field(target, field, value.to_string()) {
            changes.push(FieldChange {
                field,
                before,
                after: value.to_string(),
            });
        }
    }

    changes
}

/// Compare the content fields of `row` in two versions of a table.
///
/// A field counts as changed only when the values differ and the updated
/// value is non-empty, so a cleared field is not reported as an update.
pub fn compare_fields(original: &TargetTable, updated: &TargetTable, row: usize) -> Vec<FieldChange> {
    TargetField::ALL
        .into_iter()
        .filter_map(|field| {
            let before = original.field(row, field);
            let after = updated.field(row, field);
            (before != after && !after.is_empty()).then(|| FieldChange {
                field,
                before: before.to_string(),
                after: after.to_string(),
            })
        })
        .collect()
}

/// Fields of `row` that do not hold what `expected` would write.
///
/// `before` is the value found in the table, `after` the expected value.
/// Fields `expected` leaves alone are not checked.
pub fn find_discrepancies(table: &TargetTable, row: usize, expected: &RenderedContent) -> Vec<FieldChange> {
    TargetField::ALL
        .into_iter()
        .filter_map(|field| {
            let want = expected.get(field)?;
            let actual = table.field(row, field);
            (actual != want).then(|| FieldChange {
                field,
                before: actual.to_string(),
                after: want.to_string(),
            })
        })
        .collect()
}
