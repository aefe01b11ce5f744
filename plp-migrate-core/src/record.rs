//! Source and target record types.

use serde::Serialize;

use crate::error::RecordError;

/// One row of new PLP content, keyed by the page's storefront URL.
///
/// Values are expected to be trimmed by whoever reads them. Empty optional
/// fields are normalized to `None` by the builder methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceRecord {
    pub url: String,
    pub title: String,
    /// Rich text; may already be an HTML fragment.
    pub description: String,
    pub subheading: Option<String>,
    /// The "content under product listing" block.
    pub extra: Option<String>,
}

impl SourceRecord {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            description: description.into(),
            subheading: None,
            extra: None,
        }
    }

    pub fn with_subheading(mut self, subheading: impl Into<String>) -> Self {
        self.subheading = non_empty(subheading.into());
        self
    }

    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = non_empty(extra.into());
        self
    }

    /// Subheading, treating a blank value as absent.
    pub fn subheading(&self) -> Option<&str> {
        self.subheading
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }

    /// Extra content block, treating a blank value as absent.
    pub fn extra(&self) -> Option<&str> {
        self.extra.as_deref().filter(|s| !s.trim().is_empty())
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() { None } else { Some(s) }
}

/// The target columns rewritten by a migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetField {
    Title,
    BodyHtml,
    Subheading,
}

impl TargetField {
    pub const ALL: [TargetField; 3] = [Self::Title, Self::BodyHtml, Self::Subheading];

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::BodyHtml => "Body HTML",
            Self::Subheading => "Subheading",
        }
    }
}

impl std::fmt::Display for TargetField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Zero-based positions of the columns the migration reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetColumns {
    pub handle: usize,
    pub title: usize,
    pub body_html: usize,
    pub subheading: usize,
}

impl TargetColumns {
    pub fn index_of(&self, field: TargetField) -> usize {
        match field {
            TargetField::Title => self.title,
            TargetField::BodyHtml => self.body_html,
            TargetField::Subheading => self.subheading,
        }
    }

    fn max_index(&self) -> usize {
        self.handle
            .max(self.title)
            .max(self.body_html)
            .max(self.subheading)
    }
}

/// One row of the target export. Field values are kept exactly as read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetRecord {
    fields: Vec<String>,
}

impl TargetRecord {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Field at `index`, or `""` past the end of the row.
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TargetRecord {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// The full target export: raw header, resolved columns, and rows in input order.
///
/// Every row has exactly as many fields as the header; only the title, body
/// and subheading columns can be changed after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetTable {
    headers: Vec<String>,
    columns: TargetColumns,
    records: Vec<TargetRecord>,
}

impl TargetTable {
    pub fn new(
        headers: Vec<String>,
        columns: TargetColumns,
        records: Vec<TargetRecord>,
    ) -> Result<Self, RecordError> {
        if columns.max_index() >= headers.len() {
            return Err(RecordError::schema_mismatch(format!(
                "column index {} is out of range for a header with {} columns",
                columns.max_index(),
                headers.len()
            )));
        }

        if let Some((i, record)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != headers.len())
        {
            return Err(RecordError::schema_mismatch(format!(
                "record {} has {} fields, header has {}",
                i + 1,
                record.len(),
                headers.len()
            )));
        }

        Ok(Self {
            headers,
            columns,
            records,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn columns(&self) -> &TargetColumns {
        &self.columns
    }

    pub fn records(&self) -> &[TargetRecord] {
        &self.records
    }

    pub fn record(&self, row: usize) -> Option<&TargetRecord> {
        self.records.get(row)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Handle of `row` with surrounding whitespace removed.
    pub fn handle(&self, row: usize) -> &str {
        self.records
            .get(row)
            .map_or("", |r| r.field(self.columns.handle).trim())
    }

    pub fn field(&self, row: usize, field: TargetField) -> &str {
        self.records
            .get(row)
            .map_or("", |r| r.field(self.columns.index_of(field)))
    }

    /// Replace one content field. Returns the previous value if it changed.
    pub fn set_field(&mut self, row: usize, field: TargetField, value: String) -> Option<String> {
        let index = self.columns.index_of(field);
        let slot = self.records.get_mut(row)?.fields.get_mut(index)?;
        if *slot == value {
            return None;
        }
        Some(std::mem::replace(slot, value))
    }

    /// `(row, handle)` for every row, in input order.
    pub fn handles(&self) -> impl Iterator<Item = (usize, &str)> {
        (0..self.records.len()).map(move |row| (row, self.handle(row)))
    }
}

#[cfg(test)]
#[path = "tests/record_tests.rs"]
mod tests;
