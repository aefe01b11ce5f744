//! Spot checks of an updated target export.

use plp_migrate_core::{TargetField, TargetTable};
use serde::Serialize;

use crate::urls::collection_url;

const PREVIEW_CHARS: usize = 100;

/// An expected collection title, written `handle=Expected Title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expectation {
    pub handle: String,
    pub title: String,
}

/// Error returned when a string cannot be parsed into an `Expectation`.
#[derive(Debug, Clone)]
pub struct ExpectationParseError(pub String);

impl std::fmt::Display for ExpectationParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid expectation: '{}' (expected handle=Expected Title)",
            self.0
        )
    }
}

impl std::error::Error for ExpectationParseError {}

impl std::str::FromStr for Expectation {
    type Err = ExpectationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (handle, title) = s
            .split_once('=')
            .ok_or_else(|| ExpectationParseError(s.to_string()))?;
        let handle = handle.trim();
        if handle.is_empty() {
            return Err(ExpectationParseError(s.to_string()));
        }
        Ok(Self {
            handle: handle.to_string(),
            title: title.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// The title matches, or the row carries body or subheading content
    Passed {
        title_matches: bool,
        has_body: bool,
        has_subheading: bool,
        body_preview: String,
    },
    /// The row exists but holds neither the expected title nor any content
    NoContent { actual_title: String },
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub expectation: Expectation,
    pub url: String,
    pub outcome: CheckOutcome,
}

impl CheckResult {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, CheckOutcome::Passed { .. })
    }
}

/// Check each expectation against the first row carrying its handle.
pub fn check_expectations(table: &TargetTable, expectations: &[Expectation], base_url: &str) -> Vec<CheckResult> {
    expectations
        .iter()
        .map(|expectation| {
            let row = table
                .handles()
                .find(|(_, h)| *h == expectation.handle)
                .map(|(row, _)| row);

            let outcome = match row {
                None => CheckOutcome::NotFound,
                Some(row) => {
                    let title = table.field(row, TargetField::Title).trim();
                    let body = table.field(row, TargetField::BodyHtml).trim();
                    let subheading = table.field(row, TargetField::Subheading).trim();

                    let title_matches = title == expectation.title;
                    let has_body = !body.is_empty();
                    let has_subheading = !subheading.is_empty();

                    if title_matches || has_body || has_subheading {
                        CheckOutcome::Passed {
                            title_matches,
                            has_body,
                            has_subheading,
                            body_preview: preview(body),
                        }
                    } else {
                        CheckOutcome::NoContent {
                            actual_title: title.to_string(),
                        }
                    }
                }
            };

            CheckResult {
                expectation: expectation.clone(),
                url: collection_url(base_url, &expectation.handle),
                outcome,
            }
        })
        .collect()
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
