//! Joining source content to target rows by handle.
//!
//! [`ContentIndex`] maps each derived handle to exactly one source record,
//! resolving duplicates with a [`CollisionPolicy`]. Matching a
//! [`TargetTable`] against the index is exact string equality on the handle;
//! one source may match any number of target rows.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::handle::{Handle, HandleExtractor};
use crate::record::{SourceRecord, TargetTable};

/// Which source record keeps a handle claimed by more than one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// The later row in input order replaces the earlier one.
    #[default]
    LastWins,
    /// The first row in input order is kept.
    FirstWins,
}

impl CollisionPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LastWins => "last-wins",
            Self::FirstWins => "first-wins",
        }
    }
}

impl std::fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string cannot be parsed into a `CollisionPolicy`.
#[derive(Debug, Clone)]
pub struct PolicyParseError(pub String);

impl std::fmt::Display for PolicyParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown collision policy: '{}' (expected last-wins or first-wins)",
            self.0
        )
    }
}

impl std::error::Error for PolicyParseError {}

impl std::str::FromStr for CollisionPolicy {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "last-wins" | "last" => Ok(Self::LastWins),
            "first-wins" | "first" => Ok(Self::FirstWins),
            _ => Err(PolicyParseError(s.to_string())),
        }
    }
}

/// A handle derived from more than one source record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub handle: Handle,
    /// Source index that holds the handle after this collision
    pub kept: usize,
    /// Source index that lost the handle
    pub discarded: usize,
}

/// A source record whose URL did not yield a handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedSource {
    /// Index into the source records
    pub index: usize,
    pub url: String,
    pub reason: String,
}

impl MalformedSource {
    pub fn to_error(&self) -> RecordError {
        RecordError::malformed_url(&self.url, &self.reason)
    }
}

/// A source record matched to one target row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MatchPair {
    pub source: usize,
    pub target: usize,
}

/// An unmatched source handle that equals a target handle except for case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseMismatch {
    pub source: usize,
    pub source_handle: Handle,
    /// First target row whose handle differs only by case
    pub target: usize,
    pub target_handle: String,
}

/// The outcome of matching a target table against a [`ContentIndex`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    /// Matches in target row order
    pub pairs: Vec<MatchPair>,
    /// Target rows whose handle has no content
    pub unmatched_targets: Vec<usize>,
    /// Indexed source records that matched no target row, in first-seen handle order
    pub unmatched_sources: Vec<usize>,
    /// Unmatched sources whose handle matches a target row case-insensitively
    pub case_mismatches: Vec<CaseMismatch>,
}

impl MatchSet {
    /// Target rows matched by `source`.
    pub fn targets_for(&self, source: usize) -> impl Iterator<Item = usize> + '_ {
        self.pairs
            .iter()
            .filter(move |p| p.source == source)
            .map(|p| p.target)
    }

    pub fn stats(&self, sources_loaded: usize, index: &ContentIndex, targets_loaded: usize) -> MatchStats {
        MatchStats {
            sources_loaded,
            handles_indexed: index.len(),
            targets_loaded,
            targets_matched: self.pairs.len(),
            targets_unmatched: self.unmatched_targets.len(),
            sources_unmatched: self.unmatched_sources.len(),
            collisions: index.collisions().len(),
            malformed: index.malformed().len(),
            case_mismatches: self.case_mismatches.len(),
        }
    }
}

/// Counters describing one matching pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    pub sources_loaded: usize,
    pub handles_indexed: usize,
    pub targets_loaded: usize,
    pub targets_matched: usize,
    pub targets_unmatched: usize,
    pub sources_unmatched: usize,
    pub collisions: usize,
    pub malformed: usize,
    pub case_mismatches: usize,
}

impl MatchStats {
    /// Matched target rows per indexed handle, as a percentage.
    ///
    /// Exceeds 100% when handles match several target rows. `None` when
    /// nothing was indexed.
    pub fn match_rate(&self) -> Option<f64> {
        if self.handles_indexed == 0 {
            None
        } else {
            Some(self.targets_matched as f64 / self.handles_indexed as f64 * 100.0)
        }
    }
}

/// Handle → source record lookup built from the content export.
#[derive(Debug, Clone, Default)]
pub struct ContentIndex {
    by_handle: HashMap<Handle, usize>,
    /// Handles in the order they were first seen
    order: Vec<Handle>,
    collisions: Vec<Collision>,
    malformed: Vec<MalformedSource>,
}

impl ContentIndex {
    /// Index `sources` by derived handle.
    ///
    /// Records whose URL does not yield a handle are skipped and listed in
    /// [`malformed`](Self::malformed).
    pub fn build(sources: &[SourceRecord], extractor: &HandleExtractor, policy: CollisionPolicy) -> Self {
        let mut index = Self::default();

        for (i, source) in sources.iter().enumerate() {
            let handle = match extractor.extract(&source.url) {
                Ok(h) => h,
                Err(RecordError::MalformedUrl { url, reason }) => {
                    index.malformed.push(MalformedSource { index: i, url, reason });
                    continue;
                }
                Err(other) => {
                    index.malformed.push(MalformedSource {
                        index: i,
                        url: source.url.clone(),
                        reason: other.to_string(),
                    });
                    continue;
                }
            };

            match index.by_handle.get_mut(&handle) {
                Some(existing) => {
                    let (kept, discarded) = match policy {
                        CollisionPolicy::LastWins => (i, *existing),
                        CollisionPolicy::FirstWins => (*existing, i),
                    };
                    *existing = kept;
                    index.collisions.push(Collision {
                        handle,
                        kept,
                        discarded,
                    });
                }
                None => {
                    index.order.push(handle.clone());
                    index.by_handle.insert(handle, i);
                }
            }
        }

        index
    }

    /// Source index holding `handle`, if any.
    pub fn get(&self, handle: &str) -> Option<usize> {
        self.by_handle.get(handle).copied()
    }

    pub fn contains(&self, handle: &str) -> bool {
        self.by_handle.contains_key(handle)
    }

    /// Number of distinct handles.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// `(handle, source index)` pairs in first-seen order.
    pub fn entries(&self) -> impl Iterator<Item = (&Handle, usize)> {
        self.order.iter().map(|h| (h, self.by_handle[h]))
    }

    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    pub fn malformed(&self) -> &[MalformedSource] {
        &self.malformed
    }

    /// Match every row of `table` against the index.
    ///
    /// Matching is exact. Unmatched sources are then compared against the
    /// target handles case-insensitively and listed as
    /// [`case_mismatches`](MatchSet::case_mismatches).
    pub fn match_table(&self, table: &TargetTable) -> MatchSet {
        let mut set = MatchSet::default();
        let mut matched_sources = HashSet::new();

        for (row, handle) in table.handles() {
            match self.get(handle) {
                Some(source) => {
                    set.pairs.push(MatchPair { source, target: row });
                    matched_sources.insert(source);
                }
                None => set.unmatched_targets.push(row),
            }
        }

        set.unmatched_sources = self
            .entries()
            .map(|(_, source)| source)
            .filter(|source| !matched_sources.contains(source))
            .collect();

        if !set.unmatched_sources.is_empty() {
            let mut folded: HashMap<String, (usize, &str)> = HashMap::new();
            for (row, handle) in table.handles() {
                folded.entry(handle.to_lowercase()).or_insert((row, handle));
            }

            for (handle, source) in self.entries() {
                if matched_sources.contains(&source) {
                    continue;
                }
                if let Some(&(target, target_handle)) = folded.get(&handle.as_str().to_lowercase()) {
                    set.case_mismatches.push(CaseMismatch {
                        source,
                        source_handle: handle.clone(),
                        target,
                        target_handle: target_handle.to_string(),
                    });
                }
            }
        }

        set
    }
}

#[cfg(test)]
#[path = "tests/matcher_tests.rs"]
mod tests;
