#![forbid(unsafe_code)]

//! Presentation-side filtering: text search and label filters.
//!
//! Filters read a board and return a filtered copy for rendering. They
//! never touch the live board, so dragging always operates on the full,
//! unfiltered item order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Container};

/// Payloads that can be searched and filtered.
pub trait Filterable {
    /// Text fields searched by the free-text query.
    fn search_text(&self) -> Vec<&str>;

    /// Labels matched by label filters (tags, priority, status, ...).
    fn labels(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Display name of the assignee, if any.
    fn assignee(&self) -> Option<&str> {
        None
    }
}

/// Search query plus label filters.
///
/// An item is shown when it matches the query (case-insensitive substring
/// of any search text) and carries at least one of the selected labels.
/// Empty query and empty labels each match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardFilter {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl BoardFilter {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            labels: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Toggle a label on or off, as a filter picker does.
    pub fn toggle_label(&mut self, label: &str) {
        if let Some(pos) = self.labels.iter().position(|l| l == label) {
            self.labels.remove(pos);
        } else {
            self.labels.push(label.to_owned());
        }
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.labels.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.labels.is_empty()
    }

    /// Whether a single payload passes the filter.
    #[must_use]
    pub fn matches<P: Filterable>(&self, payload: &P) -> bool {
        let needle = self.query.trim().to_lowercase();
        self.matches_needle(payload, &needle)
    }

    fn matches_needle<P: Filterable>(&self, payload: &P, needle: &str) -> bool {
        let text_ok = needle.is_empty()
            || payload
                .search_text()
                .iter()
                .any(|text| text.to_lowercase().contains(needle));
        let labels_ok = self.labels.is_empty() || {
            let labels = payload.labels();
            self.labels.iter().any(|want| labels.contains(&want.as_str()))
        };
        text_ok && labels_ok
    }

    /// Filtered copy of the board. Containers are always kept.
    #[must_use]
    pub fn apply<P: Filterable + Clone>(&self, board: &Board<P>) -> Board<P> {
        if self.is_empty() {
            return board.snapshot();
        }
        let needle = self.query.trim().to_lowercase();
        let containers = board
            .containers()
            .iter()
            .map(|c| {
                let mut kept = Container::new(c.id().clone(), c.title())
                    .with_collapsed(c.is_collapsed())
                    .with_items(
                        c.items()
                            .iter()
                            .filter(|item| self.matches_needle(&item.payload, &needle))
                            .cloned(),
                    );
                if let Some(capacity) = c.capacity() {
                    kept = kept.with_capacity(capacity);
                }
                kept
            })
            .collect();
        // A subset of a valid board is valid.
        Board::from_valid(containers)
    }
}

/// Label usage counts across the board, most used first, then by name.
#[must_use]
pub fn label_counts<P: Filterable>(board: &Board<P>) -> Vec<(String, usize)> {
    count_sorted(
        board
            .containers()
            .iter()
            .flat_map(|c| c.items())
            .flat_map(|item| item.payload.labels()),
    )
}

/// Assignee counts across the board, most used first, then by name.
#[must_use]
pub fn assignee_counts<P: Filterable>(board: &Board<P>) -> Vec<(String, usize)> {
    count_sorted(
        board
            .containers()
            .iter()
            .flat_map(|c| c.items())
            .filter_map(|item| item.payload.assignee()),
    )
}

fn count_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    let mut sorted: Vec<_> = counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    sorted
}
