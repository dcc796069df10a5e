//! Filter, paging and sort criteria for location queries
//!
//! A query runs in three fixed steps over a full snapshot of the
//! collection:
//!
//! ```text
//! snapshot ──▶ filter (txt, min_rate) ──▶ page window ──▶ sort ──▶ result
//! ```
//!
//! Paging happens before sorting, so a page holds the n-th window of the
//! *filtered storage order*, which is then sorted on its own.

use crate::core::location::Location;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Number of records in one page window
pub const PAGE_SIZE: usize = 5;

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Active filter criteria
///
/// - `txt`: case-insensitive pattern matched against the name or the
///   address; empty disables it
/// - `min_rate`: inclusive lower bound on `rate`; `0` disables it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterBy {
    pub txt: String,
    pub min_rate: f64,
}

impl Default for FilterBy {
    fn default() -> Self {
        Self {
            txt: String::new(),
            min_rate: 0.0,
        }
    }
}

impl FilterBy {
    /// Merge a partial update into this filter, returning the result
    pub fn merge(&mut self, update: FilterUpdate) -> &Self {
        if let Some(txt) = update.txt {
            self.txt = txt;
        }
        match update.min_rate {
            Some(rate) if !rate.is_nan() => self.min_rate = rate,
            Some(_) => tracing::debug!("ignoring non-numeric minRate update"),
            None => {}
        }
        self
    }

    /// Whether the rate bound is in effect (a zero bound is "no minimum")
    pub fn has_min_rate(&self) -> bool {
        self.min_rate != 0.0 && !self.min_rate.is_nan()
    }

    /// Build the text matcher for this filter, if text filtering is on
    pub fn text_matcher(&self) -> Option<TextMatcher> {
        TextMatcher::new(&self.txt)
    }

    /// Test one record against both criteria
    pub fn matches(&self, matcher: Option<&TextMatcher>, loc: &Location) -> bool {
        let txt_ok = matcher.is_none_or(|m| m.is_match(&loc.name) || m.is_match(&loc.geo.address));
        let rate_ok = !self.has_min_rate() || loc.rate >= self.min_rate;
        txt_ok && rate_ok
    }
}

/// Partial filter update. Absent fields leave the current filter untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterUpdate {
    pub txt: Option<String>,
    pub min_rate: Option<f64>,
}

impl FilterUpdate {
    pub fn txt(txt: impl Into<String>) -> Self {
        Self {
            txt: Some(txt.into()),
            min_rate: None,
        }
    }

    pub fn min_rate(min_rate: f64) -> Self {
        Self {
            txt: None,
            min_rate: Some(min_rate),
        }
    }

    /// Read a loosely-typed update such as `{"txt": "bea", "minRate": "4"}`.
    ///
    /// Unknown keys are ignored. `minRate` accepts numbers, numeric
    /// strings, booleans (as 1/0), null and blank strings (as 0); anything
    /// else is dropped rather than rejected. A `txt` of null clears the text filter.
    pub fn from_json(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        let txt = obj.get("txt").map(|v| match v {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        });

        let min_rate = obj.get("minRate").and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) if s.trim().is_empty() => Some(0.0),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Null => Some(0.0),
            _ => None,
        });

        Self { txt, min_rate }
    }
}

/// Case-insensitive pattern used by the text filter.
///
/// The filter text is compiled as a regular expression. Text that is not a
/// valid pattern, or that compiles too large, is matched literally instead
/// of failing the query.
#[derive(Debug, Clone)]
pub struct TextMatcher {
    kind: MatchKind,
}

#[derive(Debug, Clone)]
enum MatchKind {
    Pattern(Regex),
    /// Lowercased needle for a plain substring test
    Literal(String),
}

impl TextMatcher {
    /// `None` for empty text (text filtering disabled)
    pub fn new(txt: &str) -> Option<Self> {
        if txt.is_empty() {
            return None;
        }

        let kind = match build_case_insensitive(txt) {
            Ok(regex) => MatchKind::Pattern(regex),
            Err(e @ regex::Error::CompiledTooBig(_)) => {
                tracing::warn!(error = %e, "filter pattern too large, matching literally");
                MatchKind::Literal(txt.to_lowercase())
            }
            Err(e) => {
                tracing::warn!(pattern = %txt, error = %e, "invalid filter pattern, matching literally");
                match build_case_insensitive(&regex::escape(txt)) {
                    Ok(regex) => MatchKind::Pattern(regex),
                    Err(_) => MatchKind::Literal(txt.to_lowercase()),
                }
            }
        };

        Some(Self { kind })
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        match &self.kind {
            MatchKind::Pattern(regex) => regex.is_match(haystack),
            MatchKind::Literal(needle) => haystack.to_lowercase().contains(needle.as_str()),
        }
    }
}

fn build_case_insensitive(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    /// Interpret a signed multiplier (`1`, `-1`, ...). Zero and NaN have no
    /// direction.
    pub fn from_sign(sign: f64) -> Option<Self> {
        if sign > 0.0 {
            Some(Direction::Ascending)
        } else if sign < 0.0 {
            Some(Direction::Descending)
        } else {
            None
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }
}

/// The one sort key in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "direction", rename_all = "snake_case")]
pub enum SortBy {
    /// By `rate`
    ByRate(Direction),
    /// By `name`, locale-style (case-insensitive, lowercase first on ties)
    ByName(Direction),
    /// By `created_at`; ascending is oldest first
    ByCreationTime(Direction),
    /// Keep storage order
    Unsorted,
}

impl Default for SortBy {
    fn default() -> Self {
        SortBy::ByRate(Direction::Descending)
    }
}

impl SortBy {
    /// Read a legacy sort object such as `{"rate": -1}` or `{"name": 1}`.
    ///
    /// Keys are tested in the fixed order `rate`, `name`, `CreationTime`
    /// and the first one present wins. A zero or non-numeric multiplier
    /// leaves the order untouched. For `CreationTime` a positive multiplier
    /// means newest first, as it always has.
    pub fn from_json(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return SortBy::Unsorted;
        };

        let sign = |v: &Value| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        };

        let (key, raw) = if let Some(v) = obj.get("rate") {
            ("rate", v)
        } else if let Some(v) = obj.get("name") {
            ("name", v)
        } else if let Some(v) = obj.get("CreationTime").or_else(|| obj.get("creationTime")) {
            ("CreationTime", v)
        } else {
            return SortBy::Unsorted;
        };

        let Some(direction) = sign(raw).and_then(Direction::from_sign) else {
            return SortBy::Unsorted;
        };

        match key {
            "rate" => SortBy::ByRate(direction),
            "name" => SortBy::ByName(direction),
            _ => SortBy::ByCreationTime(direction.reversed()),
        }
    }

    /// Compare two records under this key
    pub fn compare(&self, a: &Location, b: &Location) -> Ordering {
        match *self {
            SortBy::ByRate(dir) => dir.apply(a.rate.partial_cmp(&b.rate).unwrap_or(Ordering::Equal)),
            SortBy::ByName(dir) => dir.apply(locale_compare(&a.name, &b.name)),
            SortBy::ByCreationTime(dir) => dir.apply(a.created_at.cmp(&b.created_at)),
            SortBy::Unsorted => Ordering::Equal,
        }
    }

    /// Stable in-place sort
    pub fn sort(&self, locs: &mut [Location]) {
        if *self != SortBy::Unsorted {
            locs.sort_by(|a, b| self.compare(a, b));
        }
    }
}

/// Natural-language string order.
///
/// Names compare on their base letters first, ignoring case and accents,
/// so "Éilat" sorts among the E's. Ties are broken by accents (unaccented
/// first), then by case (lowercase first).
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let base = |s: &str| {
        s.nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .collect::<Vec<char>>()
    };
    let accented = |s: &str| s.nfd().flat_map(char::to_lowercase).collect::<Vec<char>>();

    base(a)
        .cmp(&base(b))
        .then_with(|| accented(a).cmp(&accented(b)))
        // Same letters ignoring case: reversed code point order puts 'a' before 'A'.
        .then_with(|| b.cmp(a))
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Everything that shapes one query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOptions {
    pub filter: FilterBy,
    pub sort: SortBy,
    /// Zero-based page window; `None` returns all matches
    pub page: Option<usize>,
    pub page_size: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            filter: FilterBy::default(),
            sort: SortBy::default(),
            page: None,
            page_size: PAGE_SIZE,
        }
    }
}

impl QueryOptions {
    pub fn with_filter(mut self, filter: FilterBy) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_sort(mut self, sort: SortBy) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Run the filter → page → sort pipeline over a snapshot
    pub fn apply(&self, locs: Vec<Location>) -> Vec<Location> {
        let matcher = self.filter.text_matcher();
        let mut locs: Vec<Location> = locs
            .into_iter()
            .filter(|loc| self.filter.matches(matcher.as_ref(), loc))
            .collect();

        if let Some(page) = self.page {
            let len = locs.len();
            let start = page.saturating_mul(self.page_size).min(len);
            let end = start.saturating_add(self.page_size).min(len);
            locs = locs.drain(start..end).collect();
        }

        self.sort.sort(&mut locs);
        locs
    }
}
