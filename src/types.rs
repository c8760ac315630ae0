//! Common types used throughout tidpage
//!
//! Records, pages, cursors and the per-attempt request description.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// One domain item. Opaque apart from its trailing identifier field.
pub type Record = JsonValue;

// ============================================================================
// Cursor
// ============================================================================

/// Position from which the next page continues
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cursor {
    /// Numeric identifier
    Number(serde_json::Number),
    /// String identifier
    Text(String),
}

impl Cursor {
    /// Read a cursor from a record's identifier value.
    ///
    /// Returns `None` for null, booleans, arrays and objects.
    pub fn from_value(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Number(n) => Some(Self::Number(n.clone())),
            JsonValue::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    /// Whether this is the numeric zero
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Number(n) => n.as_f64() == Some(0.0),
            Self::Text(_) => false,
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for Cursor {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i64> for Cursor {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for Cursor {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cursor {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl std::str::FromStr for Cursor {
    type Err = std::convert::Infallible;

    /// Canonical integers become numeric cursors, anything else stays text.
    ///
    /// `"007"` or `"+5"` keep their text so the query carries it unchanged.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let number = s
            .parse::<u64>()
            .map(Self::from)
            .or_else(|_| s.parse::<i64>().map(Self::from))
            .ok()
            .filter(|cursor| cursor.to_string() == s);
        Ok(number.unwrap_or_else(|| Self::Text(s.to_string())))
    }
}

// ============================================================================
// Page
// ============================================================================

/// Ordered records returned by one successful fetch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Page {
    records: Vec<Record>,
}

impl Page {
    /// Create a page from records
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the page has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The last record, if any
    pub fn last(&self) -> Option<&Record> {
        self.records.last()
    }

    /// Identifier carried by the last record under `field`
    pub fn trailing_id(&self, field: &str) -> Option<Cursor> {
        self.last()
            .and_then(|record| record.get(field))
            .and_then(Cursor::from_value)
    }

    /// Consume the page, returning its records
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl From<Vec<Record>> for Page {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl IntoIterator for Page {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Where a page lives: endpoint plus the cursor to continue from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// Endpoint URL without the cursor parameter
    pub url: String,
    /// Cursor for the page to fetch
    pub cursor: Cursor,
}

impl PageQuery {
    /// Create a new page query
    pub fn new(url: impl Into<String>, cursor: impl Into<Cursor>) -> Self {
        Self {
            url: url.into(),
            cursor: cursor.into(),
        }
    }
}

/// A single fetch attempt. Created fresh per attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Endpoint URL without the cursor parameter
    pub url: String,
    /// Cursor being fetched
    pub cursor: Cursor,
    /// 1-based attempt number
    pub attempt: u32,
}

impl PageRequest {
    /// Create the first attempt for a URL and cursor
    pub fn first(url: impl Into<String>, cursor: Cursor) -> Self {
        Self {
            url: url.into(),
            cursor,
            attempt: 1,
        }
    }

    /// Same URL and cursor, next attempt number
    #[must_use]
    pub fn next_attempt(&self) -> Self {
        Self {
            url: self.url.clone(),
            cursor: self.cursor.clone(),
            attempt: self.attempt + 1,
        }
    }

    /// Build the URL for this request, appending `<param>=<cursor>`
    pub fn request_url(&self, param: &str) -> Result<String> {
        let mut url = url::Url::parse(&self.url)?;
        url.query_pairs_mut()
            .append_pair(param, &self.cursor.to_string());
        Ok(url.into())
    }
}
