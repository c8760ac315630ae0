//! Pagination module
//!
//! Cursor pagination where each page's last record carries the id to
//! request next.
//!
//! # Overview
//!
//! [`CursorStream`] is pull-based: nothing is fetched, retried or delayed
//! until the consumer asks for the next page. Iteration stops without
//! yielding when a page has no usable trailing id (no records, a missing or
//! null id, or the zero sentinel), and stops after yielding an error when a
//! fetch fails for good.

mod stream;

pub use stream::CursorStream;
