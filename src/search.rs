//! Search source trait for the fallback fan-out
//!
//! Each source scans its own backing store on every call and returns
//! candidates in its own order. The engine runs all sources concurrently
//! and merges their output in the order the sources were registered.

use crate::core::ResultItem;

/// A provider that can contribute results for a query
pub trait Source: Send + Sync {
    /// Unique name of this source (e.g., "apps", "bookmarks", "files")
    fn name(&self) -> &'static str;

    /// Whether the source is switched on in the configuration
    fn enabled(&self) -> bool {
        true
    }

    /// Shortest query (in characters) this source answers
    fn min_query_len(&self) -> usize {
        1
    }

    /// Maximum number of results this source contributes to the merged list
    fn limit(&self) -> usize;

    /// Check if this source should handle the given query
    fn should_search(&self, query: &str) -> bool {
        self.enabled() && query.chars().count() >= self.min_query_len()
    }

    /// Scan the backing store. Unreadable or malformed inputs are skipped,
    /// never reported.
    fn search(&self, query: &str) -> Vec<ResultItem>;
}
