//! Clipboard history module for tracking recent clipboard items
//!
//! The history is filled by a host-side poller; the query engine only reads
//! snapshots of it.

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use std::time::Instant;

use super::format::truncate_chars;

/// Maximum number of entries kept in history
pub const MAX_HISTORY: usize = 20;

/// History shared between the host poller (writer) and the engine (reader)
pub type SharedClipboard = Arc<RwLock<ClipboardHistory>>;

/// Entry in clipboard history
#[derive(Debug, Clone)]
pub struct ClipboardEntry {
    pub content: String,
    pub timestamp: Instant,
}

impl ClipboardEntry {
    /// First `max_chars` characters of the content
    pub fn preview(&self, max_chars: usize) -> &str {
        truncate_chars(&self.content, max_chars)
    }

    /// Get relative time description
    pub fn time_ago(&self) -> String {
        let secs = self.timestamp.elapsed().as_secs();

        if secs < 60 {
            "just now".to_string()
        } else if secs < 3600 {
            format!("{}m ago", secs / 60)
        } else if secs < 86400 {
            format!("{}h ago", secs / 3600)
        } else {
            format!("{}d ago", secs / 86400)
        }
    }
}

/// Most-recent-first clipboard history without duplicates
#[derive(Debug, Clone)]
pub struct ClipboardHistory {
    items: VecDeque<ClipboardEntry>,
    max_items: usize,
}

impl ClipboardHistory {
    /// Create a new clipboard history with max items limit
    pub fn new(max_items: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(max_items),
            max_items,
        }
    }

    /// Wrap a fresh history for sharing with a poller
    pub fn shared() -> SharedClipboard {
        Arc::new(RwLock::new(Self::default()))
    }

    /// Record copied text. Empty text and text already present anywhere in
    /// the history are ignored. Returns true if the text was added.
    pub fn push(&mut self, content: impl Into<String>) -> bool {
        let content = content.into();
        if content.is_empty() || self.items.iter().any(|item| item.content == content) {
            return false;
        }

        self.items.push_front(ClipboardEntry {
            content,
            timestamp: Instant::now(),
        });

        // Evict oldest
        while self.items.len() > self.max_items {
            self.items.pop_back();
        }
        true
    }

    /// Get item by index
    pub fn get(&self, index: usize) -> Option<&ClipboardEntry> {
        self.items.get(index)
    }

    /// Number of items in history
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for ClipboardHistory {
    fn default() -> Self {
        Self::new(MAX_HISTORY)
    }
}

/// Copy the entries out of a shared history. A poisoned lock still yields
/// its data; the writer only ever leaves the deque in a consistent state.
pub fn snapshot(shared: &SharedClipboard) -> Vec<ClipboardEntry> {
    let guard = match shared.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    guard.items.iter().cloned().collect()
}
