//! Browser bookmark search over Chromium-style `Bookmarks` JSON files.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::core::{ResultItem, ResultPayload};
use crate::error::LumenResult;
use crate::search::Source;

/// Maximum bookmarks in the merged fallback list
pub const BOOKMARK_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkEntry {
    pub name: String,
    pub url: String,
}

impl BookmarkEntry {
    /// Host part of the URL, or the raw URL if it doesn't parse
    pub fn host(&self) -> String {
        reqwest::Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| self.url.clone())
    }

    pub fn into_result(self) -> ResultItem {
        let description = format!("Bookmark • {}", self.host());
        ResultItem::new(self.name, description, ResultPayload::Bookmark { url: self.url })
    }
}

#[derive(Debug, Deserialize)]
struct BookmarkFile {
    roots: Option<Roots>,
}

#[derive(Debug, Deserialize)]
struct Roots {
    bookmark_bar: Option<BookmarkNode>,
    other: Option<BookmarkNode>,
    synced: Option<BookmarkNode>,
}

#[derive(Debug, Deserialize)]
struct BookmarkNode {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    children: Vec<BookmarkNode>,
}

fn collect_matches(node: &BookmarkNode, query_lower: &str, out: &mut Vec<BookmarkEntry>) {
    match node.kind.as_str() {
        "url" if !node.url.is_empty() && !node.name.is_empty() => {
            if node.name.to_lowercase().contains(query_lower)
                || node.url.to_lowercase().contains(query_lower)
            {
                out.push(BookmarkEntry {
                    name: node.name.clone(),
                    url: node.url.clone(),
                });
            }
        }
        "folder" => {
            for child in &node.children {
                collect_matches(child, query_lower, out);
            }
        }
        _ => {}
    }
}

/// Parse one bookmark file and collect URL nodes matching the query
pub fn search_file(path: &Path, query: &str) -> LumenResult<Vec<BookmarkEntry>> {
    let content = std::fs::read_to_string(path)?;
    let file: BookmarkFile = serde_json::from_str(&content)?;

    let query_lower = query.to_lowercase();
    let mut matches = Vec::new();
    if let Some(roots) = file.roots {
        for root in [roots.bookmark_bar, roots.other, roots.synced]
            .iter()
            .flatten()
        {
            collect_matches(root, &query_lower, &mut matches);
        }
    }
    Ok(matches)
}

/// Bookmarks from every configured browser, deduplicated by exact URL
pub struct BookmarkSource {
    files: Vec<PathBuf>,
    enabled: bool,
    min_query_len: usize,
}

impl BookmarkSource {
    pub fn new(files: Vec<PathBuf>, enabled: bool, min_query_len: usize) -> Self {
        Self {
            files,
            enabled,
            min_query_len,
        }
    }

    pub fn search_bookmarks(&self, query: &str) -> Vec<BookmarkEntry> {
        let mut seen = HashSet::new();
        let mut results = Vec::new();

        for path in &self.files {
            if !path.exists() {
                continue;
            }
            match search_file(path, query) {
                Ok(matches) => results.extend(
                    matches
                        .into_iter()
                        .filter(|entry| seen.insert(entry.url.clone())),
                ),
                Err(e) => {
                    tracing::debug!(path = %path.display(), "Skipping bookmark file: {}", e);
                }
            }
        }

        results
    }
}

impl Source for BookmarkSource {
    fn name(&self) -> &'static str {
        "bookmarks"
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn min_query_len(&self) -> usize {
        self.min_query_len
    }

    fn limit(&self) -> usize {
        BOOKMARK_LIMIT
    }

    fn search(&self, query: &str) -> Vec<ResultItem> {
        if !self.should_search(query) {
            return Vec::new();
        }
        self.search_bookmarks(query)
            .into_iter()
            .map(BookmarkEntry::into_result)
            .collect()
    }
}
