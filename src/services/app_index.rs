use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::matcher::ApproximateMatcher;
use crate::core::{ResultItem, ResultPayload};
use crate::search::Source;

/// Distance above which an app no longer counts as a match
pub const APP_MATCH_THRESHOLD: f64 = 0.3;

/// Maximum apps in the merged fallback list
pub const APP_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct AppEntry {
    pub name: String,
    /// Path of the `.desktop` file; doubles as the launch reference
    pub path: PathBuf,
    pub icon: String,
    pub description: String,
}

impl AppEntry {
    pub fn into_result(self) -> ResultItem {
        ResultItem::new(
            self.name,
            self.description,
            ResultPayload::App {
                exec: self.path.display().to_string(),
                icon: self.icon,
            },
        )
    }
}

/// Value of the first `Key=value` line for `key`, anywhere in the file
fn key_value<'a>(content: &'a str, key: &str) -> Option<&'a str> {
    content.lines().find_map(|line| {
        line.strip_prefix(key)
            .and_then(|rest| rest.strip_prefix('='))
            .filter(|value| !value.is_empty())
    })
}

/// Parse a desktop entry's `Name`, `Icon` and `Comment`.
/// Entries without a name are skipped.
pub fn parse_desktop_entry(path: &Path, content: &str) -> Option<AppEntry> {
    let name = key_value(content, "Name")?;

    Some(AppEntry {
        name: name.to_string(),
        path: path.to_path_buf(),
        icon: key_value(content, "Icon")
            .unwrap_or("application")
            .to_string(),
        description: key_value(content, "Comment").unwrap_or_default().to_string(),
    })
}

/// Scan the application directories (non-recursive) for desktop entries
pub fn scan_directories(dirs: &[PathBuf]) -> Vec<AppEntry> {
    let mut entries = Vec::new();

    for dir in dirs {
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "desktop") {
                continue;
            }

            // Unreadable files are skipped
            let Ok(content) = std::fs::read_to_string(path) else {
                continue;
            };
            if let Some(app) = parse_desktop_entry(path, &content) {
                entries.push(app);
            }
        }
    }

    entries
}

/// Installed applications, rescanned on every query
pub struct AppSource {
    dirs: Vec<PathBuf>,
    enabled: bool,
    matcher: ApproximateMatcher<AppEntry>,
}

impl AppSource {
    pub fn new(dirs: Vec<PathBuf>, enabled: bool) -> Self {
        let matcher = ApproximateMatcher::new(APP_MATCH_THRESHOLD)
            .field(1.0, |app: &AppEntry| app.name.as_str())
            .field(0.8, |app: &AppEntry| app.description.as_str());

        Self {
            dirs,
            enabled,
            matcher,
        }
    }

    /// Search for apps matching the query
    pub fn search_apps(&self, query: &str) -> Vec<AppEntry> {
        let apps = scan_directories(&self.dirs);
        tracing::debug!(count = apps.len(), "Scanned applications");
        self.matcher.rank(apps, query)
    }
}

impl Source for AppSource {
    fn name(&self) -> &'static str {
        "apps"
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn limit(&self) -> usize {
        APP_LIMIT
    }

    fn search(&self, query: &str) -> Vec<ResultItem> {
        self.search_apps(query)
            .into_iter()
            .map(AppEntry::into_result)
            .collect()
    }
}
