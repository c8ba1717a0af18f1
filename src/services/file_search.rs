//! File search module for finding files and folders in the user's
//! top-level directories (Desktop, Documents, Downloads by default)

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::{ResultItem, ResultPayload};
use crate::search::Source;

/// Maximum files in the merged fallback list
pub const FILE_LIMIT: usize = 3;

/// A file search result
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    /// Name of the directory the entry was found in
    pub folder: String,
    pub is_dir: bool,
}

impl FileEntry {
    pub fn into_result(self) -> ResultItem {
        let description = format!("File • in {}", self.folder);
        ResultItem::new(self.name, description, ResultPayload::File { path: self.path })
    }
}

/// List direct children of `dir` whose name contains the query
/// (case-insensitive). A missing or unreadable directory yields nothing.
pub fn search_dir(dir: &Path, query: &str) -> Vec<FileEntry> {
    let query_lower = query.to_lowercase();
    let folder = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| dir.display().to_string());

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            if !name.to_lowercase().contains(&query_lower) {
                return None;
            }
            Some(FileEntry {
                name,
                path: entry.path().to_path_buf(),
                folder: folder.clone(),
                is_dir: entry.file_type().is_dir(),
            })
        })
        .collect()
}

/// Non-recursive filename search over a fixed set of directories
pub struct FileSource {
    dirs: Vec<PathBuf>,
    enabled: bool,
    min_query_len: usize,
}

impl FileSource {
    pub fn new(dirs: Vec<PathBuf>, enabled: bool, min_query_len: usize) -> Self {
        Self {
            dirs,
            enabled,
            min_query_len,
        }
    }

    /// Search for files matching a query
    pub fn search_files(&self, query: &str) -> Vec<FileEntry> {
        self.dirs
            .iter()
            .flat_map(|dir| search_dir(dir, query))
            .collect()
    }
}

impl Source for FileSource {
    fn name(&self) -> &'static str {
        "files"
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn min_query_len(&self) -> usize {
        self.min_query_len
    }

    fn limit(&self) -> usize {
        FILE_LIMIT
    }

    fn search(&self, query: &str) -> Vec<ResultItem> {
        if !self.should_search(query) {
            return Vec::new();
        }
        self.search_files(query)
            .into_iter()
            .map(FileEntry::into_result)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture() -> tempfile::TempDir {
        let home = tempfile::tempdir().unwrap();
        let docs = home.path().join("Documents");
        let downloads = home.path().join("Downloads");
        fs::create_dir_all(docs.join("Reports")).unwrap();
        fs::create_dir_all(&downloads).unwrap();
        fs::write(docs.join("report-2024.pdf"), b"").unwrap();
        fs::write(docs.join("Reports").join("report-nested.pdf"), b"").unwrap();
        fs::write(downloads.join("REPORT.txt"), b"").unwrap();
        fs::write(downloads.join("song.mp3"), b"").unwrap();
        home
    }

    #[test]
    fn test_search_is_case_insensitive_and_flat() {
        let home = fixture();
        let source = FileSource::new(
            vec![
                home.path().join("Desktop"),
                home.path().join("Documents"),
                home.path().join("Downloads"),
            ],
            true,
            3,
        );

        let entries = source.search_files("report");
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        // Nested files are not listed; the matching folder is
        assert_eq!(names, vec!["Reports", "report-2024.pdf", "REPORT.txt"]);
        assert!(entries[0].is_dir);

        let results = source.search("song");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].description, "File • in Downloads");
    }

    #[test]
    fn test_min_query_length() {
        let home = fixture();
        let source = FileSource::new(vec![home.path().join("Downloads")], true, 3);
        assert!(source.search("so").is_empty());
        assert_eq!(source.search("son").len(), 1);

        let disabled = FileSource::new(vec![home.path().join("Downloads")], false, 3);
        assert!(disabled.search("song").is_empty());
    }
}
