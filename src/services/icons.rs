//! Icon name -> file path lookup for presentation.

use std::fs::File;
use std::path::{Path, PathBuf};

const ICON_EXTENSIONS: [&str; 4] = ["", ".png", ".svg", ".xpm"];

/// First readable `<dir>/<name><ext>` across `dirs`, in order
pub fn icon_path(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    dirs.iter()
        .flat_map(|dir| {
            ICON_EXTENSIONS
                .iter()
                .map(move |ext| dir.join(format!("{}{}", name, ext)))
        })
        .find(|candidate| is_readable_file(candidate))
}

fn is_readable_file(path: &Path) -> bool {
    path.is_file() && File::open(path).is_ok()
}
