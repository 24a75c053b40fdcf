//! Line-oriented text file access used by the image loader and saver.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reads every line of a text file, trimmed of line breaks and surrounding
/// spaces. Returns `None` when the path does not name an existing file.
pub fn read_trimmed_lines(path: &Path) -> io::Result<Option<Vec<String>>> {
    if !path.is_file() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)?;
    let lines = raw
        .lines()
        .map(|line| line.trim_matches([' ', '\r']).to_string())
        .collect();
    Ok(Some(lines))
}

/// Writes a text blob to `path`, appending `extension` first when the
/// target does not already carry it. Returns the path actually written.
pub fn write_text(data: &str, path: &Path, extension: Option<&str>) -> io::Result<PathBuf> {
    let mut target = path.to_string_lossy().into_owned();
    if let Some(extension) = extension {
        let dotted = if extension.starts_with('.') {
            extension.to_string()
        } else {
            format!(".{extension}")
        };
        if !target.to_lowercase().ends_with(&dotted.to_lowercase()) {
            target = format!("{}{}", target.trim_end_matches('.'), dotted);
        }
    }
    let target = PathBuf::from(target);
    fs::write(&target, data)?;
    Ok(target)
}
