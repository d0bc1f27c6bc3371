use crate::error::{Result, TubeMatterError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|s| s == "md" || s == "markdown")
        .unwrap_or(false)
}

/// Expand `paths` into files: files are kept as given, directories are
/// walked for markdown files
pub fn resolve_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if entry.file_type().is_file() && is_markdown(entry.path()) {
                    files.push(entry.path().to_owned());
                }
            }
        } else {
            log::warn!("skipping {}: no such file or directory", path.display());
        }
    }
    files
}

pub fn read_to_string(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(TubeMatterError::file_not_found(path));
    }
    fs::read_to_string(path).map_err(TubeMatterError::Io)
}

/// Write through a temporary file in the same directory, then rename it over `path`
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.flush()?;
    temp_file
        .persist(path)
        .map_err(|e| TubeMatterError::Io(e.error))?;
    Ok(())
}
