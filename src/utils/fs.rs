use crate::domain::DirectorySizer;
use crate::utils::error::{RecordsError, Result};
use std::path::Path;
use walkdir::WalkDir;

/// 遞迴加總目錄內所有檔案大小；路徑不存在時回傳 0
pub fn directory_size<P: AsRef<Path>>(path: P) -> Result<u64> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(0);
    }

    let mut total = 0u64;
    for entry in WalkDir::new(path) {
        let entry = entry.map_err(|e| RecordsError::FileAccessError {
            path: e.path().unwrap_or(path).to_path_buf(),
            source: e.into(),
        })?;
        if entry.file_type().is_file() {
            let metadata = entry.metadata().map_err(|e| RecordsError::FileAccessError {
                path: entry.path().to_path_buf(),
                source: e.into(),
            })?;
            total += metadata.len();
        }
    }

    Ok(total)
}

/// 列出目錄內容與深度（根目錄深度為 0）
pub fn list_files_by_depth<P: AsRef<Path>>(path: P, max_depth: usize) -> Result<Vec<(usize, String)>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut listing = Vec::new();
    for entry in WalkDir::new(path).max_depth(max_depth).sort_by_file_name() {
        let entry = entry.map_err(|e| RecordsError::FileAccessError {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        listing.push((
            entry.depth(),
            entry.file_name().to_string_lossy().into_owned(),
        ));
    }

    Ok(listing)
}

pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WalkDirSizer;

impl DirectorySizer for WalkDirSizer {
    fn directory_size(&self, path: &Path) -> Result<u64> {
        directory_size(path)
    }
}
