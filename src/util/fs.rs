//! Atomic file output.

use anyhow::{Context, Result};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Writes `contents` to `path` atomically, creating parent directories
/// first.
///
/// The bytes go to a randomized `.tmp.*` sibling opened with
/// `create_new`, are synced to disk, and the temp file is then renamed
/// over the destination. The destination is never observable in a
/// half-written state; on any failure the temp file is removed and the
/// previous destination (if any) is untouched.
pub fn atomic_write(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory '{}'", parent.display())
            })?;
        }
    }

    let random_suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let temp_path = path.with_extension(format!("tmp.{:016x}", random_suffix));

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .with_context(|| {
            format!(
                "Failed to create temporary file '{}': check directory permissions",
                temp_path.display()
            )
        })?;

    std::io::Write::write_all(&mut file, contents).with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to write to temporary file '{}': disk may be full",
            temp_path.display()
        )
    })?;

    file.sync_all().with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to sync temporary file '{}' to disk",
            temp_path.display()
        )
    })?;

    drop(file);

    std::fs::rename(&temp_path, path).with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to rename '{}' to '{}'",
            temp_path.display(),
            path.display()
        )
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_contents() {
        let dir = std::env::temp_dir().join("json2rss_fs_test_write");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.xml");

        atomic_write(&path, b"<rss/>").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"<rss/>");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = std::env::temp_dir().join("json2rss_fs_test_parents");
        std::fs::remove_dir_all(&dir).ok();
        let path = dir.join("a/b/out.xml");

        atomic_write(&path, b"data").unwrap();
        assert!(path.exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_replaces_existing_file() {
        let dir = std::env::temp_dir().join("json2rss_fs_test_replace");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.xml");
        std::fs::write(&path, "old").unwrap();

        atomic_write(&path, b"new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_leaves_no_temp_file_behind() {
        let dir = std::env::temp_dir().join("json2rss_fs_test_clean");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.xml");

        atomic_write(&path, b"data").unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains("tmp"))
            .collect();
        assert!(leftovers.is_empty());

        std::fs::remove_dir_all(&dir).ok();
    }
}
