//! Report / update writer.
//!
//! `overwrite` truncates the outdated file and writes the latest bytes
//! through its existing path, like a plain copy onto an existing file. The
//! inode stays the same, so symlinked copies update their target, hard links
//! stay linked, and permissions and ownership are untouched.
//!
//! The first failure aborts the run. Files already written stay written, and
//! each result is handed to the caller as soon as it happens.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use scriptsync_core::Selection;

use crate::error::{io_err, SyncError};
use crate::pipeline::SyncMode;

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome for one outdated copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WriteResult {
    /// Report mode: the copy is behind and was left untouched.
    Outdated { path: PathBuf },
    /// Update mode: the copy now holds the latest content.
    Written { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            Self::Outdated { path } | Self::Written { path } => path,
        }
    }
}

// ---------------------------------------------------------------------------
// overwrite
// ---------------------------------------------------------------------------

/// Replace the full content of the existing file at `path` with `content`.
///
/// Never creates `path`: a copy removed mid-run is an error.
pub(crate) fn overwrite(path: &Path, content: &[u8]) -> Result<(), SyncError> {
    let mut file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| io_err(path, e))?;
    file.write_all(content).map_err(|e| io_err(path, e))?;
    file.flush().map_err(|e| io_err(path, e))
}

// ---------------------------------------------------------------------------
// synchronize
// ---------------------------------------------------------------------------

/// Report or update every outdated copy in `selection`, in order.
///
/// `on_result` sees each result right after it is produced, before the next
/// copy is attempted.
pub fn synchronize(
    selection: &Selection,
    mode: SyncMode,
    mut on_result: impl FnMut(&WriteResult),
) -> Result<Vec<WriteResult>, SyncError> {
    let mut results = Vec::with_capacity(selection.outdated.len());
    if mode == SyncMode::Report {
        for candidate in &selection.outdated {
            let result = WriteResult::Outdated {
                path: candidate.path.clone(),
            };
            on_result(&result);
            results.push(result);
        }
        return Ok(results);
    }

    if selection.outdated.is_empty() {
        return Ok(results);
    }

    let source = &selection.latest.path;
    let content = std::fs::read(source).map_err(|e| io_err(source, e))?;
    for candidate in &selection.outdated {
        overwrite(&candidate.path, &content)?;
        tracing::info!("updated {} from {}", candidate.path.display(), source.display());
        let result = WriteResult::Written {
            path: candidate.path.clone(),
        };
        on_result(&result);
        results.push(result);
    }
    Ok(results)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use scriptsync_core::Candidate;
    use std::fs;
    use tempfile::TempDir;

    fn selection(latest: &Path, outdated: &[&Path]) -> Selection {
        Selection {
            latest: Candidate::new(latest, None),
            outdated: outdated.iter().map(|p| Candidate::new(*p, None)).collect(),
            current: vec![],
        }
    }

    #[test]
    fn overwrite_replaces_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("docker_utils.sh");
        fs::write(&path, "old\nlonger old content\n").unwrap();
        overwrite(&path, b"new\n").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new\n");
    }

    #[test]
    fn overwrite_leaves_no_side_files() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("docker_utils.sh");
        fs::write(&path, "old").unwrap();
        overwrite(&path, b"new").unwrap();
        let names: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, ["docker_utils.sh"]);
    }

    #[cfg(unix)]
    #[test]
    fn overwrite_through_symlink_updates_the_shared_target() {
        let tmp = TempDir::new().unwrap();
        let shared = tmp.path().join("shared.sh");
        let link = tmp.path().join("docker_utils.sh");
        fs::write(&shared, "# 2020-01-01 00:00\nold\n").unwrap();
        std::os::unix::fs::symlink(&shared, &link).unwrap();

        overwrite(&link, b"# 2024-01-01 00:00\nnew\n").unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&shared).unwrap(), "# 2024-01-01 00:00\nnew\n");
    }

    #[cfg(unix)]
    #[test]
    fn overwrite_keeps_hard_links_and_inode() {
        use std::os::unix::fs::MetadataExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("docker_utils.sh");
        let twin = tmp.path().join("twin.sh");
        fs::write(&path, "old").unwrap();
        fs::hard_link(&path, &twin).unwrap();
        let inode = fs::metadata(&path).unwrap().ino();

        overwrite(&path, b"new").unwrap();

        assert_eq!(fs::metadata(&path).unwrap().ino(), inode);
        assert_eq!(fs::read_to_string(&twin).unwrap(), "new");
    }

    #[test]
    fn overwrite_missing_target_fails_without_creating_it() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("gone.sh");
        let err = overwrite(&path, b"new").unwrap_err();
        assert!(matches!(err, SyncError::Io { .. }));
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn overwrite_keeps_target_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("docker_utils.sh");
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o750)).unwrap();
        overwrite(&path, b"new").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o750);
    }

    #[test]
    fn report_mode_lists_without_touching_files() {
        let tmp = TempDir::new().unwrap();
        let latest = tmp.path().join("a.sh");
        let old = tmp.path().join("b.sh");
        fs::write(&latest, "new").unwrap();
        fs::write(&old, "old").unwrap();

        let results = synchronize(&selection(&latest, &[&old]), SyncMode::Report, |_| {}).unwrap();
        assert_eq!(results, vec![WriteResult::Outdated { path: old.clone() }]);
        assert_eq!(fs::read_to_string(&old).unwrap(), "old");
    }

    #[test]
    fn update_mode_copies_latest_bytes() {
        let tmp = TempDir::new().unwrap();
        let latest = tmp.path().join("a.sh");
        let old_1 = tmp.path().join("b.sh");
        let old_2 = tmp.path().join("c.sh");
        fs::write(&latest, b"# 2024-01-01 00:00\n\xffbinary-ish\n").unwrap();
        fs::write(&old_1, "old").unwrap();
        fs::write(&old_2, "older").unwrap();

        let results = synchronize(&selection(&latest, &[&old_1, &old_2]), SyncMode::Update, |_| {})
            .unwrap();
        assert_eq!(
            results.iter().map(WriteResult::path).collect::<Vec<_>>(),
            [old_1.as_path(), old_2.as_path()]
        );
        let expected = fs::read(&latest).unwrap();
        assert_eq!(fs::read(&old_1).unwrap(), expected);
        assert_eq!(fs::read(&old_2).unwrap(), expected);
    }

    #[test]
    fn update_stops_at_first_failure() {
        let tmp = TempDir::new().unwrap();
        let latest = tmp.path().join("a.sh");
        let old = tmp.path().join("b.sh");
        let gone = tmp.path().join("gone.sh");
        let after = tmp.path().join("c.sh");
        fs::write(&latest, "new").unwrap();
        fs::write(&old, "old").unwrap();
        fs::write(&after, "old").unwrap();

        let mut seen = Vec::new();
        let err = synchronize(
            &selection(&latest, &[&old, &gone, &after]),
            SyncMode::Update,
            |r| seen.push(r.clone()),
        )
        .unwrap_err();
        assert_eq!(err.kind(), "IoError");
        assert_eq!(seen, vec![WriteResult::Written { path: old.clone() }]);
        assert_eq!(fs::read_to_string(&old).unwrap(), "new", "earlier copy stays written");
        assert_eq!(fs::read_to_string(&after).unwrap(), "old", "later copy untouched");
    }

    #[test]
    fn write_result_serializes_with_status_tag() {
        let json = serde_json::to_value(WriteResult::Written {
            path: PathBuf::from("/x/docker_utils.sh"),
        })
        .unwrap();
        assert_eq!(json["status"], "written");
        assert_eq!(json["path"], "/x/docker_utils.sh");
    }
}
