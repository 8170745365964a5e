//! Checksum-gated selective file installation
//!
//! Step handlers deploy payload files through [`install_if_changed`], which
//! copies only when the destination is absent or its content digest differs
//! from the source. The copy is staged in the destination directory and
//! renamed into place, so an interrupted run leaves either the old or the
//! new file, never a hybrid a later run would misreport as `Unchanged`.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{BotstrapError, Result};
use crate::hash;

/// What a selective install actually did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Destination did not exist
    New,
    /// Destination existed with different content
    Updated,
    /// Destination already had identical content; nothing written
    Unchanged,
}

impl InstallOutcome {
    /// Short lowercase label for status lines
    pub fn describe(self) -> &'static str {
        match self {
            InstallOutcome::New => "new",
            InstallOutcome::Updated => "updated",
            InstallOutcome::Unchanged => "unchanged",
        }
    }
}

/// Per-outcome counts for a payload tree install
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeSummary {
    pub new: usize,
    pub updated: usize,
    pub unchanged: usize,
}

impl TreeSummary {
    /// Files actually written
    pub fn changed(&self) -> usize {
        self.new + self.updated
    }

    pub fn total(&self) -> usize {
        self.new + self.updated + self.unchanged
    }
}

/// Install `source` at `destination` with `mode` only if content differs.
///
/// Fails with `SourceMissing` before touching the destination when the
/// source does not exist.
pub fn install_if_changed(mode: u32, source: &Path, destination: &Path) -> Result<InstallOutcome> {
    if !source.is_file() {
        return Err(BotstrapError::SourceMissing {
            path: source.display().to_string(),
        });
    }

    if destination.is_file() {
        if hash::hash_file(source)? == hash::hash_file(destination)? {
            return Ok(InstallOutcome::Unchanged);
        }
        copy_atomic(mode, source, destination)?;
        return Ok(InstallOutcome::Updated);
    }

    copy_atomic(mode, source, destination)?;
    Ok(InstallOutcome::New)
}

/// Install every file under `source_dir` to the matching relative path under
/// `dest_dir`, selectively per file.
pub fn install_tree(mode: u32, source_dir: &Path, dest_dir: &Path) -> Result<TreeSummary> {
    if !source_dir.is_dir() {
        return Err(BotstrapError::SourceMissing {
            path: source_dir.display().to_string(),
        });
    }

    let mut files: Vec<_> = WalkDir::new(source_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .collect();

    // Sort for a deterministic install order
    files.sort_by_key(|e| e.path().to_path_buf());

    let mut summary = TreeSummary::default();
    for entry in files {
        let relative = entry.path().strip_prefix(source_dir).unwrap_or(entry.path());
        let destination = dest_dir.join(relative);

        match install_if_changed(mode, entry.path(), &destination)? {
            InstallOutcome::New => summary.new += 1,
            InstallOutcome::Updated => summary.updated += 1,
            InstallOutcome::Unchanged => summary.unchanged += 1,
        }
    }

    Ok(summary)
}

/// Ensure parent directory exists for a path
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BotstrapError::FileWriteFailed {
            path: parent.display().to_string(),
            reason: e.to_string(),
        })?;
    }
    Ok(())
}

/// Copy into a temp file beside the destination, apply the permission mode,
/// then rename into place.
fn copy_atomic(mode: u32, source: &Path, destination: &Path) -> Result<()> {
    ensure_parent_dir(destination)?;

    let file_name = destination
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "install".to_string());
    let tmp_path = destination.with_file_name(format!(".{file_name}.tmp"));

    fs::copy(source, &tmp_path).map_err(|e| BotstrapError::FileWriteFailed {
        path: tmp_path.display().to_string(),
        reason: e.to_string(),
    })?;

    set_mode(&tmp_path, mode)?;

    fs::rename(&tmp_path, destination).map_err(|e| BotstrapError::FileWriteFailed {
        path: destination.display().to_string(),
        reason: e.to_string(),
    })
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(|e| {
        BotstrapError::FileWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    })
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_install_new() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("asound.conf");
        let dest = temp.path().join("etc/asound.conf");
        std::fs::write(&source, "pcm.!default { type hw }").unwrap();

        let outcome = install_if_changed(0o644, &source, &dest).unwrap();
        assert_eq!(outcome, InstallOutcome::New);
        assert_eq!(
            std::fs::read_to_string(&dest).unwrap(),
            "pcm.!default { type hw }"
        );
    }

    #[test]
    fn test_install_unchanged_second_time() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("unit.service");
        let dest = temp.path().join("out/unit.service");
        std::fs::write(&source, "[Unit]").unwrap();

        assert_eq!(
            install_if_changed(0o644, &source, &dest).unwrap(),
            InstallOutcome::New
        );
        assert_eq!(
            install_if_changed(0o644, &source, &dest).unwrap(),
            InstallOutcome::Unchanged
        );
    }

    #[test]
    fn test_install_updated_on_different_content() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("script.py");
        let dest = temp.path().join("opt/script.py");
        std::fs::write(&source, "print('v1')").unwrap();
        install_if_changed(0o755, &source, &dest).unwrap();

        std::fs::write(&source, "print('v2')").unwrap();
        let outcome = install_if_changed(0o755, &source, &dest).unwrap();
        assert_eq!(outcome, InstallOutcome::Updated);
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "print('v2')");
    }

    #[test]
    fn test_missing_source_fails_before_touching_destination() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("etc/never-written.conf");

        let err = install_if_changed(0o644, &temp.path().join("absent"), &dest).unwrap_err();
        assert!(matches!(err, BotstrapError::SourceMissing { .. }));
        assert!(!dest.exists());
        assert!(!dest.parent().unwrap().exists());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("src.conf");
        let dest = temp.path().join("out/dst.conf");
        std::fs::write(&source, "x").unwrap();
        install_if_changed(0o644, &source, &dest).unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dest.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_permission_mode_applied() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let source = temp.path().join("motor-controller.py");
        let dest = temp.path().join("opt/motor-controller.py");
        std::fs::write(&source, "#!/usr/bin/env python3").unwrap();

        install_if_changed(0o755, &source, &dest).unwrap();
        let mode = std::fs::metadata(&dest).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_install_tree_counts_outcomes() {
        let temp = TempDir::new().unwrap();
        let payload = temp.path().join("payload");
        let dest = temp.path().join("root");
        std::fs::create_dir_all(payload.join("sub")).unwrap();
        std::fs::write(payload.join("a.conf"), "a").unwrap();
        std::fs::write(payload.join("sub/b.conf"), "b").unwrap();

        let first = install_tree(0o644, &payload, &dest).unwrap();
        assert_eq!(first.new, 2);
        assert_eq!(first.changed(), 2);

        std::fs::write(payload.join("a.conf"), "a2").unwrap();
        let second = install_tree(0o644, &payload, &dest).unwrap();
        assert_eq!(second.updated, 1);
        assert_eq!(second.unchanged, 1);
        assert_eq!(second.total(), 2);
        assert_eq!(
            std::fs::read_to_string(dest.join("a.conf")).unwrap(),
            "a2"
        );
    }

    #[test]
    fn test_install_tree_missing_source_dir() {
        let temp = TempDir::new().unwrap();
        let err = install_tree(0o644, &temp.path().join("absent"), temp.path()).unwrap_err();
        assert!(matches!(err, BotstrapError::SourceMissing { .. }));
    }
}
