//! Base/iteration grouping of snapshot files
//!
//! Repeated saves to the same destination leave numbered iteration files
//! next to the base file (`report.sh`, `report.000001.sh`, ...).
//! [`FileGroups::scan`] partitions a directory into base files and
//! iteration files, and orders each base immediately before its
//! iterations.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Not a directory (and its parent is not a directory either): {0}")]
    NotADirectory(PathBuf),
}

/// A directory partitioned into base files and their numbered iterations
#[derive(Debug, Default)]
pub struct FileGroups {
    /// Files without a numeric iteration suffix
    pub base_files: Vec<PathBuf>,
    /// Files whose stem ends in a purely numeric dot-component
    pub iter_files: Vec<PathBuf>,
    /// Each base file immediately followed by its iterations, in the
    /// directory's own sort order (iterations are not renumbered)
    pub all_files: Vec<PathBuf>,
}

impl FileGroups {
    /// Scans `path`, falling back to its parent when `path` is not a
    /// directory itself. Fails when neither is a directory.
    ///
    /// Association is literal prefix matching on stems: an iteration file
    /// is listed under every base whose stem prefixes its own, so one
    /// iteration can appear under several bases. No exclusivity is
    /// enforced.
    pub fn scan(path: &Path) -> Result<Self> {
        let dir = if path.is_dir() {
            path
        } else {
            let parent = path.parent().unwrap_or(path);
            if !parent.is_dir() {
                return Err(ScanError::NotADirectory(path.to_path_buf()).into());
            }
            parent
        };

        let mut entries: Vec<PathBuf> = fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.file_name().map_or(true, |n| n != ".DS_Store"))
            .collect();
        entries.sort();

        let mut base_files = Vec::new();
        let mut iter_files = Vec::new();
        for entry in entries {
            if has_iteration_suffix(&entry) {
                iter_files.push(entry);
            } else {
                base_files.push(entry);
            }
        }

        let mut all_files = Vec::with_capacity(base_files.len() + iter_files.len());
        for base in &base_files {
            all_files.push(base.clone());
            let base_stem = stem(base);
            for iter in &iter_files {
                if stem(iter).starts_with(&base_stem) {
                    all_files.push(iter.clone());
                }
            }
        }

        Ok(Self {
            base_files,
            iter_files,
            all_files,
        })
    }

    /// Returns true when the file is a numbered iteration
    pub fn is_iteration(&self, path: &Path) -> bool {
        self.iter_files.iter().any(|p| p == path)
    }
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// True when the last dot-separated component of the stem is purely numeric
fn has_iteration_suffix(path: &Path) -> bool {
    match stem(path).rsplit('.').next() {
        Some(last) => !last.is_empty() && last.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, "").unwrap();
        path
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn partitions_bases_and_iterations() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "report.sh");
        touch(&dir, "report.000001.sh");
        touch(&dir, "report.000002.sh");
        touch(&dir, "notes.txt");

        let groups = FileGroups::scan(dir.path()).unwrap();

        assert_eq!(names(&groups.base_files), vec!["notes.txt", "report.sh"]);
        assert_eq!(
            names(&groups.iter_files),
            vec!["report.000001.sh", "report.000002.sh"]
        );
    }

    #[test]
    fn all_files_lists_base_then_its_iterations() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "report_Bob.sh");
        touch(&dir, "report_Steve.sh");
        touch(&dir, "report_Steve.000001.sh");

        let groups = FileGroups::scan(dir.path()).unwrap();

        assert_eq!(
            names(&groups.all_files),
            vec!["report_Bob.sh", "report_Steve.sh", "report_Steve.000001.sh"]
        );
    }

    #[test]
    fn iteration_can_belong_to_several_bases() {
        // Literal prefix matching: "job_extra.000001" starts with both
        // "job" and "job_extra", so the iteration is listed twice.
        let dir = TempDir::new().unwrap();
        touch(&dir, "job.sh");
        touch(&dir, "job_extra.sh");
        touch(&dir, "job_extra.000001.sh");

        let groups = FileGroups::scan(dir.path()).unwrap();

        assert_eq!(
            names(&groups.all_files),
            vec![
                "job.sh",
                "job_extra.000001.sh",
                "job_extra.sh",
                "job_extra.000001.sh"
            ]
        );
    }

    #[test]
    fn falls_back_to_parent_for_file_paths() {
        let dir = TempDir::new().unwrap();
        let file = touch(&dir, "report.sh");

        let groups = FileGroups::scan(&file).unwrap();
        assert_eq!(names(&groups.base_files), vec!["report.sh"]);
    }

    #[test]
    fn fails_when_neither_path_nor_parent_is_a_directory() {
        let dir = TempDir::new().unwrap();
        let bogus = dir.path().join("missing").join("nested");

        let err = FileGroups::scan(&bogus).unwrap_err();
        assert!(err.downcast_ref::<ScanError>().is_some());
    }

    #[test]
    fn skips_ds_store() {
        let dir = TempDir::new().unwrap();
        touch(&dir, ".DS_Store");
        touch(&dir, "report.sh");

        let groups = FileGroups::scan(dir.path()).unwrap();
        assert_eq!(names(&groups.base_files), vec!["report.sh"]);
    }
}
