//! Writing rendered reports to disk.

use crate::error::{ReportError, Result};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Check that `view` names exactly one file inside the report directory.
///
/// Rejects empty names, `.` and `..`, path separators and absolute paths.
pub fn validate_view_name(view: &str) -> Result<()> {
    let invalid = view.is_empty()
        || view == "."
        || view == ".."
        || view.contains(['/', '\\', '\0'])
        || Path::new(view).is_absolute();
    if invalid {
        return Err(ReportError::InvalidViewName(view.to_string()));
    }
    Ok(())
}

/// Write each report to `<dir>/<view>.html`, returning the written paths.
///
/// `dir` must already exist. Existing files are overwritten. Every view name
/// is checked before anything is written.
pub fn write_reports(dir: &Path, reports: &BTreeMap<String, String>) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ReportError::NotADirectory(dir.to_path_buf()));
    }
    for view in reports.keys() {
        validate_view_name(view)?;
    }

    let mut written = Vec::with_capacity(reports.len());
    for (view, html) in reports {
        let path = dir.join(format!("{view}.html"));
        std::fs::write(&path, html)?;
        debug!(path = %path.display(), bytes = html.len(), "Report written");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_file_per_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut reports = BTreeMap::new();
        reports.insert("a".to_string(), "<p>a</p>".to_string());
        reports.insert("b".to_string(), "<p>b</p>".to_string());

        let written = write_reports(dir.path(), &reports).unwrap();
        assert_eq!(written, vec![dir.path().join("a.html"), dir.path().join("b.html")]);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("b.html")).unwrap(),
            "<p>b</p>"
        );
    }

    #[test]
    fn missing_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = write_reports(&missing, &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, ReportError::NotADirectory(p) if p == missing));
    }

    #[test]
    fn view_names_cannot_leave_the_directory() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("out");
        std::fs::create_dir(&out).unwrap();

        for view in ["../escaped", "a/b", "/abs", "a\\b", "..", ".", ""] {
            let mut reports = BTreeMap::new();
            reports.insert("ok".to_string(), "<p>ok</p>".to_string());
            reports.insert(view.to_string(), "<p>x</p>".to_string());

            let err = write_reports(&out, &reports).unwrap_err();
            assert!(matches!(err, ReportError::InvalidViewName(v) if v == view));
        }
        assert!(!root.path().join("escaped.html").exists());
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn dotted_names_are_plain_files() {
        assert!(validate_view_name("v_sales").is_ok());
        assert!(validate_view_name("sales.2024").is_ok());
        assert!(validate_view_name("...").is_ok());
    }

    #[test]
    fn file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(write_reports(&file, &BTreeMap::new()).is_err());
    }
}
