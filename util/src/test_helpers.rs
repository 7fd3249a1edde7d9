use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Writes `contents` to `grading.json` inside a fresh temporary directory.
///
/// Keep the returned `TempDir` in scope for as long as you need the file.
pub fn write_temp_grading_config(contents: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let path = tmp.path().join("grading.json");
    fs::write(&path, contents).expect("failed to write grading config");
    (tmp, path)
}
