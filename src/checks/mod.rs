//! File validation checks.
//!
//! This module expands the paths given on the command line into the list of
//! files to validate and runs the per-file checks. Every check is
//! independent, so a batch of them can run concurrently and report all
//! failures together.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Configuration for file checks.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// File extensions to include when walking directories (e.g., ["rs", "toml"]).
    /// Empty means every extension.
    pub extensions: Vec<String>,
    /// Entry names to skip when walking directories
    pub excludes: Vec<String>,
    /// Maximum file size in bytes
    pub max_file_size: u64,
    /// Reject files that are not valid UTF-8
    pub require_utf8: bool,
    /// Accept zero-length files
    pub allow_empty: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self::from(&crate::config::ChecksConfig::default())
    }
}

impl From<&crate::config::ChecksConfig> for CheckConfig {
    fn from(config: &crate::config::ChecksConfig) -> Self {
        Self {
            extensions: config.extensions.clone(),
            excludes: config.excludes.clone(),
            max_file_size: config.max_file_size,
            require_utf8: config.require_utf8,
            allow_empty: config.allow_empty,
        }
    }
}

/// Validates files against a [`CheckConfig`].
#[derive(Debug, Clone, Default)]
pub struct FileChecker {
    config: CheckConfig,
}

impl FileChecker {
    /// Create a new file checker.
    pub fn new(config: CheckConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Expand the given paths into the files to check.
    ///
    /// Directories are walked recursively, following symlinks, skipping
    /// hidden and excluded entries and applying the extension filter. Anything else, including
    /// paths that do not exist, is kept as-is so the check can report it.
    pub fn expand(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for path in paths {
            if !path.is_dir() {
                files.push(path.clone());
                continue;
            }

            let walker = WalkDir::new(path)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| entry.depth() == 0 || !self.is_excluded(entry.file_name()));

            for entry in walker {
                match entry {
                    Ok(entry) if entry.file_type().is_file() => {
                        if self.matches_extension(entry.path()) {
                            files.push(entry.into_path());
                        }
                    }
                    Ok(entry) if !entry.file_type().is_dir() => {
                        debug!("Skipping non-file entry {}", entry.path().display());
                    }
                    Ok(_) => {}
                    Err(e) => {
                        // Unreadable entries become check failures.
                        debug!("Cannot walk {}: {}", path.display(), e);
                        if let Some(p) = e.path() {
                            files.push(p.to_path_buf());
                        }
                    }
                }
            }
        }

        files
    }

    /// Run every check on one file. The error is a single line naming the
    /// file and the first problem found.
    pub fn check(&self, path: &Path) -> Result<(), String> {
        let fail = |reason: String| -> Result<(), String> {
            Err(format!("{}: {}", path.display(), reason))
        };

        let metadata = match fs::metadata(path) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return fail("does not exist".to_string())
            }
            Err(e) => return fail(e.to_string()),
        };

        if !metadata.is_file() {
            return fail("not a regular file".to_string());
        }

        if metadata.len() > self.config.max_file_size {
            return fail(format!(
                "size {} exceeds limit of {} bytes",
                metadata.len(),
                self.config.max_file_size
            ));
        }

        if metadata.len() == 0 && !self.config.allow_empty {
            return fail("file is empty".to_string());
        }

        if self.config.require_utf8 {
            let bytes = match fs::read(path) {
                Ok(b) => b,
                Err(e) => return fail(e.to_string()),
            };
            if let Err(e) = std::str::from_utf8(&bytes) {
                return fail(format!("invalid UTF-8 at byte {}", e.valid_up_to()));
            }
        }

        Ok(())
    }

    /// Async wrapper that runs [`FileChecker::check`] on the blocking pool.
    pub async fn check_async(&self, path: PathBuf) -> Result<(), String> {
        let checker = self.clone();
        let display = path.display().to_string();
        tokio::task::spawn_blocking(move || checker.check(&path))
            .await
            .unwrap_or_else(|e| Err(format!("{}: check aborted: {}", display, e)))
    }

    /// Check if a name matches exclusion patterns.
    fn is_excluded(&self, name: &std::ffi::OsStr) -> bool {
        let name = name.to_string_lossy();

        // Hidden files
        if name.starts_with('.') {
            return true;
        }

        self.config.excludes.iter().any(|pattern| name == pattern.as_str())
    }

    fn matches_extension(&self, path: &Path) -> bool {
        if self.config.extensions.is_empty() {
            return true;
        }
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        self.config.extensions.iter().any(|e| e == ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("good.rs"), "fn main() {}\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        fs::write(dir.path().join("empty.rs"), "").unwrap();
        fs::write(dir.path().join("binary.rs"), [0xff, 0xfe, 0x00]).unwrap();
        fs::create_dir(dir.path().join("target")).unwrap();
        fs::write(dir.path().join("target/skipped.rs"), "x").unwrap();
        fs::create_dir(dir.path().join(".hidden")).unwrap();
        fs::write(dir.path().join(".hidden/skipped.rs"), "x").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/nested.rs"), "// nested").unwrap();
        dir
    }

    #[test]
    fn test_expand_walks_directories() {
        let dir = fixture();
        let checker = FileChecker::new(CheckConfig {
            extensions: vec!["rs".to_string()],
            ..CheckConfig::default()
        });

        let files = checker.expand(&[dir.path().to_path_buf()]);
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().to_string())
            .collect();

        assert!(names.contains(&"good.rs".to_string()));
        assert!(names.iter().any(|n| n.ends_with("nested.rs")));
        assert!(!names.contains(&"notes.txt".to_string()));
        assert!(!names.iter().any(|n| n.contains("skipped")));
    }

    #[test]
    fn test_default_matches_config_defaults() {
        let config = crate::config::ChecksConfig::default();
        let checks = CheckConfig::default();
        assert_eq!(checks.excludes, config.excludes);
        assert!(checks.excludes.contains(&"vendor".to_string()));
        assert_eq!(checks.max_file_size, config.max_file_size);
    }

    #[cfg(unix)]
    #[test]
    fn test_expand_follows_symlinked_files() {
        let dir = fixture();
        let linked = TempDir::new().unwrap();
        std::os::unix::fs::symlink(dir.path().join("good.rs"), linked.path().join("link.rs"))
            .unwrap();

        let checker = FileChecker::default();
        let files = checker.expand(&[linked.path().to_path_buf()]);

        assert_eq!(files, vec![linked.path().join("link.rs")]);
        assert!(checker.check(&files[0]).is_ok());
    }

    #[test]
    fn test_expand_keeps_explicit_paths() {
        let checker = FileChecker::default();
        let missing = PathBuf::from("/definitely/not/here.txt");
        assert_eq!(checker.expand(&[missing.clone()]), vec![missing]);
    }

    #[test]
    fn test_check_good_file() {
        let dir = fixture();
        let checker = FileChecker::default();
        assert!(checker.check(&dir.path().join("good.rs")).is_ok());
    }

    #[test]
    fn test_check_failures() {
        let dir = fixture();
        let checker = FileChecker::new(CheckConfig {
            allow_empty: false,
            ..CheckConfig::default()
        });

        let missing = checker.check(&dir.path().join("missing.rs")).unwrap_err();
        assert!(missing.ends_with("does not exist"));

        let not_file = checker.check(&dir.path().join("sub")).unwrap_err();
        assert!(not_file.ends_with("not a regular file"));

        let empty = checker.check(&dir.path().join("empty.rs")).unwrap_err();
        assert!(empty.ends_with("file is empty"));

        let binary = checker.check(&dir.path().join("binary.rs")).unwrap_err();
        assert!(binary.contains("invalid UTF-8 at byte 0"));
    }

    #[test]
    fn test_check_size_limit() {
        let dir = fixture();
        let checker = FileChecker::new(CheckConfig {
            max_file_size: 4,
            ..CheckConfig::default()
        });

        let err = checker.check(&dir.path().join("notes.txt")).unwrap_err();
        assert!(err.contains("size 5 exceeds limit of 4 bytes"));
    }

    #[tokio::test]
    async fn test_check_async() {
        let dir = fixture();
        let checker = FileChecker::default();
        assert!(checker.check_async(dir.path().join("good.rs")).await.is_ok());
        assert!(checker
            .check_async(dir.path().join("nope.rs"))
            .await
            .is_err());
    }
}
