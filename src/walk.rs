//! Resolution of the input path into the ordered list of files to scan.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Default extensions of files to scan.
pub const DEFAULT_EXTENSIONS: &[&str] = &["py"];

/// Failure resolving the input path.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("path not found: {0}")]
    NotFound(PathBuf),
    #[error("cannot access {path}: {source}")]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("walking {root}: {source}")]
    Traverse {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("invalid exclude pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Turns an input path into a deterministic sequence of source files.
#[derive(Debug, Clone)]
pub struct FileWalker {
    extensions: Vec<String>,
    exclude: GlobSet,
}

impl Default for FileWalker {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            exclude: GlobSet::empty(),
        }
    }
}

impl FileWalker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the accepted extensions (given without the leading dot).
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| {
                let ext: String = e.into();
                ext.trim_start_matches('.').to_string()
            })
            .collect();
        self
    }

    /// Skip files whose path relative to the input directory matches any of
    /// the glob patterns.
    pub fn exclude(mut self, patterns: &[String]) -> Result<Self, WalkError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|source| WalkError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        self.exclude = builder.build().map_err(|source| WalkError::Pattern {
            pattern: patterns.join(", "),
            source,
        })?;
        Ok(self)
    }

    /// Returns true if the file name carries one of the accepted extensions.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|accepted| accepted == ext))
            .unwrap_or(false)
    }

    /// Resolve the input into files to scan.
    ///
    /// A file yields itself when its extension matches, and nothing
    /// otherwise. A directory yields every matching file below it, sorted by
    /// path.
    pub fn resolve(&self, input: &Path) -> Result<Vec<PathBuf>, WalkError> {
        let metadata = match std::fs::metadata(input) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(WalkError::NotFound(input.to_path_buf()));
            }
            Err(source) => {
                return Err(WalkError::Access {
                    path: input.to_path_buf(),
                    source,
                });
            }
        };

        if !metadata.is_dir() {
            if self.matches(input) {
                return Ok(vec![input.to_path_buf()]);
            }
            log::debug!("skipping {}: extension not accepted", input.display());
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(input).follow_links(true) {
            let entry = entry.map_err(|source| WalkError::Traverse {
                root: input.to_path_buf(),
                source,
            })?;
            if !entry.file_type().is_file() || !self.matches(entry.path()) {
                continue;
            }
            let relative = entry.path().strip_prefix(input).unwrap_or(entry.path());
            if self.exclude.is_match(relative) {
                log::debug!("excluded {}", entry.path().display());
                continue;
            }
            files.push(entry.into_path());
        }

        files.sort();
        log::debug!("resolved {} files under {}", files.len(), input.display());
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, "x = 1\n").unwrap();
        path
    }

    #[test]
    fn test_single_file() {
        let temp = TempDir::new().unwrap();
        let file = touch(temp.path(), "main.py");
        let files = FileWalker::new().resolve(&file).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_single_file_wrong_extension() {
        let temp = TempDir::new().unwrap();
        let file = touch(temp.path(), "notes.txt");
        assert!(FileWalker::new().resolve(&file).unwrap().is_empty());
    }

    #[test]
    fn test_directory_sorted_and_filtered() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(root, "z.py");
        touch(root, "a.py");
        touch(root, "pkg/b.py");
        touch(root, "pkg/sub/c.py");
        touch(root, "README.md");
        touch(root, "pkg/data.json");

        let files = FileWalker::new().resolve(root).unwrap();
        let rel: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(rel, vec!["a.py", "pkg/b.py", "pkg/sub/c.py", "z.py"]);
    }

    #[test]
    fn test_exclude_patterns() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(root, "app.py");
        touch(root, "build/gen.py");
        touch(root, "tests/test_app.py");

        let walker = FileWalker::new()
            .exclude(&["build/**".to_string(), "**/test_*.py".to_string()])
            .unwrap();
        let files = walker.resolve(root).unwrap();
        assert_eq!(files, vec![root.join("app.py")]);
    }

    #[test]
    fn test_custom_extensions() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(root, "a.py");
        touch(root, "b.pyi");

        let files = FileWalker::new()
            .extensions([".pyi"])
            .resolve(root)
            .unwrap();
        assert_eq!(files, vec![root.join("b.pyi")]);
    }

    #[test]
    fn test_missing_path() {
        let temp = TempDir::new().unwrap();
        let err = FileWalker::new()
            .resolve(&temp.path().join("nope"))
            .unwrap_err();
        assert!(matches!(err, WalkError::NotFound(_)));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = FileWalker::new().exclude(&["a[".to_string()]).unwrap_err();
        assert!(matches!(err, WalkError::Pattern { .. }));
    }
}
