use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

/// Bytes of one compiled class and where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassUnit {
    pub id: String,
    pub bytes: Vec<u8>,
}

impl ClassUnit {
    pub fn new(id: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            bytes,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Collects `.class` files from directories and individual files.
///
/// Directories are walked with hidden entries skipped and `.jdepignore` files
/// honoured. Explicitly named files are taken as given.
pub struct ClassFileWalker {
    roots: Vec<PathBuf>,
    analyze_inner_classes: bool,
}

impl ClassFileWalker {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            roots: roots.into_iter().map(|p| p.as_ref().to_path_buf()).collect(),
            analyze_inner_classes: true,
        }
    }

    /// When disabled, files whose stem contains `$` are skipped.
    pub fn analyze_inner_classes(mut self, enabled: bool) -> Self {
        self.analyze_inner_classes = enabled;
        self
    }

    /// Class files found under the roots, in path order per root.
    pub fn paths(&self) -> Result<Vec<PathBuf>, WalkError> {
        let mut paths = Vec::new();

        for root in &self.roots {
            if root.is_file() {
                if self.accepts(root) {
                    paths.push(root.clone());
                }
                continue;
            }
            if !root.is_dir() {
                return Err(WalkError::NotFound(root.clone()));
            }

            let walker = WalkBuilder::new(root)
                .hidden(true)
                .git_ignore(true)
                .git_global(false)
                .git_exclude(true)
                .add_custom_ignore_filename(".jdepignore")
                .build();

            let mut found = Vec::new();
            for result in walker {
                let entry = match result {
                    Ok(e) => e,
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping unreadable entry");
                        continue;
                    }
                };

                if !entry.file_type().map_or(false, |ft| ft.is_file()) {
                    continue;
                }

                let path = entry.into_path();
                if self.accepts(&path) {
                    found.push(path);
                }
            }
            found.sort();
            tracing::debug!(root = %root.display(), count = found.len(), "walked class files");
            paths.extend(found);
        }

        Ok(paths)
    }

    /// Read every class file found under the roots.
    pub fn walk(&self) -> Result<Vec<ClassUnit>, WalkError> {
        self.paths()?
            .into_iter()
            .map(|path| {
                let bytes = std::fs::read(&path).map_err(|source| WalkError::Read {
                    path: path.clone(),
                    source,
                })?;
                Ok(ClassUnit::new(path.display().to_string(), bytes))
            })
            .collect()
    }

    fn accepts(&self, path: &Path) -> bool {
        if path.extension().and_then(|e| e.to_str()) != Some("class") {
            return false;
        }
        if self.analyze_inner_classes {
            return true;
        }
        !path
            .file_stem()
            .and_then(|s| s.to_str())
            .map_or(false, |stem| stem.contains('$'))
    }
}
