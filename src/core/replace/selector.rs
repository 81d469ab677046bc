//! File selection — which files a run touches.

use std::path::{Component, Path, PathBuf};

use glob::MatchOptions;
use glob_match::glob_match;

use crate::error::{Error, FileOperation, Result};

/// Root directory + extension filter + optional exclude globs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelector {
    root: PathBuf,
    extension: String,
    exclude: Vec<String>,
}

/// Files matched by a selector, plus directories that could not be listed.
#[derive(Debug, Default)]
pub struct Selection {
    pub files: Vec<PathBuf>,
    pub errors: Vec<Error>,
}

impl FileSelector {
    /// Build a selector. A leading `.` on the extension is accepted and dropped.
    pub fn new(root: impl Into<PathBuf>, extension: &str, exclude: Vec<String>) -> Result<Self> {
        let extension = normalize_extension(extension)?;
        Ok(Self {
            root: normalize_root(root.into()),
            extension,
            exclude,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    /// Recursive pattern for every file with the extension under the root.
    pub fn pattern(&self) -> Result<String> {
        let root = self.root.to_str().ok_or_else(|| {
            Error::validation_invalid_argument(
                "root",
                "Root path is not valid UTF-8",
                Some(self.root.display().to_string()),
            )
        })?;
        let root = root.trim_end_matches('/');

        Ok(format!(
            "{}/**/*.{}",
            glob::Pattern::escape(root),
            self.extension
        ))
    }

    /// Enumerate matching files. Order follows the directory walk.
    ///
    /// Hidden files and directories are not matched by the wildcards, and
    /// paths matched as directories are dropped. Only paths ending in the
    /// extension are ever returned, so nothing else is opened by a run.
    pub fn select(&self) -> Result<Selection> {
        let meta = std::fs::metadata(&self.root)
            .map_err(|e| Error::file_access(&self.root, FileOperation::List, e))?;
        if !meta.is_dir() {
            return Err(Error::validation_invalid_argument(
                "root",
                format!("Root is not a directory: {}", self.root.display()),
                Some(self.root.display().to_string()),
            ));
        }

        let pattern = self.pattern()?;
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: false,
            require_literal_leading_dot: true,
        };

        let entries = glob::glob_with(&pattern, options).map_err(|e| {
            Error::validation_invalid_argument(
                "extension",
                format!("Invalid file pattern '{}': {}", pattern, e),
                Some(self.extension.clone()),
            )
        })?;

        let mut selection = Selection::default();
        for entry in entries {
            match entry {
                Ok(path) => {
                    if path.is_file() && !self.is_excluded(&path) {
                        selection.files.push(path);
                    }
                }
                Err(e) => {
                    let path = e.path().to_path_buf();
                    let io_err: std::io::Error = e.into();
                    selection
                        .errors
                        .push(Error::file_access(&path, FileOperation::List, io_err));
                }
            }
        }

        Ok(selection)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }

        let relative = self.relative_path(path).to_string_lossy().replace('\\', "/");

        self.exclude
            .iter()
            .any(|pattern| glob_match(pattern, &relative))
    }

    /// Path of a matched file relative to the root.
    ///
    /// Glob yields paths without `./` components, which the root is
    /// normalized to match. A root of `.` yields bare relative paths.
    fn relative_path<'a>(&self, path: &'a Path) -> &'a Path {
        if let Ok(relative) = path.strip_prefix(&self.root) {
            return relative;
        }
        if self.root == Path::new(".") {
            return path.strip_prefix(".").unwrap_or(path);
        }
        path
    }
}

/// Drop `.` components so the root lines up with the paths glob returns.
fn normalize_root(root: PathBuf) -> PathBuf {
    let normalized: PathBuf = root
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

fn normalize_extension(extension: &str) -> Result<String> {
    let trimmed = extension.trim().trim_start_matches('.');

    if trimmed.is_empty() {
        return Err(Error::validation_invalid_argument(
            "extension",
            "Extension must not be empty",
            Some(extension.to_string()),
        ));
    }

    if trimmed
        .chars()
        .any(|c| matches!(c, '/' | '\\' | '*' | '?' | '[' | ']' | '{' | '}'))
    {
        return Err(Error::validation_invalid_argument(
            "extension",
            format!("Extension '{}' must be a plain file extension", extension),
            Some(extension.to_string()),
        ));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    fn selected(selector: &FileSelector) -> Vec<String> {
        let mut files: Vec<String> = selector
            .select()
            .unwrap()
            .files
            .iter()
            .map(|p| {
                p.strip_prefix(selector.root())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        files.sort();
        files
    }

    #[test]
    fn selects_extension_recursively() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "App.jsx");
        touch(dir.path(), "pages/Trips.jsx");
        touch(dir.path(), "pages/deep/Fleet.jsx");
        touch(dir.path(), "services/api.js");
        touch(dir.path(), "styles.css");

        let selector = FileSelector::new(dir.path(), "jsx", Vec::new()).unwrap();

        assert_eq!(
            selected(&selector),
            vec!["App.jsx", "pages/Trips.jsx", "pages/deep/Fleet.jsx"]
        );
    }

    #[test]
    fn extension_match_is_exact() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.js");
        touch(dir.path(), "b.jsx");
        touch(dir.path(), "c.js.map");

        let selector = FileSelector::new(dir.path(), ".js", Vec::new()).unwrap();
        assert_eq!(selected(&selector), vec!["a.js"]);
    }

    #[test]
    fn skips_hidden_entries_and_directories() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), ".cache/Old.jsx");
        touch(dir.path(), ".Hidden.jsx");
        fs::create_dir_all(dir.path().join("weird.jsx")).unwrap();
        touch(dir.path(), "Visible.jsx");

        let selector = FileSelector::new(dir.path(), "jsx", Vec::new()).unwrap();
        assert_eq!(selected(&selector), vec!["Visible.jsx"]);
    }

    #[test]
    fn exclude_globs_match_relative_paths() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "pages/Trips.jsx");
        touch(dir.path(), "node_modules/lib/Index.jsx");
        touch(dir.path(), "legacy/Old.jsx");

        let selector = FileSelector::new(
            dir.path(),
            "jsx",
            vec!["node_modules/**".to_string(), "legacy/*.jsx".to_string()],
        )
        .unwrap();

        assert_eq!(selected(&selector), vec!["pages/Trips.jsx"]);
    }

    #[test]
    fn root_with_glob_characters_is_escaped() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("src [v2]");
        touch(&root, "App.jsx");

        let selector = FileSelector::new(&root, "jsx", Vec::new()).unwrap();
        assert_eq!(selected(&selector), vec!["App.jsx"]);
    }

    #[test]
    fn excludes_apply_to_dot_prefixed_roots() {
        let dir = TempDir::new_in(".").unwrap();
        let name = dir.path().file_name().unwrap().to_string_lossy().to_string();
        touch(dir.path(), "src/App.jsx");
        touch(dir.path(), "src/legacy/Old.jsx");

        let root = format!("./{}/src", name);
        let selector = FileSelector::new(&root, "jsx", vec!["legacy/**".to_string()]).unwrap();

        assert_eq!(selector.root(), Path::new(&name).join("src"));
        assert_eq!(selected(&selector), vec!["App.jsx"]);
    }

    #[test]
    fn normalizes_current_dir_components() {
        assert_eq!(normalize_root(PathBuf::from("./src")), PathBuf::from("src"));
        assert_eq!(normalize_root(PathBuf::from("src/./pages")), PathBuf::from("src/pages"));
        assert_eq!(normalize_root(PathBuf::from(".")), PathBuf::from("."));
        assert_eq!(normalize_root(PathBuf::from("./")), PathBuf::from("."));
        assert_eq!(normalize_root(PathBuf::from("/abs/./x")), PathBuf::from("/abs/x"));
    }

    #[test]
    fn relative_path_for_current_dir_root() {
        let selector = FileSelector::new(".", "jsx", vec!["legacy/**".to_string()]).unwrap();

        assert_eq!(
            selector.relative_path(Path::new("legacy/Old.jsx")),
            Path::new("legacy/Old.jsx")
        );
        assert!(selector.is_excluded(Path::new("legacy/Old.jsx")));
        assert!(!selector.is_excluded(Path::new("src/App.jsx")));
    }

    #[test]
    fn missing_root_is_access_error() {
        let dir = TempDir::new().unwrap();
        let selector = FileSelector::new(dir.path().join("nope"), "jsx", Vec::new()).unwrap();

        let err = selector.select().unwrap_err();
        assert_eq!(err.code, ErrorCode::FileAccessFailed);
    }

    #[test]
    fn rejects_pattern_extensions() {
        assert!(FileSelector::new("/tmp", "", Vec::new()).is_err());
        assert!(FileSelector::new("/tmp", "*", Vec::new()).is_err());
        assert!(FileSelector::new("/tmp", "js/x", Vec::new()).is_err());
        assert_eq!(
            FileSelector::new("/tmp", ".tsx", Vec::new()).unwrap().extension(),
            "tsx"
        );
    }
}
