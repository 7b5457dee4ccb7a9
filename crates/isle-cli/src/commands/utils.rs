//! Shared helpers for command implementations.

use crate::error::{CliError, Result};
use std::path::{Path, PathBuf};

/// Current working directory.
pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir().map_err(CliError::Io)
}

/// Resolve `path` against `cwd` and normalize `.` and `..` segments.
///
/// ```
/// use isle_cli::commands::utils::resolve_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(
///     resolve_path(Path::new("./site/../dist"), Path::new("/project")),
///     PathBuf::from("/project/dist")
/// );
/// ```
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path_clean::clean(path)
    } else {
        path_clean::clean(cwd.join(path))
    }
}

/// Fail unless `dir` is an existing directory.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else if dir.exists() {
        Err(CliError::InvalidArgument(format!(
            "Not a directory: {}",
            dir.display()
        )))
    } else {
        Err(CliError::DirectoryNotFound(dir.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_absolute_path() {
        assert_eq!(
            resolve_path(Path::new("/srv/site/./dist"), Path::new("/project")),
            PathBuf::from("/srv/site/dist")
        );
    }

    #[test]
    fn test_resolve_relative_path() {
        assert_eq!(
            resolve_path(Path::new("dist"), Path::new("/project")),
            PathBuf::from("/project/dist")
        );
    }

    #[test]
    fn test_ensure_dir() {
        let temp = TempDir::new().unwrap();
        assert!(ensure_dir(temp.path()).is_ok());

        let file = temp.path().join("index.html");
        std::fs::write(&file, "<html></html>").unwrap();
        assert!(matches!(ensure_dir(&file), Err(CliError::InvalidArgument(_))));

        let missing = temp.path().join("missing");
        assert!(matches!(
            ensure_dir(&missing),
            Err(CliError::DirectoryNotFound(path)) if path == missing
        ));
    }
}
