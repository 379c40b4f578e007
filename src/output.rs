use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::BuildError;

/// Create `dir` and any missing parents.
pub fn ensure_dir(dir: &Path) -> Result<(), BuildError> {
    fs::create_dir_all(dir).map_err(|source| BuildError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

/// Truncate-and-write. No temp file or rename; a crash mid-write can leave a
/// partial page behind until the next run.
pub fn write_page(path: &Path, contents: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}

pub fn write_sitemap(path: &Path, contents: &str) -> Result<PathBuf, BuildError> {
    write_page(path, contents).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_page_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        write_page(&path, "a much longer first version").unwrap();
        write_page(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn ensure_dir_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("site").join("items");
        ensure_dir(&nested).unwrap();
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn sitemap_write_failure_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope").join("sitemap.xml");
        let err = write_sitemap(&missing, "<urlset/>").unwrap_err();
        assert!(err.to_string().contains("sitemap.xml"), "{err}");
    }
}
