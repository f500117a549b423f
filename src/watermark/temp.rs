//! Scoped temporary files.
//!
//! A [`TempFile`] owns a uniquely named path and removes it when dropped,
//! unless it was moved into place with [`TempFile::persist`]. Every early
//! return or `?` in a workflow therefore cleans up after itself.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use uuid::Uuid;

#[derive(Debug)]
pub struct TempFile {
    path: PathBuf,
}

impl TempFile {
    /// Reserve `<dir>/<prefix>_<uuid>.<extension>`, creating `dir` if needed.
    /// The file itself is not created.
    pub fn new(dir: &Path, prefix: &str, extension: &str) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let name = format!("{}_{}.{}", prefix, Uuid::new_v4().simple(), extension);
        Ok(Self {
            path: dir.join(name),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move the file to `destination`. Falls back to copy when a rename is not
    /// possible (different filesystems); the temporary copy is still removed.
    pub fn persist(self, destination: &Path) -> io::Result<PathBuf> {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }

        if fs::rename(&self.path, destination).is_err() {
            fs::copy(&self.path, destination)?;
        }
        Ok(destination.to_path_buf())
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove {}: {}", self.path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = {
            let temp = TempFile::new(dir.path(), "upload", "png").unwrap();
            fs::write(temp.path(), b"data").unwrap();
            assert!(temp.path().exists());
            temp.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_removed_on_error_path() {
        fn failing(dir: &Path) -> io::Result<PathBuf> {
            let temp = TempFile::new(dir, "upload", "png")?;
            fs::write(temp.path(), b"data")?;
            Err(io::Error::new(io::ErrorKind::Other, "validation failed"))
        }

        let dir = tempfile::tempdir().unwrap();
        assert!(failing(dir.path()).is_err());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_persist_moves_file() {
        let dir = tempfile::tempdir().unwrap();
        let temp = TempFile::new(&dir.path().join("tmp"), "stego", "png").unwrap();
        fs::write(temp.path(), b"pixels").unwrap();
        let staged = temp.path().to_path_buf();

        let destination = dir.path().join("out").join("final.png");
        let saved = temp.persist(&destination).unwrap();

        assert_eq!(saved, destination);
        assert_eq!(fs::read(&destination).unwrap(), b"pixels");
        assert!(!staged.exists());
    }

    #[test]
    fn test_names_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let a = TempFile::new(dir.path(), "upload", "png").unwrap();
        let b = TempFile::new(dir.path(), "upload", "png").unwrap();
        assert_ne!(a.path(), b.path());
    }
}
