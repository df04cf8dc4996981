//! Vault - the note storage surface the core needs
//!
//! The core only ever reads a note's content, overwrites it, checks
//! existence, and (for listings) enumerates a folder. Everything else about
//! storage stays behind this trait.

use std::io;
use std::path::{Path, PathBuf};

/// Capability surface over note storage
pub trait Vault {
    /// Read a note's full content
    fn read_content(&self, path: &Path) -> io::Result<String>;

    /// Replace a note's full content
    fn overwrite_content(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check whether a note exists at the given vault path
    fn exists(&self, path: &Path) -> bool;

    /// List all files under a folder, recursively (vault-relative paths)
    fn list_files_recursively(&self, folder: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Filesystem-backed vault rooted at a directory.
/// Relative paths resolve against the root; absolute paths pass through.
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl Vault for FsVault {
    fn read_content(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(self.resolve(path))
    }

    fn overwrite_content(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(self.resolve(path), content)
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn list_files_recursively(&self, folder: &Path) -> io::Result<Vec<PathBuf>> {
        let base = self.resolve(folder);
        let mut result = Vec::new();
        walk_recursive(&base, &mut result)?;

        // Report paths relative to the vault root where possible
        Ok(result
            .into_iter()
            .map(|p| p.strip_prefix(&self.root).map(PathBuf::from).unwrap_or(p))
            .collect())
    }
}

fn walk_recursive(path: &Path, result: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        let ft = entry.file_type()?;
        if ft.is_symlink() {
            // Skip symlinks to avoid potential loops
            continue;
        }
        if ft.is_dir() {
            walk_recursive(&entry.path(), result)?;
        } else {
            result.push(entry.path());
        }
    }
    Ok(())
}

/// A note's base filename: no directory, no extension
pub fn basename(path: &Path) -> &str {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or("")
}

/// Whether a path looks like a markdown note
pub fn is_note(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("md"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basename() {
        assert_eq!(basename(Path::new("Notes/TODO-groceries.md")), "TODO-groceries");
        assert_eq!(basename(Path::new("TODO.md")), "TODO");
        assert_eq!(basename(Path::new("plain")), "plain");
        assert_eq!(basename(Path::new("")), "");
    }

    #[test]
    fn test_is_note() {
        assert!(is_note(Path::new("a/b.md")));
        assert!(is_note(Path::new("a/b.MD")));
        assert!(!is_note(Path::new("a/b.txt")));
        assert!(!is_note(Path::new("a/b")));
    }

    #[test]
    fn test_fs_vault_read_write() {
        let dir = tempfile::tempdir().unwrap();
        let vault = FsVault::new(dir.path());

        vault
            .overwrite_content(Path::new("note.md"), "hello")
            .unwrap();
        assert!(vault.exists(Path::new("note.md")));
        assert_eq!(vault.read_content(Path::new("note.md")).unwrap(), "hello");
        assert!(!vault.exists(Path::new("missing.md")));
    }

    #[test]
    fn test_list_files_recursively() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("Templates/sub")).unwrap();
        std::fs::write(dir.path().join("Templates/a.md"), "").unwrap();
        std::fs::write(dir.path().join("Templates/sub/b.md"), "").unwrap();
        std::fs::write(dir.path().join("outside.md"), "").unwrap();

        let vault = FsVault::new(dir.path());
        let mut files = vault
            .list_files_recursively(Path::new("Templates"))
            .unwrap();
        files.sort();

        assert_eq!(
            files,
            vec![
                PathBuf::from("Templates/a.md"),
                PathBuf::from("Templates/sub/b.md"),
            ]
        );
    }
}
