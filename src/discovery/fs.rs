use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
    Symlink,
    Other,
}

impl From<fs::FileType> for EntryKind {
    fn from(file_type: fs::FileType) -> Self {
        if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    pub path: PathBuf,
    /// The entry's own type; symlinks are reported as `Symlink`, not followed.
    pub kind: EntryKind,
}

/// Read-only filesystem access used by discovery.
pub trait FsReader: Send + Sync {
    /// Entries of `path` in the order the platform lists them.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>>;

    /// Kind of the entry at `path`, `None` when nothing exists there.
    fn entry_kind(&self, path: &Path) -> io::Result<Option<EntryKind>>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

/// `FsReader` over the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FsReader for LocalFs {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            entries.push(DirEntryInfo {
                name: entry.file_name().to_string_lossy().to_string(),
                path: entry.path(),
                kind: entry.file_type()?.into(),
            });
        }
        Ok(entries)
    }

    fn entry_kind(&self, path: &Path) -> io::Result<Option<EntryKind>> {
        match fs::metadata(path) {
            Ok(meta) => Ok(Some(meta.file_type().into())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        let resolved = fs::canonicalize(path)?;
        if !resolved.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "start path is not a directory",
            ));
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_entries_with_their_own_kind() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("file.txt"), "x").unwrap();

        let mut entries = LocalFs.list_dir(dir.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "file.txt");
        assert_eq!(entries[0].kind, EntryKind::File);
        assert_eq!(entries[1].name, "sub");
        assert_eq!(entries[1].kind, EntryKind::Directory);
        assert_eq!(entries[1].path, dir.path().join("sub"));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directory_is_not_a_directory_entry() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

        let entries = LocalFs.list_dir(dir.path()).unwrap();
        let link = entries.iter().find(|e| e.name == "link").unwrap();
        assert_eq!(link.kind, EntryKind::Symlink);
    }

    #[test]
    fn entry_kind_of_missing_path_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(LocalFs.entry_kind(&dir.path().join("nope")).unwrap(), None);
        assert_eq!(
            LocalFs.entry_kind(dir.path()).unwrap(),
            Some(EntryKind::Directory)
        );
    }

    #[test]
    fn canonicalize_rejects_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let err = LocalFs.canonicalize(&file).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(LocalFs.canonicalize(dir.path()).is_ok());
    }
}
