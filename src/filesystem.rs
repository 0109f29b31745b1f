use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => write!(f, "file"),
            EntryKind::Directory => write!(f, "directory"),
        }
    }
}

/// How `open_output` treats an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Truncate,
    Append,
}

#[derive(Debug, Error)]
pub enum FsError {
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("{} is not a {expected}", .path.display())]
    WrongType { path: PathBuf, expected: EntryKind },
    #[error("{} already exists", .0.display())]
    AlreadyExists(PathBuf),
    #[error("{} is not empty", .0.display())]
    NotEmpty(PathBuf),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            io::ErrorKind::AlreadyExists => FsError::AlreadyExists(path.to_path_buf()),
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub hidden: bool,
}

/// Facade over the host filesystem. Every method performs a single action on
/// an already-resolved path and reports failures as [`FsError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystem;

impl FileSystem {
    pub fn new() -> Self {
        Self
    }

    pub fn exists(&self, path: &Path) -> bool {
        // symlink_metadata so a dangling link still counts as occupying the name
        fs::symlink_metadata(path).is_ok()
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    pub fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    pub fn is_hidden(&self, path: &Path) -> bool {
        let dotted = path
            .file_name()
            .map(|name| name.to_string_lossy().starts_with('.'))
            .unwrap_or(false);

        dotted || has_hidden_attribute(path)
    }

    pub fn list_entries(&self, dir: &Path) -> Result<Vec<EntryInfo>, FsError> {
        if !self.exists(dir) {
            return Err(FsError::NotFound(dir.to_path_buf()));
        }
        if !self.is_dir(dir) {
            return Err(FsError::WrongType {
                path: dir.to_path_buf(),
                expected: EntryKind::Directory,
            });
        }

        let entries = fs::read_dir(dir).map_err(|e| FsError::from_io(dir, e))?;
        let mut result = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| FsError::from_io(dir, e))?;
            result.push(EntryInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                hidden: self.is_hidden(&entry.path()),
            });
        }

        trace!(dir = %dir.display(), count = result.len(), "listed directory");
        Ok(result)
    }

    pub fn create_file(&self, path: &Path) -> Result<(), FsError> {
        if self.exists(path) {
            return Err(FsError::AlreadyExists(path.to_path_buf()));
        }

        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| FsError::from_io(path, e))?;

        debug!(path = %path.display(), "created file");
        Ok(())
    }

    pub fn create_dir(&self, path: &Path) -> Result<(), FsError> {
        if self.exists(path) {
            return Err(FsError::AlreadyExists(path.to_path_buf()));
        }

        fs::create_dir(path).map_err(|e| FsError::from_io(path, e))?;
        debug!(path = %path.display(), "created directory");
        Ok(())
    }

    pub fn remove_dir(&self, path: &Path) -> Result<(), FsError> {
        if !self.exists(path) {
            return Err(FsError::NotFound(path.to_path_buf()));
        }
        if !self.is_dir(path) {
            return Err(FsError::WrongType {
                path: path.to_path_buf(),
                expected: EntryKind::Directory,
            });
        }

        let mut entries = fs::read_dir(path).map_err(|e| FsError::from_io(path, e))?;
        if entries.next().is_some() {
            return Err(FsError::NotEmpty(path.to_path_buf()));
        }

        fs::remove_dir(path).map_err(|e| FsError::from_io(path, e))?;
        debug!(path = %path.display(), "removed directory");
        Ok(())
    }

    pub fn remove_file(&self, path: &Path) -> Result<(), FsError> {
        if !self.exists(path) {
            return Err(FsError::NotFound(path.to_path_buf()));
        }
        if !self.is_file(path) {
            return Err(FsError::WrongType {
                path: path.to_path_buf(),
                expected: EntryKind::File,
            });
        }

        fs::remove_file(path).map_err(|e| FsError::from_io(path, e))?;
        debug!(path = %path.display(), "removed file");
        Ok(())
    }

    pub fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        if !self.exists(from) {
            return Err(FsError::NotFound(from.to_path_buf()));
        }

        fs::rename(from, to).map_err(|source| FsError::Io {
            path: to.to_path_buf(),
            source,
        })?;

        debug!(from = %from.display(), to = %to.display(), "renamed entry");
        Ok(())
    }

    pub fn read_lines(&self, path: &Path) -> Result<Vec<String>, FsError> {
        if !self.exists(path) {
            return Err(FsError::NotFound(path.to_path_buf()));
        }
        if !self.is_file(path) {
            return Err(FsError::WrongType {
                path: path.to_path_buf(),
                expected: EntryKind::File,
            });
        }

        let file = File::open(path).map_err(|e| FsError::from_io(path, e))?;
        BufReader::new(file)
            .split(b'\n')
            .map(|line| line.map(|bytes| decode_line(&bytes)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| FsError::from_io(path, e))
    }

    pub fn open_output(&self, path: &Path, mode: WriteMode) -> Result<File, FsError> {
        if self.is_dir(path) {
            return Err(FsError::WrongType {
                path: path.to_path_buf(),
                expected: EntryKind::File,
            });
        }

        let mut options = OpenOptions::new();
        options.create(true);
        match mode {
            WriteMode::Truncate => options.write(true).truncate(true),
            WriteMode::Append => options.append(true),
        };

        let file = options.open(path).map_err(|e| FsError::from_io(path, e))?;
        debug!(path = %path.display(), ?mode, "opened output file");
        Ok(file)
    }
}

/// Decodes one line without its terminator. Bytes that are not UTF-8
/// become U+FFFD instead of failing the whole read.
pub(crate) fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(windows)]
fn has_hidden_attribute(path: &Path) -> bool {
    use std::os::windows::fs::MetadataExt;

    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
    fs::metadata(path)
        .map(|meta| meta.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
        .unwrap_or(false)
}

#[cfg(not(windows))]
fn has_hidden_attribute(_path: &Path) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TempDir;
    use std::io::Write;

    #[test]
    fn test_create_and_remove_file() {
        let dir = TempDir::new("fs_file");
        let fs = FileSystem::new();
        let path = dir.path().join("a.txt");

        fs.create_file(&path).unwrap();
        assert!(fs.is_file(&path));
        assert!(matches!(
            fs.create_file(&path),
            Err(FsError::AlreadyExists(_))
        ));

        fs.remove_file(&path).unwrap();
        assert!(!fs.exists(&path));
        assert!(matches!(fs.remove_file(&path), Err(FsError::NotFound(_))));
    }

    #[test]
    fn test_remove_file_rejects_directory() {
        let dir = TempDir::new("fs_rm_dir");
        let fs = FileSystem::new();
        let sub = dir.path().join("sub");
        fs.create_dir(&sub).unwrap();

        assert!(matches!(
            fs.remove_file(&sub),
            Err(FsError::WrongType {
                expected: EntryKind::File,
                ..
            })
        ));
        assert!(fs.is_dir(&sub));
    }

    #[test]
    fn test_remove_dir_checks() {
        let dir = TempDir::new("fs_rmdir");
        let fs = FileSystem::new();
        let sub = dir.path().join("sub");

        assert!(matches!(fs.remove_dir(&sub), Err(FsError::NotFound(_))));

        fs.create_dir(&sub).unwrap();
        fs.create_file(&sub.join("inner")).unwrap();
        assert!(matches!(fs.remove_dir(&sub), Err(FsError::NotEmpty(_))));

        fs.remove_file(&sub.join("inner")).unwrap();
        fs.remove_dir(&sub).unwrap();
        assert!(!fs.exists(&sub));

        let file = dir.path().join("plain");
        fs.create_file(&file).unwrap();
        assert!(matches!(
            fs.remove_dir(&file),
            Err(FsError::WrongType {
                expected: EntryKind::Directory,
                ..
            })
        ));
    }

    #[test]
    fn test_list_entries_marks_hidden() {
        let dir = TempDir::new("fs_list");
        let fs = FileSystem::new();
        fs.create_file(&dir.path().join(".secret")).unwrap();
        fs.create_file(&dir.path().join("visible")).unwrap();
        fs.create_dir(&dir.path().join("folder")).unwrap();

        let mut entries = fs.list_entries(dir.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let summary: Vec<(&str, bool)> = entries
            .iter()
            .map(|e| (e.name.as_str(), e.hidden))
            .collect();
        assert_eq!(
            summary,
            vec![(".secret", true), ("folder", false), ("visible", false)]
        );
    }

    #[test]
    fn test_rename_missing_source() {
        let dir = TempDir::new("fs_rename");
        let fs = FileSystem::new();
        let result = fs.rename(&dir.path().join("nope"), &dir.path().join("other"));
        assert!(matches!(result, Err(FsError::NotFound(_))));
    }

    #[test]
    fn test_open_output_modes() {
        let dir = TempDir::new("fs_output");
        let fs = FileSystem::new();
        let path = dir.path().join("out.txt");

        let mut file = fs.open_output(&path, WriteMode::Truncate).unwrap();
        writeln!(file, "one").unwrap();
        drop(file);

        let mut file = fs.open_output(&path, WriteMode::Append).unwrap();
        writeln!(file, "two").unwrap();
        drop(file);
        assert_eq!(fs.read_lines(&path).unwrap(), vec!["one", "two"]);

        let mut file = fs.open_output(&path, WriteMode::Truncate).unwrap();
        writeln!(file, "three").unwrap();
        drop(file);
        assert_eq!(fs.read_lines(&path).unwrap(), vec!["three"]);

        assert!(matches!(
            fs.open_output(dir.path(), WriteMode::Append),
            Err(FsError::WrongType { .. })
        ));
    }

    #[test]
    fn test_read_lines_keeps_invalid_utf8() {
        let dir = TempDir::new("fs_latin1");
        let fs = FileSystem::new();
        let path = dir.path().join("latin1.txt");
        std::fs::write(&path, b"first\ncaf\xe9\r\nthird").unwrap();

        assert_eq!(
            fs.read_lines(&path).unwrap(),
            vec!["first", "caf\u{FFFD}", "third"]
        );
    }

    #[test]
    fn test_decode_line_strips_terminators() {
        assert_eq!(decode_line(b"plain\r\n"), "plain");
        assert_eq!(decode_line(b"no newline"), "no newline");
        assert_eq!(decode_line(b"\n"), "");
    }

    #[test]
    fn test_read_lines_errors() {
        let dir = TempDir::new("fs_read");
        let fs = FileSystem::new();
        assert!(matches!(
            fs.read_lines(&dir.path().join("missing")),
            Err(FsError::NotFound(_))
        ));
        assert!(matches!(
            fs.read_lines(dir.path()),
            Err(FsError::WrongType { .. })
        ));
    }
}
