//! Line-oriented file access and recursive directory listing.
//!
//! Every function checks its path precondition first and reports a
//! [`FileError`] instead of failing later inside the I/O call. Listings walk
//! the whole tree below the given directory and return paths sorted so the
//! output is stable across platforms. Symbolic links are listed but never
//! followed.

use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

/// Errors returned by the file utilities.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    /// Nothing exists at the path.
    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The path exists but is a directory where a file was expected.
    #[error("path is not a file: {}", .0.display())]
    NotAFile(PathBuf),

    /// The path exists but is a file where a directory was expected.
    #[error("path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The underlying I/O call failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The operating system error.
        source: std::io::Error,
    },
}

impl FileError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Returns `true` if anything exists at `path`.
#[must_use]
pub fn exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Returns `true` if `path` is an existing regular file.
#[must_use]
pub fn is_file(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_file()
}

/// Returns `true` if `path` is an existing directory.
#[must_use]
pub fn is_directory(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_dir()
}

fn require_file(path: &Path) -> Result<(), FileError> {
    if !path.exists() {
        return Err(FileError::NotFound(path.to_path_buf()));
    }
    if path.is_dir() {
        return Err(FileError::NotAFile(path.to_path_buf()));
    }
    Ok(())
}

fn require_directory(path: &Path) -> Result<(), FileError> {
    if !path.exists() {
        return Err(FileError::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(FileError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

/// Create or truncate `path` and write each line followed by `\n`.
///
/// # Errors
///
/// Returns [`FileError::NotAFile`] if `path` is a directory, or
/// [`FileError::Io`] if writing fails.
pub fn write_lines<I, S>(path: impl AsRef<Path>, lines: I) -> Result<(), FileError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    if path.is_dir() {
        return Err(FileError::NotAFile(path.to_path_buf()));
    }

    let file = fs::File::create(path).map_err(FileError::io(path))?;
    let mut writer = BufWriter::new(file);
    let mut count = 0usize;
    for line in lines {
        writer
            .write_all(line.as_ref().as_bytes())
            .and_then(|()| writer.write_all(b"\n"))
            .map_err(FileError::io(path))?;
        count += 1;
    }
    writer.flush().map_err(FileError::io(path))?;
    debug!(path = %path.display(), lines = count, "wrote file");
    Ok(())
}

/// Call `visit` with each line of `path`, without its line terminator.
///
/// # Errors
///
/// Returns [`FileError::NotFound`] or [`FileError::NotAFile`] if `path` is
/// not a readable file, or [`FileError::Io`] if reading fails.
pub fn for_each_line(path: impl AsRef<Path>, mut visit: impl FnMut(&str)) -> Result<(), FileError> {
    let path = path.as_ref();
    require_file(path)?;

    let file = fs::File::open(path).map_err(FileError::io(path))?;
    for line in BufReader::new(file).lines() {
        visit(&line.map_err(FileError::io(path))?);
    }
    Ok(())
}

/// Every line of `path`, without line terminators.
///
/// # Errors
///
/// Same as [`for_each_line`].
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>, FileError> {
    let mut lines = Vec::new();
    for_each_line(path, |line| lines.push(line.to_owned()))?;
    Ok(lines)
}

/// Every regular file below `directory`, recursively, sorted.
///
/// # Errors
///
/// Returns [`FileError::NotFound`] or [`FileError::NotADirectory`] if
/// `directory` is not a directory, or [`FileError::Io`] if listing fails.
pub fn files(directory: impl AsRef<Path>) -> Result<Vec<PathBuf>, FileError> {
    walk(directory.as_ref(), fs::FileType::is_file)
}

/// Every directory below `directory`, recursively, sorted. `directory`
/// itself is not included.
///
/// # Errors
///
/// Same as [`files`].
pub fn directories(directory: impl AsRef<Path>) -> Result<Vec<PathBuf>, FileError> {
    walk(directory.as_ref(), fs::FileType::is_dir)
}

/// Every file and directory below `directory`, recursively, sorted.
///
/// # Errors
///
/// Same as [`files`].
pub fn entries(directory: impl AsRef<Path>) -> Result<Vec<PathBuf>, FileError> {
    walk(directory.as_ref(), |_| true)
}

fn walk(root: &Path, keep: impl Fn(&fs::FileType) -> bool) -> Result<Vec<PathBuf>, FileError> {
    require_directory(root)?;

    let mut found = Vec::new();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry.map_err(|error| FileError::Io {
            path: error.path().unwrap_or(root).to_path_buf(),
            source: error.into(),
        })?;
        if keep(&entry.file_type()) {
            found.push(entry.into_path());
        }
    }
    found.sort();
    debug!(root = %root.display(), found = found.len(), "listed directory");
    Ok(found)
}
