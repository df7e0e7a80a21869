use crate::Result;
use anyhow::Context;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Write a file and flush it to disk before returning.
pub(crate) fn write(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    let mut f = fs::File::create(path)
        .with_context(|| format!("Unable to create file {}", path.display()))?;
    f.write_all(contents.as_ref())
        .with_context(|| format!("Unable to write to {}", path.display()))?;
    f.sync_all()
        .with_context(|| format!("Unable to flush {} to disk", path.display()))
}

/// Read a file to a `String`. Returns `None` when the file does not exist.
pub(crate) fn read_if_exists(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read file at {}", path.display())),
    }
}

/// Read a file to a `String`.
pub(crate) fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file at {}", path.display()))
}

/// Basically move a file. Renames `from` -> `to`, replacing `to` if it exists.
pub(crate) fn rename(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<()> {
    fs::rename(from.as_ref(), to.as_ref()).with_context(|| {
        format!(
            "Unable to move file from '{}' to '{}'",
            from.as_ref().display(),
            to.as_ref().display()
        )
    })
}

pub(crate) fn copy(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<()> {
    fs::copy(from.as_ref(), to.as_ref())
        .map(|_| ())
        .with_context(|| {
            format!(
                "Unable to copy file from '{}' to '{}'",
                from.as_ref().display(),
                to.as_ref().display()
            )
        })
}

pub(crate) fn remove(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::remove_file(path).with_context(|| format!("Unable to remove file {}", path.display()))
}

/// Create a directory and any missing parents.
pub(crate) fn make_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::create_dir_all(path)
        .with_context(|| format!("Unable to create directory {}", path.display()))
}

pub(crate) fn canonicalize(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    fs::canonicalize(path)
        .with_context(|| format!("Unable to canonicalize the path {}", path.display()))
}

pub(crate) fn read_dir(path: impl AsRef<Path>) -> Result<fs::ReadDir> {
    let path = path.as_ref();
    fs::read_dir(path).with_context(|| format!("Unable to read directory {}", path.display()))
}
