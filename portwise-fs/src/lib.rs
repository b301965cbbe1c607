//! Capability-based UTF-8 file helpers shared by the loaders and the CLI.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io::{self, Write};
use std::path::Component;

/// Open a file for reading using ambient authority.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Open the directory holding `path` and return it with the bare file name.
fn open_parent_dir(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Whether `path` is a regular file.
///
/// A missing path is an [`io::ErrorKind::NotFound`] error, so callers can
/// tell "absent" apart from "not a file".
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_parent_dir(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Write `contents` to `path`, creating missing parent directories.
pub fn write_utf8_file(path: &Utf8Path, contents: &str) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_parent_dir(path)?;
    let mut file = dir.create(name.as_str())?;
    file.write_all(contents.as_bytes())?;
    file.flush()
}

/// Create the parent directory of `path` if it does not exist.
fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() {
        return Ok(());
    }
    let (root, relative) = split_ambient_root(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    root.create_dir_all(&relative)
}

/// Split `path` into an opened ambient root and the remainder below it.
///
/// Absolute paths are rooted at the filesystem root (or the Windows drive
/// prefix); relative paths at the current directory.
fn split_ambient_root(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_path = path.as_std_path();
    let (root, remainder) = match std_path.components().next() {
        Some(Component::Prefix(prefix)) => {
            let prefix = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("path prefix is not UTF-8"))?;
            let root = Utf8PathBuf::from(prefix).join(std::path::MAIN_SEPARATOR.to_string());
            let remainder = path
                .strip_prefix(&root)
                .or_else(|_| path.strip_prefix(prefix))
                .map_err(|_| io::Error::other(format!("cannot strip {prefix} from {path}")))?;
            (root, remainder.to_owned())
        }
        Some(Component::RootDir) => {
            let root = Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string());
            let remainder = path
                .strip_prefix(&root)
                .map_err(|_| io::Error::other(format!("cannot strip root from {path}")))?;
            (root, remainder.to_owned())
        }
        _ => (Utf8PathBuf::from("."), path.to_owned()),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(&root, ambient_authority())?;
    Ok((dir, remainder))
}
