//! Read and update the JSON payload inside zip-wrapped exports.
//!
//! An export is a ZIP archive that holds a single text entry. The entry is
//! named after the archive itself: `Q1+Sales.biarchive` holds an entry named
//! `Q1 Sales` (see [`inner_entry_name`]).
//!
//! ```text
//! read_archive_entry(path)
//! ├── inner_entry_name(path) → entry to look for
//! └── ExportArchive::from_file → read_entry_to_string
//!
//! write_archive_entry(path, content)
//! ├── minify(content)
//! ├── ExportArchive::rewrite_entry → new archive in memory
//! └── overwrite path
//! ```
//!
//! Stored and deflated entries can be read. Rewriting an entry copies every
//! other entry unchanged, so archives that carry additional files survive a
//! round trip.

mod errors;
mod file;
mod name;
mod writer;

pub use errors::*;
pub use file::*;
pub use name::*;
pub use writer::*;

use crate::minify::minify;
use std::{fs::File, io::Cursor, path::Path};
use tracing::debug;

/// Reads the payload of the export at `path`.
///
/// The payload is the entry named after the archive (see
/// [`inner_entry_name`]). An archive without such an entry is an error for
/// which [`ArchiveError::is_missing_entry`] returns true.
pub fn read_archive_entry(path: impl AsRef<Path>) -> Result<String, ArchiveError> {
    let path = path.as_ref();
    let name = inner_entry_name(path)?;
    let mut archive = ExportArchive::from_file(File::open(path)?)?;
    let content = archive.read_entry_to_string(&name)?;
    debug!(
        path = %path.display(),
        entry = %name,
        length = content.len(),
        "read export entry"
    );
    Ok(content)
}

/// Replaces the payload of the export at `path` with the minified `content`.
///
/// The updated archive is assembled in memory and then written over the
/// existing file. There is no temporary file and rename, so an interrupted
/// write can leave a truncated archive behind.
pub fn write_archive_entry(path: impl AsRef<Path>, content: &str) -> Result<(), ArchiveError> {
    let path = path.as_ref();
    let name = inner_entry_name(path)?;
    let mut archive = ExportArchive::from_file(File::open(path)?)?;
    let minified = minify(content);

    let out = archive
        .rewrite_entry(Cursor::new(Vec::new()), &name, minified.as_bytes())?
        .into_inner();
    drop(archive);

    std::fs::write(path, &out)?;
    debug!(
        path = %path.display(),
        entry = %name,
        length = minified.len(),
        archive_len = out.len(),
        "updated export entry"
    );
    Ok(())
}

/// Creates a new export at `path` holding the minified `content` under the
/// entry name derived from the path. An existing file is overwritten.
pub fn create_archive(path: impl AsRef<Path>, content: &str) -> Result<(), ArchiveError> {
    let path = path.as_ref();
    let name = inner_entry_name(path)?;
    let minified = minify(content);

    let mut writer = ArchiveWriter::new(Cursor::new(Vec::new()));
    writer.add_entry(&name, minified.as_bytes(), Compression::default())?;
    let out = writer.finish()?.into_inner();

    std::fs::write(path, &out)?;
    debug!(path = %path.display(), entry = %name, "created export");
    Ok(())
}

/// Copies the export at `source` to `target`, storing the minified `content`
/// under the entry name derived from `target`.
///
/// Entries other than the payload are carried over unchanged. `source` is
/// left untouched and an existing `target` is overwritten.
pub fn copy_archive_as(
    source: impl AsRef<Path>,
    target: impl AsRef<Path>,
    content: &str,
) -> Result<(), ArchiveError> {
    let (source, target) = (source.as_ref(), target.as_ref());
    let name = inner_entry_name(source)?;
    let new_name = inner_entry_name(target)?;
    let mut archive = ExportArchive::from_file(File::open(source)?)?;
    let minified = minify(content);

    let out = archive
        .rewrite_entry_as(Cursor::new(Vec::new()), &name, &new_name, minified.as_bytes())?
        .into_inner();
    drop(archive);

    std::fs::write(target, &out)?;
    debug!(
        source = %source.display(),
        target = %target.display(),
        entry = %new_name,
        length = minified.len(),
        "copied export"
    );
    Ok(())
}
