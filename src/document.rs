use crate::archive::{copy_archive_as, create_archive, read_archive_entry, write_archive_entry};
use crate::archive::ArchiveError;
use crate::render::{render_view, RenderOptions, RenderedView};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// A shared flag that asks a pending save to not start.
///
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken::default()
    }

    /// Requests cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Whether a save wrote to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Cancelled,
}

/// An export opened for viewing and editing.
///
/// The document holds the payload text in memory. Edits replace the text
/// wholesale and only reach the archive on save.
///
/// ```no_run
/// use biexport::{CancellationToken, ExportDocument};
///
/// let mut doc = ExportDocument::open("Q1+Sales.biarchive", None)?;
/// doc.edit(r#"{"ReportDefinition":{"Name":"Q1 Sales"}}"#);
/// doc.save(&CancellationToken::new())?;
/// # Ok::<(), biexport::archive::ArchiveError>(())
/// ```
#[derive(Debug)]
pub struct ExportDocument {
    path: PathBuf,
    data: String,
    dirty: bool,
}

impl ExportDocument {
    /// Opens the export at `path`. When `backup` is given, the content is
    /// restored from that archive instead while `path` stays the document's
    /// identity.
    pub fn open(path: impl Into<PathBuf>, backup: Option<&Path>) -> Result<Self, ArchiveError> {
        let path = path.into();
        let source = backup.unwrap_or(path.as_path());
        let data = read_archive_entry(source)?;
        debug!(path = %path.display(), restored = backup.is_some(), "opened export document");
        Ok(ExportDocument {
            path,
            data,
            dirty: backup.is_some(),
        })
    }

    /// Creates a document for an export that does not exist on disk yet
    pub fn new(path: impl Into<PathBuf>, data: impl Into<String>) -> Self {
        ExportDocument {
            path: path.into(),
            data: data.into(),
            dirty: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    /// Returns true when the content has changed since it was last read or
    /// saved to the document's path
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replaces the content and returns what it replaced, so that the edit
    /// can be undone by editing again with the returned value
    pub fn edit(&mut self, data: impl Into<String>) -> String {
        self.dirty = true;
        std::mem::replace(&mut self.data, data.into())
    }

    /// Writes the content back to the document's path
    pub fn save(&mut self, cancel: &CancellationToken) -> Result<SaveOutcome, ArchiveError> {
        let path = self.path.clone();
        self.save_as(path, cancel)
    }

    /// Writes the content to the export at `target`.
    ///
    /// An existing `target` has its own entry replaced. Otherwise the
    /// document's archive is copied to `target` with the entry renamed after
    /// it. Cancellation is checked once before anything is written.
    pub fn save_as(
        &mut self,
        target: impl AsRef<Path>,
        cancel: &CancellationToken,
    ) -> Result<SaveOutcome, ArchiveError> {
        let target = target.as_ref();
        if cancel.is_cancelled() {
            debug!(target = %target.display(), "save cancelled");
            return Ok(SaveOutcome::Cancelled);
        }

        if target.exists() {
            write_archive_entry(target, &self.data)?;
        } else if self.path.exists() {
            copy_archive_as(&self.path, target, &self.data)?;
        } else {
            create_archive(target, &self.data)?;
        }

        if same_file(target, &self.path) {
            self.dirty = false;
        }

        Ok(SaveOutcome::Saved)
    }

    /// Discards in memory changes by reading the content from the document's
    /// path again
    pub fn revert(&mut self) -> Result<&str, ArchiveError> {
        self.data = read_archive_entry(&self.path)?;
        self.dirty = false;
        Ok(&self.data)
    }

    /// Saves a copy of the content to `destination`. Returns `None` when the
    /// backup was cancelled before it started.
    pub fn backup(
        &mut self,
        destination: impl Into<PathBuf>,
        cancel: &CancellationToken,
    ) -> Result<Option<DocumentBackup>, ArchiveError> {
        let destination = destination.into();
        let dirty = self.dirty;
        let outcome = self.save_as(&destination, cancel)?;
        self.dirty = dirty;
        match outcome {
            SaveOutcome::Saved => Ok(Some(DocumentBackup { path: destination })),
            SaveOutcome::Cancelled => Ok(None),
        }
    }

    /// Renders the current content
    pub fn render(&self, options: &RenderOptions) -> RenderedView {
        render_view(&self.data, options)
    }
}

/// A backup written by [`ExportDocument::backup`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentBackup {
    path: PathBuf,
}

impl DocumentBackup {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the backup. A backup that is already gone is not an error.
    pub fn delete(self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            debug!(path = %self.path.display(), error = %e, "unable to delete backup");
        }
    }
}

/// Paths that are spelled differently (`dir/../a.bi` versus `a.bi`) still
/// refer to the same file when both resolve to the same canonical path.
fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }

    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
