use zip::{result::ZipError, CompressionMethod};
use std::path::PathBuf;

/// Error type for archive operations
#[derive(Debug)]
pub struct ArchiveError {
    kind: ArchiveErrorKind,
}

impl ArchiveError {
    /// Returns the specific kind of archive error
    pub fn kind(&self) -> &ArchiveErrorKind {
        &self.kind
    }

    /// Returns true if the requested inner entry could not be found
    pub fn is_missing_entry(&self) -> bool {
        matches!(self.kind, ArchiveErrorKind::MissingEntry(_))
    }
}

impl From<ArchiveErrorKind> for ArchiveError {
    fn from(kind: ArchiveErrorKind) -> Self {
        ArchiveError { kind }
    }
}

impl From<std::io::Error> for ArchiveError {
    fn from(error: std::io::Error) -> Self {
        ArchiveError {
            kind: ArchiveErrorKind::Io(error),
        }
    }
}

impl From<ZipError> for ArchiveError {
    fn from(error: ZipError) -> Self {
        ArchiveError {
            kind: ArchiveErrorKind::Zip(error),
        }
    }
}

/// Specific kind of archive error
#[derive(Debug)]
pub enum ArchiveErrorKind {
    /// IO error during file operations
    Io(std::io::Error),
    /// Error from ZIP archive processing, typically the input is not a zip
    Zip(ZipError),
    /// ZIP archive missing the requested entry
    MissingEntry(String),
    /// ZIP entry uses unsupported compression method
    UnsupportedCompression(CompressionMethod),
    /// The entry's content is not valid UTF-8
    InvalidUtf8(std::str::Utf8Error),
    /// No inner entry name can be derived from the path
    InvalidPath(PathBuf),
}

impl std::error::Error for ArchiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ArchiveErrorKind::Io(err) => Some(err),
            ArchiveErrorKind::Zip(err) => Some(err),
            ArchiveErrorKind::InvalidUtf8(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ArchiveErrorKind::Io(err) => write!(f, "IO error: {}", err),
            ArchiveErrorKind::Zip(err) => write!(f, "Zip error: {}", err),
            ArchiveErrorKind::MissingEntry(name) => {
                write!(f, "Zip missing entry: {}", name)
            }
            ArchiveErrorKind::UnsupportedCompression(method) => {
                write!(f, "Zip unsupported compression method: {:?}", method)
            }
            ArchiveErrorKind::InvalidUtf8(err) => {
                write!(f, "Entry is not valid UTF-8: {}", err)
            }
            ArchiveErrorKind::InvalidPath(path) => {
                write!(f, "Unable to derive entry name from path: {}", path.display())
            }
        }
    }
}
