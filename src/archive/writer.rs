use crate::archive::errors::{ArchiveError, ArchiveErrorKind};
use std::io::{Seek, Write};
use zip::{write::SimpleFileOptions, CompressionMethod};

/// How an entry's data is stored within the archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Data is stored uncompressed
    Stored,

    /// Data is deflate encoded (the default)
    #[default]
    Deflated,
}

impl Compression {
    /// Maps a compression method found in an existing archive to the closest
    /// method that can be written back out.
    pub fn from_method(method: CompressionMethod) -> Compression {
        if method == CompressionMethod::Stored {
            Compression::Stored
        } else {
            Compression::Deflated
        }
    }

    fn options(self) -> SimpleFileOptions {
        let method = match self {
            Compression::Stored => CompressionMethod::Stored,
            Compression::Deflated => CompressionMethod::Deflated,
        };
        SimpleFileOptions::default().compression_method(method)
    }
}

/// Builds a ZIP archive one entry at a time
///
/// ```
/// use biexport::archive::{ArchiveWriter, Compression, ExportArchive};
/// use std::io::Cursor;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut writer = ArchiveWriter::new(Cursor::new(Vec::new()));
/// writer.add_entry("report", br#"{"a":1}"#, Compression::default())?;
/// let data = writer.finish()?.into_inner();
///
/// let mut archive = ExportArchive::from_slice(&data)?;
/// assert_eq!(archive.read_entry_to_string("report")?, r#"{"a":1}"#);
/// # Ok(())
/// # }
/// ```
pub struct ArchiveWriter<W: Write + Seek> {
    archive: zip::ZipWriter<W>,
}

impl<W: Write + Seek> ArchiveWriter<W> {
    /// Starts a new archive that is written to `out`
    pub fn new(out: W) -> Self {
        ArchiveWriter {
            archive: zip::ZipWriter::new(out),
        }
    }

    /// Appends a file entry
    pub fn add_entry(
        &mut self,
        name: &str,
        data: &[u8],
        compression: Compression,
    ) -> Result<(), ArchiveError> {
        self.archive
            .start_file(name, compression.options())
            .map_err(ArchiveErrorKind::Zip)?;
        self.archive.write_all(data)?;
        Ok(())
    }

    /// Appends a directory entry. The name should end with a `/`
    pub fn add_directory(&mut self, name: &str) -> Result<(), ArchiveError> {
        self.archive
            .add_directory(name, SimpleFileOptions::default())
            .map_err(ArchiveErrorKind::Zip)?;
        Ok(())
    }

    /// Writes the central directory and returns the underlying writer
    pub fn finish(self) -> Result<W, ArchiveError> {
        let out = self.archive.finish().map_err(ArchiveErrorKind::Zip)?;
        Ok(out)
    }
}
