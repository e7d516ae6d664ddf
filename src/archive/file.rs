use crate::archive::{
    errors::{ArchiveError, ArchiveErrorKind},
    writer::{ArchiveWriter, Compression},
};
use std::{
    fs::File,
    io::{Cursor, Read, Seek, Write},
};
use zip::CompressionMethod;

/// Read a zip-wrapped export from memory or from the file system
#[derive(Debug)]
pub struct ExportArchive<R> {
    archive: zip::ZipArchive<R>,
}

impl ExportArchive<()> {
    /// Creates an export archive from a slice of data
    pub fn from_slice<R>(data: R) -> Result<ExportArchive<Cursor<R>>, ArchiveError>
    where
        R: AsRef<[u8]>,
    {
        ExportArchive::from_reader(Cursor::new(data))
    }

    /// Creates an export archive from a file handle
    pub fn from_file(file: File) -> Result<ExportArchive<File>, ArchiveError> {
        ExportArchive::from_reader(file)
    }

    /// Creates an export archive from any seekable reader
    pub fn from_reader<R>(reader: R) -> Result<ExportArchive<R>, ArchiveError>
    where
        R: Read + Seek,
    {
        let archive = zip::ZipArchive::new(reader).map_err(ArchiveErrorKind::Zip)?;
        Ok(ExportArchive { archive })
    }
}

/// An entry as listed in the central directory
#[derive(Debug, Clone)]
struct EntryLocation {
    index: usize,
    name: String,
    compression: CompressionMethod,
    is_dir: bool,
}

impl<R> ExportArchive<R>
where
    R: Read + Seek,
{
    fn locations(&mut self) -> Result<Vec<EntryLocation>, ArchiveError> {
        let mut result = Vec::with_capacity(self.archive.len());
        for index in 0..self.archive.len() {
            let entry = self
                .archive
                .by_index_raw(index)
                .map_err(ArchiveErrorKind::Zip)?;
            result.push(EntryLocation {
                index,
                name: entry.name().to_string(),
                compression: entry.compression(),
                is_dir: entry.is_dir(),
            });
        }

        Ok(result)
    }

    fn locate(&mut self, name: &str) -> Result<EntryLocation, ArchiveError> {
        self.locations()?
            .into_iter()
            .find(|x| x.name == name)
            .ok_or_else(|| ArchiveErrorKind::MissingEntry(name.to_string()).into())
    }

    fn open(&mut self, location: &EntryLocation) -> Result<impl Read + '_, ArchiveError> {
        let compression = location.compression;
        if compression != CompressionMethod::Stored && compression != CompressionMethod::Deflated
        {
            return Err(ArchiveErrorKind::UnsupportedCompression(compression).into());
        }

        let entry = self
            .archive
            .by_index(location.index)
            .map_err(ArchiveErrorKind::Zip)?;
        Ok(entry)
    }

    /// Returns the names of every entry in central directory order
    pub fn entry_names(&mut self) -> Result<Vec<String>, ArchiveError> {
        Ok(self.locations()?.into_iter().map(|x| x.name).collect())
    }

    /// Returns a reader over the decompressed data of an entry
    ///
    /// Will return a `ArchiveErrorKind::MissingEntry` if the requested path
    /// is not found.
    pub fn read_entry(&mut self, name: &str) -> Result<impl Read + '_, ArchiveError> {
        let location = self.locate(name)?;
        self.open(&location)
    }

    /// Reads an entry to completion and decodes it as UTF-8
    pub fn read_entry_to_string(&mut self, name: &str) -> Result<String, ArchiveError> {
        let mut data = Vec::new();
        self.read_entry(name)?.read_to_end(&mut data)?;
        String::from_utf8(data).map_err(|e| ArchiveErrorKind::InvalidUtf8(e.utf8_error()).into())
    }

    /// Writes a copy of this archive to `out` with the bytes of the named
    /// entry replaced by `content`.
    ///
    /// All other entries keep their position, data, and compression method.
    pub fn rewrite_entry<W: Write + Seek>(
        &mut self,
        out: W,
        name: &str,
        content: &[u8],
    ) -> Result<W, ArchiveError> {
        self.rewrite_entry_as(out, name, name, content)
    }

    /// Same as [`ExportArchive::rewrite_entry`] except the replaced entry is
    /// stored under `new_name`.
    pub fn rewrite_entry_as<W: Write + Seek>(
        &mut self,
        out: W,
        name: &str,
        new_name: &str,
        content: &[u8],
    ) -> Result<W, ArchiveError> {
        let locations = self.locations()?;
        if !locations.iter().any(|x| x.name == name) {
            return Err(ArchiveErrorKind::MissingEntry(name.to_string()).into());
        }

        let mut writer = ArchiveWriter::new(out);
        let mut data = Vec::new();
        for location in &locations {
            let compression = Compression::from_method(location.compression);
            if location.name == name {
                writer.add_entry(new_name, content, compression)?;
            } else if location.is_dir {
                writer.add_directory(&location.name)?;
            } else {
                data.clear();
                self.open(location)?.read_to_end(&mut data)?;
                writer.add_entry(&location.name, &data, compression)?;
            }
        }

        writer.finish()
    }
}
