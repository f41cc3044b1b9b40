// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! Synchronous access to an archive on disk.

use std::fs::File;
use std::path::Path;

use futures_lite::future::block_on;
use futures_lite::io::{AssertAsync, BufReader};

use crate::archive::catalog::ArchiveCatalog;
use crate::archive::entry::ArchiveEntry;
use crate::base::read::seek::ZipFileReader;
use crate::entry::ZipEntry;
use crate::error::{Result, ZipError};
use crate::file::ZipFile;

/// Recorded sizes are untrusted; extraction buffers start no larger than this.
pub(crate) const MAX_INITIAL_CAPACITY: u64 = 1 << 20;

pub(crate) type FileSource = BufReader<AssertAsync<File>>;

/// An open archive file, its parsed central directory, and the means to pull entry data out of it.
pub(crate) struct ArchiveReader {
    reader: ZipFileReader<FileSource>,
}

impl ArchiveReader {
    /// Opens the file at `path` and parses its central directory.
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = block_on(ZipFileReader::new(BufReader::new(AssertAsync::new(file))))?;

        tracing::debug!(path = %path.display(), records = reader.file().entries().len(), "scanned archive");
        Ok(Self { reader })
    }

    pub(crate) fn file(&self) -> &ZipFile {
        self.reader.file()
    }

    /// Returns the central directory record at `index`.
    pub(crate) fn entry(&self, index: usize) -> Result<&ZipEntry> {
        self.reader.file().entries().get(index).map(|stored| &stored.entry).ok_or(ZipError::EntryIndexOutOfBounds)
    }

    /// Builds a catalog with one entry per surviving record plus any implied directories.
    pub(crate) fn catalog(&self) -> ArchiveCatalog {
        let scanned = self.file().entries().iter().enumerate().map(|(index, stored)| {
            tracing::trace!(index, entry = stored.filename(), size = stored.uncompressed_size(), "scanned record");
            ArchiveEntry::from_stored(index, stored)
        });

        ArchiveCatalog::from_scanned(scanned)
    }

    /// Decompresses the data of the record at `index`, checking its length and CRC32 against the record.
    pub(crate) fn extract(&mut self, index: usize) -> Result<Vec<u8>> {
        let entry = self.entry(index)?.clone();
        if entry.encrypted() {
            return Err(ZipError::EntryNotSupported { name: entry.filename().to_owned() });
        }

        block_on(async {
            let mut reader = self.reader.reader_with_entry(index).await?;
            let mut buffer = Vec::with_capacity(entry.uncompressed_size().min(MAX_INITIAL_CAPACITY) as usize);
            reader.read_to_end_checked(&mut buffer, &entry).await?;
            Ok(buffer)
        })
    }

    /// Reads the still-compressed data of the record at `index`.
    pub(crate) fn raw(&mut self, index: usize) -> Result<Vec<u8>> {
        block_on(self.reader.read_raw(index))
    }
}
