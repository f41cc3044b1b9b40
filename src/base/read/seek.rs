// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! A ZIP reader which acts over a seekable source.
//!
//! ### Example
//! ```no_run
//! # use xlzip::base::read::seek::ZipFileReader;
//! # use xlzip::error::Result;
//! # use futures_lite::io::{AssertAsync, AsyncReadExt, BufReader};
//! # use std::fs::File;
//! #
//! async fn run() -> Result<()> {
//!     let data = BufReader::new(AssertAsync::new(File::open("./foo.zip")?));
//!     let mut reader = ZipFileReader::new(data).await?;
//!
//!     let mut data = Vec::new();
//!     let mut entry = reader.reader_with_entry(0).await?;
//!     entry.read_to_end(&mut data).await?;
//!
//!     // Use data within current scope.
//!
//!     Ok(())
//! }
//! ```

use crate::base::read::io::entry::ZipEntryReader;
use crate::error::{Result, ZipError};
use crate::file::ZipFile;

use futures_lite::io::{AsyncBufRead, AsyncReadExt, AsyncSeek};

/// A ZIP reader which acts over a seekable source.
#[derive(Clone)]
pub struct ZipFileReader<R> {
    reader: R,
    file: ZipFile,
}

impl<R> ZipFileReader<R>
where
    R: AsyncBufRead + AsyncSeek + Unpin,
{
    /// Constructs a new ZIP reader from a seekable source.
    pub async fn new(mut reader: R) -> Result<ZipFileReader<R>> {
        let file = crate::base::read::file(&mut reader).await?;
        Ok(ZipFileReader::from_raw_parts(reader, file))
    }

    /// Constructs a ZIP reader from a seekable source and ZIP file information derived from that source.
    ///
    /// Providing a [`ZipFile`] that wasn't derived from that source may lead to inaccurate parsing.
    pub fn from_raw_parts(reader: R, file: ZipFile) -> ZipFileReader<R> {
        ZipFileReader { reader, file }
    }

    /// Returns this ZIP file's information.
    pub fn file(&self) -> &ZipFile {
        &self.file
    }

    /// Returns the inner seekable source by consuming self.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Returns a new decompressing entry reader if the provided index is valid.
    pub async fn reader_with_entry(&mut self, index: usize) -> Result<ZipEntryReader<'_, R>> {
        let stored_entry = self.file.entries.get(index).ok_or(ZipError::EntryIndexOutOfBounds)?;
        let compression = stored_entry.entry.compression()?;

        stored_entry.seek_to_data_offset(&mut self.reader).await?;

        Ok(ZipEntryReader::new_with_borrow(&mut self.reader, compression, stored_entry.entry.compressed_size()))
    }

    /// Reads the still-compressed data of the entry at the provided index.
    ///
    /// No decompression or CRC32 verification takes place; the bytes are exactly those stored in the file and can be
    /// written verbatim into another ZIP file alongside the same entry metadata.
    pub async fn read_raw(&mut self, index: usize) -> Result<Vec<u8>> {
        let stored_entry = self.file.entries.get(index).ok_or(ZipError::EntryIndexOutOfBounds)?;
        let size = stored_entry.entry.compressed_size();

        stored_entry.seek_to_data_offset(&mut self.reader).await?;

        // The recorded size is untrusted, so let the buffer grow past 1 MiB only as bytes arrive.
        let mut buffer = Vec::with_capacity(size.min(1 << 20) as usize);
        (&mut self.reader).take(size).read_to_end(&mut buffer).await?;

        if buffer.len() as u64 != size {
            return Err(ZipError::UpstreamReadError(std::io::ErrorKind::UnexpectedEof.into()));
        }

        Ok(buffer)
    }
}
