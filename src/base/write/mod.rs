// Copyright (c) 2021-2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! A module which supports writing ZIP files.
//!
//! # Example
//! ```no_run
//! # use xlzip::{Compression, ZipEntryBuilder, base::write::ZipFileWriter};
//! # use xlzip::error::ZipError;
//! #
//! # async fn run() -> Result<(), ZipError> {
//! let mut writer = ZipFileWriter::new(Vec::<u8>::new());
//!
//! let data = b"This is an example file.";
//! let opts = ZipEntryBuilder::new(String::from("foo.txt"), Compression::default());
//!
//! writer.write_entry_whole(opts, data).await?;
//! let bytes = writer.close().await?;
//! #   Ok(())
//! # }
//! ```

pub(crate) mod entry_whole;
pub(crate) mod io;

use crate::entry::ZipEntry;
use crate::error::{Result, Zip64ErrorCase, ZipError};
use crate::spec::consts::{CDH_SIGNATURE, EOCDR_SIGNATURE, NON_ZIP64_MAX_NUM_FILES, NON_ZIP64_MAX_SIZE};
use crate::spec::header::{CentralDirectoryRecord, EndOfCentralDirectoryHeader};

use entry_whole::EntryWholeWriter;
use io::offset::AsyncOffsetWriter;

use futures_lite::io::{AsyncWrite, AsyncWriteExt};

pub(crate) struct CentralDirectoryEntry {
    pub header: CentralDirectoryRecord,
    pub entry: ZipEntry,
}

/// A ZIP file writer which acts over AsyncWrite implementers.
///
/// Entries are written sequentially with their sizes known up front, so no data descriptors are ever emitted. ZIP64
/// structures are never written; exceeding a classic ZIP limit fails with [`ZipError::Zip64Needed`].
///
/// # Note
/// - [`ZipFileWriter::close()`] must be called before the writer goes out of scope, else no central directory is
///   written and the output isn't a valid ZIP file.
pub struct ZipFileWriter<W> {
    pub(crate) writer: AsyncOffsetWriter<W>,
    pub(crate) cd_entries: Vec<CentralDirectoryEntry>,
    comment_opt: Option<String>,
}

impl<W: AsyncWrite + Unpin> ZipFileWriter<W> {
    /// Construct a new ZIP file writer from a mutable reference to a writer.
    pub fn new(writer: W) -> Self {
        Self { writer: AsyncOffsetWriter::new(writer), cd_entries: Vec::new(), comment_opt: None }
    }

    /// Write a new ZIP entry of known size and data, compressing it with the entry's method.
    pub async fn write_entry_whole<E: Into<ZipEntry>>(&mut self, entry: E, data: &[u8]) -> Result<()> {
        EntryWholeWriter::from_raw(self, entry.into(), data).write().await
    }

    /// Write an entry whose data is already compressed with the entry's method.
    ///
    /// The entry's CRC32 and uncompressed size are written unchanged, so they must describe the data as it would
    /// decompress. This is how unmodified entries are carried from one ZIP file into another.
    pub async fn write_entry_raw(&mut self, entry: ZipEntry, compressed: &[u8]) -> Result<()> {
        entry_whole::write_record(self, entry, compressed).await
    }

    /// Set the ZIP file comment.
    pub fn comment(&mut self, comment: String) {
        self.comment_opt = Some(comment);
    }

    /// Returns the number of entries written so far.
    pub fn num_entries(&self) -> usize {
        self.cd_entries.len()
    }

    /// Consumes this ZIP writer and completes all closing tasks.
    ///
    /// This includes:
    /// - Writing all central directory headers.
    /// - Writing the end of central directory header.
    /// - Closing the inner writer.
    ///
    /// Failure to call this function before going out of scope would result in a corrupted ZIP file.
    pub async fn close(mut self) -> Result<W> {
        let num_entries: u16 =
            self.cd_entries.len().try_into().map_err(|_| ZipError::Zip64Needed(Zip64ErrorCase::TooManyFiles))?;
        if num_entries == NON_ZIP64_MAX_NUM_FILES {
            return Err(ZipError::Zip64Needed(Zip64ErrorCase::TooManyFiles));
        }

        let cd_offset = self.writer.offset();

        for entry in &self.cd_entries {
            self.writer.write_all(&CDH_SIGNATURE.to_le_bytes()).await?;
            self.writer.write_all(&entry.header.as_slice()).await?;
            self.writer.write_all(entry.entry.filename().as_bytes()).await?;
            self.writer.write_all(entry.entry.comment().as_bytes()).await?;
        }

        let cd_size = self.writer.offset() - cd_offset;
        if cd_offset >= NON_ZIP64_MAX_SIZE as u64 || cd_size >= NON_ZIP64_MAX_SIZE as u64 {
            return Err(ZipError::Zip64Needed(Zip64ErrorCase::LargeFile));
        }

        let comment = self.comment_opt.take().unwrap_or_default();
        let header = EndOfCentralDirectoryHeader {
            disk_num: 0,
            start_cent_dir_disk: 0,
            num_of_entries_disk: num_entries,
            num_of_entries: num_entries,
            size_cent_dir: cd_size as u32,
            cent_dir_offset: cd_offset as u32,
            file_comm_length: comment.len().try_into().map_err(|_| ZipError::CommentTooLarge)?,
        };

        self.writer.write_all(&EOCDR_SIGNATURE.to_le_bytes()).await?;
        self.writer.write_all(&header.as_slice()).await?;
        self.writer.write_all(comment.as_bytes()).await?;

        self.writer.close().await?;

        Ok(self.writer.into_inner())
    }
}
