// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

pub mod builder;

use futures_lite::io::{AsyncRead, AsyncSeek, AsyncSeekExt, SeekFrom};

use crate::date::ZipDateTime;
use crate::entry::builder::ZipEntryBuilder;
use crate::error::Result;
use crate::spec::consts::{LFH_LENGTH, LFH_SIGNATURE, SIGNATURE_LENGTH};
use crate::spec::header::{GeneralPurposeFlag, LocalFileHeader};
use crate::spec::Compression;

/// An immutable store of data about a ZIP entry.
///
/// This type cannot be directly constructed so instead, the [`ZipEntryBuilder`] must be used. Internally this builder
/// stores a [`ZipEntry`] so conversions between these two types via the [`From`] implementations will be
/// non-allocating.
#[derive(Clone, Debug)]
pub struct ZipEntry {
    pub(crate) filename: String,
    pub(crate) compression: u16,
    pub(crate) crc32: u32,
    pub(crate) uncompressed_size: u64,
    pub(crate) compressed_size: u64,
    pub(crate) flags: GeneralPurposeFlag,
    pub(crate) last_modification_date: ZipDateTime,
    pub(crate) internal_file_attribute: u16,
    pub(crate) external_file_attribute: u32,
    pub(crate) comment: String,
}

impl From<ZipEntryBuilder> for ZipEntry {
    fn from(builder: ZipEntryBuilder) -> Self {
        builder.0
    }
}

impl ZipEntry {
    pub(crate) fn new(filename: String, compression: Compression) -> Self {
        ZipEntry {
            filename,
            compression: compression.into(),
            crc32: 0,
            uncompressed_size: 0,
            compressed_size: 0,
            flags: GeneralPurposeFlag::default(),
            last_modification_date: ZipDateTime::now(),
            internal_file_attribute: 0,
            external_file_attribute: 0,
            comment: String::new(),
        }
    }

    /// Returns the entry's filename.
    ///
    /// ## Note
    /// This will return the raw filename stored during ZIP creation. If calling this method on entries retrieved from
    /// untrusted ZIP files, the filename should be sanitised before being used as a path to prevent [directory
    /// traversal attacks](https://en.wikipedia.org/wiki/Directory_traversal_attack).
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the entry's compression method, if this crate was built with support for it.
    pub fn compression(&self) -> Result<Compression> {
        Compression::try_from(self.compression)
    }

    /// Returns the entry's raw compression method identifier.
    pub fn compression_method(&self) -> u16 {
        self.compression
    }

    /// Returns the entry's CRC32 value.
    pub fn crc32(&self) -> u32 {
        self.crc32
    }

    /// Returns the entry's uncompressed size.
    pub fn uncompressed_size(&self) -> u64 {
        self.uncompressed_size
    }

    /// Returns the entry's compressed size.
    pub fn compressed_size(&self) -> u64 {
        self.compressed_size
    }

    /// Returns whether or not the entry's data is encrypted.
    pub fn encrypted(&self) -> bool {
        self.flags.encrypted
    }

    /// Returns the entry's last modification time & date.
    pub fn last_modification_date(&self) -> &ZipDateTime {
        &self.last_modification_date
    }

    /// Returns the entry's internal file attribute.
    pub fn internal_file_attribute(&self) -> u16 {
        self.internal_file_attribute
    }

    /// Returns the entry's external file attribute
    pub fn external_file_attribute(&self) -> u32 {
        self.external_file_attribute
    }

    /// Returns the entry's file comment.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Returns whether or not the entry represents a directory.
    pub fn dir(&self) -> bool {
        self.filename.ends_with('/')
    }
}

/// An entry returned by the [`ZipFileReader`] when reading a ZIP file.
///
/// [`ZipFileReader`]: crate::base::read::seek::ZipFileReader
#[derive(Clone, Debug)]
pub struct StoredZipEntry {
    pub(crate) entry: ZipEntry,
    pub(crate) file_offset: u64,
}

impl StoredZipEntry {
    /// Returns the offset in bytes to where the header of the entry starts.
    pub fn header_offset(&self) -> u64 {
        self.file_offset
    }

    /// Seeks the reader to the first byte of this entry's data, past its local file header.
    ///
    /// The local header's filename and extra field lengths may differ from the central directory's, so they're read
    /// rather than assumed.
    pub(crate) async fn seek_to_data_offset<R: AsyncRead + AsyncSeek + Unpin>(&self, mut reader: R) -> Result<()> {
        reader.seek(SeekFrom::Start(self.file_offset)).await?;
        crate::utils::assert_signature(&mut reader, LFH_SIGNATURE).await?;

        let header = LocalFileHeader::from_reader(&mut reader).await?;

        let skip = header.file_name_length as u64 + header.extra_field_length as u64;
        let data_offset = self.file_offset + (SIGNATURE_LENGTH + LFH_LENGTH) as u64 + skip;
        reader.seek(SeekFrom::Start(data_offset)).await?;

        Ok(())
    }
}

impl std::ops::Deref for StoredZipEntry {
    type Target = ZipEntry;

    fn deref(&self) -> &Self::Target {
        &self.entry
    }
}
