// Copyright (c) 2021 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::base::write::{CentralDirectoryEntry, ZipFileWriter};
use crate::entry::ZipEntry;
use crate::error::{Result, Zip64ErrorCase, ZipError};
use crate::spec::consts::{LFH_SIGNATURE, NON_ZIP64_MAX_SIZE};
use crate::spec::header::{CentralDirectoryRecord, GeneralPurposeFlag, LocalFileHeader};
use crate::spec::Compression;

#[cfg(any(feature = "deflate", feature = "bzip2", feature = "zstd", feature = "lzma", feature = "xz"))]
use async_compression::{futures::write, Level};
use crc32fast::Hasher;
use futures_lite::io::{AsyncWrite, AsyncWriteExt};

/// Writes a single entry whose data is held entirely in memory.
pub(crate) struct EntryWholeWriter<'b, 'c, W: AsyncWrite + Unpin> {
    writer: &'b mut ZipFileWriter<W>,
    entry: ZipEntry,
    data: &'c [u8],
}

impl<'b, 'c, W: AsyncWrite + Unpin> EntryWholeWriter<'b, 'c, W> {
    pub(crate) fn from_raw(writer: &'b mut ZipFileWriter<W>, entry: ZipEntry, data: &'c [u8]) -> Self {
        Self { writer, entry, data }
    }

    /// Compresses the data with the entry's method, then writes the local header and data.
    pub(crate) async fn write(mut self) -> Result<()> {
        let compression = self.entry.compression()?;
        let compressed = compress(compression, self.data).await?;

        self.entry.crc32 = compute_crc(self.data);
        self.entry.uncompressed_size = self.data.len() as u64;
        self.entry.compressed_size = compressed.len() as u64;

        write_record(self.writer, self.entry, &compressed).await
    }
}

/// Writes a local file header followed by already-compressed data, and queues the matching central directory record.
///
/// The entry's CRC32 and sizes are written as-is, so they must describe the data exactly.
pub(crate) async fn write_record<W: AsyncWrite + Unpin>(
    writer: &mut ZipFileWriter<W>,
    entry: ZipEntry,
    compressed: &[u8],
) -> Result<()> {
    if entry.uncompressed_size >= NON_ZIP64_MAX_SIZE as u64 || compressed.len() as u64 >= NON_ZIP64_MAX_SIZE as u64 {
        return Err(ZipError::Zip64Needed(Zip64ErrorCase::LargeFile));
    }

    let lh_offset = writer.writer.offset();
    if lh_offset >= NON_ZIP64_MAX_SIZE as u64 {
        return Err(ZipError::Zip64Needed(Zip64ErrorCase::LargeFile));
    }

    let lf_header = LocalFileHeader {
        version: crate::spec::version::as_needed_to_extract(&entry),
        flags: GeneralPurposeFlag { encrypted: entry.encrypted(), data_descriptor: false, filename_unicode: true },
        compression: entry.compression_method(),
        mod_time: entry.last_modification_date().time,
        mod_date: entry.last_modification_date().date,
        crc: entry.crc32(),
        compressed_size: compressed.len() as u32,
        uncompressed_size: entry.uncompressed_size() as u32,
        file_name_length: entry.filename().len().try_into().map_err(|_| ZipError::FileNameTooLarge)?,
        extra_field_length: 0,
    };

    let header = CentralDirectoryRecord {
        v_made_by: crate::spec::version::as_made_by(),
        v_needed: lf_header.version,
        flags: lf_header.flags,
        compression: lf_header.compression,
        mod_time: lf_header.mod_time,
        mod_date: lf_header.mod_date,
        crc: lf_header.crc,
        compressed_size: lf_header.compressed_size,
        uncompressed_size: lf_header.uncompressed_size,
        file_name_length: lf_header.file_name_length,
        extra_field_length: 0,
        file_comment_length: entry.comment().len().try_into().map_err(|_| ZipError::CommentTooLarge)?,
        disk_start: 0,
        inter_attr: entry.internal_file_attribute(),
        exter_attr: entry.external_file_attribute(),
        lh_offset: lh_offset as u32,
    };

    writer.writer.write_all(&LFH_SIGNATURE.to_le_bytes()).await?;
    writer.writer.write_all(&lf_header.as_slice()).await?;
    writer.writer.write_all(entry.filename().as_bytes()).await?;
    writer.writer.write_all(compressed).await?;

    writer.cd_entries.push(CentralDirectoryEntry { header, entry });

    Ok(())
}

#[cfg(any(feature = "deflate", feature = "bzip2", feature = "zstd", feature = "lzma", feature = "xz"))]
macro_rules! encode {
    ($encoder:ty, $data:expr) => {{
        let mut writer = <$encoder>::with_quality(Vec::new(), Level::Default);
        writer.write_all($data).await?;
        writer.close().await?;
        Ok(writer.into_inner())
    }};
}

async fn compress(compression: Compression, data: &[u8]) -> Result<Vec<u8>> {
    match compression {
        Compression::Stored => Ok(data.to_vec()),
        #[cfg(feature = "deflate")]
        Compression::Deflate => encode!(write::DeflateEncoder<Vec<u8>>, data),
        #[cfg(feature = "bzip2")]
        Compression::Bz => encode!(write::BzEncoder<Vec<u8>>, data),
        #[cfg(feature = "lzma")]
        Compression::Lzma => encode!(write::LzmaEncoder<Vec<u8>>, data),
        #[cfg(feature = "zstd")]
        Compression::Zstd => encode!(write::ZstdEncoder<Vec<u8>>, data),
        #[cfg(feature = "xz")]
        Compression::Xz => encode!(write::XzEncoder<Vec<u8>>, data),
    }
}

pub(crate) fn compute_crc(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}
