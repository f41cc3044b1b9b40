// Copyright (c) 2022-2023 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! A module which supports reading ZIP files.

pub mod seek;

pub(crate) mod io;

// Re-exported as part of the public API.
pub use crate::base::read::io::entry::ZipEntryReader;

use crate::date::ZipDateTime;
use crate::entry::{StoredZipEntry, ZipEntry};
use crate::error::{Result, ZipError};
use crate::file::ZipFile;
use crate::spec::consts::{CDH_SIGNATURE, NON_ZIP64_MAX_SIZE, SIGNATURE_LENGTH, ZIP64_EOCDL_LENGTH, ZIP64_EOCDL_SIGNATURE};
use crate::spec::header::{CentralDirectoryRecord, EndOfCentralDirectoryHeader};

use futures_lite::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt, SeekFrom};

pub(crate) async fn file<R>(mut reader: R) -> Result<ZipFile>
where
    R: AsyncRead + AsyncSeek + Unpin,
{
    // First find and parse the EOCDR.
    let eocdr_offset = crate::base::read::io::locator::eocdr(&mut reader).await?;

    reader.seek(SeekFrom::Start(eocdr_offset)).await?;
    let eocdr = EndOfCentralDirectoryHeader::from_reader(&mut reader).await?;

    let comment = crate::utils::read_bytes(&mut reader, eocdr.file_comm_length.into()).await?;
    let comment = String::from_utf8_lossy(&comment).into_owned();

    // The Zip64 EOCDL sits immediately before the EOCDR (whose offset excludes its own signature).
    if let Some(offset) = eocdr_offset.checked_sub(ZIP64_EOCDL_LENGTH + 2 * SIGNATURE_LENGTH as u64) {
        reader.seek(SeekFrom::Start(offset)).await?;
        let mut buffer = [0; SIGNATURE_LENGTH];
        reader.read_exact(&mut buffer).await?;

        if u32::from_le_bytes(buffer) == ZIP64_EOCDL_SIGNATURE {
            return Err(ZipError::FeatureNotSupported("ZIP64"));
        }
    }

    // Outdated feature so unlikely to ever make it into this crate.
    if eocdr.disk_num != eocdr.start_cent_dir_disk || eocdr.num_of_entries != eocdr.num_of_entries_disk {
        return Err(ZipError::FeatureNotSupported("Spanned/split files"));
    }

    // Find and parse the central directory.
    reader.seek(SeekFrom::Start(eocdr.cent_dir_offset.into())).await?;
    let entries = crate::base::read::cd(&mut reader, eocdr.num_of_entries).await?;

    Ok(ZipFile { entries, comment })
}

pub(crate) async fn cd<R>(mut reader: R, num_of_entries: u16) -> Result<Vec<StoredZipEntry>>
where
    R: AsyncRead + Unpin,
{
    let mut entries = Vec::with_capacity(num_of_entries.into());

    for _ in 0..num_of_entries {
        let entry = cd_record(&mut reader).await?;
        entries.push(entry);
    }

    Ok(entries)
}

pub(crate) async fn cd_record<R>(mut reader: R) -> Result<StoredZipEntry>
where
    R: AsyncRead + Unpin,
{
    crate::utils::assert_signature(&mut reader, CDH_SIGNATURE).await?;

    let header = CentralDirectoryRecord::from_reader(&mut reader).await?;
    let filename = crate::utils::read_string(&mut reader, header.file_name_length.into()).await?;
    // Extra fields only ever carry ZIP64 or platform metadata, neither of which this crate consumes.
    crate::utils::read_bytes(&mut reader, header.extra_field_length.into()).await?;
    let comment = crate::utils::read_bytes(&mut reader, header.file_comment_length.into()).await?;

    if header.compressed_size == NON_ZIP64_MAX_SIZE
        || header.uncompressed_size == NON_ZIP64_MAX_SIZE
        || header.lh_offset == NON_ZIP64_MAX_SIZE
    {
        return Err(ZipError::FeatureNotSupported("ZIP64"));
    }

    let entry = ZipEntry {
        filename,
        compression: header.compression,
        crc32: header.crc,
        uncompressed_size: header.uncompressed_size.into(),
        compressed_size: header.compressed_size.into(),
        flags: header.flags,
        last_modification_date: ZipDateTime { date: header.mod_date, time: header.mod_time },
        internal_file_attribute: header.inter_attr,
        external_file_attribute: header.exter_attr,
        comment: String::from_utf8_lossy(&comment).into_owned(),
    };

    Ok(StoredZipEntry { entry, file_offset: header.lh_offset.into() })
}
