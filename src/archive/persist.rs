// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! Writing a catalog out as a new archive file and moving it into place.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use futures_lite::future::block_on;
use futures_lite::io::AssertAsync;

use crate::archive::catalog::ArchiveCatalog;
use crate::archive::scan::ArchiveReader;
use crate::base::write::entry_whole::compute_crc;
use crate::base::write::ZipFileWriter;
use crate::entry::builder::ZipEntryBuilder;
use crate::error::{Result, ZipError};
use crate::spec::Compression;

/// What a rebuilt archive is expected to hold, record by record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExpectedRecord {
    name: String,
    size: u64,
    crc32: u32,
}

/// Writes every file entry of the catalog, in order, into `file`.
///
/// Unmodified entries backed by `source` are copied as their stored compressed bytes. All other file entries are
/// compressed afresh with `compression`. Directories are never written.
pub(crate) fn rebuild(
    catalog: &mut ArchiveCatalog,
    source: &mut ArchiveReader,
    file: File,
    compression: Compression,
) -> Result<Vec<ExpectedRecord>> {
    let mut writer = ZipFileWriter::new(AssertAsync::new(BufWriter::new(file)));
    let mut expected = Vec::with_capacity(catalog.len());

    for entry in catalog.iter_mut() {
        if entry.is_directory() {
            tracing::trace!(entry = entry.name(), "skipping directory");
            continue;
        }

        match entry.index() {
            Some(index) if !entry.is_modified() => {
                let record = source.entry(index)?.clone();
                let raw = source.raw(index)?;

                tracing::trace!(entry = entry.name(), index, "copying stored data");
                expected.push(ExpectedRecord {
                    name: record.filename().to_owned(),
                    size: record.uncompressed_size(),
                    crc32: record.crc32(),
                });
                block_on(writer.write_entry_raw(record, &raw))?;
            }
            _ => {
                let name = entry.name().to_owned();
                let comment = entry.comment().to_owned();
                let data = entry.load(source)?;

                tracing::trace!(entry = %name, size = data.len(), "compressing data");
                expected.push(ExpectedRecord { name: name.clone(), size: data.len() as u64, crc32: compute_crc(data) });

                let builder = ZipEntryBuilder::new(name, compression).comment(comment);
                block_on(writer.write_entry_whole(builder, data))?;
            }
        }
    }

    let inner = block_on(writer.close())?.into_inner();
    let file = inner.into_inner().map_err(|err| err.into_error())?;
    file.sync_all()?;

    Ok(expected)
}

/// Re-reads the archive at `path` and checks it holds exactly the expected records with intact data.
pub(crate) fn validate(path: &Path, expected: &[ExpectedRecord]) -> Result<()> {
    let mut reader = ArchiveReader::open(path)?;
    let records = reader.file().entries().len();

    if records != expected.len() {
        return Err(ZipError::ValidationFailed(format!("expected {} records but found {}", expected.len(), records)));
    }

    for (index, expected) in expected.iter().enumerate() {
        let record = reader.entry(index)?;

        if record.filename() != expected.name {
            return Err(ZipError::ValidationFailed(format!(
                "record {index} is named '{}' rather than '{}'",
                record.filename(),
                expected.name
            )));
        }
        if record.uncompressed_size() != expected.size || record.crc32() != expected.crc32 {
            return Err(ZipError::ValidationFailed(format!("record '{}' has unexpected size or CRC32", expected.name)));
        }
        if record.encrypted() || record.compression().is_err() {
            continue;
        }

        reader.extract(index).map_err(|err| ZipError::ValidationFailed(format!("'{}': {err}", expected.name)))?;
    }

    Ok(())
}

/// Moves the file at `temp` over `target`.
///
/// On Windows a rename can't replace an existing file, so the target is removed first.
pub(crate) fn swap(temp: &Path, target: &Path) -> std::io::Result<()> {
    #[cfg(windows)]
    if target.exists() {
        std::fs::remove_file(target)?;
    }

    std::fs::rename(temp, target)
}

/// Writes an archive with no entries to `file`.
pub(crate) fn write_empty(file: File) -> Result<()> {
    let writer = ZipFileWriter::new(AssertAsync::new(BufWriter::new(file)));

    let inner = block_on(writer.close())?.into_inner();
    let file = inner.into_inner().map_err(|err| err.into_error())?;
    file.sync_all()?;

    Ok(())
}
