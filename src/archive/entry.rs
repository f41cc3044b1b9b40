// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::archive::path;
use crate::archive::scan::ArchiveReader;
use crate::base::write::entry_whole::compute_crc;
use crate::date::ZipDateTime;
use crate::entry::ZipEntry;
use crate::error::{Result, ZipError};
use crate::spec::Compression;

/// A single member of an open archive.
///
/// An entry read from the archive on disk starts without its data; the data is extracted and cached the first time
/// it's asked for. Entries created or changed since the archive was opened are marked as modified and always hold
/// their data.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    name: String,
    original_index: Option<usize>,
    compressed_size: u64,
    uncompressed_size: u64,
    crc32: u32,
    compression: u16,
    encrypted: bool,
    supported: bool,
    last_modification_date: ZipDateTime,
    comment: String,
    modified: bool,
    payload: Option<Vec<u8>>,
}

/// An owned snapshot of an entry's metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMetadata {
    /// The entry's position in the archive it was read from, if any.
    pub index: Option<usize>,
    pub name: String,
    pub filename: String,
    pub compressed_size: u64,
    pub uncompressed_size: u64,
    pub crc32: u32,
    pub is_directory: bool,
    pub is_encrypted: bool,
    pub is_supported: bool,
    pub is_modified: bool,
    pub last_modification_date: ZipDateTime,
    pub comment: String,
}

impl ArchiveEntry {
    /// Builds an unloaded entry from a central directory record.
    pub(crate) fn from_stored(index: usize, entry: &ZipEntry) -> Self {
        let directory = entry.dir();
        let encrypted = entry.encrypted();

        Self {
            name: entry.filename().to_owned(),
            original_index: Some(index),
            compressed_size: if directory { 0 } else { entry.compressed_size() },
            uncompressed_size: if directory { 0 } else { entry.uncompressed_size() },
            crc32: entry.crc32(),
            compression: entry.compression_method(),
            encrypted,
            supported: !encrypted && entry.compression().is_ok(),
            last_modification_date: *entry.last_modification_date(),
            comment: entry.comment().to_owned(),
            modified: false,
            payload: None,
        }
    }

    /// Builds a directory entry implied by the names below it.
    pub(crate) fn synthetic_directory(name: &str) -> Self {
        let mut entry = Self::new(name.to_owned(), Vec::new());
        entry.modified = false;
        entry
    }

    /// Builds a new entry which isn't backed by the archive on disk.
    pub(crate) fn new(name: String, data: Vec<u8>) -> Self {
        Self {
            name,
            original_index: None,
            compressed_size: 0,
            uncompressed_size: data.len() as u64,
            crc32: compute_crc(&data),
            compression: Compression::default().into(),
            encrypted: false,
            supported: true,
            last_modification_date: ZipDateTime::now(),
            comment: String::new(),
            modified: true,
            payload: Some(data),
        }
    }

    /// Returns the entry's data, extracting it from `source` on first access.
    ///
    /// Only unmodified entries with a position in `source` are extracted; the result is cached so later calls do no
    /// IO. On failure nothing is cached.
    pub(crate) fn load(&mut self, source: &mut ArchiveReader) -> Result<&[u8]> {
        if self.is_directory() {
            return Ok(&[]);
        }

        let payload = match self.payload.take() {
            Some(payload) => payload,
            None => match self.original_index {
                Some(index) if !self.modified => {
                    if !self.supported {
                        return Err(ZipError::EntryNotSupported { name: self.name.clone() });
                    }
                    source.extract(index)?
                }
                _ => Vec::new(),
            },
        };

        Ok(self.payload.insert(payload).as_slice())
    }

    /// Replaces the entry's data and marks it as modified.
    ///
    /// The uncompressed size and CRC32 follow the new data immediately; the compressed size is only known again once
    /// the archive has been saved.
    pub fn set_data(&mut self, data: Vec<u8>) -> Result<()> {
        if self.is_directory() && !data.is_empty() {
            return Err(ZipError::DirectoryWithData(self.name.clone()));
        }

        self.uncompressed_size = data.len() as u64;
        self.crc32 = compute_crc(&data);
        self.payload = Some(data);
        self.modified = true;
        Ok(())
    }

    /// Returns the entry's data if it's already held in memory.
    pub fn cached_data(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    /// Returns the entry's full name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the last segment of the entry's name.
    pub fn filename(&self) -> &str {
        path::file_name(&self.name)
    }

    /// Returns the entry's position in the archive it was read from, or `None` for entries added since.
    pub fn index(&self) -> Option<usize> {
        self.original_index
    }

    pub fn compressed_size(&self) -> u64 {
        self.compressed_size
    }

    pub fn uncompressed_size(&self) -> u64 {
        self.uncompressed_size
    }

    pub fn crc32(&self) -> u32 {
        self.crc32
    }

    /// Returns the raw compression method identifier recorded for this entry.
    pub fn compression_method(&self) -> u16 {
        self.compression
    }

    pub fn is_directory(&self) -> bool {
        path::is_dir_name(&self.name)
    }

    pub fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    /// Returns whether this crate is able to extract the entry's data.
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn last_modification_date(&self) -> &ZipDateTime {
        &self.last_modification_date
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Returns an owned snapshot of this entry's metadata.
    pub fn metadata(&self) -> EntryMetadata {
        EntryMetadata {
            index: self.original_index,
            name: self.name.clone(),
            filename: self.filename().to_owned(),
            compressed_size: self.compressed_size,
            uncompressed_size: self.uncompressed_size,
            crc32: self.crc32,
            is_directory: self.is_directory(),
            is_encrypted: self.encrypted,
            is_supported: self.supported,
            is_modified: self.modified,
            last_modification_date: self.last_modification_date,
            comment: self.comment.clone(),
        }
    }
}
