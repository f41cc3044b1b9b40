// Copyright (c) 2021-2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! # xlzip
//!
//! The ZIP storage engine underneath a spreadsheet file library: open a package, read and edit its parts in memory,
//! and save it back without ever leaving a half-written file behind.
//!
//! ## Features
//! - Lazy entry loading with CRC32 and size verification on extraction.
//! - Implicit directories reconstructed from flat entry names.
//! - Crash-safe saving: a complete archive is written beside the target, verified, then renamed into place.
//! - Unmodified entries are carried over as their stored compressed bytes.
//! - A runtime-agnostic ZIP codec layer built on `futures-lite`, usable on its own.
//! - Support for Stored, Deflate, Bzip2, LZMA, zstd, and xz compression methods behind Cargo features.
//!
//! ## Example
//! ```no_run
//! # use xlzip::{ArchiveHandle, error::Result};
//! #
//! # fn run() -> Result<()> {
//! let mut archive = ArchiveHandle::create_new("./book.xlsx")?;
//!
//! archive.add_entry("[Content_Types].xml", b"<Types/>".to_vec())?;
//! archive.add_entry("xl/workbook.xml", b"<workbook/>".to_vec())?;
//! archive.save(None)?;
//!
//! assert_eq!(archive.entry_names(true, false)?, ["xl/"]);
//! #   Ok(())
//! # }
//! ```

pub mod archive;
pub mod base;
pub mod error;

pub(crate) mod date;
pub(crate) mod entry;
pub(crate) mod file;
pub(crate) mod spec;
pub(crate) mod utils;

#[cfg(test)]
pub(crate) mod tests;

pub use crate::archive::{ArchiveEntry, ArchiveHandle, ArchiveOptions, EntryMetadata, TempNameGenerator};
pub use crate::date::{builder::ZipDateTimeBuilder, ZipDateTime};
pub use crate::entry::{builder::ZipEntryBuilder, StoredZipEntry, ZipEntry};
pub use crate::error::{ErrorKind, Result, ZipError};
pub use crate::file::ZipFile;
pub use crate::spec::compression::Compression;
