// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! The archive engine: a synchronous, editable view over a ZIP file on disk.
//!
//! Opening an archive scans its central directory into a catalog of entries without reading any entry data. Data is
//! extracted lazily and cached per entry. Saving writes a complete new archive beside the target, verifies it, and
//! renames it into place.

pub(crate) mod catalog;
pub(crate) mod entry;
pub(crate) mod handle;
pub(crate) mod options;
pub(crate) mod path;
pub(crate) mod persist;
pub(crate) mod scan;
pub mod temp;

pub use entry::{ArchiveEntry, EntryMetadata};
pub use handle::ArchiveHandle;
pub use options::ArchiveOptions;
pub use temp::TempNameGenerator;
