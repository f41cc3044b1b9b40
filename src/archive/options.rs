// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::archive::temp::{TempNameGenerator, DEFAULT_NAME_LENGTH};
use crate::spec::Compression;

/// Runtime configuration for an [`ArchiveHandle`].
///
/// ```
/// # use xlzip::{ArchiveHandle, ArchiveOptions, Compression};
/// #
/// let options = ArchiveOptions::default().compression(Compression::Stored).temp_name_seed(7);
/// let handle = ArchiveHandle::with_options(options);
/// ```
///
/// [`ArchiveHandle`]: crate::ArchiveHandle
#[derive(Debug, Clone)]
pub struct ArchiveOptions {
    compression: Compression,
    temp_name_length: usize,
    temp_name_seed: Option<u64>,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self { compression: Compression::default(), temp_name_length: DEFAULT_NAME_LENGTH, temp_name_seed: None }
    }
}

impl ArchiveOptions {
    /// Sets the compression method used for entries written from their data when saving.
    ///
    /// Unmodified entries are always copied with their existing method.
    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Sets the number of random characters in scratch file names.
    pub fn temp_name_length(mut self, length: usize) -> Self {
        self.temp_name_length = length;
        self
    }

    /// Seeds the scratch file name generator, making its names reproducible.
    pub fn temp_name_seed(mut self, seed: u64) -> Self {
        self.temp_name_seed = Some(seed);
        self
    }

    pub fn get_compression(&self) -> Compression {
        self.compression
    }

    pub fn get_temp_name_length(&self) -> usize {
        self.temp_name_length
    }

    pub(crate) fn temp_names(&self) -> TempNameGenerator {
        match self.temp_name_seed {
            Some(seed) => TempNameGenerator::with_seed(self.temp_name_length, seed),
            None => TempNameGenerator::new(self.temp_name_length),
        }
    }
}
