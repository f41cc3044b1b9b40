// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! Random, collision-resistant names for scratch files placed next to a target path.

use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SUFFIX: &str = ".tmp";

/// The number of random characters in a name unless configured otherwise.
pub const DEFAULT_NAME_LENGTH: usize = 20;

/// How many fresh names are tried before giving up on creating a scratch file.
const MAX_ATTEMPTS: usize = 16;

/// Generates scratch file names of the form `<random>.tmp` in the directory of a target path.
///
/// Each generator owns its random state so two generators never share a sequence unless they're seeded identically.
#[derive(Debug, Clone)]
pub struct TempNameGenerator {
    rng: StdRng,
    length: usize,
}

impl Default for TempNameGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_NAME_LENGTH)
    }
}

impl TempNameGenerator {
    /// Constructs a generator seeded from the operating system's entropy source.
    pub fn new(length: usize) -> Self {
        Self { rng: StdRng::from_entropy(), length: length.max(1) }
    }

    /// Constructs a generator with a fixed seed, producing a reproducible sequence of names.
    pub fn with_seed(length: usize, seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed), length: length.max(1) }
    }

    /// Returns a fresh bare file name.
    pub fn name(&mut self) -> String {
        let mut name: String =
            (0..self.length).map(|_| ALPHABET[self.rng.gen_range(0..ALPHABET.len())] as char).collect();
        name.push_str(SUFFIX);
        name
    }

    /// Returns a fresh path in the same directory as `target`.
    ///
    /// A target without a parent (eg. a bare file name) yields a path relative to the working directory.
    pub fn generate(&mut self, target: &Path) -> PathBuf {
        let directory = target.parent().unwrap_or(Path::new(""));
        directory.join(self.name())
    }

    /// Creates a new, empty scratch file next to `target`, retrying with another name if one is already taken.
    pub(crate) fn create(&mut self, target: &Path) -> std::io::Result<(PathBuf, File)> {
        let mut last_error = None;

        for _ in 0..MAX_ATTEMPTS {
            let path = self.generate(target);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                    tracing::trace!(path = %path.display(), "scratch name already taken");
                    last_error = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        Err(last_error.unwrap_or_else(|| ErrorKind::AlreadyExists.into()))
    }
}
