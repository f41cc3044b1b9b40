// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! The ordered, in-memory set of an archive's entries.
//!
//! The catalog keeps three properties at all times:
//! - no two entries share a name;
//! - every ancestor directory of a file entry is itself an entry;
//! - entries keep the order they were read or added in.

use std::collections::{HashMap, HashSet};

use crate::archive::entry::{ArchiveEntry, EntryMetadata};
use crate::archive::path;
use crate::error::{Result, ZipError};

#[derive(Debug, Clone, Default)]
pub(crate) struct ArchiveCatalog {
    entries: Vec<ArchiveEntry>,
}

impl ArchiveCatalog {
    /// Builds a catalog from entries in the physical order of their records.
    ///
    /// Where several records share a name, the one read last wins but takes the place of the first. Ancestor
    /// directories missing from the records are then appended.
    pub(crate) fn from_scanned(scanned: impl IntoIterator<Item = ArchiveEntry>) -> Self {
        let mut entries: Vec<ArchiveEntry> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for entry in scanned {
            match positions.get(entry.name()) {
                Some(&position) => {
                    tracing::warn!(
                        entry = entry.name(),
                        dropped = ?entries[position].index(),
                        kept = ?entry.index(),
                        "duplicate entry name; keeping the later record"
                    );
                    entries[position] = entry;
                }
                None => {
                    positions.insert(entry.name().to_owned(), entries.len());
                    entries.push(entry);
                }
            }
        }

        let mut catalog = Self { entries };
        catalog.synthesize_all();
        catalog
    }

    fn synthesize_all(&mut self) {
        let mut known: HashSet<String> = self.entries.iter().map(|entry| entry.name().to_owned()).collect();
        let mut synthesized = Vec::new();

        for entry in self.entries.iter().filter(|entry| !entry.is_directory()) {
            for ancestor in path::ancestors(entry.name()) {
                if known.insert(ancestor.to_owned()) {
                    tracing::trace!(entry = ancestor, "synthesizing implied directory");
                    synthesized.push(ArchiveEntry::synthetic_directory(ancestor));
                }
            }
        }

        self.entries.extend(synthesized);
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name() == name)
    }

    pub(crate) fn get(&self, name: &str) -> Option<&ArchiveEntry> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut ArchiveEntry> {
        self.entries.iter_mut().find(|entry| entry.name() == name)
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = &ArchiveEntry> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut ArchiveEntry> {
        self.entries.iter_mut()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Adds an entry or replaces the data of an existing one, returning it.
    ///
    /// Missing ancestor directories are created first, shortest first. An existing directory is returned untouched.
    pub(crate) fn add(&mut self, name: &str, data: Vec<u8>) -> Result<&mut ArchiveEntry> {
        if name.is_empty() {
            return Err(ZipError::InvalidEntryName(name.to_owned()));
        }
        if path::is_dir_name(name) && !data.is_empty() {
            return Err(ZipError::DirectoryWithData(name.to_owned()));
        }

        for ancestor in path::ancestors(name) {
            if !self.contains(ancestor) {
                self.entries.push(ArchiveEntry::synthetic_directory(ancestor));
            }
        }

        let position = match self.position(name) {
            Some(position) => {
                if !path::is_dir_name(name) {
                    self.entries[position].set_data(data)?;
                }
                position
            }
            None => {
                self.entries.push(ArchiveEntry::new(name.to_owned(), data));
                self.entries.len() - 1
            }
        };

        Ok(&mut self.entries[position])
    }

    /// Removes a file entry, or a directory entry together with everything below it. Returns how many were removed.
    pub(crate) fn remove(&mut self, name: &str) -> usize {
        let before = self.entries.len();

        if path::is_dir_name(name) {
            self.entries.retain(|entry| !entry.name().starts_with(name));
        } else {
            self.entries.retain(|entry| entry.name() != name);
        }

        before - self.entries.len()
    }

    pub(crate) fn names(&self, include_dirs: bool, include_files: bool) -> Vec<String> {
        self.filtered(include_dirs, include_files).map(|entry| entry.name().to_owned()).collect()
    }

    /// Names exactly one level below `dir`. An empty `dir` is the archive root.
    pub(crate) fn names_in_dir(&self, dir: &str, include_dirs: bool, include_files: bool) -> Vec<String> {
        let dir = path::normalize_dir(dir);

        self.filtered(include_dirs, include_files)
            .filter(|entry| path::is_direct_child(&dir, entry.name()))
            .map(|entry| entry.name().to_owned())
            .collect()
    }

    pub(crate) fn metadata(&self, include_dirs: bool, include_files: bool) -> Vec<EntryMetadata> {
        self.filtered(include_dirs, include_files).map(ArchiveEntry::metadata).collect()
    }

    /// Metadata of every entry anywhere below `dir`, excluding `dir` itself.
    pub(crate) fn metadata_in_dir(&self, dir: &str, include_dirs: bool, include_files: bool) -> Vec<EntryMetadata> {
        let dir = path::normalize_dir(dir);

        self.filtered(include_dirs, include_files)
            .filter(|entry| entry.name() != dir && entry.name().starts_with(&dir))
            .map(ArchiveEntry::metadata)
            .collect()
    }

    fn filtered(&self, include_dirs: bool, include_files: bool) -> impl Iterator<Item = &ArchiveEntry> {
        self.entries.iter().filter(move |entry| match entry.is_directory() {
            true => include_dirs,
            false => include_files,
        })
    }
}
