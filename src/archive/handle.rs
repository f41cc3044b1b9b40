// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use std::fs::File;
use std::path::{Component, Path, PathBuf};

use crate::archive::catalog::ArchiveCatalog;
use crate::archive::entry::{ArchiveEntry, EntryMetadata};
use crate::archive::options::ArchiveOptions;
use crate::archive::persist;
use crate::archive::scan::ArchiveReader;
use crate::archive::temp::TempNameGenerator;
use crate::error::{Result, ZipError};

/// The state held while an archive is open.
struct Session {
    path: PathBuf,
    reader: ArchiveReader,
    catalog: ArchiveCatalog,
}

impl Session {
    fn open(path: &Path) -> Result<Self> {
        let reader = ArchiveReader::open(path)?;
        let catalog = reader.catalog();

        Ok(Self { path: path.to_owned(), reader, catalog })
    }
}

/// An archive opened for reading and editing.
///
/// A handle is either open against a file on disk or closed. Edits are held in memory until [`save`] writes a new
/// file next to the target and renames it into place, so the target is never left partially written. Any operation
/// other than [`create`], [`open`] and [`close`] fails with [`ZipError::ArchiveClosed`] while closed.
///
/// ### Example
/// ```no_run
/// # use xlzip::ArchiveHandle;
/// # use xlzip::error::Result;
/// #
/// # fn run() -> Result<()> {
/// let mut archive = ArchiveHandle::open_new("./book.xlsx")?;
///
/// let workbook = archive.entry_bytes("xl/workbook.xml")?.to_vec();
/// archive.add_entry("xl/worksheets/sheet2.xml", b"<worksheet/>".to_vec())?;
/// archive.delete_entry("docProps/custom.xml")?;
///
/// archive.save(None)?;
/// #   Ok(())
/// # }
/// ```
///
/// [`save`]: ArchiveHandle::save
/// [`create`]: ArchiveHandle::create
/// [`open`]: ArchiveHandle::open
/// [`close`]: ArchiveHandle::close
pub struct ArchiveHandle {
    session: Option<Session>,
    temp_names: TempNameGenerator,
    options: ArchiveOptions,
}

impl Default for ArchiveHandle {
    fn default() -> Self {
        Self::with_options(ArchiveOptions::default())
    }
}

impl ArchiveHandle {
    /// Constructs a closed handle with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a closed handle with the provided options.
    pub fn with_options(options: ArchiveOptions) -> Self {
        Self { session: None, temp_names: options.temp_names(), options }
    }

    /// Creates a new, empty archive at `path`, replacing any file there, and opens it.
    pub fn create(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.close();

        persist::write_empty(File::create(path)?)?;
        self.session = Some(Session::open(path)?);

        tracing::debug!(path = %path.display(), "created archive");
        Ok(())
    }

    /// Constructs a handle over a newly created, empty archive at `path`.
    pub fn create_new(path: impl AsRef<Path>) -> Result<Self> {
        let mut handle = Self::new();
        handle.create(path)?;
        Ok(handle)
    }

    /// Opens the existing archive at `path`.
    ///
    /// An archive which is already open is closed first, discarding unsaved edits.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.close();

        let session = Session::open(path)?;
        tracing::debug!(path = %path.display(), entries = session.catalog.len(), "opened archive");

        self.session = Some(session);
        Ok(())
    }

    /// Constructs a handle over the existing archive at `path`.
    pub fn open_new(path: impl AsRef<Path>) -> Result<Self> {
        let mut handle = Self::new();
        handle.open(path)?;
        Ok(handle)
    }

    /// Closes the archive, discarding unsaved edits. Does nothing if already closed.
    pub fn close(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::debug!(path = %session.path.display(), "closed archive");
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Returns the path of the open archive.
    pub fn path(&self) -> Option<&Path> {
        self.session.as_ref().map(|session| session.path.as_path())
    }

    pub fn options(&self) -> &ArchiveOptions {
        &self.options
    }

    fn session(&self, operation: &'static str) -> Result<&Session> {
        self.session.as_ref().ok_or(ZipError::ArchiveClosed(operation))
    }

    fn session_mut(&mut self, operation: &'static str) -> Result<&mut Session> {
        self.session.as_mut().ok_or(ZipError::ArchiveClosed(operation))
    }

    /// Returns the data of the named entry, extracting it from the file on first access.
    ///
    /// Directories yield an empty slice.
    pub fn entry_bytes(&mut self, name: &str) -> Result<&[u8]> {
        let session = self.session_mut("entry_bytes")?;
        let entry = session.catalog.get_mut(name).ok_or_else(|| ZipError::EntryNotFound(name.to_owned()))?;

        entry.load(&mut session.reader)
    }

    /// Adds a new entry or replaces the data of an existing one.
    ///
    /// Missing ancestor directories are added along the way. Adding a directory which already exists returns it
    /// unchanged. A directory can't hold data.
    pub fn add_entry(&mut self, name: &str, data: impl Into<Vec<u8>>) -> Result<&ArchiveEntry> {
        let session = self.session_mut("add_entry")?;
        let entry = session.catalog.add(name, data.into())?;

        tracing::trace!(entry = name, size = entry.uncompressed_size(), "added entry");
        Ok(&*entry)
    }

    /// Adds or replaces the file entry `to` with a copy of the data held by the file entry `from`.
    pub fn copy_entry(&mut self, from: &str, to: &str) -> Result<&ArchiveEntry> {
        let session = self.session_mut("copy_entry")?;
        let source = session.catalog.get_mut(from).ok_or_else(|| ZipError::EntryNotFound(from.to_owned()))?;

        if source.is_directory() {
            return Err(ZipError::InvalidEntryName(from.to_owned()));
        }

        let data = source.load(&mut session.reader)?.to_vec();
        session.catalog.add(to, data).map(|entry| &*entry)
    }

    /// Removes the named entry. Removing a directory also removes everything below it. Unknown names are ignored.
    pub fn delete_entry(&mut self, name: &str) -> Result<()> {
        let session = self.session_mut("delete_entry")?;
        let removed = session.catalog.remove(name);

        tracing::trace!(entry = name, removed, "deleted entry");
        Ok(())
    }

    /// Returns whether an entry with exactly this name exists.
    pub fn has_entry(&self, name: &str) -> Result<bool> {
        Ok(self.session("has_entry")?.catalog.contains(name))
    }

    /// Returns the named entry.
    pub fn entry(&self, name: &str) -> Result<&ArchiveEntry> {
        self.session("entry")?.catalog.get(name).ok_or_else(|| ZipError::EntryNotFound(name.to_owned()))
    }

    /// Returns the named entry for modification.
    pub fn entry_mut(&mut self, name: &str) -> Result<&mut ArchiveEntry> {
        self.session_mut("entry_mut")?.catalog.get_mut(name).ok_or_else(|| ZipError::EntryNotFound(name.to_owned()))
    }

    /// Returns the names of all entries, in archive order.
    pub fn entry_names(&self, include_dirs: bool, include_files: bool) -> Result<Vec<String>> {
        Ok(self.session("entry_names")?.catalog.names(include_dirs, include_files))
    }

    /// Returns the names of the entries directly inside `dir`. An empty `dir` is the archive root.
    pub fn entry_names_in_dir(&self, dir: &str, include_dirs: bool, include_files: bool) -> Result<Vec<String>> {
        Ok(self.session("entry_names_in_dir")?.catalog.names_in_dir(dir, include_dirs, include_files))
    }

    pub fn num_entries(&self, include_dirs: bool, include_files: bool) -> Result<usize> {
        Ok(self.entry_names(include_dirs, include_files)?.len())
    }

    pub fn num_entries_in_dir(&self, dir: &str, include_dirs: bool, include_files: bool) -> Result<usize> {
        Ok(self.entry_names_in_dir(dir, include_dirs, include_files)?.len())
    }

    /// Returns a metadata snapshot of every entry, in archive order.
    pub fn metadata(&self, include_dirs: bool, include_files: bool) -> Result<Vec<EntryMetadata>> {
        Ok(self.session("metadata")?.catalog.metadata(include_dirs, include_files))
    }

    /// Returns a metadata snapshot of every entry anywhere below `dir`.
    pub fn metadata_in_dir(&self, dir: &str, include_dirs: bool, include_files: bool) -> Result<Vec<EntryMetadata>> {
        Ok(self.session("metadata_in_dir")?.catalog.metadata_in_dir(dir, include_dirs, include_files))
    }

    /// Writes the named entry below the filesystem directory `destination`, returning the path written.
    ///
    /// A directory entry is created as a directory. Names which would escape `destination` are rejected.
    pub fn extract_entry(&mut self, name: &str, destination: impl AsRef<Path>) -> Result<PathBuf> {
        let session = self.session_mut("extract_entry")?;
        let entry = session.catalog.get_mut(name).ok_or_else(|| ZipError::EntryNotFound(name.to_owned()))?;

        let relative = Path::new(name.trim_end_matches('/'));
        if !relative.components().all(|component| matches!(component, Component::Normal(_))) {
            return Err(ZipError::InvalidEntryName(name.to_owned()));
        }
        let path = destination.as_ref().join(relative);

        if entry.is_directory() {
            std::fs::create_dir_all(&path)?;
        } else {
            let data = entry.load(&mut session.reader)?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, data)?;
        }

        tracing::debug!(entry = name, path = %path.display(), "extracted entry");
        Ok(path)
    }

    /// Writes the archive to `path`, or back to the file it was opened from when `None`.
    ///
    /// The new archive is assembled in a scratch file in the target's directory and verified before it replaces the
    /// target. If anything fails before the replacement, the target is untouched, the scratch file is removed, and the
    /// handle stays open with its edits intact. On success the handle is reopened against the target.
    pub fn save(&mut self, path: Option<&Path>) -> Result<()> {
        let session = self.session.as_mut().ok_or(ZipError::ArchiveClosed("save"))?;
        let target = path.map(Path::to_path_buf).unwrap_or_else(|| session.path.clone());

        let (temp, file) = self.temp_names.create(&target)?;
        tracing::debug!(destination = %target.display(), temp = %temp.display(), "saving archive");

        let compression = self.options.get_compression();
        let built = persist::rebuild(&mut session.catalog, &mut session.reader, file, compression)
            .and_then(|expected| persist::validate(&temp, &expected));

        if let Err(err) = built {
            discard(&temp);
            return Err(err);
        }

        // Release the current file before it's replaced.
        let Some(session) = self.session.take() else {
            return Err(ZipError::ArchiveClosed("save"));
        };
        let Session { path: previous, reader, catalog } = session;
        drop(reader);

        if let Err(err) = persist::swap(&temp, &target) {
            discard(&temp);
            if let Ok(reader) = ArchiveReader::open(&previous) {
                self.session = Some(Session { path: previous, reader, catalog });
            }
            return Err(err.into());
        }

        let session = Session::open(&target)?;
        tracing::debug!(path = %target.display(), entries = session.catalog.len(), "saved archive");

        self.session = Some(session);
        Ok(())
    }

    /// Writes the archive to `path` and continues working against it. The file it was opened from is untouched.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.save(Some(path.as_ref()))
    }
}

impl Drop for ArchiveHandle {
    fn drop(&mut self) {
        self.close();
    }
}

fn discard(temp: &Path) {
    if let Err(err) = std::fs::remove_file(temp) {
        tracing::warn!(path = %temp.display(), %err, "failed to remove scratch file");
    }
}
