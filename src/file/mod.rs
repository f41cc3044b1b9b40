// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::entry::StoredZipEntry;

/// An immutable store of data about a ZIP file.
#[derive(Clone, Debug)]
pub struct ZipFile {
    pub(crate) entries: Vec<StoredZipEntry>,
    pub(crate) comment: String,
}

impl ZipFile {
    /// Returns a list of this ZIP file's entries, in central directory order.
    pub fn entries(&self) -> &[StoredZipEntry] {
        &self.entries
    }

    /// Returns this ZIP file's trailing comment.
    pub fn comment(&self) -> &str {
        &self.comment
    }
}
