// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

pub(crate) mod read;
pub(crate) mod spec;
pub(crate) mod write;

use crate::base::write::ZipFileWriter;
use crate::entry::builder::ZipEntryBuilder;
use crate::spec::Compression;

/// Builds an in-memory archive from (name, data) pairs.
pub(crate) async fn archive_bytes(entries: &[(&str, &[u8])], compression: Compression) -> Vec<u8> {
    let mut writer = ZipFileWriter::new(Vec::new());

    for (name, data) in entries {
        let entry = ZipEntryBuilder::new(name.to_string(), compression);
        writer.write_entry_whole(entry, data).await.expect("failed to write entry");
    }

    writer.close().await.expect("failed to close writer")
}
