// Copyright (c) 2023 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

#![allow(dead_code)]

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use futures_lite::future::block_on;
use tempfile::TempDir;
use xlzip::base::write::ZipFileWriter;
use xlzip::{Compression, ZipEntryBuilder};
use zip::write::SimpleFileOptions;

pub const CONTENT_TYPES: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?><Types/>"#;
pub const WORKBOOK: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?><workbook><sheets/></workbook>"#;
pub const SHEET: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?><worksheet><sheetData/></worksheet>"#;

/// A scratch directory and a path inside it.
pub fn scratch(name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("failed to create scratch directory");
    let path = dir.path().join(name);
    (dir, path)
}

/// Writes an archive with this crate's low-level writer, records in the given order, duplicates included.
pub fn write_records(path: &Path, records: &[(&str, &[u8])], compression: Compression) {
    let bytes = block_on(async {
        let mut writer = ZipFileWriter::new(Vec::new());
        for (name, data) in records {
            writer.write_entry_whole(ZipEntryBuilder::new(name.to_string(), compression), data).await.unwrap();
        }
        writer.close().await.unwrap()
    });
    std::fs::write(path, bytes).unwrap();
}

/// Writes an archive with the `zip` crate. Names ending in `/` become directory records.
pub fn write_with_zip_crate(path: &Path, records: &[(&str, &[u8])], comment: Option<&str>) {
    let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, data) in records {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
    }

    if let Some(comment) = comment {
        writer.set_comment(comment);
    }
    writer.finish().unwrap();
}

/// Reads every record with the `zip` crate, in central directory order.
pub fn read_with_zip_crate(path: &Path) -> Vec<(String, Vec<u8>)> {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut records = Vec::new();

    for index in 0..archive.len() {
        let mut file = archive.by_index(index).unwrap();
        let mut data = Vec::new();
        file.read_to_end(&mut data).unwrap();
        records.push((file.name().to_owned(), data));
    }

    records
}

/// Reads the still-compressed bytes of the named record with the `zip` crate.
pub fn raw_with_zip_crate(path: &Path, name: &str) -> Vec<u8> {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let index = archive.index_for_name(name).expect("no such record");

    let mut data = Vec::new();
    archive.by_index_raw(index).unwrap().read_to_end(&mut data).unwrap();
    data
}

/// Flips one byte of the first occurrence of `needle` in the file.
pub fn corrupt(path: &Path, needle: &[u8]) {
    let mut bytes = std::fs::read(path).unwrap();
    let start = bytes.windows(needle.len()).position(|window| window == needle).expect("needle not found");
    bytes[start] ^= 0xFF;
    std::fs::write(path, bytes).unwrap();
}

/// Names of any scratch files left in a directory.
pub fn leftover_temp_files(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|extension| extension == "tmp"))
        .collect()
}

/// Overwrites the uncompressed size recorded for the first record, in both its local and central headers.
pub fn patch_uncompressed_size(path: &Path, size: u32) {
    let mut bytes = std::fs::read(path).unwrap();

    for (signature, offset) in [(b"PK\x03\x04", 22), (b"PK\x01\x02", 24)] {
        let start = bytes.windows(4).position(|window| window == signature).expect("header not found");
        bytes[start + offset..start + offset + 4].copy_from_slice(&size.to_le_bytes());
    }

    std::fs::write(path, bytes).unwrap();
}
