// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::base::read::seek::ZipFileReader;
use crate::error::ZipError;
use crate::spec::consts::{CDH_SIGNATURE, LFH_SIGNATURE};
use crate::spec::Compression;
use crate::tests::archive_bytes;

use futures_lite::io::Cursor;

/// Overwrites a 32-bit field of the first local and central header.
fn patch_field(data: &mut [u8], lfh_offset: usize, cdh_offset: usize, value: u32) {
    for (signature, offset) in [(LFH_SIGNATURE, lfh_offset), (CDH_SIGNATURE, cdh_offset)] {
        let signature = signature.to_le_bytes();
        let start = data.windows(4).position(|window| window == signature).expect("header not found");
        data[start + offset..start + offset + 4].copy_from_slice(&value.to_le_bytes());
    }
}

#[tokio::test]
async fn oversized_compressed_size_fails_raw_read() {
    let mut data = archive_bytes(&[("sheet1.xml", b"<worksheet/>")], Compression::Stored).await;
    patch_field(&mut data, 18, 20, 0xFFFF_FF00);

    let mut reader = ZipFileReader::new(Cursor::new(data)).await.expect("failed to open archive");
    let result = reader.read_raw(0).await;

    assert!(matches!(result, Err(ZipError::UpstreamReadError(err)) if err.kind() == std::io::ErrorKind::UnexpectedEof));
}

#[tokio::test]
async fn oversized_uncompressed_size_fails_extraction() {
    let mut data = archive_bytes(&[("sheet1.xml", b"<worksheet/>")], Compression::Stored).await;
    patch_field(&mut data, 22, 24, 0xFFFF_FF00);

    let mut reader = ZipFileReader::new(Cursor::new(data)).await.expect("failed to open archive");
    let entry = reader.file().entries()[0].entry.clone();
    assert_eq!(entry.uncompressed_size(), 0xFFFF_FF00);

    let mut buffer = Vec::new();
    let mut entry_reader = reader.reader_with_entry(0).await.expect("failed to seek to entry");
    let result = entry_reader.read_to_end_checked(&mut buffer, &entry).await;

    assert!(matches!(result, Err(ZipError::ExtractedSizeMismatch { expected: 0xFFFF_FF00, actual: 12, .. })));
}
