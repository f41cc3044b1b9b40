// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::base::read::seek::ZipFileReader;
use crate::base::write::ZipFileWriter;
use crate::error::ZipError;
use crate::spec::consts::LFH_SIGNATURE;
use crate::spec::Compression;
use crate::tests::archive_bytes;

use futures_lite::io::{AsyncReadExt, Cursor};

const LOREM: &[u8] = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt...";

#[tokio::test]
async fn empty() {
    let data = archive_bytes(&[], Compression::default()).await;

    let reader = ZipFileReader::new(Cursor::new(data)).await.expect("failed to open reader");
    assert!(reader.file().entries().is_empty());
    assert!(reader.file().comment().is_empty());
}

#[tokio::test]
async fn zero_length_zip() {
    let result = ZipFileReader::new(Cursor::new(Vec::<u8>::new())).await;
    assert!(matches!(result, Err(ZipError::UnableToLocateEOCDR)));
}

#[tokio::test]
async fn single_entry_no_data() {
    let data = archive_bytes(&[("foo.bar", b"")], Compression::Stored).await;
    let mut reader = ZipFileReader::new(Cursor::new(data)).await.expect("failed to open reader");

    let entry = &reader.file().entries()[0];
    assert_eq!(entry.filename(), "foo.bar");
    assert_eq!(entry.header_offset(), 0);
    assert_eq!(entry.compressed_size(), 0);
    assert_eq!(entry.uncompressed_size(), 0);
    assert_eq!(entry.compression().expect("unsupported compression"), Compression::Stored);

    let mut buffer = Vec::new();
    reader.reader_with_entry(0).await.expect("failed to open entry").read_to_end(&mut buffer).await.unwrap();
    assert!(buffer.is_empty());
}

async fn single_entry(compression: Compression) {
    let data = archive_bytes(&[("xl/sharedStrings.xml", LOREM)], compression).await;
    let mut reader = ZipFileReader::new(Cursor::new(data)).await.expect("failed to open reader");

    let entry = reader.file().entries()[0].entry.clone();
    assert_eq!(entry.uncompressed_size(), LOREM.len() as u64);
    assert_eq!(entry.compression().expect("unsupported compression"), compression);

    let mut buffer = Vec::new();
    let mut entry_reader = reader.reader_with_entry(0).await.expect("failed to open entry");
    entry_reader.read_to_end_checked(&mut buffer, &entry).await.expect("failed to read entry");

    assert_eq!(buffer, LOREM);
}

#[tokio::test]
async fn single_entry_stored() {
    single_entry(Compression::Stored).await;
}

#[cfg(feature = "deflate")]
#[tokio::test]
async fn single_entry_deflate() {
    single_entry(Compression::Deflate).await;
}

#[cfg(feature = "bzip2")]
#[tokio::test]
async fn single_entry_bz() {
    single_entry(Compression::Bz).await;
}

#[cfg(feature = "zstd")]
#[tokio::test]
async fn single_entry_zstd() {
    single_entry(Compression::Zstd).await;
}

#[tokio::test]
async fn entries_keep_write_order_and_offsets() {
    let names = ["[Content_Types].xml", "_rels/.rels", "xl/workbook.xml", "xl/worksheets/sheet1.xml"];
    let entries: Vec<(&str, &[u8])> = names.iter().map(|name| (*name, LOREM)).collect();

    let data = archive_bytes(&entries, Compression::default()).await;
    let reader = ZipFileReader::new(Cursor::new(data.clone())).await.expect("failed to open reader");

    let read: Vec<&str> = reader.file().entries().iter().map(|entry| entry.filename()).collect();
    assert_eq!(read, names);

    for entry in reader.file().entries() {
        let offset = entry.header_offset() as usize;
        assert_eq!(&data[offset..offset + 4], &LFH_SIGNATURE.to_le_bytes());
    }
}

#[tokio::test]
async fn raw_copy_preserves_compressed_bytes() {
    let data = archive_bytes(&[("a.xml", LOREM), ("b.xml", b"<b/>")], Compression::default()).await;
    let mut reader = ZipFileReader::new(Cursor::new(data)).await.expect("failed to open reader");

    let mut writer = ZipFileWriter::new(Vec::new());
    for index in [1, 0] {
        let raw = reader.read_raw(index).await.expect("failed to read raw data");
        let entry = reader.file().entries()[index].entry.clone();
        writer.write_entry_raw(entry, &raw).await.expect("failed to write raw entry");
    }
    let copied = writer.close().await.expect("failed to close writer");

    let mut copy_reader = ZipFileReader::new(Cursor::new(copied)).await.expect("failed to open copy");
    assert_eq!(copy_reader.file().entries()[0].filename(), "b.xml");
    assert_eq!(copy_reader.read_raw(1).await.unwrap(), reader.read_raw(0).await.unwrap());

    let entry = copy_reader.file().entries()[1].entry.clone();
    let mut buffer = Vec::new();
    let mut entry_reader = copy_reader.reader_with_entry(1).await.unwrap();
    entry_reader.read_to_end_checked(&mut buffer, &entry).await.expect("copied entry failed verification");
    assert_eq!(buffer, LOREM);
}

#[tokio::test]
async fn corrupt_data_fails_crc_check() {
    let mut data = archive_bytes(&[("a.xml", LOREM)], Compression::Stored).await;

    // Stored data begins after the 30 byte fixed header and the 5 byte name.
    data[35] ^= 0xFF;

    let mut reader = ZipFileReader::new(Cursor::new(data)).await.expect("failed to open reader");
    let entry = reader.file().entries()[0].entry.clone();

    let mut buffer = Vec::new();
    let mut entry_reader = reader.reader_with_entry(0).await.unwrap();
    let result = entry_reader.read_to_end_checked(&mut buffer, &entry).await;

    assert!(matches!(result, Err(ZipError::CRC32CheckError)));
}

#[tokio::test]
async fn archive_comment_round_trip() {
    let mut writer = ZipFileWriter::new(Vec::new());
    writer.comment(String::from("generated by a spreadsheet"));
    let data = writer.close().await.unwrap();

    let reader = ZipFileReader::new(Cursor::new(data)).await.unwrap();
    assert_eq!(reader.file().comment(), "generated by a spreadsheet");
}

#[tokio::test]
async fn unknown_compression_is_reported() {
    let mut data = archive_bytes(&[("a.xml", LOREM)], Compression::Stored).await;

    // Method 99 (AES) in both the local header and the central directory record.
    data[8..10].copy_from_slice(&99u16.to_le_bytes());
    let cd = data.len() - 22 - (46 + 5);
    data[cd + 10..cd + 12].copy_from_slice(&99u16.to_le_bytes());

    let mut reader = ZipFileReader::new(Cursor::new(data)).await.expect("failed to open reader");
    assert_eq!(reader.file().entries()[0].compression_method(), 99);
    assert!(matches!(reader.reader_with_entry(0).await, Err(ZipError::CompressionNotSupported(99))));
    assert!(reader.read_raw(0).await.is_ok());
}
