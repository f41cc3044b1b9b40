// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::base::read::io::locator::{eocdr, reverse_search_buffer};
use crate::base::write::ZipFileWriter;
use crate::error::ZipError;

use futures_lite::io::Cursor;

async fn empty_with_comment(length: usize) -> Vec<u8> {
    let mut writer = ZipFileWriter::new(Vec::new());
    writer.comment("c".repeat(length));
    writer.close().await.expect("failed to close writer")
}

#[test]
fn search_one_byte_test() {
    let buffer: &[u8] = &[0x0, 0x0, 0x0, 0x0, 0x0, 0x0];
    assert!(reverse_search_buffer(buffer, &[0x1]).is_none());

    let buffer: &[u8] = &[0x2, 0x1, 0x0, 0x0, 0x1, 0x0];
    assert_eq!(reverse_search_buffer(buffer, &[0x1]), Some(4));
}

#[test]
fn search_two_byte_test() {
    let buffer: &[u8] = &[0x2, 0x1, 0x0, 0x0, 0x0, 0x0];
    assert_eq!(reverse_search_buffer(buffer, &[0x2, 0x1]), Some(1));

    // A partial match at the very start doesn't count.
    let buffer: &[u8] = &[0x1, 0x0, 0x0];
    assert!(reverse_search_buffer(buffer, &[0x2, 0x1]).is_none());
}

#[tokio::test]
async fn locator_empty_test() {
    let data = empty_with_comment(0).await;
    assert_eq!(data.len(), 22);

    let offset = eocdr(&mut Cursor::new(&data)).await.expect("failed to locate EOCDR");
    assert_eq!(offset, 4);
}

#[tokio::test]
async fn locator_empty_max_comment_test() {
    let data = empty_with_comment(u16::MAX as usize).await;

    let offset = eocdr(&mut Cursor::new(&data)).await.expect("failed to locate EOCDR");
    assert_eq!(offset, 4);
}

#[tokio::test]
async fn locator_buffer_boundary_test() {
    // Places the signature across the boundary of the first two windows read.
    let data = empty_with_comment(2046).await;

    let offset = eocdr(&mut Cursor::new(&data)).await.expect("failed to locate EOCDR");
    assert_eq!(offset, 4);
}

#[tokio::test]
async fn locator_not_a_zip_test() {
    let data = vec![0x42; 4096];
    let result = eocdr(&mut Cursor::new(&data)).await;
    assert!(matches!(result, Err(ZipError::UnableToLocateEOCDR)));

    let result = eocdr(&mut Cursor::new(&data[..10])).await;
    assert!(matches!(result, Err(ZipError::UnableToLocateEOCDR)));
}
