// Copyright (c) 2023 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::base::read::seek::ZipFileReader;
use crate::error::ZipError;
use crate::spec::consts::{CDH_SIGNATURE, ZIP64_EOCDL_SIGNATURE};
use crate::spec::Compression;
use crate::tests::archive_bytes;

use futures_lite::io::Cursor;

#[tokio::test]
async fn rejects_zip64_locator() {
    let mut data = Vec::new();
    data.extend_from_slice(&ZIP64_EOCDL_SIGNATURE.to_le_bytes());
    data.extend_from_slice(&[0; 16]);
    data.extend_from_slice(&archive_bytes(&[], Compression::Stored).await);

    let result = ZipFileReader::new(Cursor::new(data)).await;
    assert!(matches!(result, Err(ZipError::FeatureNotSupported("ZIP64"))));
}

#[tokio::test]
async fn rejects_zip64_sentinel_sizes() {
    let mut data = archive_bytes(&[("sheet1.xml", b"<worksheet/>")], Compression::Stored).await;

    let signature = CDH_SIGNATURE.to_le_bytes();
    let start = data.windows(4).position(|window| window == signature).expect("no central directory record");
    data[start + 20..start + 24].copy_from_slice(&[0xFF; 4]);

    let result = ZipFileReader::new(Cursor::new(data)).await;
    assert!(matches!(result, Err(ZipError::FeatureNotSupported("ZIP64"))));
}
