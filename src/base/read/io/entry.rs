// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::base::read::io::{compressed::CompressedReader, hashed::HashedReader};
use crate::entry::ZipEntry;
use crate::error::{Result, ZipError};
use crate::spec::Compression;

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_lite::io::{AsyncBufRead, AsyncRead, AsyncReadExt, Take};
use pin_project::pin_project;

/// A ZIP entry reader which may implement decompression.
///
/// The reader is bounded by the entry's compressed size so it never reads into the next record.
#[pin_project]
pub struct ZipEntryReader<'a, R> {
    #[pin]
    reader: HashedReader<CompressedReader<Take<&'a mut R>>>,
}

impl<'a, R> ZipEntryReader<'a, R>
where
    R: AsyncBufRead + Unpin,
{
    /// Constructs a new entry reader over a mutable borrow of a source already positioned at the entry's data.
    pub(crate) fn new_with_borrow(reader: &'a mut R, compression: Compression, size: u64) -> Self {
        let reader = HashedReader::new(CompressedReader::new(reader.take(size), compression));
        Self { reader }
    }

    /// Computes and returns the CRC32 hash of bytes read by this reader so far.
    ///
    /// This hash should only be computed once EOF has been reached.
    pub fn compute_hash(&mut self) -> u32 {
        self.reader.swap_and_compute_hash()
    }

    /// Reads all bytes until EOF has been reached, appending them to buf, and verifies them against the entry.
    ///
    /// Both the number of bytes produced and their CRC32 must match what the entry records.
    pub async fn read_to_end_checked(&mut self, buf: &mut Vec<u8>, entry: &ZipEntry) -> Result<usize> {
        let read = self.read_to_end(buf).await?;

        if self.reader.bytes_read() != entry.uncompressed_size() {
            return Err(ZipError::ExtractedSizeMismatch {
                name: entry.filename().to_owned(),
                expected: entry.uncompressed_size(),
                actual: self.reader.bytes_read(),
            });
        }

        if self.compute_hash() != entry.crc32() {
            return Err(ZipError::CRC32CheckError);
        }

        Ok(read)
    }
}

impl<R> AsyncRead for ZipEntryReader<'_, R>
where
    R: AsyncBufRead + Unpin,
{
    fn poll_read(self: Pin<&mut Self>, c: &mut Context<'_>, b: &mut [u8]) -> Poll<std::io::Result<usize>> {
        self.project().reader.poll_read(c, b)
    }
}
