// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! <https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#4316>
//!
//! The end of central directory record may be followed by a variable-length comment, so its start can't be assumed
//! to sit 22 bytes from the end of the data. It has to be searched for.
//!
//! The search reads fixed-size windows backwards from the end of the data and scans each window in reverse for the
//! EOCDR signature. Consecutive windows overlap by the signature length so a signature straddling two windows is
//! still found. The search gives up once it passes the furthest point a maximum-length comment could push the record.

use crate::error::{Result as ZipResult, ZipError};
use crate::spec::consts::{EOCDR_LENGTH, EOCDR_SIGNATURE, SIGNATURE_LENGTH};

use futures_lite::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt, SeekFrom};

/// The buffer size used when locating the EOCDR, equal to 2KiB.
const BUFFER_SIZE: usize = 2048;

/// The furthest distance from the end of the data at which the EOCDR signature can start.
const EOCDR_LOWER_BOUND: u64 = (EOCDR_LENGTH + SIGNATURE_LENGTH) as u64 + u16::MAX as u64;

/// Locate the `end of central directory record` offset, if one exists.
///
/// The returned offset points just past the signature (ie. at the first byte of the fixed-length record).
pub(crate) async fn eocdr<R>(mut reader: R) -> ZipResult<u64>
where
    R: AsyncRead + AsyncSeek + Unpin,
{
    let length = reader.seek(SeekFrom::End(0)).await?;

    if length < (EOCDR_LENGTH + SIGNATURE_LENGTH) as u64 {
        return Err(ZipError::UnableToLocateEOCDR);
    }

    let signature = &EOCDR_SIGNATURE.to_le_bytes();
    let lower_bound = length.saturating_sub(EOCDR_LOWER_BOUND);
    let mut buffer = vec![0; BUFFER_SIZE];

    // A signature ending within the last EOCDR_LENGTH bytes can't begin a complete record.
    let mut end = length - EOCDR_LENGTH as u64;

    loop {
        let position = end.saturating_sub(BUFFER_SIZE as u64).max(lower_bound);
        let window = &mut buffer[..(end - position) as usize];

        reader.seek(SeekFrom::Start(position)).await?;
        reader.read_exact(window).await?;

        if let Some(match_index) = reverse_search_buffer(window, signature) {
            return Ok(position + (match_index + 1) as u64);
        }

        if position == lower_bound {
            return Err(ZipError::UnableToLocateEOCDR);
        }

        end = position + SIGNATURE_LENGTH as u64;
    }
}

/// A naive reverse linear search along the buffer for the specified signature bytes.
///
/// Returns the index of the final byte of the last occurrence.
pub(crate) fn reverse_search_buffer(buffer: &[u8], signature: &[u8]) -> Option<usize> {
    if signature.is_empty() || buffer.len() < signature.len() {
        return None;
    }

    (signature.len() - 1..buffer.len()).rev().find(|&index| &buffer[index + 1 - signature.len()..=index] == signature)
}
