// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::base::read::io::poll_result_ok;

use std::pin::Pin;
use std::task::{ready, Context, Poll};

use crc32fast::Hasher;
use futures_lite::io::AsyncRead;
use pin_project::pin_project;

/// A pass-through reader which tracks the CRC32 and length of everything read through it.
#[pin_project]
pub(crate) struct HashedReader<R> {
    #[pin]
    reader: R,
    hasher: Hasher,
    read: u64,
}

impl<R> HashedReader<R>
where
    R: AsyncRead + Unpin,
{
    pub(crate) fn new(reader: R) -> Self {
        Self { reader, hasher: Hasher::new(), read: 0 }
    }

    /// Takes the running hash, leaving a fresh hasher in its place.
    ///
    /// Only meaningful once EOF has been reached.
    pub(crate) fn swap_and_compute_hash(&mut self) -> u32 {
        std::mem::take(&mut self.hasher).finalize()
    }

    /// The number of bytes read so far.
    pub(crate) fn bytes_read(&self) -> u64 {
        self.read
    }
}

impl<R> AsyncRead for HashedReader<R>
where
    R: AsyncRead + Unpin,
{
    fn poll_read(self: Pin<&mut Self>, c: &mut Context<'_>, b: &mut [u8]) -> Poll<std::io::Result<usize>> {
        let project = self.project();
        let written = poll_result_ok!(ready!(project.reader.poll_read(c, b)));
        project.hasher.update(&b[..written]);
        *project.read += written as u64;

        Poll::Ready(Ok(written))
    }
}
