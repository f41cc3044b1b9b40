// Copyright (c) 2021-2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! A module which holds relevant error reporting structures/types.

use std::fmt::{Display, Formatter};

use thiserror::Error;

/// A Result type alias over ZipError to minimise repetition.
pub type Result<V> = std::result::Result<V, ZipError>;

/// The broad category an error falls into.
///
/// [`ErrorKind::Logic`] errors are always caller bugs (eg. operating on a closed archive) and are never worth
/// retrying. [`ErrorKind::Runtime`] errors stem from the environment or the archive's contents (IO failures, corrupt
/// containers, codec failures).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Logic,
    NotFound,
    Runtime,
}

/// An enum of possible errors and their descriptions.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ZipError {
    #[error("feature not supported: '{0}'")]
    FeatureNotSupported(&'static str),
    #[error("compression not supported: {0}")]
    CompressionNotSupported(u16),
    #[error("attempted to write a ZIP file which needs ZIP64 structures: {0}")]
    Zip64Needed(Zip64ErrorCase),
    #[error("comment exceeded maximum size")]
    CommentTooLarge,
    #[error("filename exceeded maximum size")]
    FileNameTooLarge,
    #[error("attempted to convert non-UTF8 bytes to a string")]
    StringNotUtf8,

    #[error("unable to locate the end of central directory record")]
    UnableToLocateEOCDR,

    #[error("an upstream reader returned an error: {0}")]
    UpstreamReadError(#[from] std::io::Error),
    #[error("a computed CRC32 value did not match the expected value")]
    CRC32CheckError,
    #[error("entry index was out of bounds")]
    EntryIndexOutOfBounds,
    #[error("Encountered an unexpected header (actual: {0:#x}, expected: {1:#x}).")]
    UnexpectedHeaderError(u32, u32),

    #[error("cannot call '{0}' on a closed archive")]
    ArchiveClosed(&'static str),
    #[error("invalid entry name: '{0}'")]
    InvalidEntryName(String),
    #[error("directory entry '{0}' cannot hold data")]
    DirectoryWithData(String),
    #[error("no entry named '{0}' exists in the archive")]
    EntryNotFound(String),
    #[error("entry '{name}' is encrypted or uses an unsupported compression method")]
    EntryNotSupported { name: String },
    #[error("extracted {actual} bytes from '{name}' but the archive records {expected}")]
    ExtractedSizeMismatch { name: String, expected: u64, actual: u64 },
    #[error("validation of the rebuilt archive failed: {0}")]
    ValidationFailed(String),
}

impl ZipError {
    /// Returns the broad category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ZipError::ArchiveClosed(_)
            | ZipError::InvalidEntryName(_)
            | ZipError::DirectoryWithData(_)
            | ZipError::EntryIndexOutOfBounds => ErrorKind::Logic,
            ZipError::EntryNotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Runtime,
        }
    }

    /// Returns whether this error was caused by invoking an operation in an invalid state.
    pub fn is_logic(&self) -> bool {
        self.kind() == ErrorKind::Logic
    }
}

#[derive(Debug)]
pub enum Zip64ErrorCase {
    TooManyFiles,
    LargeFile,
}

impl Display for Zip64ErrorCase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooManyFiles => write!(f, "More than 65536 files in archive"),
            Self::LargeFile => write!(f, "File is larger than 4 GiB"),
        }
    }
}
