// Copyright (c) 2023 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! The ZIP container codec: locating, parsing and writing the on-disk records.
//!
//! Both halves act over [`futures_lite`]'s IO traits. The archive engine drives them synchronously over files.

pub mod read;
pub mod write;
