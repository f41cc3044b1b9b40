// Copyright (c) 2021 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::entry::ZipEntry;

// Upper byte: host system (3 = Unix). Lower byte: specification version implemented (6.3).
// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#442
pub(crate) const MADE_BY: u16 = (3 << 8) | 63;

pub(crate) fn as_made_by() -> u16 {
    MADE_BY
}

// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#443
pub(crate) fn as_needed_to_extract(entry: &ZipEntry) -> u16 {
    let mut version = match entry.compression_method() {
        8 => 20,
        12 => 46,
        14 => 63,
        _ => 10,
    };

    if entry.filename().ends_with('/') {
        version = std::cmp::max(version, 20);
    }

    version
}
