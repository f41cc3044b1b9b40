// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

pub const SIGNATURE_LENGTH: usize = 4;

// Local file header constants
//
// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#437
pub const LFH_SIGNATURE: u32 = 0x4034b50;
pub const LFH_LENGTH: usize = 26;

// Central directory header constants
//
// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#4312
pub const CDH_SIGNATURE: u32 = 0x2014b50;
pub const CDH_LENGTH: usize = 42;

// End of central directory record constants
//
// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#4316
pub const EOCDR_SIGNATURE: u32 = 0x6054b50;
pub const EOCDR_LENGTH: usize = 18;

// Zip64 end of central directory locator signature. Only detected, never written.
//
// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#4315
pub const ZIP64_EOCDL_SIGNATURE: u32 = 0x7064b50;
pub const ZIP64_EOCDL_LENGTH: u64 = 16;

/// The value written to 32-bit size & offset fields when the real value lives in a Zip64 structure.
pub const NON_ZIP64_MAX_SIZE: u32 = 0xFFFFFFFF;
pub const NON_ZIP64_MAX_NUM_FILES: u16 = 0xFFFF;
