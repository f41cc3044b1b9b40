// Copyright (c) 2021 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::error::Result;
use crate::spec::consts::{CDH_LENGTH, EOCDR_LENGTH, LFH_LENGTH};
use crate::spec::header::{CentralDirectoryRecord, EndOfCentralDirectoryHeader, GeneralPurposeFlag, LocalFileHeader};

use futures_lite::io::{AsyncRead, AsyncReadExt};

/// Replace elements of an array at a given cursor index for use with a zero-initialised array.
macro_rules! array_push {
    ($arr:ident, $cursor:ident, $value:expr) => {{
        for entry in $value {
            $arr[$cursor] = entry;
            $cursor += 1;
        }
    }};
}

impl LocalFileHeader {
    pub fn as_slice(&self) -> [u8; LFH_LENGTH] {
        let mut array = [0; LFH_LENGTH];
        let mut cursor = 0;

        array_push!(array, cursor, self.version.to_le_bytes());
        array_push!(array, cursor, self.flags.as_slice());
        array_push!(array, cursor, self.compression.to_le_bytes());
        array_push!(array, cursor, self.mod_time.to_le_bytes());
        array_push!(array, cursor, self.mod_date.to_le_bytes());
        array_push!(array, cursor, self.crc.to_le_bytes());
        array_push!(array, cursor, self.compressed_size.to_le_bytes());
        array_push!(array, cursor, self.uncompressed_size.to_le_bytes());
        array_push!(array, cursor, self.file_name_length.to_le_bytes());
        array_push!(array, cursor, self.extra_field_length.to_le_bytes());

        array
    }
}

impl GeneralPurposeFlag {
    pub fn as_slice(&self) -> [u8; 2] {
        let encrypted: u16 = match self.encrypted {
            false => 0x0,
            true => 0b1,
        };
        let data_descriptor: u16 = match self.data_descriptor {
            false => 0x0,
            true => 0x8,
        };
        let filename_unicode: u16 = match self.filename_unicode {
            false => 0x0,
            true => 0x800,
        };

        (encrypted | data_descriptor | filename_unicode).to_le_bytes()
    }
}

impl CentralDirectoryRecord {
    pub fn as_slice(&self) -> [u8; CDH_LENGTH] {
        let mut array = [0; CDH_LENGTH];
        let mut cursor = 0;

        array_push!(array, cursor, self.v_made_by.to_le_bytes());
        array_push!(array, cursor, self.v_needed.to_le_bytes());
        array_push!(array, cursor, self.flags.as_slice());
        array_push!(array, cursor, self.compression.to_le_bytes());
        array_push!(array, cursor, self.mod_time.to_le_bytes());
        array_push!(array, cursor, self.mod_date.to_le_bytes());
        array_push!(array, cursor, self.crc.to_le_bytes());
        array_push!(array, cursor, self.compressed_size.to_le_bytes());
        array_push!(array, cursor, self.uncompressed_size.to_le_bytes());
        array_push!(array, cursor, self.file_name_length.to_le_bytes());
        array_push!(array, cursor, self.extra_field_length.to_le_bytes());
        array_push!(array, cursor, self.file_comment_length.to_le_bytes());
        array_push!(array, cursor, self.disk_start.to_le_bytes());
        array_push!(array, cursor, self.inter_attr.to_le_bytes());
        array_push!(array, cursor, self.exter_attr.to_le_bytes());
        array_push!(array, cursor, self.lh_offset.to_le_bytes());

        array
    }
}

impl EndOfCentralDirectoryHeader {
    pub fn as_slice(&self) -> [u8; EOCDR_LENGTH] {
        let mut array = [0; EOCDR_LENGTH];
        let mut cursor = 0;

        array_push!(array, cursor, self.disk_num.to_le_bytes());
        array_push!(array, cursor, self.start_cent_dir_disk.to_le_bytes());
        array_push!(array, cursor, self.num_of_entries_disk.to_le_bytes());
        array_push!(array, cursor, self.num_of_entries.to_le_bytes());
        array_push!(array, cursor, self.size_cent_dir.to_le_bytes());
        array_push!(array, cursor, self.cent_dir_offset.to_le_bytes());
        array_push!(array, cursor, self.file_comm_length.to_le_bytes());

        array
    }
}

impl From<[u8; LFH_LENGTH]> for LocalFileHeader {
    fn from(value: [u8; LFH_LENGTH]) -> LocalFileHeader {
        LocalFileHeader {
            version: u16_at(&value, 0),
            flags: GeneralPurposeFlag::from(u16_at(&value, 2)),
            compression: u16_at(&value, 4),
            mod_time: u16_at(&value, 6),
            mod_date: u16_at(&value, 8),
            crc: u32_at(&value, 10),
            compressed_size: u32_at(&value, 14),
            uncompressed_size: u32_at(&value, 18),
            file_name_length: u16_at(&value, 22),
            extra_field_length: u16_at(&value, 24),
        }
    }
}

impl From<u16> for GeneralPurposeFlag {
    fn from(value: u16) -> GeneralPurposeFlag {
        let encrypted = !matches!(value & 0x1, 0);
        let data_descriptor = !matches!((value & 0x8) >> 3, 0);
        let filename_unicode = !matches!((value & 0x800) >> 11, 0);

        GeneralPurposeFlag { encrypted, data_descriptor, filename_unicode }
    }
}

impl From<[u8; CDH_LENGTH]> for CentralDirectoryRecord {
    fn from(value: [u8; CDH_LENGTH]) -> CentralDirectoryRecord {
        CentralDirectoryRecord {
            v_made_by: u16_at(&value, 0),
            v_needed: u16_at(&value, 2),
            flags: GeneralPurposeFlag::from(u16_at(&value, 4)),
            compression: u16_at(&value, 6),
            mod_time: u16_at(&value, 8),
            mod_date: u16_at(&value, 10),
            crc: u32_at(&value, 12),
            compressed_size: u32_at(&value, 16),
            uncompressed_size: u32_at(&value, 20),
            file_name_length: u16_at(&value, 24),
            extra_field_length: u16_at(&value, 26),
            file_comment_length: u16_at(&value, 28),
            disk_start: u16_at(&value, 30),
            inter_attr: u16_at(&value, 32),
            exter_attr: u32_at(&value, 34),
            lh_offset: u32_at(&value, 38),
        }
    }
}

impl From<[u8; EOCDR_LENGTH]> for EndOfCentralDirectoryHeader {
    fn from(value: [u8; EOCDR_LENGTH]) -> EndOfCentralDirectoryHeader {
        EndOfCentralDirectoryHeader {
            disk_num: u16_at(&value, 0),
            start_cent_dir_disk: u16_at(&value, 2),
            num_of_entries_disk: u16_at(&value, 4),
            num_of_entries: u16_at(&value, 6),
            size_cent_dir: u32_at(&value, 8),
            cent_dir_offset: u32_at(&value, 12),
            file_comm_length: u16_at(&value, 16),
        }
    }
}

impl LocalFileHeader {
    pub async fn from_reader<R: AsyncRead + Unpin>(reader: &mut R) -> Result<LocalFileHeader> {
        let mut buffer: [u8; LFH_LENGTH] = [0; LFH_LENGTH];
        reader.read_exact(&mut buffer).await?;
        Ok(LocalFileHeader::from(buffer))
    }
}

impl EndOfCentralDirectoryHeader {
    pub async fn from_reader<R: AsyncRead + Unpin>(reader: &mut R) -> Result<EndOfCentralDirectoryHeader> {
        let mut buffer: [u8; EOCDR_LENGTH] = [0; EOCDR_LENGTH];
        reader.read_exact(&mut buffer).await?;
        Ok(EndOfCentralDirectoryHeader::from(buffer))
    }
}

impl CentralDirectoryRecord {
    pub async fn from_reader<R: AsyncRead + Unpin>(reader: &mut R) -> Result<CentralDirectoryRecord> {
        let mut buffer: [u8; CDH_LENGTH] = [0; CDH_LENGTH];
        reader.read_exact(&mut buffer).await?;
        Ok(CentralDirectoryRecord::from(buffer))
    }
}

fn u16_at(buffer: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([buffer[offset], buffer[offset + 1]])
}

fn u32_at(buffer: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([buffer[offset], buffer[offset + 1], buffer[offset + 2], buffer[offset + 3]])
}
