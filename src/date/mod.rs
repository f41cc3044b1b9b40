// Copyright (c) 2021-2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

pub mod builder;

use chrono::{DateTime, Datelike, LocalResult, TimeZone, Timelike, Utc};

use self::builder::ZipDateTimeBuilder;

// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#446
// https://learn.microsoft.com/en-us/windows/win32/api/oleauto/nf-oleauto-dosdatetimetovarianttime

/// A date and time stored as per the MS-DOS representation used by ZIP files.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub struct ZipDateTime {
    pub(crate) date: u16,
    pub(crate) time: u16,
}

impl ZipDateTime {
    /// Returns the current date & time, truncated to MS-DOS precision.
    pub fn now() -> Self {
        Self::from_chrono(&Utc::now())
    }

    /// Returns the year of this date & time.
    pub fn year(&self) -> i32 {
        (((self.date & 0xFE00) >> 9) + 1980).into()
    }

    /// Returns the month of this date & time.
    pub fn month(&self) -> u32 {
        ((self.date & 0x1E0) >> 5).into()
    }

    /// Returns the day of this date & time.
    pub fn day(&self) -> u32 {
        (self.date & 0x1F).into()
    }

    /// Returns the hour of this date & time.
    pub fn hour(&self) -> u32 {
        ((self.time & 0xF800) >> 11).into()
    }

    /// Returns the minute of this date & time.
    pub fn minute(&self) -> u32 {
        ((self.time & 0x7E0) >> 5).into()
    }

    /// Returns the second of this date & time.
    ///
    /// Note that MS-DOS has a maximum granularity of two seconds.
    pub fn second(&self) -> u32 {
        ((self.time & 0x1F) << 1).into()
    }

    /// Constructs chrono's [`DateTime`] representation of this date & time.
    pub fn as_chrono(&self) -> LocalResult<DateTime<Utc>> {
        Utc.with_ymd_and_hms(self.year(), self.month(), self.day(), self.hour(), self.minute(), self.second())
    }

    /// Constructs this date & time from chrono's [`DateTime`] representation.
    ///
    /// Dates before 1980 (the MS-DOS epoch) are clamped to it.
    pub fn from_chrono(dt: &DateTime<Utc>) -> Self {
        ZipDateTimeBuilder::new()
            .year(dt.year().max(1980))
            .month(dt.month())
            .day(dt.day())
            .hour(dt.hour())
            .minute(dt.minute())
            .second(dt.second())
            .build()
    }
}

impl From<ZipDateTimeBuilder> for ZipDateTime {
    fn from(builder: ZipDateTimeBuilder) -> Self {
        builder.0
    }
}

impl From<DateTime<Utc>> for ZipDateTime {
    fn from(value: DateTime<Utc>) -> Self {
        Self::from_chrono(&value)
    }
}
