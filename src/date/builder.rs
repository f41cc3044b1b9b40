// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::ZipDateTime;

/// A builder for [`ZipDateTime`].
///
/// Out-of-range components are masked to the width of their MS-DOS bit field.
pub struct ZipDateTimeBuilder(pub(crate) ZipDateTime);

impl From<ZipDateTime> for ZipDateTimeBuilder {
    fn from(date: ZipDateTime) -> Self {
        Self(date)
    }
}

impl Default for ZipDateTimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ZipDateTimeBuilder {
    /// Constructs a new builder with every component zeroed.
    pub fn new() -> Self {
        Self(ZipDateTime { date: 0, time: 0 })
    }

    /// Sets the date and time's year.
    pub fn year(mut self, year: i32) -> Self {
        let offset = (year - 1980).clamp(0, 0x7F) as u16;
        self.0.date = (self.0.date & !0xFE00) | (offset << 9);
        self
    }

    /// Sets the date and time's month.
    pub fn month(mut self, month: u32) -> Self {
        self.0.date = (self.0.date & !0x1E0) | (((month & 0xF) as u16) << 5);
        self
    }

    /// Sets the date and time's day.
    pub fn day(mut self, day: u32) -> Self {
        self.0.date = (self.0.date & !0x1F) | (day & 0x1F) as u16;
        self
    }

    /// Sets the date and time's hour.
    pub fn hour(mut self, hour: u32) -> Self {
        self.0.time = (self.0.time & !0xF800) | (((hour & 0x1F) as u16) << 11);
        self
    }

    /// Sets the date and time's minute.
    pub fn minute(mut self, minute: u32) -> Self {
        self.0.time = (self.0.time & !0x7E0) | (((minute & 0x3F) as u16) << 5);
        self
    }

    /// Sets the date and time's second.
    ///
    /// Note that MS-DOS has a maximum granularity of two seconds.
    pub fn second(mut self, second: u32) -> Self {
        self.0.time = (self.0.time & !0x1F) | ((second >> 1) & 0x1F) as u16;
        self
    }

    /// Consumes this builder and returns a final [`ZipDateTime`].
    pub fn build(self) -> ZipDateTime {
        self.into()
    }
}
