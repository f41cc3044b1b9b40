// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use chrono::{TimeZone, Utc};

use crate::{ZipDateTime, ZipDateTimeBuilder};

#[test]
fn date_conversion_test_chrono() {
    let original_dt = Utc.timestamp_opt(1666544102, 0).unwrap();
    let zip_dt = ZipDateTime::from_chrono(&original_dt);
    let result_dt = zip_dt.as_chrono().single().expect("expected single unique result");
    assert_eq!(result_dt, original_dt);
}

#[test]
fn date_builder_test() {
    let built = ZipDateTimeBuilder::new().year(2000).month(9).day(8).hour(7).minute(5).second(4).build();

    assert_eq!(built.year(), 2000);
    assert_eq!(built.month(), 9);
    assert_eq!(built.day(), 8);
    assert_eq!(built.hour(), 7);
    assert_eq!(built.minute(), 5);
    assert_eq!(built.second(), 4);
}

#[test]
fn date_before_epoch_is_clamped() {
    let original_dt = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(ZipDateTime::from_chrono(&original_dt).year(), 1980);
}

#[test]
fn odd_seconds_round_down() {
    let built = ZipDateTimeBuilder::new().year(2024).month(2).day(29).hour(23).minute(59).second(59).build();
    assert_eq!(built.second(), 58);
}
