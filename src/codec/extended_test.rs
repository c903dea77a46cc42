// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Tests for string, byte-array, GUID, decimal and time codecs.

#[cfg(test)]
mod tests {
    use crate::codec::buffer::ByteBuffer;
    use crate::codec::types::Codec;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use uuid::Uuid;

    fn round_trip<T: Codec + PartialEq + std::fmt::Debug>(value: T) {
        let mut buf = ByteBuffer::new();
        value.encode(&mut buf);
        assert_eq!(T::decode(buf.as_slice()).unwrap(), value);
    }

    #[test]
    fn test_string_is_raw_utf8() {
        let mut buf = ByteBuffer::new();
        "grüße".to_string().encode(&mut buf);
        assert_eq!(buf.as_slice(), "grüße".as_bytes());
        round_trip(String::new());
        round_trip("page.title@de".to_string());
    }

    #[test]
    fn test_string_rejects_invalid_utf8() {
        assert!(String::decode(&[0xFF, 0xFE]).is_err());
    }

    #[test]
    fn test_bytes_round_trip() {
        round_trip(Vec::<u8>::new());
        round_trip(vec![0u8, 255, 128, 1]);
    }

    #[test]
    fn test_uuid_round_trip() {
        round_trip(Uuid::nil());
        round_trip(Uuid::new_v4());
    }

    #[test]
    fn test_uuid_uses_rfc_byte_order() {
        let id = Uuid::from_str("01020304-0506-0708-090a-0b0c0d0e0f10").unwrap();
        let mut buf = ByteBuffer::new();
        id.encode(&mut buf);
        assert_eq!(buf.as_slice()[0], 0x01);
        assert_eq!(buf.as_slice()[15], 0x10);
    }

    #[test]
    fn test_decimal_round_trip() {
        round_trip(Decimal::ZERO);
        round_trip(Decimal::from_str("-79228162514264337593543950335").unwrap());
        round_trip(Decimal::from_str("3.1415926535897932384626433832").unwrap());
    }

    #[test]
    fn test_datetime_round_trip() {
        let dt: DateTime<Utc> = Utc.with_ymd_and_hms(2025, 10, 31, 23, 59, 58).unwrap();
        round_trip(dt);
        round_trip(dt + Duration::nanoseconds(123_456_789));
        round_trip(DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_datetime_before_epoch() {
        let dt: DateTime<Utc> = Utc.with_ymd_and_hms(1903, 1, 2, 3, 4, 5).unwrap();
        round_trip(dt);
    }

    #[test]
    fn test_duration_round_trip() {
        round_trip(Duration::zero());
        round_trip(Duration::days(365) + Duration::nanoseconds(999_999_999));
        round_trip(-Duration::hours(48) - Duration::nanoseconds(17));
    }

    #[test]
    fn test_fixed_widths() {
        assert_eq!(<Uuid as Codec>::WIDTH, Some(16));
        assert_eq!(<Decimal as Codec>::WIDTH, Some(16));
        assert_eq!(<DateTime<Utc> as Codec>::WIDTH, Some(12));
        assert_eq!(<Duration as Codec>::WIDTH, Some(12));
        assert_eq!(<String as Codec>::WIDTH, None);
    }
}
