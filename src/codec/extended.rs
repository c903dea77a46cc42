// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Codec implementations for the non-scalar kinds.
//!
//! Strings and byte arrays encode raw, without a length prefix. Date-time
//! and duration use a 12-byte seconds-plus-subsecond split so the full
//! chrono range round-trips without overflow. Decimal uses the 16-byte
//! `rust_decimal` representation; GUID uses the RFC byte order of `uuid`.

use crate::codec::buffer::ByteBuffer;
use crate::codec::types::{expect_width, Codec};
use crate::error::{MemError, MemResult};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

impl Codec for String {
    const WIDTH: Option<usize> = None;

    fn encode(&self, buf: &mut ByteBuffer) {
        buf.put_slice(self.as_bytes());
    }

    fn decode(bytes: &[u8]) -> MemResult<Self> {
        match std::str::from_utf8(bytes) {
            Ok(s) => Ok(s.to_string()),
            Err(e) => Err(MemError::InvalidArgument {
                argument: "bytes".to_string(),
                reason: format!("invalid UTF-8: {}", e),
            }),
        }
    }
}

impl Codec for Vec<u8> {
    const WIDTH: Option<usize> = None;

    fn encode(&self, buf: &mut ByteBuffer) {
        buf.put_slice(self);
    }

    fn decode(bytes: &[u8]) -> MemResult<Self> {
        Ok(bytes.to_vec())
    }
}

impl Codec for Uuid {
    const WIDTH: Option<usize> = Some(16);

    fn encode(&self, buf: &mut ByteBuffer) {
        buf.put_slice(self.as_bytes());
    }

    fn decode(bytes: &[u8]) -> MemResult<Self> {
        let bytes = expect_width(bytes, 16, "Uuid")?;
        let mut raw = [0u8; 16];
        raw.copy_from_slice(bytes);
        Ok(Uuid::from_bytes(raw))
    }
}

impl Codec for Decimal {
    const WIDTH: Option<usize> = Some(16);

    fn encode(&self, buf: &mut ByteBuffer) {
        buf.put_slice(&self.serialize());
    }

    fn decode(bytes: &[u8]) -> MemResult<Self> {
        let bytes = expect_width(bytes, 16, "Decimal")?;
        let mut raw = [0u8; 16];
        raw.copy_from_slice(bytes);
        Ok(Decimal::deserialize(raw))
    }
}

impl Codec for DateTime<Utc> {
    const WIDTH: Option<usize> = Some(12);

    fn encode(&self, buf: &mut ByteBuffer) {
        buf.put_slice(&self.timestamp().to_le_bytes());
        buf.put_slice(&self.timestamp_subsec_nanos().to_le_bytes());
    }

    fn decode(bytes: &[u8]) -> MemResult<Self> {
        let bytes = expect_width(bytes, 12, "DateTime<Utc>")?;
        let mut secs = [0u8; 8];
        secs.copy_from_slice(&bytes[0..8]);
        let mut nanos = [0u8; 4];
        nanos.copy_from_slice(&bytes[8..12]);

        match DateTime::from_timestamp(i64::from_le_bytes(secs), u32::from_le_bytes(nanos)) {
            Some(dt) => Ok(dt),
            None => Err(MemError::InvalidArgument {
                argument: "bytes".to_string(),
                reason: "timestamp out of range".to_string(),
            }),
        }
    }
}

impl Codec for Duration {
    const WIDTH: Option<usize> = Some(12);

    fn encode(&self, buf: &mut ByteBuffer) {
        buf.put_slice(&self.num_seconds().to_le_bytes());
        buf.put_slice(&self.subsec_nanos().to_le_bytes());
    }

    fn decode(bytes: &[u8]) -> MemResult<Self> {
        let bytes = expect_width(bytes, 12, "Duration")?;
        let mut secs = [0u8; 8];
        secs.copy_from_slice(&bytes[0..8]);
        let mut nanos = [0u8; 4];
        nanos.copy_from_slice(&bytes[8..12]);

        let whole = match Duration::try_seconds(i64::from_le_bytes(secs)) {
            Some(d) => d,
            None => {
                return Err(MemError::InvalidArgument {
                    argument: "bytes".to_string(),
                    reason: "duration seconds out of range".to_string(),
                })
            }
        };
        match whole.checked_add(&Duration::nanoseconds(i32::from_le_bytes(nanos) as i64)) {
            Some(d) => Ok(d),
            None => Err(MemError::InvalidArgument {
                argument: "bytes".to_string(),
                reason: "duration out of range".to_string(),
            }),
        }
    }
}
