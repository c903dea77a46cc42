// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Codec implementations for the integer, float and bool kinds.

use crate::codec::buffer::ByteBuffer;
use crate::codec::types::{expect_width, Codec};
use crate::error::{MemError, MemResult};

/// Implement [`Codec`] for a primitive with `to_le_bytes`/`from_le_bytes`.
macro_rules! le_codec {
    ($ty:ty, $width:expr) => {
        impl Codec for $ty {
            const WIDTH: Option<usize> = Some($width);

            fn encode(&self, buf: &mut ByteBuffer) {
                buf.put_slice(&self.to_le_bytes());
            }

            fn decode(bytes: &[u8]) -> MemResult<Self> {
                let bytes = expect_width(bytes, $width, stringify!($ty))?;
                let mut raw = [0u8; $width];
                raw.copy_from_slice(bytes);
                Ok(<$ty>::from_le_bytes(raw))
            }
        }
    };
}

le_codec!(u8, 1);
le_codec!(i8, 1);
le_codec!(u16, 2);
le_codec!(i16, 2);
le_codec!(u32, 4);
le_codec!(i32, 4);
le_codec!(u64, 8);
le_codec!(i64, 8);
le_codec!(f32, 4);
le_codec!(f64, 8);

impl Codec for bool {
    const WIDTH: Option<usize> = Some(1);

    fn encode(&self, buf: &mut ByteBuffer) {
        buf.push(*self as u8);
    }

    fn decode(bytes: &[u8]) -> MemResult<Self> {
        let bytes = expect_width(bytes, 1, "bool")?;
        match bytes[0] {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(MemError::InvalidArgument {
                argument: "bytes".to_string(),
                reason: format!("bool byte must be 0 or 1, got {}", other),
            }),
        }
    }
}
