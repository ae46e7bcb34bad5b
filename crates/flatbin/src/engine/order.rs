// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Byte order policy.

use byteorder::{BigEndian, ByteOrder as _, LittleEndian};

/// Endianness applied to every multi-byte primitive of one encoder/decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    BigEndian,
    LittleEndian,
}

/// Generate a read/write pair dispatching on the configured order.
macro_rules! impl_order_rw {
    ($read:ident, $write:ident, $type:ty) => {
        #[inline]
        pub fn $read(self, buf: &[u8]) -> $type {
            match self {
                Self::BigEndian => BigEndian::$read(buf),
                Self::LittleEndian => LittleEndian::$read(buf),
            }
        }

        #[inline]
        pub fn $write(self, buf: &mut [u8], value: $type) {
            match self {
                Self::BigEndian => BigEndian::$write(buf, value),
                Self::LittleEndian => LittleEndian::$write(buf, value),
            }
        }
    };
}

impl ByteOrder {
    /// Byte order of the host.
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::BigEndian
        } else {
            Self::LittleEndian
        }
    }

    impl_order_rw!(read_u16, write_u16, u16);
    impl_order_rw!(read_u32, write_u32, u32);
    impl_order_rw!(read_u64, write_u64, u64);
}

impl Default for ByteOrder {
    fn default() -> Self {
        crate::config::DEFAULT_BYTE_ORDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_round_trip() {
        let mut buf = [0u8; 8];
        ByteOrder::BigEndian.write_u32(&mut buf, 0x0102_0304);
        assert_eq!(&buf[..4], &[1, 2, 3, 4]);
        assert_eq!(ByteOrder::BigEndian.read_u32(&buf), 0x0102_0304);

        ByteOrder::LittleEndian.write_u64(&mut buf, 0x0102_0304_0506_0708);
        assert_eq!(buf, [8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(ByteOrder::LittleEndian.read_u16(&buf), 0x0708);
    }
}
