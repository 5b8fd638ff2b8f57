//! Cursor-advancing integer and array codec over a caller-owned buffer.
//!
//! Every `write_*` copies exactly `width` bytes at `cursor` and returns the
//! advanced cursor; every `read_*` returns the decoded value with the advanced
//! cursor. One width-generic pair ([`write_uint`] / [`read_uint`]) implements
//! all integer widths.
//!
//! # Panics
//!
//! All functions here require `cursor + width <= buf.len()`. Callers (the
//! frame and APCF layers) validate lengths up front; an overrun is a caller
//! bug and panics on slice indexing. Use [`crate::StreamWriter`] /
//! [`crate::StreamReader`] when the length is not known to fit.

use crate::fields::{BD_ADDR_LEN, DEV_CLASS_LEN, LAP_LEN, OCTET16_LEN, OCTET32_LEN, OCTET8_LEN};

/// Byte order of a multi-byte field on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    /// Least significant byte first (HCI, L2CAP, ATT).
    Little,
    /// Most significant byte first (SDP, OBEX).
    Big,
}

/// Write the low `W` bytes of `value` at `cursor`.
///
/// Bytes of `value` above width `W` are discarded.
#[inline]
pub fn write_uint<const W: usize>(
    buf: &mut [u8],
    cursor: usize,
    value: u64,
    endian: Endian,
) -> usize {
    const { assert!(W >= 1 && W <= 8) };
    let dst = &mut buf[cursor..cursor + W];
    match endian {
        Endian::Little => dst.copy_from_slice(&value.to_le_bytes()[..W]),
        Endian::Big => dst.copy_from_slice(&value.to_be_bytes()[8 - W..]),
    }
    cursor + W
}

/// Read a `W`-byte unsigned integer at `cursor`, zero-extended to `u64`.
#[inline]
pub fn read_uint<const W: usize>(buf: &[u8], cursor: usize, endian: Endian) -> (u64, usize) {
    const { assert!(W >= 1 && W <= 8) };
    let src = &buf[cursor..cursor + W];
    let mut raw = [0u8; 8];
    let value = match endian {
        Endian::Little => {
            raw[..W].copy_from_slice(src);
            u64::from_le_bytes(raw)
        }
        Endian::Big => {
            raw[8 - W..].copy_from_slice(src);
            u64::from_be_bytes(raw)
        }
    };
    (value, cursor + W)
}

/// Write a `W`-byte field at `pos` without producing a new cursor.
#[inline]
pub fn write_field<const W: usize>(buf: &mut [u8], pos: usize, value: u64, endian: Endian) {
    write_uint::<W>(buf, pos, value, endian);
}

/// Read a `W`-byte field at `pos`, leaving any cursor where it was.
#[inline]
pub fn read_field<const W: usize>(buf: &[u8], pos: usize, endian: Endian) -> u64 {
    read_uint::<W>(buf, pos, endian).0
}

#[inline]
pub fn write_u8(buf: &mut [u8], cursor: usize, value: u8, endian: Endian) -> usize {
    write_uint::<1>(buf, cursor, u64::from(value), endian)
}

#[inline]
pub fn write_i8(buf: &mut [u8], cursor: usize, value: i8) -> usize {
    write_uint::<1>(buf, cursor, u64::from(value as u8), Endian::Little)
}

#[inline]
pub fn write_u16(buf: &mut [u8], cursor: usize, value: u16, endian: Endian) -> usize {
    write_uint::<2>(buf, cursor, u64::from(value), endian)
}

/// Write the low 24 bits of `value`; the top byte is dropped.
#[inline]
pub fn write_u24(buf: &mut [u8], cursor: usize, value: u32, endian: Endian) -> usize {
    write_uint::<3>(buf, cursor, u64::from(value), endian)
}

#[inline]
pub fn write_u32(buf: &mut [u8], cursor: usize, value: u32, endian: Endian) -> usize {
    write_uint::<4>(buf, cursor, u64::from(value), endian)
}

#[inline]
pub fn write_u64(buf: &mut [u8], cursor: usize, value: u64, endian: Endian) -> usize {
    write_uint::<8>(buf, cursor, value, endian)
}

#[inline]
pub fn read_u8(buf: &[u8], cursor: usize, endian: Endian) -> (u8, usize) {
    let (value, next) = read_uint::<1>(buf, cursor, endian);
    (value as u8, next)
}

#[inline]
pub fn read_i8(buf: &[u8], cursor: usize) -> (i8, usize) {
    let (value, next) = read_uint::<1>(buf, cursor, Endian::Little);
    (value as u8 as i8, next)
}

#[inline]
pub fn read_u16(buf: &[u8], cursor: usize, endian: Endian) -> (u16, usize) {
    let (value, next) = read_uint::<2>(buf, cursor, endian);
    (value as u16, next)
}

#[inline]
pub fn read_u24(buf: &[u8], cursor: usize, endian: Endian) -> (u32, usize) {
    let (value, next) = read_uint::<3>(buf, cursor, endian);
    (value as u32, next)
}

#[inline]
pub fn read_u32(buf: &[u8], cursor: usize, endian: Endian) -> (u32, usize) {
    let (value, next) = read_uint::<4>(buf, cursor, endian);
    (value as u32, next)
}

#[inline]
pub fn read_u64(buf: &[u8], cursor: usize, endian: Endian) -> (u64, usize) {
    read_uint::<8>(buf, cursor, endian)
}

/// Copy `src` to the stream in its original order.
#[inline]
pub fn write_array(buf: &mut [u8], cursor: usize, src: &[u8]) -> usize {
    buf[cursor..cursor + src.len()].copy_from_slice(src);
    cursor + src.len()
}

/// Fill `dst` from the stream in its original order.
#[inline]
pub fn read_array(buf: &[u8], cursor: usize, dst: &mut [u8]) -> usize {
    dst.copy_from_slice(&buf[cursor..cursor + dst.len()]);
    cursor + dst.len()
}

/// Copy `src` to the stream last byte first.
#[inline]
pub fn write_array_reversed(buf: &mut [u8], cursor: usize, src: &[u8]) -> usize {
    let dst = &mut buf[cursor..cursor + src.len()];
    for (d, s) in dst.iter_mut().zip(src.iter().rev()) {
        *d = *s;
    }
    cursor + src.len()
}

/// Fill `dst` from the stream so the first stream byte lands last.
#[inline]
pub fn read_array_reversed(buf: &[u8], cursor: usize, dst: &mut [u8]) -> usize {
    let src = &buf[cursor..cursor + dst.len()];
    for (d, s) in dst.iter_mut().zip(src.iter().rev()) {
        *d = *s;
    }
    cursor + dst.len()
}

/// Write a fixed-size field stored byte-reversed (addresses, device class,
/// LAP, 8/16/32-byte keys).
#[inline]
pub fn write_reversed<const N: usize>(buf: &mut [u8], cursor: usize, value: &[u8; N]) -> usize {
    write_array_reversed(buf, cursor, value)
}

/// Read a fixed-size field stored byte-reversed.
#[inline]
pub fn read_reversed<const N: usize>(buf: &[u8], cursor: usize) -> ([u8; N], usize) {
    let mut value = [0u8; N];
    let next = read_array_reversed(buf, cursor, &mut value);
    (value, next)
}

macro_rules! reversed_field {
    ($(#[$doc:meta])* $write:ident, $read:ident, $len:expr) => {
        $(#[$doc])*
        #[inline]
        pub fn $write(buf: &mut [u8], cursor: usize, value: &[u8; $len]) -> usize {
            write_reversed(buf, cursor, value)
        }

        $(#[$doc])*
        #[inline]
        pub fn $read(buf: &[u8], cursor: usize) -> ([u8; $len], usize) {
            read_reversed::<{ $len }>(buf, cursor)
        }
    };
}

reversed_field!(
    /// Device address, least significant byte first on the wire.
    write_bd_addr, read_bd_addr, BD_ADDR_LEN
);
reversed_field!(
    /// Class of device.
    write_dev_class, read_dev_class, DEV_CLASS_LEN
);
reversed_field!(
    /// Inquiry access code LAP.
    write_lap, read_lap, LAP_LEN
);
reversed_field!(write_octet8, read_octet8, OCTET8_LEN);
reversed_field!(
    /// 16-byte keys (link keys, LTK, IRK).
    write_octet16, read_octet16, OCTET16_LEN
);
reversed_field!(write_octet32, read_octet32, OCTET32_LEN);
