//! Fixed-width integer and byte-array stream codec.
//!
//! This is the lowest layer of btwire. Every multi-byte field the upper layers
//! put on the wire goes through one of two surfaces:
//! - [`codec`]: free functions over a caller-owned buffer and a cursor. No
//!   bounds checking beyond slice indexing; callers validate lengths first.
//! - [`cursor`]: [`StreamWriter`] / [`StreamReader`], which track remaining
//!   capacity and return [`StreamError::Overrun`] instead of panicking.
//!
//! Byte order is always chosen explicitly with [`Endian`].

pub mod codec;
pub mod cursor;
pub mod error;
pub mod fields;

pub use codec::{
    read_array, read_array_reversed, read_bd_addr, read_dev_class, read_field, read_i8, read_lap,
    read_octet16, read_octet32, read_octet8, read_reversed, read_u16, read_u24, read_u32,
    read_u64, read_u8, read_uint, write_array, write_array_reversed, write_bd_addr,
    write_dev_class, write_field, write_i8, write_lap, write_octet16, write_octet32, write_octet8,
    write_reversed, write_u16, write_u24, write_u32, write_u64, write_u8, write_uint, Endian,
};
pub use cursor::{StreamReader, StreamWriter};
pub use error::{Result, StreamError};
pub use fields::{
    BD_ADDR_LEN, BD_NAME_LEN, DEV_CLASS_LEN, LAP_LEN, OCTET16_LEN, OCTET32_LEN, OCTET8_LEN,
};
