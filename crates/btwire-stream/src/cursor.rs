use crate::codec::{self, Endian};
use crate::error::{Result, StreamError};
use crate::fields::BD_ADDR_LEN;

/// Bounds-checked writer over a caller-owned buffer.
///
/// Each `put_*` checks the remaining capacity once, then hands off to the
/// unchecked codec. On error nothing is written and the position is unchanged.
#[derive(Debug)]
pub struct StreamWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> StreamWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current cursor position (bytes written so far).
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// The bytes written so far.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(StreamError::Overrun { needed, remaining });
        }
        Ok(())
    }

    /// Write the low `W` bytes of `value`.
    pub fn put_uint<const W: usize>(&mut self, value: u64, endian: Endian) -> Result<()> {
        self.ensure(W)?;
        self.pos = codec::write_uint::<W>(self.buf, self.pos, value, endian);
        Ok(())
    }

    pub fn put_u8(&mut self, value: u8) -> Result<()> {
        self.put_uint::<1>(u64::from(value), Endian::Little)
    }

    pub fn put_i8(&mut self, value: i8) -> Result<()> {
        self.put_u8(value as u8)
    }

    pub fn put_u16(&mut self, value: u16, endian: Endian) -> Result<()> {
        self.put_uint::<2>(u64::from(value), endian)
    }

    pub fn put_u24(&mut self, value: u32, endian: Endian) -> Result<()> {
        self.put_uint::<3>(u64::from(value), endian)
    }

    pub fn put_u32(&mut self, value: u32, endian: Endian) -> Result<()> {
        self.put_uint::<4>(u64::from(value), endian)
    }

    pub fn put_u64(&mut self, value: u64, endian: Endian) -> Result<()> {
        self.put_uint::<8>(value, endian)
    }

    pub fn put_slice(&mut self, src: &[u8]) -> Result<()> {
        self.ensure(src.len())?;
        self.pos = codec::write_array(self.buf, self.pos, src);
        Ok(())
    }

    pub fn put_slice_reversed(&mut self, src: &[u8]) -> Result<()> {
        self.ensure(src.len())?;
        self.pos = codec::write_array_reversed(self.buf, self.pos, src);
        Ok(())
    }

    /// Write a device address in wire order (reversed).
    pub fn put_bd_addr(&mut self, addr: &[u8; BD_ADDR_LEN]) -> Result<()> {
        self.ensure(BD_ADDR_LEN)?;
        self.pos = codec::write_bd_addr(self.buf, self.pos, addr);
        Ok(())
    }
}

/// Bounds-checked reader over a borrowed buffer.
#[derive(Debug, Clone)]
pub struct StreamReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> StreamReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Unread tail of the buffer.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(StreamError::Overrun { needed, remaining });
        }
        Ok(())
    }

    pub fn get_uint<const W: usize>(&mut self, endian: Endian) -> Result<u64> {
        self.ensure(W)?;
        let (value, next) = codec::read_uint::<W>(self.buf, self.pos, endian);
        self.pos = next;
        Ok(value)
    }

    pub fn get_u8(&mut self) -> Result<u8> {
        Ok(self.get_uint::<1>(Endian::Little)? as u8)
    }

    pub fn get_i8(&mut self) -> Result<i8> {
        Ok(self.get_u8()? as i8)
    }

    pub fn get_u16(&mut self, endian: Endian) -> Result<u16> {
        Ok(self.get_uint::<2>(endian)? as u16)
    }

    pub fn get_u24(&mut self, endian: Endian) -> Result<u32> {
        Ok(self.get_uint::<3>(endian)? as u32)
    }

    pub fn get_u32(&mut self, endian: Endian) -> Result<u32> {
        Ok(self.get_uint::<4>(endian)? as u32)
    }

    pub fn get_u64(&mut self, endian: Endian) -> Result<u64> {
        self.get_uint::<8>(endian)
    }

    /// Borrow the next `len` bytes.
    pub fn get_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        self.ensure(len)?;
        let out = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    pub fn get_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.ensure(N)?;
        let mut out = [0u8; N];
        self.pos = codec::read_array(self.buf, self.pos, &mut out);
        Ok(out)
    }

    pub fn get_array_reversed<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.ensure(N)?;
        let (out, next) = codec::read_reversed::<N>(self.buf, self.pos);
        self.pos = next;
        Ok(out)
    }

    pub fn get_bd_addr(&mut self) -> Result<[u8; BD_ADDR_LEN]> {
        self.ensure(BD_ADDR_LEN)?;
        let (addr, next) = codec::read_bd_addr(self.buf, self.pos);
        self.pos = next;
        Ok(addr)
    }

    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.ensure(len)?;
        self.pos += len;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_tracks_position_and_remaining() {
        let mut buf = [0u8; 8];
        let mut w = StreamWriter::new(&mut buf);
        w.put_u8(0x01).unwrap();
        w.put_u16(0x0203, Endian::Big).unwrap();
        assert_eq!(w.position(), 3);
        assert_eq!(w.remaining(), 5);
        assert_eq!(w.written(), &[0x01, 0x02, 0x03]);
    }

    #[test]
    fn writer_rejects_overrun_without_writing() {
        let mut buf = [0u8; 3];
        let mut w = StreamWriter::new(&mut buf);
        w.put_u8(0xaa).unwrap();
        let err = w.put_u32(0xffff_ffff, Endian::Little).unwrap_err();
        assert_eq!(
            err,
            StreamError::Overrun {
                needed: 4,
                remaining: 2
            }
        );
        assert_eq!(w.position(), 1);
        assert_eq!(buf, [0xaa, 0x00, 0x00]);
    }

    #[test]
    fn reader_mirrors_writer() {
        let mut buf = [0u8; 20];
        let mut w = StreamWriter::new(&mut buf);
        w.put_i8(-60).unwrap();
        w.put_u24(0x0a0b0c, Endian::Little).unwrap();
        w.put_u64(42, Endian::Big).unwrap();
        w.put_bd_addr(&[1, 2, 3, 4, 5, 6]).unwrap();
        let len = w.position();

        let mut r = StreamReader::new(&buf[..len]);
        assert_eq!(r.get_i8().unwrap(), -60);
        assert_eq!(r.get_u24(Endian::Little).unwrap(), 0x0a0b0c);
        assert_eq!(r.get_u64(Endian::Big).unwrap(), 42);
        assert_eq!(r.get_bd_addr().unwrap(), [1, 2, 3, 4, 5, 6]);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn reader_skip_and_slice() {
        let buf = [9u8, 8, 7, 6, 5];
        let mut r = StreamReader::new(&buf);
        r.skip(2).unwrap();
        assert_eq!(r.get_slice(2).unwrap(), &[7, 6]);
        assert_eq!(r.rest(), &[5]);
        assert!(matches!(
            r.get_u16(Endian::Little),
            Err(StreamError::Overrun {
                needed: 2,
                remaining: 1
            })
        ));
        assert_eq!(r.position(), 4);
    }

    #[test]
    fn reader_fixed_arrays() {
        let buf = [1u8, 2, 3, 1, 2, 3];
        let mut r = StreamReader::new(&buf);
        assert_eq!(r.get_array::<3>().unwrap(), [1, 2, 3]);
        assert_eq!(r.get_array_reversed::<3>().unwrap(), [3, 2, 1]);
    }
}
