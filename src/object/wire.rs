//! primitives for the binary object framing.
//!
//! strings are length-prefixed: a 2-byte big-endian length followed by the
//! UTF-8 bytes. counts and sizes are fixed 4-byte big-endian integers.
//! this framing must stay stable: object ids are computed over it.

use std::io::{self, Read, Write};

use crate::error::Result;

pub fn write_u32(writer: &mut impl Write, value: u32) -> Result<()> {
    writer.write_all(&value.to_be_bytes())?;
    Ok(())
}

pub fn read_u32(reader: &mut impl Read) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

pub fn write_u8(writer: &mut impl Write, value: u8) -> Result<()> {
    writer.write_all(&[value])?;
    Ok(())
}

pub fn read_u8(reader: &mut impl Read) -> Result<u8> {
    let mut buf = [0u8; 1];
    reader.read_exact(&mut buf)?;
    Ok(buf[0])
}

pub fn write_string(writer: &mut impl Write, value: &str) -> Result<()> {
    let len = u16::try_from(value.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("string of {} bytes exceeds the 2-byte length prefix", value.len()),
        )
    })?;
    writer.write_all(&len.to_be_bytes())?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

pub fn read_string(reader: &mut impl Read) -> Result<String> {
    let mut len_buf = [0u8; 2];
    reader.read_exact(&mut len_buf)?;
    let len = u16::from_be_bytes(len_buf) as usize;
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u32_roundtrip() {
        let mut buf = Vec::new();
        write_u32(&mut buf, 0xdead_beef).unwrap();
        assert_eq!(buf, [0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(read_u32(&mut &buf[..]).unwrap(), 0xdead_beef);
    }

    #[test]
    fn test_string_roundtrip() {
        let mut buf = Vec::new();
        write_string(&mut buf, "hello").unwrap();
        // 2-byte big-endian length then the utf-8 bytes
        assert_eq!(&buf[..2], [0, 5]);
        assert_eq!(&buf[2..], b"hello");
        assert_eq!(read_string(&mut &buf[..]).unwrap(), "hello");
    }

    #[test]
    fn test_empty_string_roundtrip() {
        let mut buf = Vec::new();
        write_string(&mut buf, "").unwrap();
        assert_eq!(buf, [0, 0]);
        assert_eq!(read_string(&mut &buf[..]).unwrap(), "");
    }

    #[test]
    fn test_string_too_long() {
        let long = "x".repeat(usize::from(u16::MAX) + 1);
        let mut buf = Vec::new();
        assert!(write_string(&mut buf, &long).is_err());
    }

    #[test]
    fn test_read_string_truncated() {
        let mut buf = Vec::new();
        write_string(&mut buf, "hello").unwrap();
        buf.truncate(4);
        assert!(read_string(&mut &buf[..]).is_err());
    }

    #[test]
    fn test_read_string_invalid_utf8() {
        let buf = [0u8, 2, 0xff, 0xfe];
        assert!(read_string(&mut &buf[..]).is_err());
    }
}
