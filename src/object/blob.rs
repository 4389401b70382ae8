use std::io::{Read, Write};
use std::rc::Rc;

use crate::error::Result;
use crate::hash::Hash;
use crate::object::wire;

/// the content being stored in version control.
///
/// the payload is shared by reference so that checkout and the tree
/// builder can hand the same bytes to several holders without copying.
#[derive(Clone, Debug, PartialEq)]
pub struct Blob {
    /// assigned when the blob is written to the object store
    pub hash: Hash,
    pub bytes: Rc<[u8]>,
}

impl Blob {
    pub fn new(bytes: impl Into<Rc<[u8]>>) -> Self {
        Self {
            hash: Hash::default(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// wire format: a 4-byte big-endian length then the payload bytes
    pub fn encode(&self, writer: &mut impl Write) -> Result<()> {
        wire::write_u32(writer, self.bytes.len() as u32)?;
        if !self.bytes.is_empty() {
            writer.write_all(&self.bytes)?;
        }
        Ok(())
    }

    pub fn decode(reader: &mut impl Read) -> Result<Self> {
        let len = wire::read_u32(reader)? as usize;
        let mut bytes = vec![0u8; len];
        if len > 0 {
            reader.read_exact(&mut bytes)?;
        }
        Ok(Self::new(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(blob: &Blob) -> Blob {
        let mut buf = Vec::new();
        blob.encode(&mut buf).unwrap();
        Blob::decode(&mut &buf[..]).unwrap()
    }

    #[test]
    fn test_blob_roundtrip() {
        let blob = Blob::new(&b"Hello World"[..]);
        assert_eq!(roundtrip(&blob), blob);
    }

    #[test]
    fn test_empty_blob_roundtrip() {
        let blob = Blob::new(&b""[..]);
        let decoded = roundtrip(&blob);
        assert!(decoded.is_empty());
        assert_eq!(decoded, blob);
    }

    #[test]
    fn test_blob_encoding_layout() {
        let blob = Blob::new(&b"ab"[..]);
        let mut buf = Vec::new();
        blob.encode(&mut buf).unwrap();
        assert_eq!(buf, [0, 0, 0, 2, b'a', b'b']);
    }

    #[test]
    fn test_blob_decode_truncated() {
        let buf = [0u8, 0, 0, 10, b'a'];
        assert!(Blob::decode(&mut &buf[..]).is_err());
    }

    #[test]
    fn test_blob_shares_bytes() {
        let blob = Blob::new(&b"shared"[..]);
        let other = blob.clone();
        assert!(Rc::ptr_eq(&blob.bytes, &other.bytes));
    }
}
