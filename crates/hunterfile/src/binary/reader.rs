use crate::error::{Error, Result};

/// Bounds-checked little-endian cursor over an in-memory buffer
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Error::UnexpectedEof {
                offset: self.pos,
                needed: len - self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_bytes(N)?);
        Ok(buf)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }
}

/// Split a block of NUL-terminated strings into exactly `count` raw strings.
///
/// Returns `None` unless the block is exactly `count` terminated strings: too few
/// terminators, or bytes left after the last one, are both rejected.
pub fn split_cstrs(block: &[u8], count: usize) -> Option<Vec<&[u8]>> {
    // Every string needs its terminator, so a larger count can never fit
    if count > block.len() {
        return None;
    }
    let mut strings = Vec::with_capacity(count);
    let mut start = 0;
    for end in memchr::memchr_iter(0, block).take(count) {
        strings.push(&block[start..end]);
        start = end + 1;
    }
    (strings.len() == count && start == block.len()).then_some(strings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_integers() {
        let data = [1, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_u32().unwrap(), 1);
        assert_eq!(reader.read_i64().unwrap(), -1);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_read_past_end_reports_shortfall() {
        let data = [0u8; 6];
        let mut reader = ByteReader::new(&data);
        reader.read_u32().unwrap();
        match reader.read_u32() {
            Err(Error::UnexpectedEof { offset, needed }) => {
                assert_eq!(offset, 4);
                assert_eq!(needed, 2);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        // Failed reads don't move the cursor
        assert_eq!(reader.position(), 4);
    }

    #[test]
    fn test_split_cstrs() {
        let block = b"one\0\0three\0";
        let strings = split_cstrs(block, 3).unwrap();
        assert_eq!(strings, vec![&b"one"[..], &b""[..], &b"three"[..]]);
        assert!(split_cstrs(block, 4).is_none());
        assert_eq!(split_cstrs(b"", 0).unwrap().len(), 0);
    }

    #[test]
    fn test_split_cstrs_rejects_leftover_bytes() {
        assert!(split_cstrs(b"one\0two\0", 1).is_none());
        assert!(split_cstrs(b"XYZ\0", 0).is_none());
        assert!(split_cstrs(b"one\0tail", 1).is_none());
    }

    #[test]
    fn test_split_cstrs_count_larger_than_block() {
        assert!(split_cstrs(b"a\0", usize::MAX).is_none());
        assert!(split_cstrs(b"", 1).is_none());
    }
}
