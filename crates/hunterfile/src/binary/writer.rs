/// Appending little-endian writer
#[derive(Debug, Clone, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Write the bytes followed by a NUL terminator
    pub fn write_cstr(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
        self.buf.push(0);
    }

    /// Append zeros until the buffer is `len` bytes long
    pub fn pad_to(&mut self, len: usize) {
        if self.buf.len() < len {
            self.buf.resize(len, 0);
        }
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_layout() {
        let mut writer = ByteWriter::new();
        writer.write_u32(0x0102_0304);
        writer.write_cstr(b"ab");
        writer.write_i64(-1);
        writer.pad_to(20);

        let bytes = writer.into_inner();
        assert_eq!(bytes.len(), 20);
        assert_eq!(bytes[..4], [4, 3, 2, 1]);
        assert_eq!(&bytes[4..7], b"ab\0");
        assert_eq!(bytes[7..15], [0xFF; 8]);
        assert_eq!(bytes[15..], [0; 5]);
    }

    #[test]
    fn test_pad_to_never_truncates() {
        let mut writer = ByteWriter::new();
        writer.write_u64(7);
        writer.pad_to(4);
        assert_eq!(writer.len(), 8);
    }
}
