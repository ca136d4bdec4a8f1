use crate::error::{Error, Result};

/// One named field of a fixed-size record: where it sits and how wide it is.
///
/// Records are plain byte slices whose length is guaranteed by their owner, so the
/// accessors index directly and only the string writer can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
}

impl Field {
    pub const fn new(name: &'static str, offset: usize, width: usize) -> Self {
        Self {
            name,
            offset,
            width,
        }
    }

    /// First byte past the field
    pub const fn end(&self) -> usize {
        self.offset + self.width
    }

    pub fn bytes<'a>(&self, record: &'a [u8]) -> &'a [u8] {
        &record[self.offset..self.end()]
    }

    pub fn bytes_mut<'a>(&self, record: &'a mut [u8]) -> &'a mut [u8] {
        &mut record[self.offset..self.end()]
    }

    pub fn read_u32(&self, record: &[u8]) -> u32 {
        u32::from_le_bytes(self.array::<4>(record))
    }

    pub fn read_i32(&self, record: &[u8]) -> i32 {
        i32::from_le_bytes(self.array::<4>(record))
    }

    pub fn read_u64(&self, record: &[u8]) -> u64 {
        u64::from_le_bytes(self.array::<8>(record))
    }

    pub fn read_i64(&self, record: &[u8]) -> i64 {
        i64::from_le_bytes(self.array::<8>(record))
    }

    pub fn write_u32(&self, record: &mut [u8], value: u32) {
        debug_assert_eq!(self.width, 4, "{} is not a 32-bit field", self.name);
        self.bytes_mut(record).copy_from_slice(&value.to_le_bytes());
    }

    pub fn write_i32(&self, record: &mut [u8], value: i32) {
        debug_assert_eq!(self.width, 4, "{} is not a 32-bit field", self.name);
        self.bytes_mut(record).copy_from_slice(&value.to_le_bytes());
    }

    pub fn write_u64(&self, record: &mut [u8], value: u64) {
        debug_assert_eq!(self.width, 8, "{} is not a 64-bit field", self.name);
        self.bytes_mut(record).copy_from_slice(&value.to_le_bytes());
    }

    pub fn write_i64(&self, record: &mut [u8], value: i64) {
        debug_assert_eq!(self.width, 8, "{} is not a 64-bit field", self.name);
        self.bytes_mut(record).copy_from_slice(&value.to_le_bytes());
    }

    /// Read a NUL-padded UTF-8 string. Invalid sequences are replaced rather than
    /// rejected; the raw bytes stay untouched in the record either way.
    pub fn read_str(&self, record: &[u8]) -> String {
        let raw = self.bytes(record);
        let len = memchr::memchr(0, raw).unwrap_or(raw.len());
        String::from_utf8_lossy(&raw[..len]).into_owned()
    }

    /// Write a UTF-8 string, zero-filling the rest of the field.
    ///
    /// The string may use the full width; a terminator is only written when there is
    /// room for one.
    pub fn write_str(&self, record: &mut [u8], value: &str) -> Result<()> {
        let encoded = value.as_bytes();
        if encoded.len() > self.width {
            return Err(Error::SizeConstraintViolation(format!(
                "{} can't use more than {} bytes (got {})",
                self.name,
                self.width,
                encoded.len()
            )));
        }
        if encoded.contains(&0) {
            return Err(Error::InvalidText(format!(
                "{} can't contain NUL characters",
                self.name
            )));
        }

        let dest = self.bytes_mut(record);
        dest.fill(0);
        dest[..encoded.len()].copy_from_slice(encoded);
        Ok(())
    }

    fn array<const N: usize>(&self, record: &[u8]) -> [u8; N] {
        debug_assert_eq!(self.width, N, "{} is not {} bytes wide", self.name, N);
        let mut buf = [0u8; N];
        buf.copy_from_slice(&record[self.offset..self.offset + N]);
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALUE: Field = Field::new("Value", 4, 4);
    const WIDE: Field = Field::new("Wide", 8, 8);
    const NAME: Field = Field::new("Name", 16, 8);

    #[test]
    fn test_integer_fields_are_little_endian() {
        let mut record = [0u8; 24];
        VALUE.write_i32(&mut record, -2);
        WIDE.write_u64(&mut record, 0x0102_0304_0506_0708);

        assert_eq!(record[4..8], [0xFE, 0xFF, 0xFF, 0xFF]);
        assert_eq!(record[8], 0x08);
        assert_eq!(VALUE.read_i32(&record), -2);
        assert_eq!(VALUE.read_u32(&record), 0xFFFF_FFFE);
        assert_eq!(WIDE.read_u64(&record), 0x0102_0304_0506_0708);
    }

    #[test]
    fn test_write_str_zero_fills_previous_value() {
        let mut record = [0u8; 24];
        NAME.write_str(&mut record, "Longname").unwrap();
        NAME.write_str(&mut record, "Abc").unwrap();

        assert_eq!(NAME.read_str(&record), "Abc");
        assert_eq!(&record[16..24], b"Abc\0\0\0\0\0");
    }

    #[test]
    fn test_write_str_accepts_exact_width() {
        let mut record = [0u8; 24];
        NAME.write_str(&mut record, "12345678").unwrap();
        assert_eq!(NAME.read_str(&record), "12345678");
    }

    #[test]
    fn test_write_str_rejects_overflow_without_touching_record() {
        let mut record = [0u8; 24];
        NAME.write_str(&mut record, "Keep").unwrap();

        let err = NAME.write_str(&mut record, "123456789").unwrap_err();
        assert!(matches!(err, Error::SizeConstraintViolation(_)));
        assert_eq!(NAME.read_str(&record), "Keep");
    }

    #[test]
    fn test_write_str_rejects_nul() {
        let mut record = [0u8; 24];
        assert!(matches!(
            NAME.write_str(&mut record, "a\0b"),
            Err(Error::InvalidText(_))
        ));
    }
}
