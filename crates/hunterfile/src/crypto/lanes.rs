use crate::error::{Error, Result};

pub const LANE_SIZE: usize = 4;

/// Reverse the byte order inside every 4-byte group, in place.
///
/// The game stores 32-bit words little-endian while the block cipher reads them
/// big-endian, so buffers are swapped on both sides of the cipher.
pub fn swap_lanes(bytes: &mut [u8]) -> Result<()> {
    if bytes.len() % LANE_SIZE != 0 {
        return Err(Error::SizeConstraintViolation(format!(
            "lane swap needs a multiple of {} bytes (got {})",
            LANE_SIZE,
            bytes.len()
        )));
    }
    bytes
        .chunks_exact_mut(LANE_SIZE)
        .for_each(|lane| lane.reverse());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_lanes_reverses_each_group() {
        let mut bytes = [1, 2, 3, 4, 5, 6, 7, 8];
        swap_lanes(&mut bytes).unwrap();
        assert_eq!(bytes, [4, 3, 2, 1, 8, 7, 6, 5]);
    }

    #[test]
    fn test_swap_lanes_twice_is_identity() {
        let original: Vec<u8> = (0..64).collect();
        let mut bytes = original.clone();
        swap_lanes(&mut bytes).unwrap();
        swap_lanes(&mut bytes).unwrap();
        assert_eq!(bytes, original);
    }

    #[test]
    fn test_swap_lanes_rejects_unaligned() {
        let mut bytes = [0u8; 6];
        assert!(matches!(
            swap_lanes(&mut bytes),
            Err(Error::SizeConstraintViolation(_))
        ));
    }
}
