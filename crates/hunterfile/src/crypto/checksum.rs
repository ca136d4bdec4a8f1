//! SAVEDATA integrity digest.
//!
//! SHA-1 over everything after the header, stored lane-swapped in the header's
//! checksum window. This only satisfies the game's load-time check; it authenticates
//! nothing. Any change to the covered range must be followed by [`fix`].

use sha1::{Digest, Sha1};

use super::lanes::swap_lanes;
use crate::binary::layout::{save_data, save_header};
use crate::error::{Error, Result};

pub const DIGEST_SIZE: usize = 20;

/// Compute the digest window value for a decrypted buffer
pub fn digest(plain: &[u8]) -> Result<[u8; DIGEST_SIZE]> {
    if plain.len() < save_data::CHECKSUM_START {
        return Err(Error::SizeConstraintViolation(format!(
            "checksum needs at least {} bytes (got {})",
            save_data::CHECKSUM_START,
            plain.len()
        )));
    }

    let mut window = [0u8; DIGEST_SIZE];
    window.copy_from_slice(&Sha1::digest(&plain[save_data::CHECKSUM_START..]));
    swap_lanes(&mut window)?;
    Ok(window)
}

/// Recompute the digest and patch it into the header
pub fn fix(plain: &mut [u8]) -> Result<[u8; DIGEST_SIZE]> {
    let window = digest(plain)?;
    save_header::CHECKSUM
        .bytes_mut(plain)
        .copy_from_slice(&window);
    Ok(window)
}

/// Whether the stored digest matches the payload
pub fn verify(plain: &[u8]) -> Result<bool> {
    let window = digest(plain)?;
    Ok(save_header::CHECKSUM.bytes(plain) == window)
}
