use std::fmt;

use blowfish::Blowfish;
use blowfish::cipher::generic_array::GenericArray;
use blowfish::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};

use super::lanes::swap_lanes;
use crate::binary::layout::save_header::PLAIN_MAGIC;
use crate::error::{Error, Result};

/// Passphrase the game encrypts SAVEDATA with.
///
/// This is a published, reverse-engineered format constant. The encryption it keys
/// gives no confidentiality whatsoever.
pub const SAVE_KEY: &[u8] = b"xieZjoe#P2134-3zmaghgpqoe0z8$3azeq";

/// Blowfish block size in bytes
pub const BLOCK_SIZE: usize = 8;

/// Whether a SAVEDATA buffer is already decrypted (starts with `01 00 00 00`)
pub fn is_plaintext(bytes: &[u8]) -> bool {
    bytes.starts_with(&PLAIN_MAGIC)
}

/// Whole-buffer SAVEDATA transform: lane swap, Blowfish-ECB, lane swap.
///
/// Deterministic (no IV, no chaining), so re-encrypting an unmodified buffer
/// reproduces the original file.
#[derive(Clone)]
pub struct SaveCipher {
    cipher: Blowfish,
}

impl SaveCipher {
    /// Cipher keyed with the game's passphrase
    pub fn new() -> Result<Self> {
        Self::with_key(SAVE_KEY)
    }

    pub fn with_key(key: &[u8]) -> Result<Self> {
        let cipher: Blowfish = Blowfish::new_from_slice(key).map_err(|_| {
            Error::SizeConstraintViolation(format!(
                "Blowfish keys must be 4 to 56 bytes (got {})",
                key.len()
            ))
        })?;
        Ok(Self { cipher })
    }

    pub fn encrypted_from(&self, plain: &[u8]) -> Result<Vec<u8>> {
        check_aligned(plain.len())?;
        let mut data = plain.to_vec();
        swap_lanes(&mut data)?;
        for block in data.chunks_exact_mut(BLOCK_SIZE) {
            self.cipher
                .encrypt_block(GenericArray::from_mut_slice(block));
        }
        swap_lanes(&mut data)?;
        Ok(data)
    }

    pub fn plain_from(&self, encrypted: &[u8]) -> Result<Vec<u8>> {
        check_aligned(encrypted.len())?;
        let mut data = encrypted.to_vec();
        swap_lanes(&mut data)?;
        for block in data.chunks_exact_mut(BLOCK_SIZE) {
            self.cipher
                .decrypt_block(GenericArray::from_mut_slice(block));
        }
        swap_lanes(&mut data)?;
        Ok(data)
    }
}

impl fmt::Debug for SaveCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaveCipher").finish_non_exhaustive()
    }
}

fn check_aligned(len: usize) -> Result<()> {
    if len == 0 || len % BLOCK_SIZE != 0 {
        return Err(Error::SizeConstraintViolation(format!(
            "cipher input must be a non-zero multiple of {} bytes (got {})",
            BLOCK_SIZE, len
        )));
    }
    Ok(())
}
