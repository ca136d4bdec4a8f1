//! SAVEDATA encryption and integrity transforms.

pub mod checksum;
mod cipher;
mod lanes;

pub use cipher::{BLOCK_SIZE, SAVE_KEY, SaveCipher, is_plaintext};
pub use lanes::{LANE_SIZE, swap_lanes};
