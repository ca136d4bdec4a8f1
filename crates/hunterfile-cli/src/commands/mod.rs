//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod gmd;
pub mod hex_utils;
pub mod hexdump;
pub mod info;
pub mod save;
