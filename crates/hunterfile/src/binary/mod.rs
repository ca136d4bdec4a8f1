//! Fixed-layout record access.
//!
//! Records are described by explicit offset tables in [`layout`] and read or written
//! through [`Field`]. Variable-length parts of a file go through [`ByteReader`] and
//! [`ByteWriter`].

mod field;
pub mod layout;
mod reader;
mod writer;

pub use field::Field;
pub use reader::{ByteReader, split_cstrs};
pub use writer::ByteWriter;
