// src/io/mod.rs
pub mod reader;
pub mod writer;

pub use reader::{decode_array, read_array_file};
pub use writer::{write_array, Endian, MemoryOrder};
