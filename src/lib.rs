// src/lib.rs
pub mod array;
pub mod batch;
pub mod cli;
pub mod error;
pub mod io;
pub mod numeric;
pub mod writer;

pub use array::{ArrayHandle, TypedArray};
pub use error::WriterError;
pub use io::{Endian, MemoryOrder};
pub use numeric::{ElemType, FiniteRange, NumericKind, ScalerKind};
pub use writer::{
    get_slope_inter, make_array_writer, ArrayWriter, DirectWriter, SlopeInterWriter, SlopeWriter,
};

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
