// src/numeric/mod.rs
pub mod kind;
pub mod range;

pub use kind::{casts_losslessly, ElemType, NumericKind, ScalerKind};
pub use range::{finite_range, shared_range, FiniteRange};
