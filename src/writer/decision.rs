// src/writer/decision.rs
use crate::error::{Result, WriterError};
use crate::numeric::kind::{casts_losslessly, ElemType, NumericKind};
use crate::numeric::range::FiniteRange;

/// Decide whether writing `arr_type` samples as `out_type` needs a scaling
/// transform, or fail when no transform can ever make the conversion valid.
///
/// The finite range is only consulted when the cheaper type-level rules are
/// inconclusive, so `range` is a lazy supplier (the writers back it with
/// their cached oracle).
///
/// Rules, in order:
/// * lossless widening cast: no scaling
/// * complex target accepts anything: no scaling
/// * complex source into a real target can never work: fail
/// * float target holds any real value: no scaling
/// * no finite samples, or all samples zero: no scaling (non-finite values
///   are replaced with zero at write time)
/// * float source going to an integer target always quantizes: scaling
/// * integer source: scaling iff the finite range leaves the target's range
///
/// Non-numeric (opaque/structured) types cannot be expressed as an
/// `ElemType`, so the incompatible-kinds rejection happens when type names
/// are parsed, before this table runs.
pub fn scaling_needed<F>(arr_type: ElemType, out_type: ElemType, range: F) -> Result<bool>
where
    F: FnOnce() -> FiniteRange,
{
    if casts_losslessly(arr_type, out_type) {
        return Ok(false);
    }
    if out_type.kind() == NumericKind::Complex {
        return Ok(false);
    }
    if arr_type.kind() == NumericKind::Complex {
        return Err(WriterError::ComplexToReal);
    }
    if out_type.kind() == NumericKind::Float {
        return Ok(false);
    }
    // Integer target from here on; the data decides.
    let r = range();
    if r.is_empty() || r.is_all_zero() {
        return Ok(false);
    }
    if arr_type.kind() == NumericKind::Float {
        return Ok(true);
    }
    match (r, out_type.int_range()) {
        (FiniteRange::Ints { min, max }, Some((tmin, tmax))) => {
            Ok(!(min >= tmin && max <= tmax))
        }
        // Integer arrays always report integer ranges.
        _ => Ok(true),
    }
}
