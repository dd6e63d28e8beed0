// src/numeric/range.rs
use num_traits::AsPrimitive;
use rayon::prelude::*;

use crate::array::TypedArray;
use crate::numeric::kind::{ElemType, ScalerKind};

/// Minimum and maximum over the finite samples of an array.
///
/// Integer extremes are kept exact in `i128` so that spans near the edges of
/// the 64-bit domain can be computed without overflow. `Empty` is the "no
/// finite samples" sentinel and reads as `(+inf, -inf)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FiniteRange {
    Empty,
    Ints { min: i128, max: i128 },
    Floats { min: f64, max: f64 },
}

impl FiniteRange {
    pub fn is_empty(&self) -> bool {
        matches!(self, FiniteRange::Empty)
    }

    pub fn min_f64(&self) -> f64 {
        match *self {
            FiniteRange::Empty => f64::INFINITY,
            FiniteRange::Ints { min, .. } => min as f64,
            FiniteRange::Floats { min, .. } => min,
        }
    }

    pub fn max_f64(&self) -> f64 {
        match *self {
            FiniteRange::Empty => f64::NEG_INFINITY,
            FiniteRange::Ints { max, .. } => max as f64,
            FiniteRange::Floats { max, .. } => max,
        }
    }

    pub fn is_all_zero(&self) -> bool {
        match *self {
            FiniteRange::Empty => false,
            FiniteRange::Ints { min, max } => min == 0 && max == 0,
            FiniteRange::Floats { min, max } => min == 0.0 && max == 0.0,
        }
    }

    pub fn is_single_valued(&self) -> bool {
        match *self {
            FiniteRange::Empty => false,
            FiniteRange::Ints { min, max } => min == max,
            FiniteRange::Floats { min, max } => min == max,
        }
    }

    /// Data span `max - min`, computed in extended precision. A straight
    /// subtraction in the source width can overflow for 64-bit extremes.
    pub fn span_f64(&self) -> f64 {
        match *self {
            FiniteRange::Empty => f64::NEG_INFINITY,
            FiniteRange::Ints { min, max } => (max - min) as f64,
            FiniteRange::Floats { min, max } => max - min,
        }
    }

    /// Exact integer span, when the source was an integer array.
    pub fn int_span(&self) -> Option<i128> {
        match *self {
            FiniteRange::Ints { min, max } => Some(max - min),
            _ => None,
        }
    }
}

fn int_minmax<T>(v: &[T]) -> FiniteRange
where
    T: Copy + Sync + AsPrimitive<i128>,
{
    if v.is_empty() {
        return FiniteRange::Empty;
    }
    let (min, max) = v
        .par_iter()
        .map(|&x| {
            let x: i128 = x.as_();
            (x, x)
        })
        .reduce(
            || (i128::MAX, i128::MIN),
            |a, b| (a.0.min(b.0), a.1.max(b.1)),
        );
    FiniteRange::Ints { min, max }
}

fn float_minmax<T>(v: &[T]) -> FiniteRange
where
    T: Copy + Sync + AsPrimitive<f64>,
{
    let (min, max) = v
        .par_iter()
        .map(|&x| x.as_())
        .filter(|x: &f64| x.is_finite())
        .map(|x| (x, x))
        .reduce(
            || (f64::INFINITY, f64::NEG_INFINITY),
            |a, b| (a.0.min(b.0), a.1.max(b.1)),
        );
    if min > max {
        FiniteRange::Empty
    } else {
        FiniteRange::Floats { min, max }
    }
}

/// Range oracle: minimum and maximum among finite samples.
///
/// For complex arrays the reduction runs over finite real components; the
/// scaling paths never consult it (complex targets never scale and complex
/// sources fail before range inspection), it exists for diagnostics only.
pub fn finite_range(array: &TypedArray) -> FiniteRange {
    match array {
        TypedArray::U8(v) => int_minmax(v),
        TypedArray::I8(v) => int_minmax(v),
        TypedArray::U16(v) => int_minmax(v),
        TypedArray::I16(v) => int_minmax(v),
        TypedArray::U32(v) => int_minmax(v),
        TypedArray::I32(v) => int_minmax(v),
        TypedArray::U64(v) => int_minmax(v),
        TypedArray::I64(v) => int_minmax(v),
        TypedArray::F32(v) => float_minmax(v),
        TypedArray::F64(v) => float_minmax(v),
        TypedArray::C64(v) => {
            let re: Vec<f64> = v.iter().map(|c| c.re as f64).collect();
            float_minmax(&re)
        }
        TypedArray::C128(v) => {
            let re: Vec<f64> = v.iter().map(|c| c.re).collect();
            float_minmax(&re)
        }
    }
}

/// Largest scaler-precision value not above `x`.
fn largest_le(x: i128, scaler: ScalerKind) -> f64 {
    match scaler {
        ScalerKind::F32 => {
            let mut f = x as f32;
            // Round-to-nearest may land one representable step above x.
            if f as i128 > x {
                f = f.next_down();
            }
            f as f64
        }
        ScalerKind::F64 => {
            let mut f = x as f64;
            if f as i128 > x {
                f = f.next_down();
            }
            f
        }
    }
}

/// Smallest scaler-precision value not below `x`.
fn smallest_ge(x: i128, scaler: ScalerKind) -> f64 {
    match scaler {
        ScalerKind::F32 => {
            let mut f = x as f32;
            if (f as i128) < x {
                f = f.next_up();
            }
            f as f64
        }
        ScalerKind::F64 => {
            let mut f = x as f64;
            if (f as i128) < x {
                f = f.next_up();
            }
            f
        }
    }
}

/// Intersection range: the span of the target integer type clipped to what
/// the scaler floating type can represent without overflowing the target on
/// the round trip. Scaling always aims at this interval.
pub fn shared_range(scaler: ScalerKind, out_type: ElemType) -> Option<(f64, f64)> {
    let (tmin, tmax) = out_type.int_range()?;
    Some((smallest_ge(tmin, scaler), largest_le(tmax, scaler)))
}
