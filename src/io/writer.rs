// src/io/writer.rs
use std::io::Write;

use num_complex::Complex64;

use crate::array::{ArrayHandle, TypedArray};
use crate::error::{Result, WriterError};
use crate::numeric::kind::{ElemType, NumericKind};

/// Byte order of the serialized samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Endian {
    #[default]
    Little,
    Big,
}

/// Traversal order over a multi-dimensional array. Storage is row-major;
/// `Column` writes with the first axis varying fastest (Fortran order).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemoryOrder {
    #[default]
    Row,
    Column,
}

const FLUSH_BYTES: usize = 1 << 16;

/// Column-major (first-axis-fastest) walk over a row-major buffer, yielding
/// flat storage indices.
struct ColumnIndices {
    shape: Vec<usize>,
    strides: Vec<usize>,
    idx: Vec<usize>,
    remaining: usize,
}

impl ColumnIndices {
    fn new(shape: &[usize]) -> Self {
        let mut strides = vec![1usize; shape.len()];
        for ax in (0..shape.len().saturating_sub(1)).rev() {
            strides[ax] = strides[ax + 1] * shape[ax + 1];
        }
        Self {
            shape: shape.to_vec(),
            strides,
            idx: vec![0; shape.len()],
            remaining: shape.iter().product(),
        }
    }
}

impl Iterator for ColumnIndices {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let flat = self
            .idx
            .iter()
            .zip(&self.strides)
            .map(|(i, s)| i * s)
            .sum();
        for ax in 0..self.shape.len() {
            self.idx[ax] += 1;
            if self.idx[ax] < self.shape[ax] {
                break;
            }
            self.idx[ax] = 0;
        }
        Some(flat)
    }
}

fn stream<W, T, F>(
    sink: &mut W,
    data: &[T],
    shape: &[usize],
    order: MemoryOrder,
    mut encode: F,
) -> Result<()>
where
    W: Write,
    T: Copy,
    F: FnMut(&mut Vec<u8>, T),
{
    let mut buf = Vec::with_capacity(FLUSH_BYTES + 16);
    match order {
        MemoryOrder::Row => {
            for &v in data {
                encode(&mut buf, v);
                if buf.len() >= FLUSH_BYTES {
                    sink.write_all(&buf)?;
                    buf.clear();
                }
            }
        }
        MemoryOrder::Column => {
            for i in ColumnIndices::new(shape) {
                encode(&mut buf, data[i]);
                if buf.len() >= FLUSH_BYTES {
                    sink.write_all(&buf)?;
                    buf.clear();
                }
            }
        }
    }
    sink.write_all(&buf)?;
    Ok(())
}

fn push_bytes(buf: &mut Vec<u8>, le: &[u8], be: &[u8], endian: Endian) {
    match endian {
        Endian::Little => buf.extend_from_slice(le),
        Endian::Big => buf.extend_from_slice(be),
    }
}

/// Encode an exact integer into an integer target, saturating at the range
/// edges. Only called with integer `out_type`.
fn push_int(buf: &mut Vec<u8>, v: i128, out_type: ElemType, endian: Endian) {
    macro_rules! enc {
        ($t:ty) => {{
            let x = v.clamp(<$t>::MIN as i128, <$t>::MAX as i128) as $t;
            push_bytes(buf, &x.to_le_bytes(), &x.to_be_bytes(), endian);
        }};
    }
    match out_type {
        ElemType::U8 => enc!(u8),
        ElemType::I8 => enc!(i8),
        ElemType::U16 => enc!(u16),
        ElemType::I16 => enc!(i16),
        ElemType::U32 => enc!(u32),
        ElemType::I32 => enc!(i32),
        ElemType::U64 => enc!(u64),
        ElemType::I64 => enc!(i64),
        _ => unreachable!("integer target"),
    }
}

/// Encode a rounded float into an integer target. `as` saturates and maps
/// NaN to zero, which is the defined fallback when nan2zero is off.
fn push_int_f64(buf: &mut Vec<u8>, t: f64, out_type: ElemType, endian: Endian) {
    macro_rules! enc {
        ($t:ty) => {{
            let x = t as $t;
            push_bytes(buf, &x.to_le_bytes(), &x.to_be_bytes(), endian);
        }};
    }
    match out_type {
        ElemType::U8 => enc!(u8),
        ElemType::I8 => enc!(i8),
        ElemType::U16 => enc!(u16),
        ElemType::I16 => enc!(i16),
        ElemType::U32 => enc!(u32),
        ElemType::I32 => enc!(i32),
        ElemType::U64 => enc!(u64),
        ElemType::I64 => enc!(i64),
        _ => unreachable!("integer target"),
    }
}

fn push_complex(buf: &mut Vec<u8>, c: Complex64, out_type: ElemType, endian: Endian) {
    match out_type {
        ElemType::C64 => {
            let (re, im) = (c.re as f32, c.im as f32);
            push_bytes(buf, &re.to_le_bytes(), &re.to_be_bytes(), endian);
            push_bytes(buf, &im.to_le_bytes(), &im.to_be_bytes(), endian);
        }
        ElemType::C128 => {
            push_bytes(buf, &c.re.to_le_bytes(), &c.re.to_be_bytes(), endian);
            push_bytes(buf, &c.im.to_le_bytes(), &c.im.to_be_bytes(), endian);
        }
        _ => unreachable!("complex target"),
    }
}

/// Apply the inverse affine transform to one real sample and encode it.
#[allow(clippy::too_many_arguments)]
fn push_scaled(
    buf: &mut Vec<u8>,
    v: f64,
    out_type: ElemType,
    endian: Endian,
    slope: f64,
    inter: f64,
    nan_bounds: Option<(f64, f64)>,
    nan2zero: bool,
) {
    match out_type.kind() {
        NumericKind::Unsigned | NumericKind::Signed => {
            if nan2zero {
                let inside = match nan_bounds {
                    Some((mn, mx)) => v >= mn && v <= mx,
                    None => v.is_finite(),
                };
                if !inside {
                    push_int(buf, 0, out_type, endian);
                    return;
                }
            }
            push_int_f64(buf, ((v - inter) / slope).round(), out_type, endian);
        }
        NumericKind::Float => {
            let t = (v - inter) / slope;
            match out_type {
                ElemType::F32 => {
                    let x = t as f32;
                    push_bytes(buf, &x.to_le_bytes(), &x.to_be_bytes(), endian);
                }
                ElemType::F64 => push_bytes(buf, &t.to_le_bytes(), &t.to_be_bytes(), endian),
                _ => unreachable!("float target"),
            }
        }
        NumericKind::Complex => {
            push_complex(buf, Complex64::new((v - inter) / slope, 0.0), out_type, endian);
        }
    }
}

/// Stream sink: apply the elementwise inverse transform
/// `stored = round((value - inter) / slope)` and serialize the result in the
/// requested byte and memory order.
///
/// With `nan2zero` and an integer target, samples that are non-finite or
/// fall outside `nan_bounds` are stored as zero. Transform parameters are
/// validated before the first byte is written.
#[allow(clippy::too_many_arguments)]
pub fn write_array<W: Write>(
    sink: &mut W,
    handle: &ArrayHandle<'_>,
    out_type: ElemType,
    endian: Endian,
    order: MemoryOrder,
    slope: f64,
    inter: f64,
    nan_bounds: Option<(f64, f64)>,
    nan2zero: bool,
) -> Result<()> {
    if slope == 0.0 || !slope.is_finite() || !inter.is_finite() {
        return Err(WriterError::Scaling(format!(
            "invalid transform: slope {slope}, intercept {inter}"
        )));
    }
    let src = handle.array();
    if src.elem_type().kind() == NumericKind::Complex && out_type.kind() != NumericKind::Complex {
        return Err(WriterError::ComplexToReal);
    }
    let shape = handle.shape();
    let nan2zero = nan2zero && out_type.is_integer();
    // Identity transforms between integer types stay on the exact integer
    // path, so 64-bit samples round-trip without touching f64.
    let exact_int =
        slope == 1.0 && inter == 0.0 && src.elem_type().is_integer() && out_type.is_integer();

    macro_rules! stream_int {
        ($v:expr) => {
            if exact_int {
                stream(sink, $v, shape, order, |buf, x| {
                    push_int(buf, x as i128, out_type, endian)
                })
            } else {
                stream(sink, $v, shape, order, |buf, x| {
                    push_scaled(
                        buf, x as f64, out_type, endian, slope, inter, nan_bounds, nan2zero,
                    )
                })
            }
        };
    }
    macro_rules! stream_float {
        ($v:expr) => {
            stream(sink, $v, shape, order, |buf, x| {
                push_scaled(
                    buf, x as f64, out_type, endian, slope, inter, nan_bounds, nan2zero,
                )
            })
        };
    }

    match src {
        TypedArray::U8(v) => stream_int!(v),
        TypedArray::I8(v) => stream_int!(v),
        TypedArray::U16(v) => stream_int!(v),
        TypedArray::I16(v) => stream_int!(v),
        TypedArray::U32(v) => stream_int!(v),
        TypedArray::I32(v) => stream_int!(v),
        TypedArray::U64(v) => stream_int!(v),
        TypedArray::I64(v) => stream_int!(v),
        TypedArray::F32(v) => stream_float!(v),
        TypedArray::F64(v) => stream_float!(v),
        TypedArray::C64(v) => stream(sink, v, shape, order, |buf, c| {
            push_complex(buf, Complex64::new(c.re as f64, c.im as f64), out_type, endian)
        }),
        TypedArray::C128(v) => stream(sink, v, shape, order, |buf, c| {
            push_complex(buf, c, out_type, endian)
        }),
    }
}
