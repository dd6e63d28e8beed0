// src/writer/mod.rs
pub mod decision;
pub mod direct;
pub mod slope;
pub mod slope_inter;

use std::io::Write;

use crate::array::ArrayHandle;
use crate::error::{Result, WriterError};
use crate::io::writer::{write_array, Endian, MemoryOrder};
use crate::numeric::kind::{ElemType, NumericKind, ScalerKind};
use crate::numeric::range::{self, FiniteRange};

pub use decision::scaling_needed;
pub use direct::DirectWriter;
pub use slope::SlopeWriter;
pub use slope_inter::SlopeInterWriter;

/// State shared by every writer variant: the borrowed array, the target
/// type, the scaler precision and the lazily cached finite range.
pub struct WriterCore<'a> {
    handle: ArrayHandle<'a>,
    out_type: ElemType,
    scaler: ScalerKind,
    endian: Endian,
    range: Option<FiniteRange>,
}

impl<'a> WriterCore<'a> {
    pub(crate) fn new(handle: ArrayHandle<'a>, out_type: ElemType, scaler: ScalerKind) -> Self {
        Self {
            handle,
            out_type,
            scaler,
            endian: Endian::default(),
            range: None,
        }
    }

    pub fn arr_type(&self) -> ElemType {
        self.handle.elem_type()
    }

    pub fn out_type(&self) -> ElemType {
        self.out_type
    }

    pub fn scaler(&self) -> ScalerKind {
        self.scaler
    }

    pub fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    /// Finite range of the array, computed once and cached.
    pub fn finite_range(&mut self) -> FiniteRange {
        if let Some(r) = self.range {
            return r;
        }
        let r = range::finite_range(self.handle.array());
        self.range = Some(r);
        r
    }

    /// Drop the cached range; the next access recomputes it.
    pub fn invalidate_range(&mut self) {
        self.range = None;
    }

    pub fn scaling_needed(&mut self) -> Result<bool> {
        let (arr_type, out_type) = (self.handle.elem_type(), self.out_type);
        decision::scaling_needed(arr_type, out_type, || self.finite_range())
    }

    /// NaN-replacement bounds handed to the sink: the finite range when
    /// quantizing floats to integers, nothing otherwise.
    fn writing_range(&mut self) -> Option<(f64, f64)> {
        if self.out_type.is_integer() && self.handle.elem_type().kind() == NumericKind::Float {
            let r = self.finite_range();
            if r.is_empty() {
                Some((0.0, 0.0))
            } else {
                Some((r.min_f64(), r.max_f64()))
            }
        } else {
            None
        }
    }

    fn write_to<W: Write>(
        &mut self,
        sink: &mut W,
        order: MemoryOrder,
        nan2zero: bool,
        slope: f64,
        inter: f64,
    ) -> Result<()> {
        let bounds = self.writing_range();
        write_array(
            sink,
            &self.handle,
            self.out_type,
            self.endian,
            order,
            slope,
            inter,
            bounds,
            nan2zero,
        )
    }
}

/// An array writer, chosen at construction time. Dispatch is by value over
/// the closed variant set; there is no subclassing and no dynamic lookup.
pub enum ArrayWriter<'a> {
    Direct(DirectWriter<'a>),
    Slope(SlopeWriter<'a>),
    SlopeInter(SlopeInterWriter<'a>),
}

impl<'a> ArrayWriter<'a> {
    fn core_mut(&mut self) -> &mut WriterCore<'a> {
        match self {
            ArrayWriter::Direct(w) => w.core_mut(),
            ArrayWriter::Slope(w) => w.core_mut(),
            ArrayWriter::SlopeInter(w) => w.core_mut(),
        }
    }

    /// Compute the transform if it has not been computed yet. A no-op for
    /// the direct variant.
    pub fn calc_scale(&mut self, force: bool) -> Result<()> {
        match self {
            ArrayWriter::Direct(_) => Ok(()),
            ArrayWriter::Slope(w) => w.calc_scale(force),
            ArrayWriter::SlopeInter(w) => w.calc_scale(force),
        }
    }

    /// Stream the (possibly transformed) array into `sink`. Idempotent: the
    /// source is never mutated, so repeated calls produce the same bytes.
    pub fn write<W: Write>(
        &mut self,
        sink: &mut W,
        order: MemoryOrder,
        nan2zero: bool,
    ) -> Result<()> {
        match self {
            ArrayWriter::Direct(w) => w.write(sink, order, nan2zero),
            ArrayWriter::Slope(w) => w.write(sink, order, nan2zero),
            ArrayWriter::SlopeInter(w) => w.write(sink, order, nan2zero),
        }
    }

    pub fn finite_range(&mut self) -> FiniteRange {
        self.core_mut().finite_range()
    }

    pub fn invalidate_range(&mut self) {
        self.core_mut().invalidate_range()
    }

    pub fn set_endian(&mut self, endian: Endian) {
        self.core_mut().set_endian(endian)
    }

    pub fn out_type(&self) -> ElemType {
        match self {
            ArrayWriter::Direct(w) => w.out_type(),
            ArrayWriter::Slope(w) => w.out_type(),
            ArrayWriter::SlopeInter(w) => w.out_type(),
        }
    }
}

/// Effective transform of any writer variant: `(1, 0)` stands in for the
/// fields a variant does not carry.
pub fn get_slope_inter(writer: &ArrayWriter<'_>) -> (f64, f64) {
    match writer {
        ArrayWriter::Direct(_) => (1.0, 0.0),
        ArrayWriter::Slope(w) => (w.slope(), 0.0),
        ArrayWriter::SlopeInter(w) => (w.slope(), w.inter()),
    }
}

/// Pick the minimal-capability variant satisfying the caller's permissions
/// and compute its transform eagerly.
///
/// An intercept is only meaningful on top of a slope, so
/// `has_intercept && !has_slope` is rejected. Without either capability the
/// direct writer is returned, which fails here if the conversion would have
/// required a transform.
pub fn make_array_writer<'a>(
    handle: ArrayHandle<'a>,
    out_type: ElemType,
    has_intercept: bool,
    has_slope: bool,
    scaler: ScalerKind,
) -> Result<ArrayWriter<'a>> {
    if has_intercept && !has_slope {
        return Err(WriterError::CapabilityMismatch);
    }
    if has_intercept {
        return Ok(ArrayWriter::SlopeInter(SlopeInterWriter::new(
            handle, out_type, scaler, true,
        )?));
    }
    if has_slope {
        return Ok(ArrayWriter::Slope(SlopeWriter::new(
            handle, out_type, scaler, true,
        )?));
    }
    Ok(ArrayWriter::Direct(DirectWriter::new(
        handle, out_type, scaler,
    )?))
}
