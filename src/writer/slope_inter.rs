// src/writer/slope_inter.rs
use std::io::Write;

use crate::array::ArrayHandle;
use crate::error::{Result, WriterError};
use crate::io::writer::MemoryOrder;
use crate::numeric::kind::{ElemType, NumericKind, ScalerKind};
use crate::numeric::range::{shared_range, FiniteRange};

use super::slope::checked_slope;
use super::WriterCore;

/// Writer with both multiplicative scaling and an additive offset; a strict
/// superset of what [`super::SlopeWriter`] can express.
pub struct SlopeInterWriter<'a> {
    core: WriterCore<'a>,
    slope: f64,
    inter: f64,
    scale_calced: bool,
}

impl<'a> SlopeInterWriter<'a> {
    pub fn new(
        handle: ArrayHandle<'a>,
        out_type: ElemType,
        scaler: ScalerKind,
        calc_scale: bool,
    ) -> Result<Self> {
        let core = WriterCore::new(handle, out_type, scaler);
        let mut writer = Self {
            core,
            slope: 1.0,
            inter: 0.0,
            scale_calced: false,
        };
        writer.core.scaling_needed()?;
        if calc_scale {
            writer.calc_scale(false)?;
        }
        Ok(writer)
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn inter(&self) -> f64 {
        self.inter
    }

    /// Assign a slope, rounded through the scaler precision (lossy).
    pub fn set_slope(&mut self, value: f64) {
        self.slope = self.core.scaler().coerce(value);
    }

    /// Assign an intercept, rounded through the scaler precision (lossy).
    pub fn set_inter(&mut self, value: f64) {
        self.inter = self.core.scaler().coerce(value);
    }

    pub fn out_type(&self) -> ElemType {
        self.core.out_type()
    }

    pub fn finite_range(&mut self) -> FiniteRange {
        self.core.finite_range()
    }

    pub fn invalidate_range(&mut self) {
        self.core.invalidate_range()
    }

    pub fn scaling_needed(&mut self) -> Result<bool> {
        self.core.scaling_needed()
    }

    /// Compute slope and intercept. Idempotent unless `force` is set.
    pub fn calc_scale(&mut self, force: bool) -> Result<()> {
        if self.scale_calced && !force {
            return Ok(());
        }
        self.scale_calced = true;
        if !self.core.scaling_needed()? {
            return Ok(());
        }
        self.do_scaling()
    }

    fn do_scaling(&mut self) -> Result<()> {
        let r = self.core.finite_range();
        // No finite data, or all zeros: the sink blanks the output with
        // substituted zeros, no transform wanted.
        if r.is_empty() || r.is_all_zero() {
            return Ok(());
        }
        if self.core.arr_type().kind() == NumericKind::Float {
            return self.range_scale();
        }
        // Integer to integer.
        if let (FiniteRange::Ints { min, max }, Some((tmin, tmax))) =
            (r, self.core.out_type().int_range())
        {
            if min >= tmin && max <= tmax {
                return Ok(());
            }
        }
        if self.core.out_type().kind() == NumericKind::Unsigned {
            if let Some((_, smax)) = shared_range(self.core.scaler(), self.core.out_type()) {
                // Pure offset: cheaper and more precise than any slope when
                // the exact integer span fits the intersection range.
                if let Some(span) = r.int_span() {
                    if span as f64 <= smax {
                        self.set_inter(r.min_f64());
                        return Ok(());
                    }
                }
                if r.max_f64() <= 0.0 && r.min_f64().abs() <= smax {
                    self.set_slope(-1.0);
                    return Ok(());
                }
            }
        }
        self.range_scale()
    }

    /// Slope and intercept from the data range and the intersection range.
    fn range_scale(&mut self) -> Result<()> {
        let r = self.core.finite_range();
        // A constant array needs only an offset.
        if r.is_single_valued() {
            self.set_inter(r.min_f64());
            return Ok(());
        }
        let (smin, smax) = match shared_range(self.core.scaler(), self.core.out_type()) {
            Some(bounds) => bounds,
            None => {
                return Err(WriterError::Scaling(
                    "range scaling requires an integer target".to_string(),
                ))
            }
        };
        let scaled_span = smax - smin;
        // Data span in extended precision; native-width subtraction can
        // overflow near the 64-bit extremes.
        let raw_slope = r.span_f64() / scaled_span;
        let raw_inter = r.min_f64() - smin * raw_slope;
        let slope = checked_slope(self.core.scaler(), raw_slope)?;
        let inter = self.core.scaler().coerce(raw_inter);
        if !inter.is_finite() {
            return Err(WriterError::Scaling(format!(
                "intercept {raw_inter} is not finite"
            )));
        }
        self.slope = slope;
        self.inter = inter;
        Ok(())
    }

    pub fn write<W: Write>(
        &mut self,
        sink: &mut W,
        order: MemoryOrder,
        nan2zero: bool,
    ) -> Result<()> {
        self.core
            .write_to(sink, order, nan2zero, self.slope, self.inter)
    }

    pub(super) fn core_mut(&mut self) -> &mut WriterCore<'a> {
        &mut self.core
    }
}
