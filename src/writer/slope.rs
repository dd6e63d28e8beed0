// src/writer/slope.rs
use std::io::Write;

use crate::array::ArrayHandle;
use crate::error::{Result, WriterError};
use crate::io::writer::MemoryOrder;
use crate::numeric::kind::{ElemType, NumericKind, ScalerKind};
use crate::numeric::range::{shared_range, FiniteRange};

use super::WriterCore;

/// Writer with multiplicative scaling only; the intercept is fixed at zero.
pub struct SlopeWriter<'a> {
    core: WriterCore<'a>,
    slope: f64,
    scale_calced: bool,
}

impl<'a> SlopeWriter<'a> {
    /// Build the writer, failing fast on conversions no slope can fix.
    /// With `calc_scale` false the transform stays at 1 until
    /// [`calc_scale`](Self::calc_scale) is called.
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

    /// Assign a slope. The value is rounded through the scaler precision;
    /// anything below its resolution is lost.
    pub fn set_slope(&mut self, value: f64) {
        self.slope = self.core.scaler().coerce(value);
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

    /// Compute the slope. Idempotent unless `force` is set.
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
        if self.core.arr_type().kind() == NumericKind::Float {
            return self.range_scale();
        }
        // Integer to integer.
        let r = self.core.finite_range();
        if let (FiniteRange::Ints { min, max }, Some((tmin, tmax))) =
            (r, self.core.out_type().int_range())
        {
            if min >= tmin && max <= tmax {
                return Ok(());
            }
        }
        if self.core.out_type().kind() == NumericKind::Unsigned {
            if let Some((_, smax)) = shared_range(self.core.scaler(), self.core.out_type()) {
                // A wholly non-positive range may fit an unsigned target
                // after a bare sign flip, which costs no precision at all.
                if r.max_f64() <= 0.0 && r.min_f64().abs() <= smax {
                    self.set_slope(-1.0);
                    return Ok(());
                }
            }
        }
        self.range_scale()
    }

    /// Slope from the data range and the intersection range of the scaler
    /// and target types. Without an intercept there is nothing to recenter
    /// with, so a signed range into an unsigned target is fatal.
    fn range_scale(&mut self) -> Result<()> {
        let r = self.core.finite_range();
        let (mn, mx) = (r.min_f64(), r.max_f64());
        let (smin, smax) = match shared_range(self.core.scaler(), self.core.out_type()) {
            Some(bounds) => bounds,
            None => {
                return Err(WriterError::Scaling(
                    "range scaling requires an integer target".to_string(),
                ))
            }
        };
        let raw = match self.core.out_type().kind() {
            NumericKind::Unsigned => {
                if mn < 0.0 && mx > 0.0 {
                    return Err(WriterError::UnsignedSpan);
                }
                if mx <= 0.0 {
                    mn / smax
                } else {
                    mx / smax
                }
            }
            // Both extremes must stay in range on their own, so the larger
            // of the two candidate slopes wins.
            _ => (mx / smax).max(mn / smin),
        };
        self.slope = checked_slope(self.core.scaler(), raw)?;
        Ok(())
    }

    pub fn write<W: Write>(
        &mut self,
        sink: &mut W,
        order: MemoryOrder,
        nan2zero: bool,
    ) -> Result<()> {
        self.core.write_to(sink, order, nan2zero, self.slope, 0.0)
    }

    pub(super) fn core_mut(&mut self) -> &mut WriterCore<'a> {
        &mut self.core
    }
}

/// Coerce a computed slope into scaler precision, rejecting non-finite
/// values and slopes the scaler flushes to zero.
pub(super) fn checked_slope(scaler: ScalerKind, raw: f64) -> Result<f64> {
    let slope = scaler.coerce(raw);
    if !slope.is_finite() {
        return Err(WriterError::Scaling(format!("slope {raw} is not finite")));
    }
    if slope == 0.0 {
        return Err(WriterError::Scaling(format!(
            "slope {raw} underflows scaler precision"
        )));
    }
    Ok(slope)
}
