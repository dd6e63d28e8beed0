// src/writer/direct.rs
use std::io::Write;

use crate::array::ArrayHandle;
use crate::error::{Result, WriterError};
use crate::io::writer::MemoryOrder;
use crate::numeric::kind::{ElemType, ScalerKind};

use super::WriterCore;

/// Writer without transform capability: samples are cast as-is. The only
/// data-dependent behavior is NaN-to-zero substitution on integer targets.
pub struct DirectWriter<'a> {
    core: WriterCore<'a>,
}

impl<'a> DirectWriter<'a> {
    /// Fails with `ScalingNeeded` when the conversion cannot be done
    /// without a transform.
    pub fn new(handle: ArrayHandle<'a>, out_type: ElemType, scaler: ScalerKind) -> Result<Self> {
        let mut core = WriterCore::new(handle, out_type, scaler);
        if core.scaling_needed()? {
            return Err(WriterError::ScalingNeeded);
        }
        Ok(Self { core })
    }

    pub fn out_type(&self) -> ElemType {
        self.core.out_type()
    }

    pub fn write<W: Write>(
        &mut self,
        sink: &mut W,
        order: MemoryOrder,
        nan2zero: bool,
    ) -> Result<()> {
        self.core.write_to(sink, order, nan2zero, 1.0, 0.0)
    }

    pub(super) fn core_mut(&mut self) -> &mut WriterCore<'a> {
        &mut self.core
    }
}
