// src/numeric/kind.rs
use crate::error::WriterError;

/// Classification of an element type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumericKind {
    Unsigned,
    Signed,
    Float,
    Complex,
}

/// Closed set of fixed-width binary element types the writer can produce or
/// consume. Opaque and structured types are unrepresentable here; anything
/// outside this set is rejected when parsing type names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElemType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
    C64,
    C128,
}

impl ElemType {
    pub fn kind(self) -> NumericKind {
        match self {
            ElemType::U8 | ElemType::U16 | ElemType::U32 | ElemType::U64 => NumericKind::Unsigned,
            ElemType::I8 | ElemType::I16 | ElemType::I32 | ElemType::I64 => NumericKind::Signed,
            ElemType::F32 | ElemType::F64 => NumericKind::Float,
            ElemType::C64 | ElemType::C128 => NumericKind::Complex,
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            ElemType::U8 | ElemType::I8 => 8,
            ElemType::U16 | ElemType::I16 => 16,
            ElemType::U32 | ElemType::I32 | ElemType::F32 => 32,
            ElemType::U64 | ElemType::I64 | ElemType::F64 | ElemType::C64 => 64,
            ElemType::C128 => 128,
        }
    }

    pub fn byte_size(self) -> usize {
        (self.bits() / 8) as usize
    }

    pub fn is_integer(self) -> bool {
        matches!(self.kind(), NumericKind::Unsigned | NumericKind::Signed)
    }

    /// Bit width of one floating-point component, for float and complex types.
    fn component_bits(self) -> Option<u32> {
        match self {
            ElemType::F32 | ElemType::C64 => Some(32),
            ElemType::F64 | ElemType::C128 => Some(64),
            _ => None,
        }
    }

    /// Inclusive (min, max) range table for integer types.
    pub fn int_range(self) -> Option<(i128, i128)> {
        match self {
            ElemType::U8 => Some((0, u8::MAX as i128)),
            ElemType::U16 => Some((0, u16::MAX as i128)),
            ElemType::U32 => Some((0, u32::MAX as i128)),
            ElemType::U64 => Some((0, u64::MAX as i128)),
            ElemType::I8 => Some((i8::MIN as i128, i8::MAX as i128)),
            ElemType::I16 => Some((i16::MIN as i128, i16::MAX as i128)),
            ElemType::I32 => Some((i32::MIN as i128, i32::MAX as i128)),
            ElemType::I64 => Some((i64::MIN as i128, i64::MAX as i128)),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ElemType::U8 => "u8",
            ElemType::I8 => "i8",
            ElemType::U16 => "u16",
            ElemType::I16 => "i16",
            ElemType::U32 => "u32",
            ElemType::I32 => "i32",
            ElemType::U64 => "u64",
            ElemType::I64 => "i64",
            ElemType::F32 => "f32",
            ElemType::F64 => "f64",
            ElemType::C64 => "c64",
            ElemType::C128 => "c128",
        }
    }

    /// Parse a type name. Anything not in the closed numeric set (structured,
    /// opaque, strings...) is an incompatible kind.
    pub fn parse(name: &str) -> Result<Self, WriterError> {
        match name {
            "u8" | "uint8" => Ok(ElemType::U8),
            "i8" | "int8" => Ok(ElemType::I8),
            "u16" | "uint16" => Ok(ElemType::U16),
            "i16" | "int16" => Ok(ElemType::I16),
            "u32" | "uint32" => Ok(ElemType::U32),
            "i32" | "int32" => Ok(ElemType::I32),
            "u64" | "uint64" => Ok(ElemType::U64),
            "i64" | "int64" => Ok(ElemType::I64),
            "f32" | "float32" => Ok(ElemType::F32),
            "f64" | "float64" => Ok(ElemType::F64),
            "c64" | "complex64" => Ok(ElemType::C64),
            "c128" | "complex128" => Ok(ElemType::C128),
            other => Err(WriterError::IncompatibleKinds(other.to_string())),
        }
    }
}

impl std::fmt::Display for ElemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// True when every value of `from` is exactly representable in `to`.
///
/// Integer-to-float follows the usual safe-cast convention: 64-bit integers
/// count as safe into f64 even though the top bits round.
pub fn casts_losslessly(from: ElemType, to: ElemType) -> bool {
    use NumericKind::*;
    if from == to {
        return true;
    }
    match (from.kind(), to.kind()) {
        (Unsigned, Unsigned) | (Signed, Signed) => to.bits() >= from.bits(),
        (Unsigned, Signed) => to.bits() > from.bits(),
        (Signed, Unsigned) => false,
        (Unsigned | Signed, Float | Complex) => {
            // f32/c64 hold 16-bit integers exactly; f64/c128 take the rest.
            match to.component_bits() {
                Some(32) => from.bits() <= 16,
                Some(64) => true,
                _ => false,
            }
        }
        (Float, Float) => to.bits() >= from.bits(),
        (Float, Complex) => to.component_bits() >= from.component_bits(),
        (Complex, Complex) => to.bits() >= from.bits(),
        (Float | Complex, Unsigned | Signed) | (Complex, Float) => false,
    }
}

/// Intermediate floating precision used to hold slope and intercept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScalerKind {
    #[default]
    F32,
    F64,
}

impl ScalerKind {
    /// Round a value through the scaler precision. This is the documented
    /// lossy step: an f32 scaler drops everything below f32 resolution.
    pub fn coerce(self, value: f64) -> f64 {
        match self {
            ScalerKind::F32 => value as f32 as f64,
            ScalerKind::F64 => value,
        }
    }

    pub fn parse(name: &str) -> Result<Self, WriterError> {
        match name {
            "f32" | "float32" => Ok(ScalerKind::F32),
            "f64" | "float64" => Ok(ScalerKind::F64),
            other => Err(WriterError::IncompatibleKinds(other.to_string())),
        }
    }
}
