// src/array.rs
use num_complex::{Complex32, Complex64};

use crate::error::WriterError;
use crate::numeric::kind::ElemType;

/// Owned, homogeneous sample storage, one variant per element type.
#[derive(Clone, Debug, PartialEq)]
pub enum TypedArray {
    U8(Vec<u8>),
    I8(Vec<i8>),
    U16(Vec<u16>),
    I16(Vec<i16>),
    U32(Vec<u32>),
    I32(Vec<i32>),
    U64(Vec<u64>),
    I64(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    C64(Vec<Complex32>),
    C128(Vec<Complex64>),
}

impl TypedArray {
    pub fn elem_type(&self) -> ElemType {
        match self {
            TypedArray::U8(_) => ElemType::U8,
            TypedArray::I8(_) => ElemType::I8,
            TypedArray::U16(_) => ElemType::U16,
            TypedArray::I16(_) => ElemType::I16,
            TypedArray::U32(_) => ElemType::U32,
            TypedArray::I32(_) => ElemType::I32,
            TypedArray::U64(_) => ElemType::U64,
            TypedArray::I64(_) => ElemType::I64,
            TypedArray::F32(_) => ElemType::F32,
            TypedArray::F64(_) => ElemType::F64,
            TypedArray::C64(_) => ElemType::C64,
            TypedArray::C128(_) => ElemType::C128,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TypedArray::U8(v) => v.len(),
            TypedArray::I8(v) => v.len(),
            TypedArray::U16(v) => v.len(),
            TypedArray::I16(v) => v.len(),
            TypedArray::U32(v) => v.len(),
            TypedArray::I32(v) => v.len(),
            TypedArray::U64(v) => v.len(),
            TypedArray::I64(v) => v.len(),
            TypedArray::F32(v) => v.len(),
            TypedArray::F64(v) => v.len(),
            TypedArray::C64(v) => v.len(),
            TypedArray::C128(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read-only view over a `TypedArray` plus its shape. Storage is row-major;
/// the writer never mutates the samples.
#[derive(Clone, Debug)]
pub struct ArrayHandle<'a> {
    array: &'a TypedArray,
    shape: Vec<usize>,
}

impl<'a> ArrayHandle<'a> {
    pub fn new(array: &'a TypedArray, shape: &[usize]) -> Result<Self, WriterError> {
        let expected: usize = shape.iter().product();
        if expected != array.len() {
            return Err(WriterError::ShapeMismatch {
                len: array.len(),
                shape: shape.to_vec(),
                expected,
            });
        }
        Ok(Self {
            array,
            shape: shape.to_vec(),
        })
    }

    /// View a flat array as one-dimensional.
    pub fn flat(array: &'a TypedArray) -> Self {
        Self {
            array,
            shape: vec![array.len()],
        }
    }

    pub fn array(&self) -> &'a TypedArray {
        self.array
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn elem_type(&self) -> ElemType {
        self.array.elem_type()
    }

    pub fn len(&self) -> usize {
        self.array.len()
    }

    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }
}
