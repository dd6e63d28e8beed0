// src/io/reader.rs
use std::io::{Error, ErrorKind};
use std::path::Path;

use num_complex::{Complex32, Complex64};

use crate::array::TypedArray;
use crate::error::Result;
use crate::numeric::kind::ElemType;

use super::writer::Endian;

/// Decode raw sample bytes into a typed array.
pub fn decode_array(bytes: &[u8], elem_type: ElemType, endian: Endian) -> Result<TypedArray> {
    let size = elem_type.byte_size();
    if bytes.len() % size != 0 {
        return Err(Error::new(
            ErrorKind::InvalidData,
            format!(
                "{} input bytes are not a whole number of {} samples",
                bytes.len(),
                elem_type
            ),
        )
        .into());
    }

    macro_rules! dec {
        ($t:ty, $variant:ident) => {{
            let v = bytes
                .chunks_exact(size)
                .map(|c| {
                    let raw: [u8; std::mem::size_of::<$t>()] = c.try_into().unwrap();
                    match endian {
                        Endian::Little => <$t>::from_le_bytes(raw),
                        Endian::Big => <$t>::from_be_bytes(raw),
                    }
                })
                .collect();
            TypedArray::$variant(v)
        }};
    }

    Ok(match elem_type {
        ElemType::U8 => dec!(u8, U8),
        ElemType::I8 => dec!(i8, I8),
        ElemType::U16 => dec!(u16, U16),
        ElemType::I16 => dec!(i16, I16),
        ElemType::U32 => dec!(u32, U32),
        ElemType::I32 => dec!(i32, I32),
        ElemType::U64 => dec!(u64, U64),
        ElemType::I64 => dec!(i64, I64),
        ElemType::F32 => dec!(f32, F32),
        ElemType::F64 => dec!(f64, F64),
        ElemType::C64 => {
            let v = bytes
                .chunks_exact(size)
                .map(|c| {
                    let decode = |b: &[u8]| {
                        let raw: [u8; 4] = b.try_into().unwrap();
                        match endian {
                            Endian::Little => f32::from_le_bytes(raw),
                            Endian::Big => f32::from_be_bytes(raw),
                        }
                    };
                    Complex32::new(decode(&c[..4]), decode(&c[4..]))
                })
                .collect();
            TypedArray::C64(v)
        }
        ElemType::C128 => {
            let v = bytes
                .chunks_exact(size)
                .map(|c| {
                    let decode = |b: &[u8]| {
                        let raw: [u8; 8] = b.try_into().unwrap();
                        match endian {
                            Endian::Little => f64::from_le_bytes(raw),
                            Endian::Big => f64::from_be_bytes(raw),
                        }
                    };
                    Complex64::new(decode(&c[..8]), decode(&c[8..]))
                })
                .collect();
            TypedArray::C128(v)
        }
    })
}

/// Read a whole raw sample file into a typed array.
pub fn read_array_file<P: AsRef<Path>>(
    path: P,
    elem_type: ElemType,
    endian: Endian,
) -> Result<TypedArray> {
    let bytes = std::fs::read(path)?;
    decode_array(&bytes, elem_type, endian)
}
