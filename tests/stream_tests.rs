// tests/stream_tests.rs
use raster_scale::array::{ArrayHandle, TypedArray};
use raster_scale::io::reader::decode_array;
use raster_scale::io::writer::{write_array, Endian, MemoryOrder};
use raster_scale::numeric::kind::{ElemType, ScalerKind};
use raster_scale::writer::{get_slope_inter, make_array_writer};

/// Helper: build a writer over a flat array and collect its output bytes
fn write_bytes(
    array: &TypedArray,
    out_type: ElemType,
    has_intercept: bool,
    has_slope: bool,
    nan2zero: bool,
) -> (Vec<u8>, (f64, f64)) {
    let mut writer = make_array_writer(
        ArrayHandle::flat(array),
        out_type,
        has_intercept,
        has_slope,
        ScalerKind::F32,
    )
    .unwrap();
    let mut sink = Vec::new();
    writer
        .write(&mut sink, MemoryOrder::Row, nan2zero)
        .unwrap();
    (sink, get_slope_inter(&writer))
}

/// Test that an identity transform is byte-identical to the direct writer
#[test]
fn test_identity_matches_direct() {
    let arrays = [
        TypedArray::U8(vec![0, 1, 127, 255]),
        TypedArray::I64(vec![i64::MIN, -1, 0, i64::MAX]),
        TypedArray::F32(vec![1.5, -2.25, 0.0]),
    ];
    for array in &arrays {
        let out_type = array.elem_type();
        let (direct, _) = write_bytes(array, out_type, false, false, true);
        let (slope, transform) = write_bytes(array, out_type, true, true, true);
        assert_eq!(transform, (1.0, 0.0));
        assert_eq!(direct, slope, "identity output differs for {}", out_type);
    }
}

/// Test the raw little-endian layout of a direct write
#[test]
fn test_direct_bytes() {
    let array = TypedArray::U16(vec![0x1234, 0x00ff]);
    let (bytes, _) = write_bytes(&array, ElemType::U16, false, false, true);
    assert_eq!(bytes, vec![0x34, 0x12, 0xff, 0x00]);
}

/// Test big-endian serialization
#[test]
fn test_big_endian() {
    let array = TypedArray::U16(vec![0x1234]);
    let mut writer = make_array_writer(
        ArrayHandle::flat(&array),
        ElemType::U16,
        false,
        false,
        ScalerKind::F32,
    )
    .unwrap();
    writer.set_endian(Endian::Big);
    let mut sink = Vec::new();
    writer.write(&mut sink, MemoryOrder::Row, true).unwrap();
    assert_eq!(sink, vec![0x12, 0x34]);
}

/// Test column-major traversal of a 2x3 array
#[test]
fn test_column_major_order() {
    let array = TypedArray::U8(vec![1, 2, 3, 4, 5, 6]);
    let handle = ArrayHandle::new(&array, &[2, 3]).unwrap();
    let mut writer =
        make_array_writer(handle, ElemType::U8, false, false, ScalerKind::F32).unwrap();

    let mut row = Vec::new();
    writer.write(&mut row, MemoryOrder::Row, true).unwrap();
    assert_eq!(row, vec![1, 2, 3, 4, 5, 6]);

    let mut col = Vec::new();
    writer.write(&mut col, MemoryOrder::Column, true).unwrap();
    assert_eq!(col, vec![1, 4, 2, 5, 3, 6]);
}

/// Test NaN and infinity handling on integer output
#[test]
fn test_nan2zero_substitution() {
    let array = TypedArray::F32(vec![1.0, f32::NAN, f32::INFINITY]);

    // Finite range is the single value 1.0, so the transform is offset-only
    let (bytes, (slope, inter)) = write_bytes(&array, ElemType::I16, true, true, true);
    assert_eq!((slope, inter), (1.0, 1.0));
    let decoded = decode_array(&bytes, ElemType::I16, Endian::Little).unwrap();
    assert_eq!(decoded, TypedArray::I16(vec![0, 0, 0]));
}

/// Test that opting out of nan2zero falls back to saturating casts
#[test]
fn test_keep_nan_saturates() {
    let array = TypedArray::F32(vec![1.0, f32::INFINITY]);
    let mut writer = make_array_writer(
        ArrayHandle::flat(&array),
        ElemType::I8,
        false,
        true,
        ScalerKind::F32,
    )
    .unwrap();

    let mut with_sub = Vec::new();
    writer.write(&mut with_sub, MemoryOrder::Row, true).unwrap();
    let mut without = Vec::new();
    writer.write(&mut without, MemoryOrder::Row, false).unwrap();

    // Substituted: infinity is outside the finite bounds and stores 0.
    // Kept: the cast saturates at the i8 maximum.
    assert_eq!(with_sub[1], 0);
    assert_eq!(without[1] as i8, i8::MAX);
}

/// Test nan-bound zeroing against an all-non-finite array
#[test]
fn test_all_nonfinite_blanks_output() {
    let array = TypedArray::F64(vec![f64::NAN, f64::INFINITY, f64::NEG_INFINITY]);
    let (bytes, transform) = write_bytes(&array, ElemType::U8, true, true, true);
    assert_eq!(transform, (1.0, 0.0));
    assert_eq!(bytes, vec![0, 0, 0]);
}

/// Test the round-trip law: stored * slope + inter recovers the data within
/// one quantization step
#[test]
fn test_round_trip_law() {
    let values = vec![-1000.5f32, -250.25, 0.0, 333.125, 999.75];
    let array = TypedArray::F32(values.clone());
    let (bytes, (slope, inter)) = write_bytes(&array, ElemType::I16, true, true, true);

    let stored = match decode_array(&bytes, ElemType::I16, Endian::Little).unwrap() {
        TypedArray::I16(v) => v,
        other => panic!("unexpected decode {:?}", other.elem_type()),
    };
    for (&orig, &s) in values.iter().zip(&stored) {
        let decoded = s as f64 * slope + inter;
        assert!(
            (decoded - orig as f64).abs() <= slope,
            "{} decoded as {} (slope {}, inter {})",
            orig,
            decoded,
            slope,
            inter
        );
    }
}

/// Test the round trip of a sign-flipped integer write
#[test]
fn test_sign_flip_round_trip() {
    let array = TypedArray::I16(vec![-100, -10, -55]);
    let (bytes, (slope, inter)) = write_bytes(&array, ElemType::U8, false, true, true);
    assert_eq!((slope, inter), (-1.0, 0.0));

    let stored = match decode_array(&bytes, ElemType::U8, Endian::Little).unwrap() {
        TypedArray::U8(v) => v,
        other => panic!("unexpected decode {:?}", other.elem_type()),
    };
    assert_eq!(stored, vec![100, 10, 55]);
}

/// Test the round trip of an offset-only integer write
#[test]
fn test_offset_round_trip() {
    let array = TypedArray::U16(vec![1000, 1100, 1200]);
    let (bytes, (slope, inter)) = write_bytes(&array, ElemType::U8, true, true, true);
    assert_eq!((slope, inter), (1.0, 1000.0));

    let stored = match decode_array(&bytes, ElemType::U8, Endian::Little).unwrap() {
        TypedArray::U8(v) => v,
        other => panic!("unexpected decode {:?}", other.elem_type()),
    };
    assert_eq!(stored, vec![0, 100, 200]);
}

/// Test complex passthrough and widening into a complex target
#[test]
fn test_complex_targets() {
    let array = TypedArray::C64(vec![num_complex::Complex32::new(1.5, -2.5)]);
    let (bytes, transform) = write_bytes(&array, ElemType::C128, false, false, true);
    assert_eq!(transform, (1.0, 0.0));

    let decoded = decode_array(&bytes, ElemType::C128, Endian::Little).unwrap();
    assert_eq!(
        decoded,
        TypedArray::C128(vec![num_complex::Complex64::new(1.5, -2.5)])
    );

    // Real samples gain a zero imaginary component
    let reals = TypedArray::F32(vec![3.0]);
    let (bytes, _) = write_bytes(&reals, ElemType::C64, false, false, true);
    let decoded = decode_array(&bytes, ElemType::C64, Endian::Little).unwrap();
    assert_eq!(
        decoded,
        TypedArray::C64(vec![num_complex::Complex32::new(3.0, 0.0)])
    );
}

/// Test that repeated writes from one writer are identical
#[test]
fn test_write_is_idempotent() {
    let array = TypedArray::F32(vec![0.5, 100.25, -3.75]);
    let mut writer = make_array_writer(
        ArrayHandle::flat(&array),
        ElemType::I16,
        true,
        true,
        ScalerKind::F32,
    )
    .unwrap();

    let mut first = Vec::new();
    writer.write(&mut first, MemoryOrder::Row, true).unwrap();
    let mut second = Vec::new();
    writer.write(&mut second, MemoryOrder::Row, true).unwrap();
    assert_eq!(first, second);
}

/// Test the reader/writer byte round trip across element sizes
#[test]
fn test_decode_rejects_ragged_input() {
    assert!(decode_array(&[0, 1, 2], ElemType::U16, Endian::Little).is_err());
    assert!(decode_array(&[0, 1, 2, 3], ElemType::U16, Endian::Little).is_ok());
}
