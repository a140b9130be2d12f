use std::fmt::Debug;

use colfetch::{
    Blob, ColumnCodec, DataType, Date, DateTime, DynamicValue, ErrorKind, Extract, Extracted,
    Extractor, Indicator, Time, Value, transport::Detached,
};
use colfetch_testkit::registry::{MemoryColumn, MemoryRegistry};

fn bound_round_trip<T>(value: T)
where
    T: ColumnCodec + Extract + Default + Clone + PartialEq + Debug,
{
    let registry =
        MemoryRegistry::bound().column(MemoryColumn::from_values(&[Some(value.clone())]));
    let mut transport = Detached;
    let mut extractor = Extractor::new(&registry, &mut transport);

    let mut target = T::default();
    assert!(extractor.extract(0, &mut target).unwrap());
    assert_eq!(target, value);
    assert!(!extractor.is_null(0).unwrap());
}

fn bound_null_keeps_target<T>(sentinel: T)
where
    T: ColumnCodec + Extract + Clone + PartialEq + Debug,
{
    let registry = MemoryRegistry::bound().column(MemoryColumn::from_values::<T>(&[None]));
    let mut transport = Detached;
    let mut extractor = Extractor::new(&registry, &mut transport);

    let mut target = sentinel.clone();
    assert!(!extractor.extract(0, &mut target).unwrap());
    assert_eq!(target, sentinel);
    assert!(extractor.is_null(0).unwrap());
    assert_eq!(extractor.fetch::<T>(0).unwrap(), Extracted::Null);
}

#[test]
fn test_bound_scalars() {
    bound_round_trip(-7i8);
    bound_round_trip(200u8);
    bound_round_trip(-1234i16);
    bound_round_trip(54321u16);
    bound_round_trip(-123456789i32);
    bound_round_trip(4000000000u32);
    bound_round_trip(i64::MIN);
    bound_round_trip(u64::MAX);
    bound_round_trip(3.25f32);
    bound_round_trip(-1.0e-300f64);
    bound_round_trip(true);
    bound_round_trip('Z');
    bound_round_trip(String::from("bound text"));
    bound_round_trip(String::new());
    bound_round_trip(Blob::from(vec![0u8, 0, 7, 0]));
    bound_round_trip(Date::new(1999, 12, 31));
    bound_round_trip(Time::new(23, 59, 58));
    bound_round_trip(DateTime::from_ymd_hms_nano(2024, 6, 1, 8, 30, 0, 123_456_789));
}

#[test]
fn test_bound_nulls() {
    bound_null_keeps_target(11i8);
    bound_null_keeps_target(11u64);
    bound_null_keeps_target(1.5f64);
    bound_null_keeps_target(true);
    bound_null_keeps_target('k');
    bound_null_keeps_target(String::from("keep"));
    bound_null_keeps_target(Blob::from(vec![1, 2]));
    bound_null_keeps_target(Date::new(2000, 1, 1));
    bound_null_keeps_target(Time::new(1, 1, 1));
    bound_null_keeps_target(DateTime::from_ymd_hms_nano(2000, 1, 1, 1, 1, 1, 1));
}

#[test]
fn test_bound_text_stops_at_terminator() {
    let column = MemoryColumn::text(8, &[Some("ab\0cd")]);
    let registry = MemoryRegistry::bound().column(column);
    let mut transport = Detached;
    let mut extractor = Extractor::new(&registry, &mut transport);
    assert_eq!(
        extractor.fetch::<String>(0).unwrap(),
        Extracted::Value("ab".to_string())
    );
}

#[test]
fn test_bound_size_guard() {
    let text = "x".repeat(64);
    let registry = MemoryRegistry::bound()
        .column(MemoryColumn::from_values(&[Some(text.clone())]))
        .column(MemoryColumn::from_values(&[Some(Blob::from(vec![9u8; 64]))]))
        .max_field_size(32);
    let mut transport = Detached;
    let mut extractor = Extractor::new(&registry, &mut transport);

    let err = extractor.fetch::<String>(0).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::SizeExceeded { size: 64, max: 32 }
    ));
    let err = extractor.fetch::<Blob>(1).unwrap_err();
    assert!(err.is_size_exceeded());

    let registry = MemoryRegistry::bound()
        .column(MemoryColumn::from_values(&[Some(text.clone())]))
        .max_field_size(64);
    let mut extractor = Extractor::new(&registry, &mut transport);
    assert_eq!(extractor.fetch::<String>(0).unwrap(), Extracted::Value(text));
}

#[test]
fn test_bound_unknown_length() {
    let column = MemoryColumn::text(8, &[Some("abc")]).with_indicator(0, Indicator::NoTotal);
    let registry = MemoryRegistry::bound().column(column);
    let mut transport = Detached;
    let mut extractor = Extractor::new(&registry, &mut transport);
    let err = extractor.fetch::<String>(0).unwrap_err();
    assert!(err.is_unknown_length());
}

#[test]
fn test_bound_type_mismatch() {
    let registry = MemoryRegistry::bound().column(MemoryColumn::from_values(&[Some(5i32)]));
    let mut transport = Detached;
    let mut extractor = Extractor::new(&registry, &mut transport);

    let err = extractor.fetch::<String>(0).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::TypeMismatch { column: 0, .. }));
    let err = extractor.fetch::<i64>(0).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));
    let err = extractor.fetch::<Date>(0).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));
}

#[test]
fn test_bound_same_width_type_mismatch() {
    let registry = MemoryRegistry::bound()
        .column(MemoryColumn::from_values(&[Some(1i32)]))
        .column(MemoryColumn::from_values(&[Some(200u8)]))
        .column(MemoryColumn::from_values::<i64>(&[None]));
    let mut transport = Detached;
    let mut extractor = Extractor::new(&registry, &mut transport);

    let mut float = 0.5f32;
    let err = extractor.extract(0, &mut float).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::TypeMismatch { column: 0, .. }));
    assert_eq!(float, 0.5);
    let mut unsigned = 9u32;
    assert!(extractor.extract(0, &mut unsigned).is_err());
    assert_eq!(unsigned, 9);

    for err in [
        extractor.fetch::<i8>(1).unwrap_err(),
        extractor.fetch::<bool>(1).unwrap_err(),
        extractor.fetch::<char>(1).unwrap_err(),
        extractor.fetch::<f64>(2).unwrap_err(),
    ] {
        assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));
    }

    let err = extractor.fetch::<Vec<f32>>(0).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::TypeMismatch { column: 0, .. }));
    let err = extractor.extract_bulk::<Vec<u32>>(0).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));

    assert_eq!(extractor.fetch::<i32>(0).unwrap(), Extracted::Value(1));
    assert_eq!(extractor.fetch::<u8>(1).unwrap(), Extracted::Value(200));
}

#[test]
fn test_bound_out_of_range() {
    let registry = MemoryRegistry::bound().column(MemoryColumn::from_values(&[Some(5i32)]));
    let mut transport = Detached;
    let mut extractor = Extractor::new(&registry, &mut transport);

    let err = extractor.fetch::<i32>(3).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Range { index: 3, .. }));
    assert!(extractor.is_null(3).is_err());
    assert!(extractor.is_null_at(0, 1).is_err());
    assert!(!extractor.is_null_at(0, 0).unwrap());
}

#[test]
fn test_bound_dynamic() {
    let registry = MemoryRegistry::bound()
        .column(MemoryColumn::from_values(&[Some(-300i16)]))
        .column(MemoryColumn::from_values(&[Some(String::from("42"))]))
        .column(MemoryColumn::from_values::<Date>(&[None]));
    let mut transport = Detached;
    let mut extractor = Extractor::new(&registry, &mut transport);

    let mut value = Value::default();
    assert!(extractor.extract(0, &mut value).unwrap());
    assert_eq!(value, Value::Int16(-300));
    assert_eq!(value.data_type(), DataType::Int16);

    let mut dynamic = DynamicValue::default();
    assert!(extractor.extract(1, &mut dynamic).unwrap());
    assert_eq!(dynamic.try_convert::<u8>().unwrap(), 42);
    assert_eq!(dynamic.to_text().unwrap(), "42");

    assert!(!extractor.extract(2, &mut value).unwrap());
    assert_eq!(value, Value::Int16(-300));
}

#[test]
fn test_detached_transport_is_never_called() {
    let registry = MemoryRegistry::bound()
        .column(MemoryColumn::from_values(&[Some(String::from("a"))]))
        .column(MemoryColumn::from_values(&[Some(1u32)]));
    let mut transport = Detached;
    let mut extractor = Extractor::new(&registry, &mut transport);
    for _ in 0..3 {
        assert!(extractor.fetch::<String>(0).is_ok());
        assert!(extractor.fetch::<u32>(1).is_ok());
    }
}
