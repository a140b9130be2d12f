use std::{
    collections::{LinkedList, VecDeque},
    fmt::Debug,
};

use colfetch::{
    Blob, ColumnCodec, DataType, Date, DateTime, DynamicValue, ErrorKind, Extract, Extracted,
    Extractor, ExtractorOptions, Time, Value, c_type::CDataType,
};
use colfetch_testkit::{
    data_gen::DataGen,
    registry::{MemoryColumn, MemoryRegistry},
    transport::{ScriptedTransport, TransportFault},
};

fn manual_round_trip<T>(value: T)
where
    T: ColumnCodec + Extract + PartialEq + Debug,
{
    let registry = MemoryRegistry::manual().column_count(1);
    let mut transport = ScriptedTransport::new().value(0, &value);
    let mut extractor = Extractor::new(&registry, &mut transport);

    assert_eq!(extractor.fetch::<T>(0).unwrap(), Extracted::Value(value));
    assert!(!extractor.is_null(0).unwrap());
    assert_eq!(transport.requests()[0].1, T::C_TYPE);
}

fn manual_null_keeps_target<T>(sentinel: T)
where
    T: Extract + Clone + PartialEq + Debug,
{
    let registry = MemoryRegistry::manual().column_count(1);
    let mut transport = ScriptedTransport::new().null(0);
    let mut extractor = Extractor::new(&registry, &mut transport);

    let mut target = sentinel.clone();
    assert!(!extractor.extract(0, &mut target).unwrap());
    assert_eq!(target, sentinel);
    assert!(extractor.is_null(0).unwrap());
    assert!(extractor.is_null_at(0, 0).unwrap());
}

fn streamed(
    value: &str,
    chunk_size: usize,
    max_field_size: usize,
) -> (colfetch::Result<String>, usize) {
    let registry = MemoryRegistry::manual()
        .column_count(1)
        .max_field_size(max_field_size);
    let mut transport = ScriptedTransport::new().value(0, &value.to_string());
    let options = ExtractorOptions::new().chunk_size(chunk_size);
    let mut extractor = Extractor::with_options(&registry, &mut transport, options).unwrap();
    let result = extractor
        .fetch::<String>(0)
        .map(|v| v.into_option().unwrap_or_default());
    (result, transport.calls())
}

#[test]
fn test_manual_scalars() {
    manual_round_trip(i8::MIN);
    manual_round_trip(u8::MAX);
    manual_round_trip(-2i16);
    manual_round_trip(2u16);
    manual_round_trip(-99999i32);
    manual_round_trip(99999u32);
    manual_round_trip(-(1i64 << 40));
    manual_round_trip(1u64 << 63);
    manual_round_trip(f32::MAX);
    manual_round_trip(std::f64::consts::PI);
    manual_round_trip(false);
    manual_round_trip('q');
    manual_round_trip(String::from("streamed text"));
    manual_round_trip(String::new());
    manual_round_trip(Blob::from(vec![0u8, 255, 0, 1]));
    manual_round_trip(Date::new(1970, 1, 1));
    manual_round_trip(Time::new(0, 0, 1));
    manual_round_trip(DateTime::from_ymd_hms_nano(1601, 1, 1, 0, 0, 0, 999));
}

#[test]
fn test_manual_c_types() {
    let registry = MemoryRegistry::manual().column_count(4);
    let mut transport = ScriptedTransport::new()
        .value(0, &String::from("a"))
        .value(1, &Blob::from(vec![1]))
        .value(2, &7u64)
        .value(3, &DateTime::default());
    let mut extractor = Extractor::new(&registry, &mut transport);
    extractor.fetch::<String>(0).unwrap();
    extractor.fetch::<Blob>(1).unwrap();
    extractor.fetch::<u64>(2).unwrap();
    extractor.fetch::<DateTime>(3).unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0], (0, CDataType::Char, 1024));
    assert_eq!(requests[1], (1, CDataType::Binary, 1024));
    assert_eq!(requests[2], (2, CDataType::UBigInt, 8));
    assert_eq!(requests[3], (3, CDataType::Timestamp, 16));
}

#[test]
fn test_manual_nulls() {
    manual_null_keeps_target(5i32);
    manual_null_keeps_target(5.0f32);
    manual_null_keeps_target('n');
    manual_null_keeps_target(String::from("untouched"));
    manual_null_keeps_target(Blob::from(vec![3]));
    manual_null_keeps_target(Date::new(2020, 2, 2));
    manual_null_keeps_target(Time::new(2, 2, 2));
    manual_null_keeps_target(DateTime::default());
}

#[test]
fn test_manual_is_null_tracking() {
    let registry = MemoryRegistry::manual().column_count(4);
    let mut transport = ScriptedTransport::new()
        .value(0, &1i32)
        .null(1)
        .value(3, &String::from("x"));
    let mut extractor = Extractor::new(&registry, &mut transport);

    let err = extractor.is_null(0).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Range { .. }));

    extractor.fetch::<i32>(0).unwrap();
    extractor.fetch::<i32>(1).unwrap();
    assert!(!extractor.is_null(0).unwrap());
    assert!(extractor.is_null(1).unwrap());
    assert!(extractor.is_null(2).is_err());
    assert!(extractor.is_null(3).is_err());
    assert!(extractor.is_null_at(1, 1).is_err());

    extractor.fetch::<String>(3).unwrap();
    assert!(!extractor.is_null(3).unwrap());
}

#[test]
fn test_chunk_count() {
    let mut data_gen = DataGen::new(5489);
    for (len, chunk, calls) in [
        (2500, 1024, 3),
        (1024, 1024, 1),
        (1025, 1024, 2),
        (1000, 100, 10),
        (1001, 100, 11),
        (1, 1, 1),
    ] {
        let text = data_gen.text(len);
        let (result, actual) = streamed(&text, chunk, usize::MAX);
        assert_eq!(result.unwrap(), text);
        assert_eq!(actual, calls, "len {len}, chunk {chunk}");
    }
}

#[test]
fn test_random_streaming() {
    let mut data_gen = DataGen::new(2985745485);
    for _ in 0..50 {
        let len = data_gen.rng().usize(1..5000);
        let chunk = data_gen.rng().usize(1..700);
        let blob = data_gen.blob(len);

        let registry = MemoryRegistry::manual().column_count(1);
        let mut transport = ScriptedTransport::new().value(0, &blob);
        let options = ExtractorOptions::new().chunk_size(chunk);
        let mut extractor = Extractor::with_options(&registry, &mut transport, options).unwrap();
        assert_eq!(
            extractor.fetch::<Blob>(0).unwrap(),
            Extracted::Value(blob.clone())
        );
        assert_eq!(transport.calls(), len.div_ceil(chunk));
    }
}

#[test]
fn test_empty_value_is_one_call() {
    let (result, calls) = streamed("", 16, 100);
    assert_eq!(result.unwrap(), "");
    assert_eq!(calls, 1);
}

#[test]
fn test_size_exceeded() {
    let text = "s".repeat(2500);
    let (result, calls) = streamed(&text, 1024, 1500);
    let err = result.unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::SizeExceeded {
            size: 2048,
            max: 1500
        }
    ));
    assert_eq!(calls, 2);
    assert!(err.to_string().contains("max_field_size"));

    let (result, _) = streamed(&text, 1024, 2500);
    assert_eq!(result.unwrap().len(), 2500);
}

#[test]
fn test_unknown_length_mid_stream() {
    for chunk in 0..3 {
        let registry = MemoryRegistry::manual().column_count(1);
        let mut transport = ScriptedTransport::new()
            .value(0, &"u".repeat(3000))
            .fault(0, chunk, TransportFault::NoTotal);
        let mut extractor = Extractor::new(&registry, &mut transport);
        let mut target = String::from("before");
        let err = extractor.extract(0, &mut target).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnknownLength { column: 0 }));
        assert_eq!(target, "before");
        assert!(extractor.is_null(0).is_err());
    }

    let registry = MemoryRegistry::manual().column_count(1);
    let mut transport = ScriptedTransport::new().fault(0, 0, TransportFault::NoTotal);
    let mut extractor = Extractor::new(&registry, &mut transport);
    assert!(extractor.fetch::<Date>(0).unwrap_err().is_unknown_length());
}

#[test]
fn test_driver_failures() {
    let registry = MemoryRegistry::manual().column_count(10);
    let mut transport = ScriptedTransport::new()
        .value(0, &"d".repeat(2000))
        .fault(0, 1, TransportFault::Driver("connection reset".into()))
        .value(1, &"e".repeat(2000))
        .fault(1, 0, TransportFault::ShortWrite)
        .fault(2, 0, TransportFault::NoData);
    let mut extractor = Extractor::new(&registry, &mut transport);

    let err = extractor.fetch::<String>(0).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Driver { .. }));
    assert!(err.to_string().contains("connection reset"));

    let err = extractor.fetch::<String>(1).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Driver { .. }));

    let err = extractor.fetch::<i64>(2).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Driver { .. }));

    let err = extractor.fetch::<i64>(9).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Driver { .. }));
}

#[test]
fn test_manual_column_out_of_range() {
    let registry = MemoryRegistry::manual().column(MemoryColumn::from_values(&[Some(1i32)]));
    let mut transport = ScriptedTransport::new().value(0, &1i32);
    let mut extractor = Extractor::new(&registry, &mut transport);

    for column in [1, 1 << 40, usize::MAX] {
        let mut target = 7i32;
        let err = extractor.extract(column, &mut target).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Range { index, bound: 1, .. } if *index == column));
        assert_eq!(target, 7);
        assert!(extractor.is_null(column).is_err());
    }
    let err = extractor.fetch::<String>(usize::MAX).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Range { .. }));

    assert_eq!(extractor.fetch::<i32>(0).unwrap(), Extracted::Value(1));
    drop(extractor);
    assert_eq!(transport.calls(), 1);
}

#[test]
fn test_no_data_ends_the_value() {
    let registry = MemoryRegistry::manual().column_count(1);
    let mut transport = ScriptedTransport::new()
        .value(0, &"n".repeat(300))
        .fault(0, 1, TransportFault::NoData);
    let options = ExtractorOptions::new().chunk_size(100);
    let mut extractor = Extractor::with_options(&registry, &mut transport, options).unwrap();
    assert_eq!(
        extractor.fetch::<String>(0).unwrap(),
        Extracted::Value("n".repeat(100))
    );
}

#[test]
fn test_fixed_width_mismatch() {
    let registry = MemoryRegistry::manual().column_count(1);
    let mut transport = ScriptedTransport::new().bytes(0, vec![1, 2]);
    let mut extractor = Extractor::new(&registry, &mut transport);
    let err = extractor.fetch::<i32>(0).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Driver { .. }));
}

#[test]
fn test_invalid_utf8() {
    let registry = MemoryRegistry::manual().column_count(1);
    let mut transport = ScriptedTransport::new().bytes(0, vec![b'o', b'k', 0xc3]);
    let mut extractor = Extractor::new(&registry, &mut transport);
    let err = extractor.fetch::<String>(0).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidFormat { .. }));
}

#[test]
fn test_manual_dynamic() {
    let registry = MemoryRegistry::manual()
        .column(MemoryColumn::from_values::<f64>(&[None]))
        .column(MemoryColumn::from_values::<String>(&[None]))
        .column(MemoryColumn::from_values::<Time>(&[None]));
    let mut transport = ScriptedTransport::new()
        .value(0, &2.5f64)
        .value(1, &String::from("true"))
        .null(2);
    let mut extractor = Extractor::new(&registry, &mut transport);

    assert_eq!(
        extractor.fetch::<Value>(0).unwrap(),
        Extracted::Value(Value::Float64(2.5))
    );
    let dynamic = extractor.fetch::<DynamicValue>(1).unwrap().into_option().unwrap();
    assert_eq!(dynamic.data_type(), DataType::String);
    assert!(dynamic.to_bool().unwrap());
    assert!(extractor.fetch::<Value>(2).unwrap().is_null());
    assert!(extractor.is_null(2).unwrap());
}

fn assert_invalid_access<C: Extract + Debug>(
    extractor: &mut Extractor<'_, MemoryRegistry, ScriptedTransport>,
) {
    let err = extractor.fetch::<C>(0).unwrap_err();
    assert!(
        matches!(err.kind(), ErrorKind::InvalidAccess { .. }),
        "{}",
        std::any::type_name::<C>()
    );
}

macro_rules! assert_containers_rejected {
    ($extractor:expr, $($ty:ty),*) => {
        $(
            assert_invalid_access::<Vec<$ty>>($extractor);
            assert_invalid_access::<VecDeque<$ty>>($extractor);
            assert_invalid_access::<LinkedList<$ty>>($extractor);
        )*
    };
}

#[test]
fn test_manual_containers_rejected() {
    let registry = MemoryRegistry::manual().column(MemoryColumn::from_values(&[Some(1i32)]));
    let mut transport = ScriptedTransport::new().value(0, &1i32);
    let mut extractor = Extractor::new(&registry, &mut transport);
    assert_containers_rejected!(
        &mut extractor,
        i8, u8, i16, u16, i32, u32, i64, u64, f32, f64, bool, char, String, Blob, Date, Time,
        DateTime, Value, DynamicValue
    );
    drop(extractor);
    assert_eq!(transport.calls(), 0);
}
