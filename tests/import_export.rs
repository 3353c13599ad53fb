use std::io::Cursor;

use bytes::BufMut;
use unipoly::integer::Integer;
use unipoly::poly::polynomial::Polynomial;

#[test]
fn binary_round_trip() {
    let a = Polynomial::parse("-5x^3 +3x^2 +2x^1 -4").unwrap();

    let mut export = vec![];
    a.write(&mut export).unwrap();

    let b = Polynomial::read(Cursor::new(&export)).unwrap();
    assert_eq!(a, b);
    assert_eq!(b.to_string(), "-5x^3 +3x^2 +2x^1 -4");
}

#[test]
fn binary_round_trip_of_zero() {
    let mut export = vec![];
    Polynomial::new().write(&mut export).unwrap();

    let b = Polynomial::read(Cursor::new(&export)).unwrap();
    assert!(b.is_zero());
}

#[test]
fn binary_round_trip_of_large_coefficients() {
    let mut a = Polynomial::new();
    a.add_term(Integer::new(i64::MAX), 7).unwrap();
    a.add_term(Integer::new(i64::MAX), 7).unwrap();
    a.add_term(Integer::new(-1), 0).unwrap();

    let mut export = vec![];
    a.write(&mut export).unwrap();

    let b = Polynomial::read(Cursor::new(&export)).unwrap();
    assert_eq!(a, b);
    assert_eq!(b.degree(), 7);
    assert_eq!(b.coefficient(7), &Integer::new(i64::MAX) + &Integer::new(i64::MAX));
}

#[test]
fn truncated_stream_is_rejected() {
    let a = Polynomial::parse("7x^2 +1").unwrap();

    let mut export = vec![];
    a.write(&mut export).unwrap();

    for len in 0..export.len() {
        assert!(Polynomial::read(Cursor::new(&export[..len])).is_err());
    }
}

#[test]
fn unsorted_stream_is_rejected() {
    // two terms with ascending exponents violate the canonical order
    let mut payload = vec![];
    payload.put_u64_le(2);
    Integer::new(1).write_packed(&mut payload);
    payload.put_u32_le(1);
    Integer::new(1).write_packed(&mut payload);
    payload.put_u32_le(5);

    let mut export = vec![];
    export.put_u64_le(payload.len() as u64);
    export.put_slice(&payload);

    let err = Polynomial::read(Cursor::new(&export)).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}

#[test]
fn zero_coefficient_stream_is_rejected() {
    let mut payload = vec![];
    payload.put_u64_le(1);
    Integer::zero().write_packed(&mut payload);
    payload.put_u32_le(3);

    let mut export = vec![];
    export.put_u64_le(payload.len() as u64);
    export.put_slice(&payload);

    let err = Polynomial::read(Cursor::new(&export)).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}
