use std::cmp::Ordering;

use arityc::ast::expr_type::ArithmeticType;
use arityc::number::convert::{ ConversionError, Value };
use arityc::number::significand::Significand;
use arityc::number::{ parse_decimal, rebase, NumberFlag };

/* --- significand arithmetic --- */

#[test]
fn significand_small_operations() {
    let mut s = Significand::from_u64(250);
    s.add_small(10);
    assert_eq!(s.bytes(), &[4, 1]);

    s.multiply_small(1000);
    assert_eq!(s, Significand::from_u64(260_000));

    assert_eq!(s.modulus_small(7), 260_000 % 7);
    assert_eq!(s.divide_small(7), 260_000 % 7);
    assert_eq!(s, Significand::from_u64(260_000 / 7));
}

#[test]
fn significand_add_and_multiply() {
    let mut a = Significand::from_u64(u64::MAX);
    a.add(&Significand::from_u64(1));
    assert_eq!(a.bytes(), &[0, 0, 0, 0, 0, 0, 0, 0, 1]);
    assert_eq!(a.bit_length(), 65);

    let mut b = Significand::from_u64(0xffff_ffff);
    b.multiply(&Significand::from_u64(0xffff_ffff));
    assert_eq!(b, Significand::from_u64(0xffff_fffe_0000_0001));

    b.multiply(&Significand::zero());
    assert!(b.is_zero());
}

#[test]
fn significand_shifts_and_bits() {
    let mut s = Significand::from_u64(0b1011);
    s.shift_left(13);
    assert_eq!(s, Significand::from_u64(0b1011 << 13));
    assert_eq!(s.trailing_zero_bits(), 13);
    assert!(s.bit(13) && s.bit(14) && !s.bit(15) && s.bit(16));

    s.shift_right(14);
    assert_eq!(s, Significand::from_u64(0b101));

    s.shift_right(64);
    assert!(s.is_zero());
    assert_eq!(s.bit_length(), 0);
}

#[test]
fn significand_ordering() {
    let small = Significand::from_u64(255);
    let large = Significand::from_u64(256);

    assert_eq!(small.cmp(&large), Ordering::Less);
    assert_eq!(large.cmp(&small), Ordering::Greater);
    assert_eq!(Significand::zero().cmp(&Significand::from_u64(0)), Ordering::Equal);
}

/* --- parsing and rebasing --- */

#[test]
fn rebase_is_exact_for_whole_numbers() {
    let mut s = Significand::from_u64(3);
    let exponent = rebase(&mut s, 2, 10, 2);

    // 300 = 75 * 2^2
    assert_eq!(s, Significand::from_u64(75));
    assert_eq!(exponent, 2);
}

#[test]
fn rebase_divides_exactly_when_it_can() {
    // 1500 * 10^-2 = 15
    let mut s = Significand::from_u64(1500);
    let exponent = rebase(&mut s, -2, 10, 2);

    assert_eq!(s, Significand::from_u64(15));
    assert_eq!(exponent, 0);
}

#[test]
fn one_half_is_a_power_of_two() {
    let number = parse_decimal("0.5");
    assert_eq!(number.flag(), NumberFlag::Normal);
    assert_eq!(number.significand(), &Significand::from_u64(1));
    assert_eq!(number.exponent(), -1);
    assert!(!number.is_integer());
}

#[test]
fn separators_and_exponents() {
    assert_eq!(parse_decimal("1_000").to_integer(), Some(1000));
    assert_eq!(parse_decimal("12e3").to_integer(), Some(12_000));
    assert_eq!(parse_decimal("1.5e1").to_integer(), Some(15));
    assert_eq!(parse_decimal("2500e-2").to_integer(), Some(25));
    assert_eq!(parse_decimal("1.0").to_integer(), Some(1));
}

#[test]
fn zero_literals() {
    for text in ["0", "0.0", "000", "0e99999999"] {
        let number = parse_decimal(text);
        assert_eq!(number.flag(), NumberFlag::Normal, "{}", text);
        assert!(number.is_zero());
        assert_eq!(number.to_integer(), Some(0));
    }
}

#[test]
fn magnitude_limits() {
    assert_eq!(parse_decimal("1e400").flag(), NumberFlag::Infinite);
    assert_eq!(parse_decimal("1e70000").flag(), NumberFlag::Infinite);
    assert_eq!(parse_decimal("1e-500").flag(), NumberFlag::Zero);
    assert_eq!(parse_decimal("1e-70000").flag(), NumberFlag::Zero);
    assert_eq!(parse_decimal("1e99999999999999999999999").flag(), NumberFlag::Infinite);

    let digits = "1".repeat(65537);
    assert_eq!(parse_decimal(&digits).flag(), NumberFlag::TooPrecise);
}

#[test]
fn integerness() {
    assert!(parse_decimal("10").is_integer());
    assert!(!parse_decimal("0.5").is_integer());
    assert!(!parse_decimal("1e400").is_integer());
    assert!(parse_decimal("1e18").is_integer());
}

/* --- exact conversions --- */

#[test]
fn integers_round_trip() {
    let values = [0, 1, 255, 65535, (1u64 << 31) - 1, (1u64 << 63) - 1, u64::MAX];

    for value in values {
        let number = parse_decimal(&value.to_string());
        assert_eq!(number.to_integer(), Some(value), "{}", value);
    }
}

#[test]
fn integer_too_wide_for_the_buffer() {
    assert_eq!(parse_decimal("18446744073709551616").to_integer(), None);
}

#[test]
fn doubles() {
    let cases = [
        ("0.1", 0.1),
        ("0.5", 0.5),
        ("3.14", 3.14),
        ("2.5", 2.5),
        ("-0.75", -0.75),
        ("1_000.5", 1000.5),
        ("123456.789", 123456.789),
        ("1e22", 1e22),
        ("1e308", 1e308),
        ("1.7976931348623157e308", f64::MAX),
        ("1e-300", 1e-300),
    ];

    for (text, expected) in cases {
        assert_eq!(parse_decimal(text).to_double(), Ok(expected), "{}", text);
    }
}

#[test]
fn floats() {
    assert_eq!(parse_decimal("0.1").to_float(), Ok(0.1f32));
    assert_eq!(parse_decimal("1.5").to_float(), Ok(1.5f32));
    assert_eq!(parse_decimal("3.4028235e38").to_float(), Ok(f32::MAX));
}

#[test]
fn rounding_is_half_up() {
    // nearest-even would give 1e23 and 16777216
    assert_eq!(parse_decimal("1e23").to_double(), Ok(1.0000000000000001e23));
    assert_eq!(parse_decimal("16777217").to_float(), Ok(16777218.0f32));
}

#[test]
fn float_range_errors() {
    assert_eq!(parse_decimal("1.8e308").to_double(), Err(ConversionError::Infinite(ArithmeticType::F64)));
    assert_eq!(parse_decimal("3.5e38").to_float(), Err(ConversionError::Infinite(ArithmeticType::F32)));
    assert_eq!(parse_decimal("1e-320").to_double(), Err(ConversionError::Subnormal(ArithmeticType::F64)));
    assert_eq!(parse_decimal("1e-38").to_float(), Err(ConversionError::Subnormal(ArithmeticType::F32)));
}

#[test]
fn underflow_becomes_signed_zero() {
    let value = parse_decimal("-1e-500").to_double().expect("zero is representable");
    assert_eq!(value, 0.0);
    assert!(value.is_sign_negative());
}

/* --- conversion to arithmetic types --- */

#[test]
fn unsigned_conversion() {
    let number = parse_decimal("10");
    assert_eq!(number.convert_to_arithmetic(ArithmeticType::U8), Ok(Value::Unsigned(10)));

    assert_eq!(
        parse_decimal("256").convert_to_arithmetic(ArithmeticType::U8),
        Err(ConversionError::OutOfBounds(ArithmeticType::U8))
    );
    assert_eq!(
        parse_decimal("18446744073709551615").convert_to_arithmetic(ArithmeticType::U64),
        Ok(Value::Unsigned(u64::MAX))
    );
}

#[test]
fn signed_bounds() {
    assert_eq!(
        parse_decimal("128").convert_to_arithmetic(ArithmeticType::I8),
        Err(ConversionError::OutOfBounds(ArithmeticType::I8))
    );
    assert_eq!(
        parse_decimal("127").convert_to_arithmetic(ArithmeticType::I8),
        Ok(Value::Signed(127))
    );
    assert_eq!(
        parse_decimal("-128").convert_to_arithmetic(ArithmeticType::I8),
        Ok(Value::Signed(-128))
    );
    assert_eq!(
        parse_decimal("-129").convert_to_arithmetic(ArithmeticType::I8),
        Err(ConversionError::OutOfBounds(ArithmeticType::I8))
    );
    assert_eq!(
        parse_decimal("-9223372036854775808").convert_to_arithmetic(ArithmeticType::I64),
        Ok(Value::Signed(i64::MIN))
    );
}

#[test]
fn negated_number_converts_like_a_negative_literal() {
    let mut number = parse_decimal("32768");
    number.negate();
    assert_eq!(number.convert_to_arithmetic(ArithmeticType::I16), Ok(Value::Signed(-32768)));
}

#[test]
fn sign_and_integerness_errors() {
    assert_eq!(
        parse_decimal("-1").convert_to_arithmetic(ArithmeticType::U32),
        Err(ConversionError::NotUnsigned(ArithmeticType::U32))
    );
    assert_eq!(parse_decimal("-0").convert_to_arithmetic(ArithmeticType::U32), Ok(Value::Unsigned(0)));
    assert_eq!(
        parse_decimal("0.5").convert_to_arithmetic(ArithmeticType::I32),
        Err(ConversionError::NotInteger(ArithmeticType::I32))
    );
    assert_eq!(
        parse_decimal("1e400").convert_to_arithmetic(ArithmeticType::I64),
        Err(ConversionError::OutOfBounds(ArithmeticType::I64))
    );
    assert_eq!(
        parse_decimal(&"9".repeat(70000)).convert_to_arithmetic(ArithmeticType::F64),
        Err(ConversionError::TooPrecise)
    );
}

#[test]
fn float_targets() {
    assert_eq!(parse_decimal("2").convert_to_arithmetic(ArithmeticType::F32), Ok(Value::F32(2.0)));
    assert_eq!(parse_decimal("-0.25").convert_to_arithmetic(ArithmeticType::F64), Ok(Value::F64(-0.25)));
}

#[test]
fn magnitude_comparison() {
    let half = parse_decimal("0.5");
    let one = parse_decimal("1");
    let also_one = parse_decimal("1.0");

    assert_eq!(half.compare_magnitude(&one), Ordering::Less);
    assert_eq!(one.compare_magnitude(&half), Ordering::Greater);
    assert_eq!(one.compare_magnitude(&also_one), Ordering::Equal);
    assert_eq!(parse_decimal("-3").compare_magnitude(&parse_decimal("3")), Ordering::Equal);
    assert_eq!(parse_decimal("0").compare_magnitude(&half), Ordering::Less);
}

#[test]
fn error_messages_name_the_type() {
    assert_eq!(
        ConversionError::OutOfBounds(ArithmeticType::I8).to_string(),
        "the literal is out of bounds for `i8`"
    );
    assert_eq!(
        ConversionError::NotUnsigned(ArithmeticType::U16).to_string(),
        "the literal is negative, but `u16` is unsigned"
    );
}
