//! Arbitrary precision decimal literals.
//!
//! A literal is read into a base-10 `(significand, exponent)` pair and then
//! rebased into an equivalent base-2 pair, from which exact integer and IEEE
//! float values are produced by [`convert`]. Magnitudes that cannot be
//! represented are flagged on the [`Number`] rather than reported: the
//! caller decides how to word the diagnostic.

pub mod convert;
pub mod significand;

use std::cmp::Ordering;

use crate::number::significand::Significand;

pub const DIGIT_LIMIT: usize = 65536;
pub const EXPONENT_LIMIT: i64 = 65536;

// decimal orders of magnitude outside what the widest float can hold
const MAX_ORDER: i64 = 308;
const MIN_ORDER: i64 = -400;

// significand size reached before an inexact division rounds
const PRECISION_BITS: u64 = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumberFlag {
    Normal,
    Zero,
    Infinite,
    TooPrecise,
}

/// `significand * 2^exponent` once parsed, with the sign kept apart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Number {
    significand: Significand,
    exponent: i64,
    negative: bool,
    flag: NumberFlag,
}

impl Number {
    pub fn from_u64(value: u64) -> Self {
        Number {
            significand: Significand::from_u64(value),
            exponent: 0,
            negative: false,
            flag: NumberFlag::Normal,
        }
    }

    fn flagged(flag: NumberFlag, negative: bool) -> Self {
        Number { significand: Significand::zero(), exponent: 0, negative, flag }
    }

    pub fn significand(&self) -> &Significand {
        &self.significand
    }

    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn flag(&self) -> NumberFlag {
        self.flag
    }

    pub fn is_zero(&self) -> bool {
        self.flag == NumberFlag::Zero
            || (self.flag == NumberFlag::Normal && self.significand.is_zero())
    }

    pub fn negate(&mut self) {
        self.negative = !self.negative;
    }

    /// Whether the value is a whole number. Only normal numbers qualify.
    pub fn is_integer(&self) -> bool {
        self.flag == NumberFlag::Normal && self.exponent >= 0
    }

    /// Compares absolute values of two normal numbers.
    pub fn compare_magnitude(&self, other: &Number) -> Ordering {
        match (self.significand.is_zero(), other.significand.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }

        // position just past the top bit decides unless both agree
        let top = self.significand.bit_length() as i64 + self.exponent;
        let other_top = other.significand.bit_length() as i64 + other.exponent;
        if top != other_top {
            return top.cmp(&other_top);
        }

        let mut left = self.significand.clone();
        let mut right = other.significand.clone();
        match self.exponent.cmp(&other.exponent) {
            Ordering::Greater => left.shift_left((self.exponent - other.exponent) as u64),
            Ordering::Less => right.shift_left((other.exponent - self.exponent) as u64),
            Ordering::Equal => {}
        }

        left.cmp(&right)
    }
}

/// Reads the text of a DECIMAL lexeme.
///
/// `_` separators are skipped, digits after `.` lower the base-10 exponent
/// and `e`/`E` introduces a signed exponent. The text must come from the
/// lexer: any other character is a bug in the caller.
pub fn parse_decimal(text: &str) -> Number {
    let mantissa = text.split(['e', 'E']).next().unwrap_or_default();
    if mantissa.bytes().filter(u8::is_ascii_digit).count() > DIGIT_LIMIT {
        log::debug!("decimal has more than {} digits", DIGIT_LIMIT);
        return Number::flagged(NumberFlag::TooPrecise, mantissa.starts_with('-'));
    }

    let mut significand = Significand::zero();
    let mut exponent = 0i64;
    let mut negative = false;
    let mut fraction = false;
    let mut significant = 0i64;

    for (at, c) in text.char_indices() {
        match c {
            '_' | '+' => {}
            '-' => negative = true,
            '.' => fraction = true,

            'e' | 'E' => {
                exponent = exponent.saturating_add(parse_exponent(&text[at + 1..]));
                break;
            }

            '0'..='9' => {
                let digit = c as u64 - '0' as u64;
                if significant > 0 || digit != 0 {
                    significant += 1;
                }

                significand.multiply_small(10);
                significand.add_small(digit);
                if fraction {
                    exponent -= 1;
                }
            }

            _ => panic!("unexpected character {:?} in decimal `{}`", c, text),
        }
    }

    if significand.is_zero() {
        return Number { significand, exponent: 0, negative, flag: NumberFlag::Normal };
    }

    if exponent > EXPONENT_LIMIT {
        return Number::flagged(NumberFlag::Infinite, negative);
    }

    if exponent < -EXPONENT_LIMIT {
        return Number::flagged(NumberFlag::Zero, negative);
    }

    let order = exponent + significant - 1;
    if order > MAX_ORDER {
        return Number::flagged(NumberFlag::Infinite, negative);
    }

    if order < MIN_ORDER {
        return Number::flagged(NumberFlag::Zero, negative);
    }

    let exponent = rebase(&mut significand, exponent, 10, 2);
    log::trace!("decimal `{}` is {:?} * 2^{}", text, significand.bytes(), exponent);

    Number { significand, exponent, negative, flag: NumberFlag::Normal }
}

// signed exponent, saturating instead of overflowing
fn parse_exponent(text: &str) -> i64 {
    let mut negative = false;
    let mut value = 0i64;

    for c in text.chars() {
        match c {
            '-' => negative = true,
            '+' | '_' => {}
            '0'..='9' => {
                value = value
                    .saturating_mul(10)
                    .saturating_add(c as i64 - '0' as i64);
            }

            _ => panic!("unexpected character {:?} in exponent `{}`", c, text),
        }
    }

    if negative { -value } else { value }
}

/// Turns `significand * from^exponent` into `significand * to^result`.
///
/// Positive exponents are multiplied out exactly. A negative exponent is
/// first raised by exact divisions; what remains is divided out after
/// scaling the significand up by `to` until it holds `PRECISION_BITS`, and
/// an inexact division is rounded away from zero.
pub fn rebase(significand: &mut Significand, exponent: i64, from: u64, to: u64) -> i64 {
    let mut exponent = exponent;
    let mut scaled = 0i64;

    while exponent > 0 {
        significand.multiply_small(from);
        exponent -= 1;
    }

    while exponent < 0 && !significand.is_zero() {
        let remainder = significand.modulus_small(from);
        if remainder == 0 {
            significand.divide_small(from);
            exponent += 1;
        }
        else if significand.bit_length() < PRECISION_BITS {
            significand.multiply_small(to);
            scaled += 1;
        }
        else {
            significand.add_small(from - remainder);
            significand.divide_small(from);
            exponent += 1;
        }
    }

    let mut trimmed = 0i64;
    if to == 2 {
        let zeros = significand.trailing_zero_bits();
        significand.shift_right(zeros);
        trimmed = zeros as i64;
    }
    else {
        while !significand.is_zero() && significand.modulus_small(to) == 0 {
            significand.divide_small(to);
            trimmed += 1;
        }
    }

    trimmed - scaled
}
