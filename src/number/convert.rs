use std::cmp::Ordering;

use thiserror::Error;

use crate::ast::expr_type::ArithmeticType;
use crate::number::{ Number, NumberFlag };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("the literal has more digits than can be read")]
    TooPrecise,

    #[error("the literal is too large for `{0}`")]
    Infinite(ArithmeticType),

    #[error("the literal is too small for `{0}` without losing precision")]
    Subnormal(ArithmeticType),

    #[error("the literal is out of bounds for `{0}`")]
    OutOfBounds(ArithmeticType),

    #[error("the literal is not an integer, as `{0}` requires")]
    NotInteger(ArithmeticType),

    #[error("the literal is negative, but `{0}` is unsigned")]
    NotUnsigned(ArithmeticType),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Signed(i64),
    Unsigned(u64),
    F32(f32),
    F64(f64),
}

struct FloatFormat {
    ty: ArithmeticType,
    mantissa_width: u32,
    exponent_width: u32,
}

const SINGLE: FloatFormat = FloatFormat {
    ty: ArithmeticType::F32,
    mantissa_width: 23,
    exponent_width: 8,
};

const DOUBLE: FloatFormat = FloatFormat {
    ty: ArithmeticType::F64,
    mantissa_width: 52,
    exponent_width: 11,
};

impl FloatFormat {
    fn bias(&self) -> i64 {
        (1 << (self.exponent_width - 1)) - 1
    }

    // all ones is reserved for infinities and NaNs
    fn max_biased(&self) -> i64 {
        (1 << self.exponent_width) - 2
    }

    fn sign_bit(&self, negative: bool) -> u64 {
        (negative as u64) << (self.mantissa_width + self.exponent_width)
    }
}

impl Number {
    /// The value as an unsigned 64-bit integer, if it is a whole number that
    /// fits.
    pub fn to_integer(&self) -> Option<u64> {
        if !self.is_integer() {
            return None;
        }

        let bits = self.significand.bit_length();
        if bits == 0 {
            return Some(0);
        }

        if bits + self.exponent as u64 > 64 {
            return None;
        }

        let bytes = self.significand.bytes();
        let mut buffer = [0u8; 8];
        buffer[..bytes.len()].copy_from_slice(bytes);
        Some(u64::from_le_bytes(buffer) << self.exponent)
    }

    pub fn to_float(&self) -> Result<f32, ConversionError> {
        let bits = self.to_bits(&SINGLE)?;
        Ok(f32::from_bits(bits as u32))
    }

    pub fn to_double(&self) -> Result<f64, ConversionError> {
        self.to_bits(&DOUBLE).map(f64::from_bits)
    }

    // Keeps the `mantissa_width` bits below the top bit and rounds up when
    // the next bit is set. Ties are not broken to even.
    fn to_bits(&self, format: &FloatFormat) -> Result<u64, ConversionError> {
        match self.flag {
            NumberFlag::Normal => {}
            NumberFlag::Zero => return Ok(format.sign_bit(self.negative)),
            NumberFlag::Infinite => return Err(ConversionError::Infinite(format.ty)),
            NumberFlag::TooPrecise => return Err(ConversionError::TooPrecise),
        }

        if self.significand.is_zero() {
            return Ok(format.sign_bit(self.negative));
        }

        let width = format.mantissa_width as i64;
        let top = self.significand.bit_length() as i64 - 1;

        let mut mantissa = 0u64;
        for at in (top - width..top).rev() {
            mantissa <<= 1;
            if at >= 0 && self.significand.bit(at as u64) {
                mantissa |= 1;
            }
        }

        let mut exponent = top + self.exponent;
        let next = top - width - 1;
        if next >= 0 && self.significand.bit(next as u64) {
            mantissa += 1;
            if mantissa >> width != 0 {
                mantissa = 0;
                exponent += 1;
            }
        }

        let biased = exponent + format.bias();
        if biased > format.max_biased() {
            return Err(ConversionError::Infinite(format.ty));
        }

        if biased <= 0 {
            return Err(ConversionError::Subnormal(format.ty));
        }

        Ok(format.sign_bit(self.negative) | (biased as u64) << width | mantissa)
    }

    /// Converts to a value of `target`, checking bounds and sign.
    ///
    /// Signed targets accept magnitudes up to `max + 1`, the last one only
    /// when negative. Unsigned targets reject any negative nonzero value.
    pub fn convert_to_arithmetic(&self, target: ArithmeticType) -> Result<Value, ConversionError> {
        match target {
            ArithmeticType::F32 => return self.to_float().map(Value::F32),
            ArithmeticType::F64 => return self.to_double().map(Value::F64),
            _ => {}
        }

        match self.flag {
            NumberFlag::Normal => {}
            NumberFlag::TooPrecise => return Err(ConversionError::TooPrecise),
            NumberFlag::Infinite => return Err(ConversionError::OutOfBounds(target)),
            NumberFlag::Zero => return Err(ConversionError::NotInteger(target)),
        }

        if !self.is_integer() {
            return Err(ConversionError::NotInteger(target));
        }

        let Some(max) = target.integer_max() else {
            unreachable!("float type {} converted as an integer", target);
        };

        if target.is_unsigned() {
            if self.negative && !self.significand.is_zero() {
                return Err(ConversionError::NotUnsigned(target));
            }

            if self.compare_magnitude(&Number::from_u64(max)) == Ordering::Greater {
                return Err(ConversionError::OutOfBounds(target));
            }

            return self.to_integer()
                .map(Value::Unsigned)
                .ok_or(ConversionError::OutOfBounds(target));
        }

        match self.compare_magnitude(&Number::from_u64(max + 1)) {
            Ordering::Greater => return Err(ConversionError::OutOfBounds(target)),
            Ordering::Equal if !self.negative => return Err(ConversionError::OutOfBounds(target)),
            _ => {}
        }

        let magnitude = self.to_integer().ok_or(ConversionError::OutOfBounds(target))?;
        // `max + 1` wraps onto the minimum
        let value = magnitude as i64;
        Ok(Value::Signed(if self.negative { value.wrapping_neg() } else { value }))
    }
}
