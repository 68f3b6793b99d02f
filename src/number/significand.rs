use std::cmp::Ordering;

/// An unsigned magnitude of any size, stored as little-endian base-256
/// digits without trailing zero bytes. Zero has no digits.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Significand {
    bytes: Vec<u8>,
}

impl Significand {
    pub fn zero() -> Self {
        Significand { bytes: Vec::new() }
    }

    pub fn from_u64(value: u64) -> Self {
        let mut significand = Significand { bytes: value.to_le_bytes().to_vec() };
        significand.normalize();
        significand
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_zero(&self) -> bool {
        self.bytes.is_empty()
    }

    fn normalize(&mut self) {
        while self.bytes.last() == Some(&0) {
            self.bytes.pop();
        }
    }

    pub fn bit_length(&self) -> u64 {
        match self.bytes.last() {
            Some(&top) => (self.bytes.len() as u64 - 1) * 8 + (8 - top.leading_zeros() as u64),
            None => 0,
        }
    }

    pub fn bit(&self, index: u64) -> bool {
        let Ok(byte) = usize::try_from(index / 8) else {
            return false;
        };

        self.bytes.get(byte).is_some_and(|b| (b >> (index % 8)) & 1 == 1)
    }

    pub fn trailing_zero_bits(&self) -> u64 {
        match self.bytes.iter().position(|&b| b != 0) {
            Some(at) => at as u64 * 8 + self.bytes[at].trailing_zeros() as u64,
            None => 0,
        }
    }

    pub fn add(&mut self, other: &Significand) {
        if self.bytes.len() < other.bytes.len() {
            self.bytes.resize(other.bytes.len(), 0);
        }

        let mut carry = 0u16;
        for (i, byte) in self.bytes.iter_mut().enumerate() {
            let sum = *byte as u16 + other.bytes.get(i).copied().unwrap_or(0) as u16 + carry;
            *byte = sum as u8;
            carry = sum >> 8;

            if carry == 0 && i >= other.bytes.len() {
                break;
            }
        }

        if carry != 0 {
            self.bytes.push(carry as u8);
        }
    }

    pub fn add_small(&mut self, addend: u64) {
        let mut carry = addend;
        let mut at = 0;

        while carry != 0 {
            if at == self.bytes.len() {
                self.bytes.push(0);
            }

            let sum = self.bytes[at] as u64 + (carry & 0xff);
            self.bytes[at] = sum as u8;
            carry = (carry >> 8) + (sum >> 8);
            at += 1;
        }
    }

    // schoolbook, one byte of `other` at a time
    pub fn multiply(&mut self, other: &Significand) {
        if self.is_zero() || other.is_zero() {
            self.bytes.clear();
            return;
        }

        let mut product = vec![0u8; self.bytes.len() + other.bytes.len()];
        for (i, &a) in self.bytes.iter().enumerate() {
            let mut carry = 0u64;
            for (j, &b) in other.bytes.iter().enumerate() {
                let cell = product[i + j] as u64 + a as u64 * b as u64 + carry;
                product[i + j] = cell as u8;
                carry = cell >> 8;
            }

            let mut at = i + other.bytes.len();
            while carry != 0 {
                let cell = product[at] as u64 + carry;
                product[at] = cell as u8;
                carry = cell >> 8;
                at += 1;
            }
        }

        self.bytes = product;
        self.normalize();
    }

    pub fn multiply_small(&mut self, factor: u64) {
        let mut carry = 0u128;
        for byte in self.bytes.iter_mut() {
            let cell = *byte as u128 * factor as u128 + carry;
            *byte = cell as u8;
            carry = cell >> 8;
        }

        while carry != 0 {
            self.bytes.push(carry as u8);
            carry >>= 8;
        }

        self.normalize();
    }

    /// Divides in place and returns the remainder.
    pub fn divide_small(&mut self, divisor: u64) -> u64 {
        assert!(divisor != 0, "division of a significand by zero");

        let mut remainder = 0u128;
        for byte in self.bytes.iter_mut().rev() {
            let cell = remainder << 8 | *byte as u128;
            *byte = (cell / divisor as u128) as u8;
            remainder = cell % divisor as u128;
        }

        self.normalize();
        remainder as u64
    }

    pub fn modulus_small(&self, divisor: u64) -> u64 {
        assert!(divisor != 0, "division of a significand by zero");

        self.bytes.iter().rev().fold(0u128, |remainder, &byte| {
            (remainder << 8 | byte as u128) % divisor as u128
        }) as u64
    }

    pub fn shift_left(&mut self, bits: u64) {
        if self.is_zero() || bits == 0 {
            return;
        }

        let whole = (bits / 8) as usize;
        let part = (bits % 8) as u32;

        if part != 0 {
            let mut carry = 0u8;
            for byte in self.bytes.iter_mut() {
                let shifted = (*byte as u16) << part | carry as u16;
                *byte = shifted as u8;
                carry = (shifted >> 8) as u8;
            }

            if carry != 0 {
                self.bytes.push(carry);
            }
        }

        self.bytes.splice(0..0, std::iter::repeat_n(0, whole));
    }

    pub fn shift_right(&mut self, bits: u64) {
        let whole = usize::try_from(bits / 8).unwrap_or(usize::MAX);
        let part = (bits % 8) as u32;

        if whole >= self.bytes.len() {
            self.bytes.clear();
            return;
        }

        self.bytes.drain(..whole);
        if part != 0 {
            let mut carry = 0u8;
            for byte in self.bytes.iter_mut().rev() {
                let shifted = (*byte as u16) << (8 - part);
                *byte = (shifted >> 8) as u8 | carry;
                carry = shifted as u8;
            }
        }

        self.normalize();
    }
}

impl Ord for Significand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bytes.len()
            .cmp(&other.bytes.len())
            .then_with(|| self.bytes.iter().rev().cmp(other.bytes.iter().rev()))
    }
}

impl PartialOrd for Significand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
