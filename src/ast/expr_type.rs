use std::fmt;

use subenum::subenum;

#[subenum(ArithmeticType, IntegerType)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    #[subenum(ArithmeticType, IntegerType)]
    I8,
    #[subenum(ArithmeticType, IntegerType)]
    I16,
    #[subenum(ArithmeticType, IntegerType)]
    I32,
    #[subenum(ArithmeticType, IntegerType)]
    I64,
    #[subenum(ArithmeticType, IntegerType)]
    U8,
    #[subenum(ArithmeticType, IntegerType)]
    U16,
    #[subenum(ArithmeticType, IntegerType)]
    U32,
    #[subenum(ArithmeticType, IntegerType)]
    U64,

    #[subenum(ArithmeticType)]
    F32,
    #[subenum(ArithmeticType)]
    F64,

    Bool,
}

const TYPE_NAMES: [(&str, Type); 11] = [
    ("i8", Type::I8),
    ("i16", Type::I16),
    ("i32", Type::I32),
    ("i64", Type::I64),
    ("u8", Type::U8),
    ("u16", Type::U16),
    ("u32", Type::U32),
    ("u64", Type::U64),
    ("f32", Type::F32),
    ("f64", Type::F64),
    ("bool", Type::Bool),
];

impl Type {
    pub fn from_name(name: &str) -> Option<Type> {
        TYPE_NAMES.iter()
            .find(|(n, _)| *n == name)
            .map(|(_, ty)| *ty)
    }

    pub fn name(self) -> &'static str {
        match TYPE_NAMES.iter().find(|(_, ty)| *ty == self) {
            Some((name, _)) => name,
            None => unreachable!("type {:?} has no name", self),
        }
    }

    pub fn is_arithmetic(self) -> bool {
        ArithmeticType::try_from(self).is_ok()
    }

    pub fn is_integer(self) -> bool {
        IntegerType::try_from(self).is_ok()
    }

    pub fn is_unsigned(self) -> bool {
        matches!(self, Type::U8 | Type::U16 | Type::U32 | Type::U64)
    }
}

impl ArithmeticType {
    pub fn is_float(self) -> bool {
        matches!(self, ArithmeticType::F32 | ArithmeticType::F64)
    }

    pub fn is_unsigned(self) -> bool {
        Type::from(self).is_unsigned()
    }

    // largest value of an integer type
    pub fn integer_max(self) -> Option<u64> {
        IntegerType::try_from(Type::from(self)).ok().map(IntegerType::max_value)
    }
}

impl IntegerType {
    pub fn max_value(self) -> u64 {
        match self {
            IntegerType::I8 => i8::MAX as u64,
            IntegerType::I16 => i16::MAX as u64,
            IntegerType::I32 => i32::MAX as u64,
            IntegerType::I64 => i64::MAX as u64,
            IntegerType::U8 => u8::MAX as u64,
            IntegerType::U16 => u16::MAX as u64,
            IntegerType::U32 => u32::MAX as u64,
            IntegerType::U64 => u64::MAX,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for ArithmeticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Type::from(*self).name())
    }
}
