use core::fmt;
use serde::{Serialize, Serializer};

/// A Solidity type as it appears in an EIP-712 field descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SolType {
    /// `string`
    String,
    /// `bool`
    Bool,
    /// `uintN`, N a multiple of 8 in `8..=256`.
    Uint(u16),
    /// `intN`, N a multiple of 8 in `8..=256`.
    Int(u16),
    /// A named struct type.
    Struct(String),
    /// A dynamic array `T[]`.
    Array(Box<SolType>),
}

impl SolType {
    /// The smallest unsigned integer type holding `value`.
    pub const fn uint_for(value: u64) -> Self {
        Self::Uint(round_bits(u64::BITS - value.leading_zeros()))
    }

    /// The smallest signed integer type holding `value`.
    pub const fn int_for(value: i64) -> Self {
        // `!value` is the magnitude that must fit below the sign bit.
        let magnitude = if value < 0 { !value } else { value };
        Self::Int(round_bits(u64::BITS - (magnitude as u64).leading_zeros() + 1))
    }

    /// The struct name this type refers to, looking through arrays.
    pub fn struct_name(&self) -> Option<&str> {
        match self {
            Self::Struct(name) => Some(name),
            Self::Array(inner) => inner.struct_name(),
            _ => None,
        }
    }
}

/// Round a bit count up to the next multiple of 8, clamped to `8..=256`.
const fn round_bits(bits: u32) -> u16 {
    let rounded = bits.div_ceil(8) * 8;
    if rounded < 8 {
        8
    } else if rounded > 256 {
        256
    } else {
        rounded as u16
    }
}

impl fmt::Display for SolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Bool => f.write_str("bool"),
            Self::Uint(bits) => write!(f, "uint{bits}"),
            Self::Int(bits) => write!(f, "int{bits}"),
            Self::Struct(name) => f.write_str(name),
            Self::Array(inner) => write!(f, "{inner}[]"),
        }
    }
}

impl Serialize for SolType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
