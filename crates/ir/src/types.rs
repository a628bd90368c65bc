// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Data types
//!
//! This module defines the closed set of SQL data types understood by the
//! function resolver, together with the predicates used by legality checks
//! and the constants that bound decimal precision.
//!
//! ## Families
//!
//! - **Numeric**: `TinyInt`, `SmallInt`, `Integer`, `BigInt`, `LargeInt`,
//!   `Float`, `Double`, `DecimalV2`, `DecimalV3`
//! - **String**: `Char`, `Varchar`, `String`
//! - **Temporal**: `Date`, `DateTime`
//! - **Nested**: `Array`
//! - **Metric-only**: `Bitmap`, `Hll` (only usable through dedicated functions)
//! - **Special**: `NullType` (type of a bare `NULL`), `AnyType` (signature
//!   wildcard, never a resolved type)
//!
//! ## Decimals
//!
//! `DecimalV3` values are stored in 32, 64 or 128 bits depending on their
//! precision. Signatures declare one template per storage width
//! ([`DataType::DEFAULT_DECIMAL32`] and friends); the resolver matches an
//! actual decimal against the template of its width.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FunctionError, FunctionResult};

/// Largest precision a 128-bit decimal can hold
pub const MAX_DECIMAL128_PRECISION: u32 = 38;
/// Largest precision a 64-bit decimal can hold
pub const MAX_DECIMAL64_PRECISION: u32 = 18;
/// Largest precision a 32-bit decimal can hold
pub const MAX_DECIMAL32_PRECISION: u32 = 9;

/// Largest precision of the legacy decimal type
pub const MAX_DECIMALV2_PRECISION: u32 = 27;
/// Largest scale of the legacy decimal type
pub const MAX_DECIMALV2_SCALE: u32 = 9;

/// Scale below which `avg` over a 128-bit decimal widens its input
pub const DEFAULT_MIN_AVG_DECIMAL128_SCALE: u32 = 4;

/// Maximum length of a `VARCHAR` without an explicit length
pub const MAX_VARCHAR_LENGTH: u32 = 65533;

/// SQL data types
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    // Numeric types
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    LargeInt,
    Float,
    Double,
    /// Legacy decimal: (precision, scale)
    DecimalV2(u32, u32),
    /// Decimal with precision-dependent storage: (precision, scale)
    DecimalV3(u32, u32),

    // Boolean
    Boolean,

    // String types
    Char(u32),
    Varchar(u32),
    String,

    // Date/Time types
    Date,
    DateTime,

    // Nested types
    Array(Box<DataType>),

    // Metric-only types
    Bitmap,
    Hll,

    // Special types
    NullType,
    AnyType,
}

/// Storage width of a `DecimalV3` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DecimalWidth {
    Decimal32,
    Decimal64,
    Decimal128,
}

impl DecimalWidth {
    /// Storage width needed for the given precision
    pub fn for_precision(precision: u32) -> Self {
        if precision <= MAX_DECIMAL32_PRECISION {
            DecimalWidth::Decimal32
        } else if precision <= MAX_DECIMAL64_PRECISION {
            DecimalWidth::Decimal64
        } else {
            DecimalWidth::Decimal128
        }
    }

    /// Number of width steps between two storage classes
    pub fn steps_to(self, wider: DecimalWidth) -> Option<u32> {
        (wider >= self).then(|| wider as u32 - self as u32)
    }
}

impl DataType {
    /// `DECIMALV3(9, 0)`, template for 32-bit decimals
    pub const DEFAULT_DECIMAL32: DataType = DataType::DecimalV3(MAX_DECIMAL32_PRECISION, 0);
    /// `DECIMALV3(18, 0)`, template for 64-bit decimals
    pub const DEFAULT_DECIMAL64: DataType = DataType::DecimalV3(MAX_DECIMAL64_PRECISION, 0);
    /// `DECIMALV3(38, 0)`, template for 128-bit decimals
    pub const DEFAULT_DECIMAL128: DataType = DataType::DecimalV3(MAX_DECIMAL128_PRECISION, 0);
    /// `DECIMALV2(27, 9)`
    pub const DECIMALV2_SYSTEM_DEFAULT: DataType =
        DataType::DecimalV2(MAX_DECIMALV2_PRECISION, MAX_DECIMALV2_SCALE);
    /// `VARCHAR(65533)`
    pub const VARCHAR_SYSTEM_DEFAULT: DataType = DataType::Varchar(MAX_VARCHAR_LENGTH);

    /// Create a legacy decimal, checking precision and scale
    pub fn decimal_v2(precision: u32, scale: u32) -> FunctionResult<Self> {
        if precision == 0
            || scale > precision
            || precision > MAX_DECIMALV2_PRECISION
            || scale > MAX_DECIMALV2_SCALE
        {
            return Err(FunctionError::InvalidType(format!(
                "DECIMALV2({}, {}) requires 0 <= scale <= precision <= {} and scale <= {}",
                precision, scale, MAX_DECIMALV2_PRECISION, MAX_DECIMALV2_SCALE
            )));
        }
        Ok(DataType::DecimalV2(precision, scale))
    }

    /// Create a decimal, checking precision and scale
    pub fn decimal_v3(precision: u32, scale: u32) -> FunctionResult<Self> {
        if precision == 0 || scale > precision || precision > MAX_DECIMAL128_PRECISION {
            return Err(FunctionError::InvalidType(format!(
                "DECIMALV3({}, {}) requires 0 <= scale <= precision <= {}",
                precision, scale, MAX_DECIMAL128_PRECISION
            )));
        }
        Ok(DataType::DecimalV3(precision, scale))
    }

    /// Create an array type
    pub fn array_of(element: DataType) -> Self {
        DataType::Array(Box::new(element))
    }

    pub fn is_integral_type(&self) -> bool {
        matches!(
            self,
            DataType::TinyInt
                | DataType::SmallInt
                | DataType::Integer
                | DataType::BigInt
                | DataType::LargeInt
        )
    }

    pub fn is_float_type(&self) -> bool {
        matches!(self, DataType::Float | DataType::Double)
    }

    pub fn is_decimal_v2_type(&self) -> bool {
        matches!(self, DataType::DecimalV2(..))
    }

    pub fn is_decimal_v3_type(&self) -> bool {
        matches!(self, DataType::DecimalV3(..))
    }

    pub fn is_decimal_type(&self) -> bool {
        self.is_decimal_v2_type() || self.is_decimal_v3_type()
    }

    /// Integers, floating point and decimals
    pub fn is_numeric_type(&self) -> bool {
        self.is_integral_type() || self.is_float_type() || self.is_decimal_type()
    }

    pub fn is_string_like_type(&self) -> bool {
        matches!(self, DataType::Char(_) | DataType::Varchar(_) | DataType::String)
    }

    pub fn is_date_like_type(&self) -> bool {
        matches!(self, DataType::Date | DataType::DateTime)
    }

    pub fn is_array_type(&self) -> bool {
        matches!(self, DataType::Array(_))
    }

    pub fn is_null_type(&self) -> bool {
        matches!(self, DataType::NullType)
    }

    pub fn is_any_type(&self) -> bool {
        matches!(self, DataType::AnyType)
    }

    /// Types that can only be consumed by their dedicated aggregate functions
    pub fn is_only_metric_type(&self) -> bool {
        matches!(self, DataType::Bitmap | DataType::Hll)
    }

    /// Whether `AnyType` appears anywhere inside this type
    pub fn contains_any_type(&self) -> bool {
        match self {
            DataType::AnyType => true,
            DataType::Array(element) => element.contains_any_type(),
            _ => false,
        }
    }

    /// Precision of a decimal type
    pub fn precision(&self) -> Option<u32> {
        match self {
            DataType::DecimalV2(precision, _) | DataType::DecimalV3(precision, _) => {
                Some(*precision)
            }
            _ => None,
        }
    }

    /// Scale of a decimal type
    pub fn scale(&self) -> Option<u32> {
        match self {
            DataType::DecimalV2(_, scale) | DataType::DecimalV3(_, scale) => Some(*scale),
            _ => None,
        }
    }

    /// Storage width of a `DecimalV3`
    pub fn decimal_width(&self) -> Option<DecimalWidth> {
        match self {
            DataType::DecimalV3(precision, _) => Some(DecimalWidth::for_precision(*precision)),
            _ => None,
        }
    }

    /// Rank on the integer widening ladder (`TinyInt` = 1 .. `LargeInt` = 5)
    pub fn integral_rank(&self) -> Option<u32> {
        match self {
            DataType::TinyInt => Some(1),
            DataType::SmallInt => Some(2),
            DataType::Integer => Some(3),
            DataType::BigInt => Some(4),
            DataType::LargeInt => Some(5),
            _ => None,
        }
    }

    /// Element type of an array
    pub fn element_type(&self) -> Option<&DataType> {
        match self {
            DataType::Array(element) => Some(element),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::TinyInt => write!(f, "TINYINT"),
            DataType::SmallInt => write!(f, "SMALLINT"),
            DataType::Integer => write!(f, "INT"),
            DataType::BigInt => write!(f, "BIGINT"),
            DataType::LargeInt => write!(f, "LARGEINT"),
            DataType::Float => write!(f, "FLOAT"),
            DataType::Double => write!(f, "DOUBLE"),
            DataType::DecimalV2(precision, scale) => {
                write!(f, "DECIMALV2({}, {})", precision, scale)
            }
            DataType::DecimalV3(precision, scale) => {
                write!(f, "DECIMALV3({}, {})", precision, scale)
            }
            DataType::Boolean => write!(f, "BOOLEAN"),
            DataType::Char(len) => write!(f, "CHAR({})", len),
            DataType::Varchar(len) => write!(f, "VARCHAR({})", len),
            DataType::String => write!(f, "STRING"),
            DataType::Date => write!(f, "DATE"),
            DataType::DateTime => write!(f, "DATETIME"),
            DataType::Array(element) => write!(f, "ARRAY<{}>", element),
            DataType::Bitmap => write!(f, "BITMAP"),
            DataType::Hll => write!(f, "HLL"),
            DataType::NullType => write!(f, "NULL"),
            DataType::AnyType => write!(f, "ANY"),
        }
    }
}
