// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Implicit casts
//!
//! The cost of converting an actual argument type to a declared parameter
//! type without an explicit `CAST`. Lower is better; `None` means the
//! conversion is not implicit.
//!
//! | actual → declared | cost |
//! |---|---|
//! | equal types, `NULL` → any, any → `ANY` | 0 |
//! | integer → wider integer | rank difference |
//! | integer → `FLOAT` / `DOUBLE` | 6 − rank / 7 − rank |
//! | `FLOAT` → `DOUBLE` | 1 |
//! | `DECIMALV3` → template of same / wider width | 0 / 1 per step |
//! | `DECIMALV2` → `DECIMALV2` | 0 |
//! | decimal → `DOUBLE` | 3 |
//! | `VARCHAR` → `VARCHAR` | 0 |
//! | `CHAR` → `VARCHAR`, `VARCHAR` ↔ `STRING` | 1 |
//! | `CHAR` → `STRING` | 2 |
//! | `DATE` → `DATETIME` | 1 |
//! | `ARRAY<a>` → `ARRAY<b>` | cost of `a` → `b` |
//!
//! Integer ranks run from `TINYINT` = 1 to `LARGEINT` = 5, so a narrower
//! integer always reaches a floating point type at a higher cost than a
//! wider one. Anything else, including string to numeric and any narrowing,
//! has no implicit cast.

use sqlfn_ir::DataType;

const FLOAT_BASE_COST: u32 = 6;
const DOUBLE_BASE_COST: u32 = 7;
const DECIMAL_TO_DOUBLE_COST: u32 = 3;

/// Cost of implicitly casting `actual` to `declared`
pub fn implicit_cast_cost(actual: &DataType, declared: &DataType) -> Option<u32> {
    if actual == declared || actual.is_null_type() || declared.is_any_type() {
        return Some(0);
    }

    match (actual, declared) {
        (_, _) if actual.is_integral_type() && declared.is_integral_type() => {
            let from = actual.integral_rank()?;
            let to = declared.integral_rank()?;
            to.checked_sub(from)
        }
        (_, DataType::Float) if actual.is_integral_type() => {
            Some(FLOAT_BASE_COST - actual.integral_rank()?)
        }
        (_, DataType::Double) if actual.is_integral_type() => {
            Some(DOUBLE_BASE_COST - actual.integral_rank()?)
        }
        (DataType::Float, DataType::Double) => Some(1),

        (DataType::DecimalV3(..), DataType::DecimalV3(..)) => actual
            .decimal_width()?
            .steps_to(declared.decimal_width()?),
        (DataType::DecimalV2(..), DataType::DecimalV2(..)) => Some(0),
        (DataType::DecimalV2(..) | DataType::DecimalV3(..), DataType::Double) => {
            Some(DECIMAL_TO_DOUBLE_COST)
        }

        (DataType::Varchar(_), DataType::Varchar(_)) => Some(0),
        (DataType::Char(_), DataType::Varchar(_))
        | (DataType::Varchar(_), DataType::String)
        | (DataType::String, DataType::Varchar(_)) => Some(1),
        (DataType::Char(_), DataType::String) => Some(2),

        (DataType::Date, DataType::DateTime) => Some(1),

        (DataType::Array(from), DataType::Array(to)) => implicit_cast_cost(from, to),

        _ => None,
    }
}

/// Whether `actual` can be implicitly cast to `declared`
pub fn can_implicitly_cast(actual: &DataType, declared: &DataType) -> bool {
    implicit_cast_cost(actual, declared).is_some()
}
