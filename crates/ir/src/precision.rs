// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Precision rewriting
//!
//! Signatures declare decimal templates (`DECIMALV3(38, 0)` and friends);
//! the real precision and scale are only known once the argument types are.
//! The rules in this module derive them. They are pure functions of the
//! signature and the actual argument types, so applying a rule twice gives
//! the same signature as applying it once.

use std::cmp::{max, min};

use tracing::debug;

use crate::signature::FunctionSignature;
use crate::types::{DEFAULT_MIN_AVG_DECIMAL128_SCALE, DataType, MAX_DECIMAL128_PRECISION};

/// Decimal widening for `avg`
///
/// For a `DecimalV3(p, s)` first argument the result becomes
/// `DecimalV3(38, max(s, 4))`. When `s < 4` the argument itself is widened
/// to scale 4, keeping its integer digits (`p - s`) so that
/// `precision >= scale` still holds. Other argument types leave the
/// signature unchanged.
pub fn rewrite_avg(signature: &FunctionSignature, arguments: &[DataType]) -> FunctionSignature {
    let Some(&DataType::DecimalV3(precision, scale)) = arguments.first() else {
        return signature.clone();
    };

    let target_scale = max(scale, DEFAULT_MIN_AVG_DECIMAL128_SCALE);
    let mut rewritten = signature.clone();

    if scale < DEFAULT_MIN_AVG_DECIMAL128_SCALE {
        let widened_precision = min(
            precision - scale + target_scale,
            MAX_DECIMAL128_PRECISION,
        );
        let widened = DataType::DecimalV3(widened_precision, target_scale);
        debug!(
            "Widening avg argument from DECIMALV3({}, {}) to {}",
            precision, scale, widened
        );
        rewritten = rewritten.with_argument_types(|index, ty| {
            if index == 0 {
                widened.clone()
            } else {
                ty.clone()
            }
        });
    }

    rewritten.with_return_type(DataType::DecimalV3(MAX_DECIMAL128_PRECISION, target_scale))
}
