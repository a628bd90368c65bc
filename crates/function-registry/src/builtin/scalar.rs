// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Builtin scalar function signatures

use sqlfn_ir::{DataType, FunctionSignature};

use super::BuiltinFunction;

/// Get all builtin scalar functions
pub fn all_functions() -> Vec<BuiltinFunction> {
    vec![reverse()]
}

pub fn reverse() -> BuiltinFunction {
    let mut signatures = vec![
        FunctionSignature::ret(DataType::VARCHAR_SYSTEM_DEFAULT)
            .args(vec![DataType::VARCHAR_SYSTEM_DEFAULT]),
        FunctionSignature::ret(DataType::String).args(vec![DataType::String]),
    ];

    // Arrays keep their element type
    let elements = [
        DataType::TinyInt,
        DataType::SmallInt,
        DataType::Integer,
        DataType::BigInt,
        DataType::LargeInt,
        DataType::DateTime,
        DataType::Date,
        DataType::Float,
        DataType::Double,
        DataType::DECIMALV2_SYSTEM_DEFAULT,
        DataType::VARCHAR_SYSTEM_DEFAULT,
        DataType::String,
    ];
    signatures.extend(elements.into_iter().map(|element| {
        let array = DataType::array_of(element);
        FunctionSignature::ret(array.clone()).args(vec![array])
    }));

    BuiltinFunction::new("reverse", signatures)
}
