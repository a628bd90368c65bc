// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Builtin aggregate function signatures

use sqlfn_ir::{DataType, FunctionSignature};

use super::BuiltinFunction;

/// Get all builtin aggregate functions
pub fn all_functions() -> Vec<BuiltinFunction> {
    vec![avg(), count(), group_concat(), histogram()]
}

pub fn avg() -> BuiltinFunction {
    BuiltinFunction::new(
        "avg",
        vec![
            FunctionSignature::ret(DataType::Double).args(vec![DataType::TinyInt]),
            FunctionSignature::ret(DataType::Double).args(vec![DataType::SmallInt]),
            FunctionSignature::ret(DataType::Double).args(vec![DataType::Integer]),
            FunctionSignature::ret(DataType::Double).args(vec![DataType::BigInt]),
            FunctionSignature::ret(DataType::Double).args(vec![DataType::Double]),
            FunctionSignature::ret(DataType::DECIMALV2_SYSTEM_DEFAULT)
                .args(vec![DataType::DECIMALV2_SYSTEM_DEFAULT]),
            FunctionSignature::ret(DataType::DEFAULT_DECIMAL128)
                .args(vec![DataType::DEFAULT_DECIMAL32]),
            FunctionSignature::ret(DataType::DEFAULT_DECIMAL128)
                .args(vec![DataType::DEFAULT_DECIMAL64]),
            FunctionSignature::ret(DataType::DEFAULT_DECIMAL128)
                .args(vec![DataType::DEFAULT_DECIMAL128]),
        ],
    )
}

pub fn count() -> BuiltinFunction {
    BuiltinFunction::new(
        "count",
        vec![
            // count(*)
            FunctionSignature::ret(DataType::BigInt).args(vec![]),
            FunctionSignature::ret(DataType::BigInt).var_args(vec![DataType::AnyType]),
        ],
    )
}

pub fn group_concat() -> BuiltinFunction {
    BuiltinFunction::new(
        "group_concat",
        vec![
            FunctionSignature::ret(DataType::VARCHAR_SYSTEM_DEFAULT)
                .var_args(vec![DataType::VARCHAR_SYSTEM_DEFAULT, DataType::AnyType]),
            FunctionSignature::ret(DataType::VARCHAR_SYSTEM_DEFAULT).var_args(vec![
                DataType::VARCHAR_SYSTEM_DEFAULT,
                DataType::VARCHAR_SYSTEM_DEFAULT,
                DataType::AnyType,
            ]),
        ],
    )
}

pub fn histogram() -> BuiltinFunction {
    BuiltinFunction::new(
        "histogram",
        vec![
            FunctionSignature::ret(DataType::VARCHAR_SYSTEM_DEFAULT).args(vec![DataType::AnyType]),
            FunctionSignature::ret(DataType::VARCHAR_SYSTEM_DEFAULT)
                .args(vec![DataType::AnyType, DataType::Double]),
            FunctionSignature::ret(DataType::VARCHAR_SYSTEM_DEFAULT).args(vec![
                DataType::AnyType,
                DataType::Double,
                DataType::Integer,
            ]),
        ],
    )
}
