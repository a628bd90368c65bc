// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Builtin function signature lists
//!
//! Each function is a plain ordered list of signatures. The order is part of
//! the contract: when two candidates cost the same, the earlier one wins.

pub mod aggregate;
pub mod scalar;

use sqlfn_ir::FunctionSignature;

/// A builtin function name and its declared overloads
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinFunction {
    pub name: &'static str,
    pub signatures: Vec<FunctionSignature>,
}

impl BuiltinFunction {
    pub fn new(name: &'static str, signatures: Vec<FunctionSignature>) -> Self {
        Self { name, signatures }
    }
}

/// All builtin functions, aggregates first
pub fn all_functions() -> Vec<BuiltinFunction> {
    let mut functions = aggregate::all_functions();
    functions.extend(scalar::all_functions());
    functions
}
