// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Binding-specific test helpers and custom assertions

use sqlfn_ir::{DataType, Expr, FunctionError, FunctionResult, FunctionSignature};

/// Custom assertion helpers for bound expressions
pub struct BindAssertions;

impl BindAssertions {
    /// Assert that every call in the tree carries a signature
    pub fn assert_fully_resolved(expr: &Expr) {
        assert!(expr.is_resolved(), "Expression is not fully bound: {}", expr.to_sql());
    }

    /// Assert that an expression has the given result type
    pub fn assert_bound_type(expr: &Expr, expected: &DataType) {
        match expr.data_type() {
            Ok(actual) => assert_eq!(
                &actual,
                expected,
                "Expected {} to have type {}, found {}",
                expr.to_sql(),
                expected,
                actual
            ),
            Err(e) => panic!("Expected {} to be bound: {}", expr.to_sql(), e),
        }
    }

    /// Assert the nullability of an expression
    pub fn assert_nullable(expr: &Expr, nullable: bool) {
        assert_eq!(
            expr.nullable(),
            nullable,
            "Nullability mismatch for {}",
            expr.to_sql()
        );
    }

    /// Signature attached to a bound call
    pub fn matched_signature(expr: &Expr) -> &FunctionSignature {
        match expr {
            Expr::Function(function) => match function.matched_signature() {
                Some(signature) => signature,
                None => panic!("Call {} is not bound", expr.to_sql()),
            },
            _ => panic!("Expected Function expression, found {:?}", expr),
        }
    }

    /// Assert the argument types of the signature attached to a bound call
    pub fn assert_argument_types(expr: &Expr, expected: &[DataType]) {
        let signature = Self::matched_signature(expr);
        assert_eq!(
            signature.argument_types.as_slice(),
            expected,
            "Argument type mismatch for {}",
            expr.to_sql()
        );
    }

    /// Assert that a result failed with the named error variant
    pub fn assert_error_kind<T: std::fmt::Debug>(result: &FunctionResult<T>, kind: &str) {
        match result {
            Ok(value) => panic!("Expected {} error, got {:?}", kind, value),
            Err(e) => assert_eq!(error_kind(e), kind, "Unexpected error: {}", e),
        }
    }
}

/// Variant name of a binding error
pub fn error_kind(error: &FunctionError) -> &'static str {
    match error {
        FunctionError::UnknownFunction { .. } => "UnknownFunction",
        FunctionError::NoMatchingSignature { .. } => "NoMatchingSignature",
        FunctionError::IllegalArgumentType { .. } => "IllegalArgumentType",
        FunctionError::InvalidArgumentStructure { .. } => "InvalidArgumentStructure",
        FunctionError::DuplicateFunctionRegistration { .. } => "DuplicateFunctionRegistration",
        FunctionError::InvalidType(_) => "InvalidType",
        FunctionError::UnresolvedExpression { .. } => "UnresolvedExpression",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::ExprFixtures;

    #[test]
    fn test_assert_bound_type_on_column() {
        BindAssertions::assert_bound_type(&ExprFixtures::user_id(), &DataType::BigInt);
        BindAssertions::assert_nullable(&ExprFixtures::user_id(), false);
    }

    #[test]
    #[should_panic(expected = "to be bound")]
    fn test_assert_bound_type_fails_on_unbound_call() {
        let call = ExprFixtures::call("reverse", vec![ExprFixtures::user_name()]);
        BindAssertions::assert_bound_type(&call, &DataType::String);
    }

    #[test]
    fn test_assert_error_kind() {
        let result: FunctionResult<()> = Err(FunctionError::UnknownFunction {
            name: "median".to_string(),
            call: "median()".to_string(),
        });
        BindAssertions::assert_error_kind(&result, "UnknownFunction");
    }

    #[test]
    #[should_panic(expected = "Expected Function expression")]
    fn test_matched_signature_requires_call() {
        BindAssertions::matched_signature(&ExprFixtures::int(1));
    }
}
