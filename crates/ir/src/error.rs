// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for function binding
//!
//! Every failure carries enough context (the SQL text of the call, the
//! offending types and positions) to produce a user-facing message without
//! re-deriving anything from the expression tree.

use serde::Serialize;
use thiserror::Error;

use crate::types::DataType;

/// Result type alias for function binding operations
pub type FunctionResult<T> = Result<T, FunctionError>;

/// Errors that can occur while checking, resolving or rebuilding function calls
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum FunctionError {
    /// Function name is not present in the registry
    #[error("Unknown function {name}: {call}")]
    UnknownFunction { name: String, call: String },

    /// No registered signature accepts the actual argument types
    #[error(
        "No matching signature for {call}: argument types ({}) are not accepted by any of [{}]",
        join_types(.argument_types),
        .candidates.join("; ")
    )]
    NoMatchingSignature {
        name: String,
        call: String,
        argument_types: Vec<DataType>,
        candidates: Vec<String>,
    },

    /// A legality predicate failed before type coercion
    #[error("{function} {reason}: {call} (argument {position} is {actual})")]
    IllegalArgumentType {
        function: String,
        call: String,
        position: usize,
        actual: DataType,
        reason: String,
    },

    /// Positional arguments and order clauses are not laid out as expected
    #[error("Invalid {function} parameters: {detail} [{}]", .children.join(", "))]
    InvalidArgumentStructure {
        function: String,
        detail: String,
        children: Vec<String>,
    },

    /// The same function name was registered twice in reject mode
    #[error("Function '{name}' is already registered")]
    DuplicateFunctionRegistration { name: String },

    /// A data type violates its own invariants
    #[error("Invalid data type: {0}")]
    InvalidType(String),

    /// The type of a function call was requested before it was bound
    #[error("Expression has not been resolved yet: {sql}")]
    UnresolvedExpression { sql: String },
}

fn join_types(types: &[DataType]) -> String {
    types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unknown_function() {
        let err = FunctionError::UnknownFunction {
            name: "median".to_string(),
            call: "median(price)".to_string(),
        };
        let msg = format!("{}", err);
        assert_eq!(msg, "Unknown function median: median(price)");
    }

    #[test]
    fn test_error_display_no_matching_signature() {
        let err = FunctionError::NoMatchingSignature {
            name: "reverse".to_string(),
            call: "reverse(flag)".to_string(),
            argument_types: vec![DataType::Boolean],
            candidates: vec!["reverse(STRING) -> STRING".to_string()],
        };
        let msg = format!("{}", err);
        assert!(msg.contains("reverse(flag)"));
        assert!(msg.contains("BOOLEAN"));
        assert!(msg.contains("reverse(STRING) -> STRING"));
    }

    #[test]
    fn test_error_display_illegal_argument_type() {
        let err = FunctionError::IllegalArgumentType {
            function: "avg".to_string(),
            call: "avg(name)".to_string(),
            position: 0,
            actual: DataType::String,
            reason: "requires a numeric parameter".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("avg requires a numeric parameter"));
        assert!(msg.contains("avg(name)"));
        assert!(msg.contains("STRING"));
    }

    #[test]
    fn test_error_display_invalid_argument_structure() {
        let err = FunctionError::InvalidArgumentStructure {
            function: "group_concat".to_string(),
            detail: "positional argument after ORDER BY".to_string(),
            children: vec!["a".to_string(), "b ASC".to_string(), "c".to_string()],
        };
        let msg = format!("{}", err);
        assert!(msg.contains("group_concat"));
        assert!(msg.contains("a, b ASC, c"));
    }

    #[test]
    fn test_error_serializes() {
        let err = FunctionError::DuplicateFunctionRegistration {
            name: "avg".to_string(),
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["DuplicateFunctionRegistration"]["name"], "avg");
    }
}
