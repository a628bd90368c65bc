// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Function signatures
//!
//! A [`FunctionSignature`] is an immutable `(return type, argument types,
//! variadic)` triple. For a variadic signature the last argument type is the
//! repeatable tail: a call may pass zero or more trailing arguments of that
//! type.
//!
//! Signatures are declared with a small builder that reads like the
//! declaration it stands for:
//!
//! ```rust
//! use sqlfn_ir::{DataType, FunctionSignature};
//!
//! let sig = FunctionSignature::ret(DataType::Double).args(vec![DataType::Integer]);
//! assert_eq!(sig.arity(), 1);
//!
//! let concat = FunctionSignature::ret(DataType::VARCHAR_SYSTEM_DEFAULT)
//!     .var_args(vec![DataType::VARCHAR_SYSTEM_DEFAULT, DataType::AnyType]);
//! assert!(concat.accepts_arity(1));
//! assert!(concat.accepts_arity(4));
//! assert!(!concat.accepts_arity(0));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::DataType;

/// A declared overload of a function
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionSignature {
    /// Result type
    pub return_type: DataType,
    /// Declared argument types; for variadic signatures the last entry is the tail type
    pub argument_types: Vec<DataType>,
    /// Whether the last argument type may repeat
    pub is_variadic: bool,
}

/// Intermediate builder holding only the return type
#[derive(Debug, Clone)]
pub struct SignatureBuilder {
    return_type: DataType,
}

impl SignatureBuilder {
    /// Fixed-arity signature
    pub fn args(self, argument_types: Vec<DataType>) -> FunctionSignature {
        FunctionSignature {
            return_type: self.return_type,
            argument_types,
            is_variadic: false,
        }
    }

    /// Variadic signature; the last type is the repeatable tail
    pub fn var_args(self, argument_types: Vec<DataType>) -> FunctionSignature {
        FunctionSignature {
            return_type: self.return_type,
            is_variadic: !argument_types.is_empty(),
            argument_types,
        }
    }
}

impl FunctionSignature {
    /// Start declaring a signature with the given return type
    pub fn ret(return_type: DataType) -> SignatureBuilder {
        SignatureBuilder { return_type }
    }

    /// Number of declared argument types (including a variadic tail)
    pub fn arity(&self) -> usize {
        self.argument_types.len()
    }

    /// Number of arguments that must always be present
    pub fn fixed_arity(&self) -> usize {
        if self.is_variadic {
            // A hand-built variadic signature may have no tail type
            self.argument_types.len().saturating_sub(1)
        } else {
            self.argument_types.len()
        }
    }

    /// Repeatable tail type of a variadic signature
    pub fn variadic_element_type(&self) -> Option<&DataType> {
        if self.is_variadic {
            self.argument_types.last()
        } else {
            None
        }
    }

    /// Whether a call with `count` arguments fits this signature's shape
    pub fn accepts_arity(&self, count: usize) -> bool {
        if self.is_variadic {
            count >= self.fixed_arity()
        } else {
            count == self.arity()
        }
    }

    /// Declared type for the argument at `index`, expanding the variadic tail
    pub fn argument_type(&self, index: usize) -> Option<&DataType> {
        match self.argument_types.get(index) {
            Some(ty) if !self.is_variadic || index < self.fixed_arity() => Some(ty),
            _ => self.variadic_element_type(),
        }
    }

    /// Copy of this signature with a different return type
    pub fn with_return_type(&self, return_type: DataType) -> Self {
        Self {
            return_type,
            ..self.clone()
        }
    }

    /// Copy of this signature with argument types rewritten by `f(index, declared)`
    pub fn with_argument_types<F>(&self, mut f: F) -> Self
    where
        F: FnMut(usize, &DataType) -> DataType,
    {
        Self {
            return_type: self.return_type.clone(),
            argument_types: self
                .argument_types
                .iter()
                .enumerate()
                .map(|(index, ty)| f(index, ty))
                .collect(),
            is_variadic: self.is_variadic,
        }
    }

    /// Render as `name(ARG, ...) -> RET` for diagnostics
    pub fn display_with_name(&self, name: &str) -> String {
        format!("{}{}", name, self)
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<String> = self
            .argument_types
            .iter()
            .enumerate()
            .map(|(index, ty)| {
                if self.is_variadic && index + 1 == self.argument_types.len() {
                    format!("{}...", ty)
                } else {
                    ty.to_string()
                }
            })
            .collect();
        write!(f, "({}) -> {}", args.join(", "), self.return_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_concat_sig() -> FunctionSignature {
        FunctionSignature::ret(DataType::VARCHAR_SYSTEM_DEFAULT)
            .var_args(vec![DataType::VARCHAR_SYSTEM_DEFAULT, DataType::AnyType])
    }

    #[test]
    fn test_fixed_signature_shape() {
        let sig = FunctionSignature::ret(DataType::Double).args(vec![DataType::Integer]);
        assert!(!sig.is_variadic);
        assert_eq!(sig.fixed_arity(), 1);
        assert!(sig.accepts_arity(1));
        assert!(!sig.accepts_arity(2));
        assert_eq!(sig.argument_type(0), Some(&DataType::Integer));
        assert_eq!(sig.argument_type(1), None);
    }

    #[test]
    fn test_variadic_signature_shape() {
        let sig = group_concat_sig();
        assert_eq!(sig.fixed_arity(), 1);
        assert_eq!(sig.variadic_element_type(), Some(&DataType::AnyType));
        assert!(sig.accepts_arity(1));
        assert!(sig.accepts_arity(3));
        assert!(!sig.accepts_arity(0));
        assert_eq!(sig.argument_type(0), Some(&DataType::VARCHAR_SYSTEM_DEFAULT));
        assert_eq!(sig.argument_type(1), Some(&DataType::AnyType));
        assert_eq!(sig.argument_type(7), Some(&DataType::AnyType));
    }

    #[test]
    fn test_empty_var_args_is_not_variadic() {
        let sig = FunctionSignature::ret(DataType::BigInt).var_args(vec![]);
        assert!(!sig.is_variadic);
        assert!(sig.accepts_arity(0));
    }

    #[test]
    fn test_variadic_without_tail_type() {
        // Reachable through the public fields or deserialization
        let sig: FunctionSignature = serde_json::from_str(
            r#"{"return_type":"BigInt","argument_types":[],"is_variadic":true}"#,
        )
        .unwrap();
        assert_eq!(sig.fixed_arity(), 0);
        assert_eq!(sig.variadic_element_type(), None);
        assert!(sig.accepts_arity(2));
        assert_eq!(sig.argument_type(0), None);
    }

    #[test]
    fn test_with_argument_types() {
        let sig = FunctionSignature::ret(DataType::DEFAULT_DECIMAL128)
            .args(vec![DataType::DEFAULT_DECIMAL32]);
        let widened = sig.with_argument_types(|index, ty| {
            if index == 0 {
                DataType::DecimalV3(6, 4)
            } else {
                ty.clone()
            }
        });
        assert_eq!(widened.argument_types, vec![DataType::DecimalV3(6, 4)]);
        assert_eq!(widened.return_type, DataType::DEFAULT_DECIMAL128);
        // The original is untouched
        assert_eq!(sig.argument_types, vec![DataType::DEFAULT_DECIMAL32]);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            group_concat_sig().display_with_name("group_concat"),
            "group_concat(VARCHAR(65533), ANY...) -> VARCHAR(65533)"
        );
        let sig = FunctionSignature::ret(DataType::BigInt).args(vec![]);
        assert_eq!(sig.display_with_name("count"), "count() -> BIGINT");
    }
}
