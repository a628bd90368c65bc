// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqlfn - Intermediate Representation
//!
//! This crate provides the typed building blocks of SQL function resolution:
//! - The closed SQL type model ([`DataType`])
//! - Declared function overloads ([`FunctionSignature`])
//! - Function call nodes over typed argument expressions ([`Function`], [`Expr`])
//! - Per-function precision rules ([`precision`])
//! - A visitor contract for passes over expression trees ([`ExpressionVisitor`])
//!
//! Catalog lookup and overload resolution live in `sqlfn-function-registry`.
//!
//! ```rust
//! use sqlfn_ir::{ColumnRef, DataType, Expr, Function};
//!
//! let call = Function::from_call(
//!     "avg",
//!     false,
//!     vec![Expr::from(ColumnRef::new("price", DataType::DecimalV3(10, 2)))],
//! )
//! .unwrap();
//! assert_eq!(call.to_sql(), "avg(price)");
//! assert!(!call.is_resolved());
//! ```

pub mod error;
pub mod expr;
pub mod function;
pub mod precision;
pub mod signature;
pub mod types;
pub mod visitor;

// Re-export commonly used types
pub use error::{FunctionError, FunctionResult};
pub use expr::{ColumnRef, Expr, Literal, OrderExpr};
pub use function::{
    AggregateFunction, Avg, CallState, Count, ExpressionFunction, Function, FunctionType,
    GroupConcat, Histogram, Nullability, Reverse,
};
pub use signature::{FunctionSignature, SignatureBuilder};
pub use types::{DataType, DecimalWidth};
pub use visitor::{ExpressionVisitor, SqlPrinter};
