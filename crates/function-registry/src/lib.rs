// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQL Function Registry
//!
//! This crate provides the signature catalog for SQL functions and the
//! machinery that binds a call to one of its overloads.
//!
//! ## Features
//!
//! - Declarative builtin signature lists, registered at startup
//! - A documented implicit-cast cost table
//! - Deterministic overload resolution (cheapest wins, ties to the first listed)
//! - A binding pass annotating whole expression trees
//! - Re-exports the IR types for convenience
//!
//! ## Usage
//!
//! ```rust
//! use sqlfn_function_registry::{ColumnRef, DataType, Expr, Function, FunctionBinder, FunctionRegistry};
//!
//! let registry = FunctionRegistry::new();
//! let call = Function::from_call(
//!     "avg",
//!     false,
//!     vec![Expr::from(ColumnRef::new("price", DataType::DecimalV3(10, 2)))],
//! )
//! .unwrap();
//!
//! let bound = FunctionBinder::new(&registry).bind(&Expr::from(call)).unwrap();
//! assert_eq!(bound.data_type(), Ok(DataType::DecimalV3(38, 4)));
//! ```

pub mod binder;
pub mod builtin;
pub mod coercion;
pub mod config;
pub mod describe;
pub mod registry;
pub mod resolver;

// Re-exports from ir for convenience
pub use sqlfn_ir::{
    ColumnRef, DataType, Expr, Function, FunctionError, FunctionResult, FunctionSignature,
    FunctionType, Literal, OrderExpr,
};

pub use binder::FunctionBinder;
pub use coercion::implicit_cast_cost;
pub use config::{ConfigError, RegistrationMode, RegistryConfig};
pub use describe::SignatureDescriber;
pub use registry::FunctionRegistry;
pub use resolver::{SignatureResolver, bind_signature};
