// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for sqlfn
//!
//! This crate provides common testing components including:
//! - Typed expression fixtures (columns, literals, order clauses, calls)
//! - Assertions over bound expressions and binding errors
//! - A YAML format for data-driven resolution cases

pub mod assertions;
pub mod fixtures;
pub mod resolution_case;

// Re-exports for convenience
pub use assertions::{BindAssertions, error_kind};
pub use fixtures::ExprFixtures;
pub use resolution_case::{
    ArgSpec, CaseError, ExpectedOutcome, ResolutionCase, parse_cases, parse_case_file,
};
