// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Aggregate function `avg`

use super::{
    AggregateFunction, CallState, ExpressionFunction, FunctionType, Nullability,
    expect_positional,
};
use crate::error::FunctionResult;
use crate::expr::Expr;
use crate::precision;
use crate::signature::FunctionSignature;
use crate::types::DataType;
use crate::visitor::ExpressionVisitor;

pub(crate) const NAME: &str = "avg";

/// `avg([DISTINCT] expr)`
#[derive(Debug, Clone, PartialEq)]
pub struct Avg {
    state: CallState,
}

impl Avg {
    pub fn new(child: impl Into<Expr>) -> Self {
        Self::with_distinct(false, child)
    }

    pub fn with_distinct(distinct: bool, child: impl Into<Expr>) -> Self {
        Self {
            state: CallState::new(vec![child.into()], distinct),
        }
    }

    pub(crate) fn from_children(distinct: bool, children: Vec<Expr>) -> FunctionResult<Self> {
        expect_positional(NAME, &children, 1..=1)?;
        Ok(Self {
            state: CallState::new(children, distinct),
        })
    }

    /// Force the result nullable, e.g. for a global aggregate over no rows
    pub fn with_always_nullable(&self, always_nullable: bool) -> Self {
        Self {
            state: self.state.clone().with_always_nullable(always_nullable),
        }
    }
}

impl ExpressionFunction for Avg {
    fn name(&self) -> &'static str {
        NAME
    }

    fn function_type(&self) -> FunctionType {
        FunctionType::Aggregate
    }

    fn nullability(&self) -> Nullability {
        Nullability::NullableAggregate
    }

    fn state(&self) -> &CallState {
        &self.state
    }

    fn with_children(&self, children: Vec<Expr>) -> FunctionResult<Self> {
        self.with_distinct_and_children(self.is_distinct(), children)
    }

    fn with_matched_signature(&self, signature: FunctionSignature) -> Self {
        Self {
            state: self.state.with_signature(signature),
        }
    }

    fn accept<R, C, V>(&self, visitor: &mut V, context: &mut C) -> R
    where
        V: ExpressionVisitor<R, C> + ?Sized,
    {
        visitor.visit_avg(self, context)
    }

    fn check_legality(&self) -> FunctionResult<()> {
        let arg_type = self.argument_type(0)?;
        if (!arg_type.is_numeric_type() && !arg_type.is_null_type())
            || arg_type.is_only_metric_type()
        {
            return Err(self.illegal_argument(0, arg_type, "requires a numeric parameter"));
        }
        Ok(())
    }

    fn compute_precision(&self, signature: FunctionSignature) -> FunctionResult<FunctionSignature> {
        Ok(precision::rewrite_avg(&signature, &self.argument_types()?))
    }
}

impl AggregateFunction for Avg {
    fn with_distinct_and_children(
        &self,
        distinct: bool,
        children: Vec<Expr>,
    ) -> FunctionResult<Self> {
        expect_positional(NAME, &children, 1..=1)?;
        Ok(Self {
            state: CallState::new(children, distinct)
                .with_always_nullable(self.state.is_always_nullable()),
        })
    }

    /// Running sum and row count
    fn intermediate_types(&self) -> FunctionResult<Vec<DataType>> {
        Ok(vec![self.data_type()?, DataType::BigInt])
    }
}
