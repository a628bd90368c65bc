// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Aggregate function `histogram`

use super::{
    AggregateFunction, CallState, ExpressionFunction, FunctionType, Nullability,
    expect_positional,
};
use crate::error::FunctionResult;
use crate::expr::Expr;
use crate::signature::FunctionSignature;
use crate::types::DataType;
use crate::visitor::ExpressionVisitor;

pub(crate) const NAME: &str = "histogram";

/// `histogram(expr[, sample_rate[, max_buckets]])`, result is a JSON string
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    state: CallState,
}

impl Histogram {
    pub fn new(child: impl Into<Expr>) -> Self {
        Self {
            state: CallState::new(vec![child.into()], false),
        }
    }

    pub(crate) fn from_children(distinct: bool, children: Vec<Expr>) -> FunctionResult<Self> {
        expect_positional(NAME, &children, 1..=3)?;
        Ok(Self {
            state: CallState::new(children, distinct),
        })
    }
}

impl ExpressionFunction for Histogram {
    fn name(&self) -> &'static str {
        NAME
    }

    fn function_type(&self) -> FunctionType {
        FunctionType::Aggregate
    }

    fn nullability(&self) -> Nullability {
        Nullability::AlwaysNonNullable
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
        visitor.visit_histogram(self, context)
    }

    fn check_legality(&self) -> FunctionResult<()> {
        let input = self.argument_type(0)?;
        if input.is_only_metric_type() {
            return Err(self.illegal_argument(0, input, "does not support metric types"));
        }
        if self.arity() > 1 {
            let sample_rate = self.argument_type(1)?;
            if !sample_rate.is_numeric_type() && !sample_rate.is_null_type() {
                return Err(self.illegal_argument(
                    1,
                    sample_rate,
                    "requires a numeric sample rate",
                ));
            }
        }
        if self.arity() > 2 {
            let max_buckets = self.argument_type(2)?;
            // Only integers that widen to INT reach the three-argument overload
            let fits_int = matches!(
                max_buckets,
                DataType::TinyInt | DataType::SmallInt | DataType::Integer | DataType::NullType
            );
            if !fits_int {
                return Err(self.illegal_argument(
                    2,
                    max_buckets,
                    "requires an INT bucket count",
                ));
            }
        }
        Ok(())
    }
}

impl AggregateFunction for Histogram {
    fn with_distinct_and_children(
        &self,
        distinct: bool,
        children: Vec<Expr>,
    ) -> FunctionResult<Self> {
        Self::from_children(distinct, children)
    }
}
