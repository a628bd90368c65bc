// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Aggregate function `count`

use super::{
    AggregateFunction, CallState, ExpressionFunction, FunctionType, Nullability,
    expect_positional, render_call, render_children,
};
use crate::error::{FunctionError, FunctionResult};
use crate::expr::Expr;
use crate::signature::FunctionSignature;
use crate::types::DataType;
use crate::visitor::ExpressionVisitor;

pub(crate) const NAME: &str = "count";

/// `count(*)` or `count([DISTINCT] expr, ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct Count {
    state: CallState,
}

impl Count {
    /// `count(*)`
    pub fn star() -> Self {
        Self {
            state: CallState::new(Vec::new(), false),
        }
    }

    pub(crate) fn from_children(distinct: bool, children: Vec<Expr>) -> FunctionResult<Self> {
        validate(distinct, &children)?;
        Ok(Self {
            state: CallState::new(children, distinct),
        })
    }

    pub fn is_star(&self) -> bool {
        self.children().is_empty()
    }
}

fn validate(distinct: bool, children: &[Expr]) -> FunctionResult<()> {
    expect_positional(NAME, children, 0..=usize::MAX)?;
    if distinct && children.is_empty() {
        return Err(FunctionError::InvalidArgumentStructure {
            function: NAME.to_string(),
            detail: "DISTINCT requires at least one argument".to_string(),
            children: render_children(children),
        });
    }
    Ok(())
}

impl ExpressionFunction for Count {
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
        visitor.visit_count(self, context)
    }

    fn accepts_variadic_call(&self) -> bool {
        true
    }

    fn to_sql(&self) -> String {
        if self.is_star() {
            format!("{}(*)", NAME)
        } else {
            render_call(NAME, self.is_distinct(), self.children())
        }
    }
}

impl AggregateFunction for Count {
    fn with_distinct_and_children(
        &self,
        distinct: bool,
        children: Vec<Expr>,
    ) -> FunctionResult<Self> {
        Self::from_children(distinct, children)
    }

    fn intermediate_types(&self) -> FunctionResult<Vec<DataType>> {
        Ok(vec![DataType::BigInt])
    }
}
