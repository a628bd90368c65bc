// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Scalar function `reverse`, over strings and arrays

use super::{CallState, ExpressionFunction, FunctionType, Nullability, expect_positional};
use crate::error::FunctionResult;
use crate::expr::Expr;
use crate::signature::FunctionSignature;
use crate::visitor::ExpressionVisitor;

pub(crate) const NAME: &str = "reverse";

#[derive(Debug, Clone, PartialEq)]
pub struct Reverse {
    state: CallState,
}

impl Reverse {
    pub fn new(child: impl Into<Expr>) -> Self {
        Self {
            state: CallState::new(vec![child.into()], false),
        }
    }

    pub(crate) fn from_children(children: Vec<Expr>) -> FunctionResult<Self> {
        expect_positional(NAME, &children, 1..=1)?;
        Ok(Self {
            state: CallState::new(children, false),
        })
    }
}

impl ExpressionFunction for Reverse {
    fn name(&self) -> &'static str {
        NAME
    }

    fn function_type(&self) -> FunctionType {
        FunctionType::Scalar
    }

    fn nullability(&self) -> Nullability {
        Nullability::PropagateNullable
    }

    fn state(&self) -> &CallState {
        &self.state
    }

    fn with_children(&self, children: Vec<Expr>) -> FunctionResult<Self> {
        Self::from_children(children)
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
        visitor.visit_reverse(self, context)
    }
}
