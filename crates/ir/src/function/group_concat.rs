// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Aggregate function `group_concat`
//!
//! Children are one or two positional arguments (value, optional separator)
//! followed by zero or more `ORDER BY` items:
//!
//! ```text
//! group_concat(name)                      -> [name]
//! group_concat(name, '|' ORDER BY id)     -> [name, '|', id ASC]
//! ```

use super::{
    AggregateFunction, CallState, ExpressionFunction, FunctionType, Nullability, render_children,
};
use crate::error::{FunctionError, FunctionResult};
use crate::expr::{Expr, OrderExpr};
use crate::signature::FunctionSignature;
use crate::visitor::ExpressionVisitor;

pub(crate) const NAME: &str = "group_concat";

/// `group_concat([DISTINCT] expr[, separator][ ORDER BY ...])`
#[derive(Debug, Clone, PartialEq)]
pub struct GroupConcat {
    state: CallState,
    non_order_arguments: usize,
}

impl GroupConcat {
    pub fn new(arg: impl Into<Expr>, orders: Vec<OrderExpr>) -> Self {
        Self::merge(false, vec![arg.into()], orders)
    }

    pub fn with_separator(
        arg: impl Into<Expr>,
        separator: impl Into<Expr>,
        orders: Vec<OrderExpr>,
    ) -> Self {
        Self::merge(false, vec![arg.into(), separator.into()], orders)
    }

    /// Copy with a different DISTINCT flag
    pub fn with_distinct(&self, distinct: bool) -> Self {
        Self {
            state: CallState::new(self.state.children().to_vec(), distinct),
            non_order_arguments: self.non_order_arguments,
        }
    }

    fn merge(distinct: bool, positional: Vec<Expr>, orders: Vec<OrderExpr>) -> Self {
        let non_order_arguments = positional.len();
        let mut children = positional;
        children.extend(orders.into_iter().map(Expr::Order));
        Self {
            state: CallState::new(children, distinct),
            non_order_arguments,
        }
    }

    pub(crate) fn from_children(distinct: bool, children: Vec<Expr>) -> FunctionResult<Self> {
        let non_order_arguments = split_point(&children)?;
        Ok(Self {
            state: CallState::new(children, distinct),
            non_order_arguments,
        })
    }

    /// Number of positional (non-ORDER BY) arguments, 1 or 2
    pub fn non_order_arguments(&self) -> usize {
        self.non_order_arguments
    }

    /// Positional arguments
    pub fn arguments(&self) -> &[Expr] {
        &self.children()[..self.non_order_arguments]
    }

    /// Embedded `ORDER BY` items
    pub fn orders(&self) -> impl Iterator<Item = &OrderExpr> {
        self.children()[self.non_order_arguments..]
            .iter()
            .filter_map(|child| match child {
                Expr::Order(order) => Some(order),
                _ => None,
            })
    }

    fn require_string_like(&self, position: usize, ordinal: &str) -> FunctionResult<()> {
        let arg_type = self.argument_type(position)?;
        if !arg_type.is_string_like_type() && !arg_type.is_null_type() {
            return Err(self.illegal_argument(
                position,
                arg_type,
                &format!("requires {} parameter to be of type STRING", ordinal),
            ));
        }
        Ok(())
    }
}

/// Count the positional arguments, rejecting any that follow an `ORDER BY` item
fn split_point(children: &[Expr]) -> FunctionResult<usize> {
    let mut found_order = false;
    let mut positional = 0;
    for child in children {
        if child.is_order() {
            found_order = true;
        } else if !found_order {
            positional += 1;
        } else {
            return Err(FunctionError::InvalidArgumentStructure {
                function: NAME.to_string(),
                detail: "positional argument after ORDER BY".to_string(),
                children: render_children(children),
            });
        }
    }

    if !(1..=2).contains(&positional) {
        return Err(FunctionError::InvalidArgumentStructure {
            function: NAME.to_string(),
            detail: format!("requires one or two parameters, got {}", positional),
            children: render_children(children),
        });
    }
    Ok(positional)
}

impl ExpressionFunction for GroupConcat {
    fn name(&self) -> &'static str {
        NAME
    }

    fn function_type(&self) -> FunctionType {
        FunctionType::Aggregate
    }

    fn nullability(&self) -> Nullability {
        Nullability::PropagateNullable
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
            non_order_arguments: self.non_order_arguments,
        }
    }

    fn accept<R, C, V>(&self, visitor: &mut V, context: &mut C) -> R
    where
        V: ExpressionVisitor<R, C> + ?Sized,
    {
        visitor.visit_group_concat(self, context)
    }

    fn check_legality(&self) -> FunctionResult<()> {
        self.require_string_like(0, "first")?;
        if self.non_order_arguments == 2 {
            self.require_string_like(1, "second")?;
        }
        Ok(())
    }

    fn accepts_variadic_call(&self) -> bool {
        true
    }
}

impl AggregateFunction for GroupConcat {
    fn with_distinct_and_children(
        &self,
        distinct: bool,
        children: Vec<Expr>,
    ) -> FunctionResult<Self> {
        Self::from_children(distinct, children)
    }
}
