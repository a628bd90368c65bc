// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Function binding pass
//!
//! [`FunctionBinder`] walks an expression tree bottom-up and annotates every
//! function call with its resolved signature. For each call:
//!
//! 1. children are bound first, so their result types are known
//! 2. the call's legality rules run on the raw child types
//! 3. the registry resolves the call by name and child types
//! 4. the winning signature is bound to the child types
//! 5. the call's precision rule adjusts the bound signature
//! 6. a new node carrying the signature replaces the old one
//!
//! Calls that already carry a signature are returned unchanged.

use sqlfn_ir::{
    Avg, ColumnRef, Count, Expr, ExpressionFunction, ExpressionVisitor, Function, FunctionError,
    FunctionResult, GroupConcat, Histogram, Literal, OrderExpr, Reverse,
};
use tracing::debug;

use crate::registry::FunctionRegistry;
use crate::resolver::{SignatureResolver, bind_signature};

/// Binds function calls to registered signatures
#[derive(Debug, Clone, Copy)]
pub struct FunctionBinder<'a> {
    resolver: SignatureResolver<'a>,
}

impl<'a> FunctionBinder<'a> {
    pub fn new(registry: &'a FunctionRegistry) -> Self {
        Self {
            resolver: SignatureResolver::new(registry),
        }
    }

    /// Bind every function call in `expr`
    pub fn bind(&mut self, expr: &Expr) -> FunctionResult<Expr> {
        expr.accept(self, &mut ())
    }

    /// Bind a single call node after binding its children
    pub fn bind_node<F: ExpressionFunction>(&mut self, node: &F) -> FunctionResult<F> {
        if node.is_resolved() {
            return Ok(node.clone());
        }

        let children = node
            .children()
            .iter()
            .map(|child| self.bind(child))
            .collect::<FunctionResult<Vec<_>>>()?;
        let node = node.with_children(children)?;

        node.check_legality()?;

        let argument_types = node.argument_types()?;
        let signature = self
            .resolver
            .resolve(node.name(), &argument_types, node.accepts_variadic_call())
            .map_err(|e| with_call_sql(e, &node.to_sql()))?;
        let bound = bind_signature(&signature, &argument_types);
        let signature = node.compute_precision(bound)?;

        debug!("Bound {} to {}", node.to_sql(), signature);
        Ok(node.with_matched_signature(signature))
    }
}

/// Replace the type-only call text of a resolution error with the SQL of the call
fn with_call_sql(error: FunctionError, sql: &str) -> FunctionError {
    match error {
        FunctionError::UnknownFunction { name, .. } => FunctionError::UnknownFunction {
            name,
            call: sql.to_string(),
        },
        FunctionError::NoMatchingSignature {
            name,
            argument_types,
            candidates,
            ..
        } => FunctionError::NoMatchingSignature {
            name,
            call: sql.to_string(),
            argument_types,
            candidates,
        },
        other => other,
    }
}

impl ExpressionVisitor<FunctionResult<Expr>, ()> for FunctionBinder<'_> {
    fn visit_column(&mut self, column: &ColumnRef, _: &mut ()) -> FunctionResult<Expr> {
        Ok(Expr::Column(column.clone()))
    }

    fn visit_literal(&mut self, literal: &Literal, _: &mut ()) -> FunctionResult<Expr> {
        Ok(Expr::Literal(literal.clone()))
    }

    fn visit_order(&mut self, order: &OrderExpr, context: &mut ()) -> FunctionResult<Expr> {
        let child = order.child.accept(self, context)?;
        Ok(Expr::Order(order.with_child(child)))
    }

    fn visit_avg(&mut self, avg: &Avg, _: &mut ()) -> FunctionResult<Expr> {
        Ok(Expr::Function(Function::Avg(self.bind_node(avg)?)))
    }

    fn visit_count(&mut self, count: &Count, _: &mut ()) -> FunctionResult<Expr> {
        Ok(Expr::Function(Function::Count(self.bind_node(count)?)))
    }

    fn visit_group_concat(
        &mut self,
        group_concat: &GroupConcat,
        _: &mut (),
    ) -> FunctionResult<Expr> {
        Ok(Expr::Function(Function::GroupConcat(
            self.bind_node(group_concat)?,
        )))
    }

    fn visit_histogram(&mut self, histogram: &Histogram, _: &mut ()) -> FunctionResult<Expr> {
        Ok(Expr::Function(Function::Histogram(
            self.bind_node(histogram)?,
        )))
    }

    fn visit_reverse(&mut self, reverse: &Reverse, _: &mut ()) -> FunctionResult<Expr> {
        Ok(Expr::Function(Function::Reverse(self.bind_node(reverse)?)))
    }
}
