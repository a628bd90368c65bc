// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Function expression nodes
//!
//! Every supported function is a small struct implementing
//! [`ExpressionFunction`] (and [`AggregateFunction`] for aggregates). The
//! structs only carry behavior that differs per function:
//!
//! - legality rules checked on raw argument types before any coercion
//! - precision rules applied to the resolved signature
//! - how a node is rebuilt from a new list of children
//! - which visitor method handles it
//!
//! The signatures themselves live in the function registry as plain data.
//!
//! [`Function`] is the closed union of all variants. Adding a variant forces
//! every [`ExpressionVisitor`] to handle it.

mod avg;
mod count;
mod group_concat;
mod histogram;
mod reverse;

pub use avg::Avg;
pub use count::Count;
pub use group_concat::GroupConcat;
pub use histogram::Histogram;
pub use reverse::Reverse;

use serde::{Deserialize, Serialize};

use crate::error::{FunctionError, FunctionResult};
use crate::expr::Expr;
use crate::signature::FunctionSignature;
use crate::types::DataType;
use crate::visitor::{ExpressionVisitor, SqlPrinter};

/// Function classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionType {
    Scalar,
    Aggregate,
}

/// Static rule deciding whether a function result may be NULL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nullability {
    /// Nullable iff any child is nullable
    PropagateNullable,
    /// Like `PropagateNullable`, but can be forced nullable (aggregate over an empty group)
    NullableAggregate,
    /// Never NULL
    AlwaysNonNullable,
}

/// State shared by every function node
#[derive(Debug, Clone, PartialEq)]
pub struct CallState {
    children: Vec<Expr>,
    distinct: bool,
    always_nullable: bool,
    matched_signature: Option<FunctionSignature>,
}

impl CallState {
    pub(crate) fn new(children: Vec<Expr>, distinct: bool) -> Self {
        Self {
            children,
            distinct,
            always_nullable: false,
            matched_signature: None,
        }
    }

    pub(crate) fn with_always_nullable(mut self, always_nullable: bool) -> Self {
        self.always_nullable = always_nullable;
        self
    }

    pub(crate) fn with_signature(&self, signature: FunctionSignature) -> Self {
        Self {
            matched_signature: Some(signature),
            ..self.clone()
        }
    }

    pub fn children(&self) -> &[Expr] {
        &self.children
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn is_always_nullable(&self) -> bool {
        self.always_nullable
    }

    pub fn matched_signature(&self) -> Option<&FunctionSignature> {
        self.matched_signature.as_ref()
    }
}

/// Capabilities every function node provides
pub trait ExpressionFunction: Clone {
    /// Lower-case SQL name
    fn name(&self) -> &'static str;

    fn function_type(&self) -> FunctionType;

    fn nullability(&self) -> Nullability;

    fn state(&self) -> &CallState;

    /// Rebuild this call over new children, re-validating their layout
    fn with_children(&self, children: Vec<Expr>) -> FunctionResult<Self>;

    /// Copy of this node annotated with its resolved signature
    fn with_matched_signature(&self, signature: FunctionSignature) -> Self;

    /// Dispatch to this variant's visitor method
    fn accept<R, C, V>(&self, visitor: &mut V, context: &mut C) -> R
    where
        V: ExpressionVisitor<R, C> + ?Sized;

    /// Reject semantically invalid calls before any implicit cast is considered
    fn check_legality(&self) -> FunctionResult<()> {
        Ok(())
    }

    /// Adjust a resolved signature to the actual argument precision
    fn compute_precision(&self, signature: FunctionSignature) -> FunctionResult<FunctionSignature> {
        Ok(signature)
    }

    /// Whether resolution may pick a variadic signature for this call
    fn accepts_variadic_call(&self) -> bool {
        false
    }

    fn children(&self) -> &[Expr] {
        self.state().children()
    }

    fn arity(&self) -> usize {
        self.children().len()
    }

    /// Raw type of the child at `index`; order clauses report their inner type
    fn argument_type(&self, index: usize) -> FunctionResult<DataType> {
        match self.children().get(index) {
            Some(child) => child.require_type(),
            None => Err(FunctionError::InvalidArgumentStructure {
                function: self.name().to_string(),
                detail: format!("no argument at position {}", index),
                children: render_children(self.children()),
            }),
        }
    }

    fn argument_types(&self) -> FunctionResult<Vec<DataType>> {
        self.children().iter().map(Expr::require_type).collect()
    }

    fn matched_signature(&self) -> Option<&FunctionSignature> {
        self.state().matched_signature()
    }

    fn is_resolved(&self) -> bool {
        self.matched_signature().is_some()
    }

    /// Result type, available once the node is bound
    fn data_type(&self) -> FunctionResult<DataType> {
        self.matched_signature()
            .map(|signature| signature.return_type.clone())
            .ok_or_else(|| FunctionError::UnresolvedExpression { sql: self.to_sql() })
    }

    fn nullable(&self) -> bool {
        let any_child_nullable = || self.children().iter().any(Expr::nullable);
        match self.nullability() {
            Nullability::PropagateNullable => any_child_nullable(),
            Nullability::NullableAggregate => {
                self.state().is_always_nullable() || any_child_nullable()
            }
            Nullability::AlwaysNonNullable => false,
        }
    }

    fn to_sql(&self) -> String {
        render_call(self.name(), self.state().is_distinct(), self.children())
    }

    /// Build an `IllegalArgumentType` error for the argument at `position`
    fn illegal_argument(&self, position: usize, actual: DataType, reason: &str) -> FunctionError {
        FunctionError::IllegalArgumentType {
            function: self.name().to_string(),
            call: self.to_sql(),
            position,
            actual,
            reason: reason.to_string(),
        }
    }
}

/// Capabilities specific to aggregate functions
pub trait AggregateFunction: ExpressionFunction {
    /// Rebuild with a new DISTINCT flag and children
    fn with_distinct_and_children(&self, distinct: bool, children: Vec<Expr>)
    -> FunctionResult<Self>;

    fn is_distinct(&self) -> bool {
        self.state().is_distinct()
    }

    /// Types of the partial aggregation state exchanged between phases
    fn intermediate_types(&self) -> FunctionResult<Vec<DataType>> {
        Ok(vec![self.data_type()?])
    }
}

/// Render `name([DISTINCT ]args[ ORDER BY orders])`
pub(crate) fn render_call(name: &str, distinct: bool, children: &[Expr]) -> String {
    let (orders, positional): (Vec<&Expr>, Vec<&Expr>) =
        children.iter().partition(|child| child.is_order());
    let mut sql = String::from(name);
    sql.push('(');
    if distinct {
        sql.push_str("DISTINCT ");
    }
    let args: Vec<String> = positional.iter().map(|child| child.to_sql()).collect();
    sql.push_str(&args.join(", "));
    if !orders.is_empty() {
        let orders: Vec<String> = orders.iter().map(|order| order.to_sql()).collect();
        sql.push_str(" ORDER BY ");
        sql.push_str(&orders.join(", "));
    }
    sql.push(')');
    sql
}

pub(crate) fn render_children(children: &[Expr]) -> Vec<String> {
    children.iter().map(Expr::to_sql).collect()
}

/// Fail unless `children` holds exactly `expected` positional arguments
pub(crate) fn expect_positional(
    function: &str,
    children: &[Expr],
    expected: std::ops::RangeInclusive<usize>,
) -> FunctionResult<()> {
    if children.iter().any(Expr::is_order) {
        return Err(FunctionError::InvalidArgumentStructure {
            function: function.to_string(),
            detail: "ORDER BY is not supported".to_string(),
            children: render_children(children),
        });
    }
    if !expected.contains(&children.len()) {
        let detail = if expected.start() == expected.end() {
            format!("expects {} argument(s), got {}", expected.start(), children.len())
        } else {
            format!(
                "expects {} to {} arguments, got {}",
                expected.start(),
                expected.end(),
                children.len()
            )
        };
        return Err(FunctionError::InvalidArgumentStructure {
            function: function.to_string(),
            detail,
            children: render_children(children),
        });
    }
    Ok(())
}

macro_rules! dispatch {
    ($self:expr, $f:ident => $body:expr) => {
        match $self {
            Function::Avg($f) => $body,
            Function::Count($f) => $body,
            Function::GroupConcat($f) => $body,
            Function::Histogram($f) => $body,
            Function::Reverse($f) => $body,
        }
    };
}

/// The closed set of function variants
#[derive(Debug, Clone, PartialEq)]
pub enum Function {
    Avg(Avg),
    Count(Count),
    GroupConcat(GroupConcat),
    Histogram(Histogram),
    Reverse(Reverse),
}

impl Function {
    /// Build a call node from raw parser output
    ///
    /// Only the argument layout is validated here; legality of argument
    /// types is checked when the node is first bound.
    pub fn from_call(name: &str, distinct: bool, children: Vec<Expr>) -> FunctionResult<Self> {
        let lowered = name.to_ascii_lowercase();
        let function = match lowered.as_str() {
            avg::NAME => Function::Avg(Avg::from_children(distinct, children)?),
            count::NAME => Function::Count(Count::from_children(distinct, children)?),
            group_concat::NAME => {
                Function::GroupConcat(GroupConcat::from_children(distinct, children)?)
            }
            histogram::NAME => Function::Histogram(Histogram::from_children(distinct, children)?),
            reverse::NAME => {
                if distinct {
                    return Err(FunctionError::InvalidArgumentStructure {
                        function: reverse::NAME.to_string(),
                        detail: "DISTINCT is only allowed in aggregate functions".to_string(),
                        children: render_children(&children),
                    });
                }
                Function::Reverse(Reverse::from_children(children)?)
            }
            _ => {
                return Err(FunctionError::UnknownFunction {
                    call: render_call(&lowered, distinct, &children),
                    name: lowered,
                });
            }
        };
        Ok(function)
    }

    pub fn name(&self) -> &'static str {
        dispatch!(self, f => f.name())
    }

    pub fn function_type(&self) -> FunctionType {
        dispatch!(self, f => f.function_type())
    }

    pub fn nullability(&self) -> Nullability {
        dispatch!(self, f => f.nullability())
    }

    pub fn children(&self) -> &[Expr] {
        dispatch!(self, f => f.children())
    }

    pub fn is_distinct(&self) -> bool {
        dispatch!(self, f => f.state().is_distinct())
    }

    pub fn matched_signature(&self) -> Option<&FunctionSignature> {
        dispatch!(self, f => f.matched_signature())
    }

    pub fn is_resolved(&self) -> bool {
        self.matched_signature().is_some()
    }

    pub fn argument_types(&self) -> FunctionResult<Vec<DataType>> {
        dispatch!(self, f => f.argument_types())
    }

    pub fn data_type(&self) -> FunctionResult<DataType> {
        dispatch!(self, f => f.data_type())
    }

    pub fn nullable(&self) -> bool {
        dispatch!(self, f => f.nullable())
    }

    pub fn check_legality(&self) -> FunctionResult<()> {
        dispatch!(self, f => f.check_legality())
    }

    pub fn compute_precision(
        &self,
        signature: FunctionSignature,
    ) -> FunctionResult<FunctionSignature> {
        dispatch!(self, f => f.compute_precision(signature))
    }

    pub fn accepts_variadic_call(&self) -> bool {
        dispatch!(self, f => f.accepts_variadic_call())
    }

    pub fn with_children(&self, children: Vec<Expr>) -> FunctionResult<Self> {
        Ok(match self {
            Function::Avg(f) => Function::Avg(f.with_children(children)?),
            Function::Count(f) => Function::Count(f.with_children(children)?),
            Function::GroupConcat(f) => Function::GroupConcat(f.with_children(children)?),
            Function::Histogram(f) => Function::Histogram(f.with_children(children)?),
            Function::Reverse(f) => Function::Reverse(f.with_children(children)?),
        })
    }

    pub fn with_matched_signature(&self, signature: FunctionSignature) -> Self {
        match self {
            Function::Avg(f) => Function::Avg(f.with_matched_signature(signature)),
            Function::Count(f) => Function::Count(f.with_matched_signature(signature)),
            Function::GroupConcat(f) => {
                Function::GroupConcat(f.with_matched_signature(signature))
            }
            Function::Histogram(f) => Function::Histogram(f.with_matched_signature(signature)),
            Function::Reverse(f) => Function::Reverse(f.with_matched_signature(signature)),
        }
    }

    /// Intermediate state types for aggregates, `None` for scalar functions
    pub fn intermediate_types(&self) -> FunctionResult<Option<Vec<DataType>>> {
        match self {
            Function::Avg(f) => f.intermediate_types().map(Some),
            Function::Count(f) => f.intermediate_types().map(Some),
            Function::GroupConcat(f) => f.intermediate_types().map(Some),
            Function::Histogram(f) => f.intermediate_types().map(Some),
            Function::Reverse(_) => Ok(None),
        }
    }

    pub fn to_sql(&self) -> String {
        dispatch!(self, f => f.to_sql())
    }

    pub fn accept<R, C, V>(&self, visitor: &mut V, context: &mut C) -> R
    where
        V: ExpressionVisitor<R, C> + ?Sized,
    {
        dispatch!(self, f => f.accept(visitor, context))
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sql = self.accept(&mut SqlPrinter, &mut ());
        f.write_str(&sql)
    }
}
