// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Expressions
//!
//! This module represents the argument side of a function call.
//!
//! ## Design
//!
//! An [`Expr`] is one of:
//!
//! - **Column references**: typed references produced by the analyzer
//! - **Literal values**: numbers, strings, booleans, decimals, NULL
//! - **Order clauses**: an `ORDER BY` item embedded in argument position,
//!   e.g. the `id DESC` in `group_concat(name ORDER BY id DESC)`
//! - **Function calls**: one of the closed set of [`Function`] variants
//!
//! Expressions form a tree: a function call owns its children exclusively and
//! a child may itself be a function call.
//!
//! ```text
//! Function::GroupConcat {
//!   children: [
//!     Column("name"),
//!     Literal(", "),
//!     Order { child: Column("id"), asc: false },
//!   ]
//! }
//! ```
//!
//! Represents: `group_concat(name, ', ' ORDER BY id DESC)`
//!
//! ## Immutability
//!
//! Nothing in the tree is mutated after construction. Operations that change
//! a node (substituting children, toggling DISTINCT, attaching a resolved
//! signature) return a new node, so a tree can be shared across threads and
//! memoized by callers.

use serde::{Deserialize, Serialize};

use crate::error::{FunctionError, FunctionResult};
use crate::function::Function;
use crate::types::DataType;
use crate::visitor::{ExpressionVisitor, SqlPrinter};

/// An argument expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Typed column reference (e.g., `orders.total`)
    Column(ColumnRef),

    /// Literal value
    Literal(Literal),

    /// `ORDER BY` item embedded in an argument list
    Order(OrderExpr),

    /// Function call (e.g., `avg(price)`, `reverse(name)`)
    Function(Function),
}

impl Expr {
    /// Data type of this expression
    ///
    /// Function calls only have a type once they have been bound to a signature.
    pub fn data_type(&self) -> FunctionResult<DataType> {
        match self {
            Expr::Column(column) => Ok(column.data_type.clone()),
            Expr::Literal(literal) => Ok(literal.data_type()),
            Expr::Order(order) => order.child.data_type(),
            Expr::Function(function) => function.data_type(),
        }
    }

    /// Whether this expression may evaluate to NULL
    pub fn nullable(&self) -> bool {
        match self {
            Expr::Column(column) => column.nullable,
            Expr::Literal(literal) => matches!(literal, Literal::Null),
            Expr::Order(order) => order.child.nullable(),
            Expr::Function(function) => function.nullable(),
        }
    }

    pub fn is_order(&self) -> bool {
        matches!(self, Expr::Order(_))
    }

    /// Whether every function call in this tree has been bound
    pub fn is_resolved(&self) -> bool {
        match self {
            Expr::Column(_) | Expr::Literal(_) => true,
            Expr::Order(order) => order.child.is_resolved(),
            Expr::Function(function) => {
                function.is_resolved() && function.children().iter().all(Expr::is_resolved)
            }
        }
    }

    /// Render as SQL text
    pub fn to_sql(&self) -> String {
        self.accept(&mut SqlPrinter, &mut ())
    }

    /// Dispatch to the visitor method for this node's concrete kind
    pub fn accept<R, C, V>(&self, visitor: &mut V, context: &mut C) -> R
    where
        V: ExpressionVisitor<R, C> + ?Sized,
    {
        match self {
            Expr::Column(column) => visitor.visit_column(column, context),
            Expr::Literal(literal) => visitor.visit_literal(literal, context),
            Expr::Order(order) => visitor.visit_order(order, context),
            Expr::Function(function) => function.accept(visitor, context),
        }
    }

    /// Type of a child, failing with the SQL text if it is still unbound
    pub(crate) fn require_type(&self) -> FunctionResult<DataType> {
        self.data_type().map_err(|_| FunctionError::UnresolvedExpression {
            sql: self.to_sql(),
        })
    }
}

impl From<ColumnRef> for Expr {
    fn from(column: ColumnRef) -> Self {
        Expr::Column(column)
    }
}

impl From<Literal> for Expr {
    fn from(literal: Literal) -> Self {
        Expr::Literal(literal)
    }
}

impl From<OrderExpr> for Expr {
    fn from(order: OrderExpr) -> Self {
        Expr::Order(order)
    }
}

impl From<Function> for Expr {
    fn from(function: Function) -> Self {
        Expr::Function(function)
    }
}

/// Column reference with the type the analyzer resolved for it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    /// Optional table/alias name
    pub table: Option<String>,
    /// Column name
    pub column: String,
    /// Column data type
    pub data_type: DataType,
    /// Whether the column is nullable
    pub nullable: bool,
}

impl ColumnRef {
    /// Non-nullable column of the given type
    pub fn new(column: impl Into<String>, data_type: DataType) -> Self {
        Self {
            table: None,
            column: column.into(),
            data_type,
            nullable: false,
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn qualified(&self) -> String {
        match &self.table {
            Some(table) => format!("{}.{}", table, self.column),
            None => self.column.clone(),
        }
    }
}

/// Literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    /// Exact decimal given as its digit string, e.g. `12.50` is `("12.50", 4, 2)`
    Decimal {
        value: String,
        precision: u32,
        scale: u32,
    },
    String(String),
}

impl Literal {
    /// Type the literal carries before any coercion
    pub fn data_type(&self) -> DataType {
        match self {
            Literal::Null => DataType::NullType,
            Literal::Boolean(_) => DataType::Boolean,
            Literal::Integer(v) => {
                if i32::try_from(*v).is_ok() {
                    DataType::Integer
                } else {
                    DataType::BigInt
                }
            }
            Literal::Float(_) => DataType::Double,
            Literal::Decimal {
                precision, scale, ..
            } => DataType::DecimalV3(*precision, *scale),
            Literal::String(s) => DataType::Varchar(s.chars().count() as u32),
        }
    }
}

/// An `ORDER BY` item used as a function argument
#[derive(Debug, Clone, PartialEq)]
pub struct OrderExpr {
    pub child: Box<Expr>,
    pub asc: bool,
    pub nulls_first: bool,
}

impl OrderExpr {
    /// Ascending, NULLS FIRST
    pub fn asc(child: impl Into<Expr>) -> Self {
        Self {
            child: Box::new(child.into()),
            asc: true,
            nulls_first: true,
        }
    }

    /// Descending, NULLS LAST
    pub fn desc(child: impl Into<Expr>) -> Self {
        Self {
            child: Box::new(child.into()),
            asc: false,
            nulls_first: false,
        }
    }

    pub fn with_child(&self, child: Expr) -> Self {
        Self {
            child: Box::new(child),
            asc: self.asc,
            nulls_first: self.nulls_first,
        }
    }
}
