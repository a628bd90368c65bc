// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Typed expression fixtures

use sqlfn_ir::{ColumnRef, DataType, Expr, Function, Literal, OrderExpr};

/// Builders for argument expressions used across tests
pub struct ExprFixtures;

impl ExprFixtures {
    // ===== Columns =====

    /// Non-nullable column
    pub fn column(name: &str, data_type: DataType) -> Expr {
        Expr::from(ColumnRef::new(name, data_type))
    }

    /// Nullable column
    pub fn nullable_column(name: &str, data_type: DataType) -> Expr {
        Expr::from(ColumnRef::new(name, data_type).with_nullable(true))
    }

    /// `orders.total DECIMALV3(10, 2)`
    pub fn order_total() -> Expr {
        Expr::from(
            ColumnRef::new("total", DataType::DecimalV3(10, 2))
                .with_table("orders")
                .with_nullable(true),
        )
    }

    /// `users.name STRING`
    pub fn user_name() -> Expr {
        Expr::from(ColumnRef::new("name", DataType::String).with_table("users"))
    }

    /// `users.id BIGINT`
    pub fn user_id() -> Expr {
        Expr::from(ColumnRef::new("id", DataType::BigInt).with_table("users"))
    }

    // ===== Literals =====

    pub fn null() -> Expr {
        Expr::from(Literal::Null)
    }

    pub fn int(value: i64) -> Expr {
        Expr::from(Literal::Integer(value))
    }

    pub fn double(value: f64) -> Expr {
        Expr::from(Literal::Float(value))
    }

    pub fn string(value: &str) -> Expr {
        Expr::from(Literal::String(value.to_string()))
    }

    // ===== Order clauses =====

    pub fn asc(child: Expr) -> Expr {
        Expr::from(OrderExpr::asc(child))
    }

    pub fn desc(child: Expr) -> Expr {
        Expr::from(OrderExpr::desc(child))
    }

    // ===== Calls =====

    /// Unbound call node; panics if the argument layout is invalid
    pub fn call(name: &str, children: Vec<Expr>) -> Expr {
        Self::call_with_distinct(name, false, children)
    }

    /// Unbound `DISTINCT` call node
    pub fn distinct_call(name: &str, children: Vec<Expr>) -> Expr {
        Self::call_with_distinct(name, true, children)
    }

    fn call_with_distinct(name: &str, distinct: bool, children: Vec<Expr>) -> Expr {
        match Function::from_call(name, distinct, children) {
            Ok(function) => Expr::from(function),
            Err(e) => panic!("Invalid fixture call {}: {}", name, e),
        }
    }
}
