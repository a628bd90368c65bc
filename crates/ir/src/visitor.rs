// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Expression visitors
//!
//! [`ExpressionVisitor`] lets passes outside this crate (binding, printing,
//! code generation) add behavior per node kind without touching the nodes.
//! There are no default methods: a new function variant does not compile
//! until every visitor handles it.
//!
//! [`SqlPrinter`] is the visitor used to render expressions back to SQL for
//! diagnostics.

use crate::expr::{ColumnRef, Literal, OrderExpr};
use crate::function::{Avg, Count, ExpressionFunction, GroupConcat, Histogram, Reverse};

/// Double-dispatch target with one method per concrete node kind
pub trait ExpressionVisitor<R, C> {
    fn visit_column(&mut self, column: &ColumnRef, context: &mut C) -> R;

    fn visit_literal(&mut self, literal: &Literal, context: &mut C) -> R;

    fn visit_order(&mut self, order: &OrderExpr, context: &mut C) -> R;

    fn visit_avg(&mut self, avg: &Avg, context: &mut C) -> R;

    fn visit_count(&mut self, count: &Count, context: &mut C) -> R;

    fn visit_group_concat(&mut self, group_concat: &GroupConcat, context: &mut C) -> R;

    fn visit_histogram(&mut self, histogram: &Histogram, context: &mut C) -> R;

    fn visit_reverse(&mut self, reverse: &Reverse, context: &mut C) -> R;
}

/// Renders expressions as SQL text
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlPrinter;

impl ExpressionVisitor<String, ()> for SqlPrinter {
    fn visit_column(&mut self, column: &ColumnRef, _: &mut ()) -> String {
        column.qualified()
    }

    fn visit_literal(&mut self, literal: &Literal, _: &mut ()) -> String {
        match literal {
            Literal::Null => "NULL".to_string(),
            Literal::Boolean(true) => "TRUE".to_string(),
            Literal::Boolean(false) => "FALSE".to_string(),
            Literal::Integer(v) => v.to_string(),
            Literal::Float(v) => v.to_string(),
            Literal::Decimal { value, .. } => value.clone(),
            Literal::String(s) => format!("'{}'", s.replace('\'', "''")),
        }
    }

    fn visit_order(&mut self, order: &OrderExpr, context: &mut ()) -> String {
        let mut sql = order.child.accept(self, context);
        sql.push_str(if order.asc { " ASC" } else { " DESC" });
        // ASC defaults to NULLS FIRST, DESC to NULLS LAST
        if order.asc != order.nulls_first {
            sql.push_str(if order.nulls_first {
                " NULLS FIRST"
            } else {
                " NULLS LAST"
            });
        }
        sql
    }

    fn visit_avg(&mut self, avg: &Avg, _: &mut ()) -> String {
        avg.to_sql()
    }

    fn visit_count(&mut self, count: &Count, _: &mut ()) -> String {
        count.to_sql()
    }

    fn visit_group_concat(&mut self, group_concat: &GroupConcat, _: &mut ()) -> String {
        group_concat.to_sql()
    }

    fn visit_histogram(&mut self, histogram: &Histogram, _: &mut ()) -> String {
        histogram.to_sql()
    }

    fn visit_reverse(&mut self, reverse: &Reverse, _: &mut ()) -> String {
        reverse.to_sql()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Expr;
    use crate::function::Function;
    use crate::types::DataType;

    /// Counts function calls per kind, to check dispatch reaches the right method
    #[derive(Default)]
    struct CallCounter {
        aggregates: usize,
        scalars: usize,
    }

    impl ExpressionVisitor<(), usize> for CallCounter {
        fn visit_column(&mut self, _: &ColumnRef, _: &mut usize) {}

        fn visit_literal(&mut self, _: &Literal, _: &mut usize) {}

        fn visit_order(&mut self, order: &OrderExpr, depth: &mut usize) {
            order.child.accept(self, depth)
        }

        fn visit_avg(&mut self, avg: &Avg, depth: &mut usize) {
            self.aggregates += 1;
            *depth += 1;
            for child in avg.children() {
                child.accept(self, depth);
            }
        }

        fn visit_count(&mut self, _: &Count, _: &mut usize) {
            self.aggregates += 1;
        }

        fn visit_group_concat(&mut self, group_concat: &GroupConcat, depth: &mut usize) {
            self.aggregates += 1;
            *depth += 1;
            for child in group_concat.children() {
                child.accept(self, depth);
            }
        }

        fn visit_histogram(&mut self, _: &Histogram, _: &mut usize) {
            self.aggregates += 1;
        }

        fn visit_reverse(&mut self, reverse: &Reverse, depth: &mut usize) {
            self.scalars += 1;
            *depth += 1;
            for child in reverse.children() {
                child.accept(self, depth);
            }
        }
    }

    #[test]
    fn test_dispatch_reaches_variant_methods() {
        let inner = Function::from_call(
            "reverse",
            false,
            vec![Expr::from(ColumnRef::new("name", DataType::String))],
        )
        .unwrap();
        let outer = Function::from_call("group_concat", false, vec![Expr::from(inner)]).unwrap();

        let mut counter = CallCounter::default();
        let mut depth = 0;
        Expr::from(outer).accept(&mut counter, &mut depth);

        assert_eq!(counter.aggregates, 1);
        assert_eq!(counter.scalars, 1);
        assert_eq!(depth, 2);
    }

    #[test]
    fn test_print_order_nulls() {
        let col = Expr::from(ColumnRef::new("id", DataType::Integer));
        let mut order = OrderExpr::asc(col);
        assert_eq!(SqlPrinter.visit_order(&order, &mut ()), "id ASC");
        order.nulls_first = false;
        assert_eq!(SqlPrinter.visit_order(&order, &mut ()), "id ASC NULLS LAST");
    }

    #[test]
    fn test_print_literals() {
        assert_eq!(SqlPrinter.visit_literal(&Literal::Null, &mut ()), "NULL");
        assert_eq!(SqlPrinter.visit_literal(&Literal::Boolean(true), &mut ()), "TRUE");
        assert_eq!(SqlPrinter.visit_literal(&Literal::Integer(-3), &mut ()), "-3");
    }
}
