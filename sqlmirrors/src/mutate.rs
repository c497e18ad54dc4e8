//! Structure-preserving edits on a parsed `WHERE` tree.
//!
//! Both primitives leave every non-matching predicate and the surrounding
//! boolean grouping exactly as parsed. A column that is absent from the tree
//! is a silent no-op, not an error.

use sqlparser::ast::{BinaryOperator, Expr, Value};

use crate::engine::{select_mut, SqlEngine};
use crate::error::Result;
use crate::expr_utils::{column_name, predicate_column};
use crate::model::FilterUpdate;

/// Remove every predicate on `column`. Connectives collapse onto the
/// surviving side; `None` means the whole clause is gone and the caller
/// should drop `WHERE` entirely.
pub fn remove_condition(expr: Expr, column: &str) -> Option<Expr> {
    match expr {
        Expr::BinaryOp {
            left,
            op: op @ (BinaryOperator::And | BinaryOperator::Or),
            right,
        } => {
            let left = remove_condition(*left, column);
            let right = remove_condition(*right, column);
            match (left, right) {
                (Some(l), Some(r)) => Some(Expr::BinaryOp {
                    left: Box::new(l),
                    op,
                    right: Box::new(r),
                }),
                (Some(side), None) | (None, Some(side)) => Some(side),
                (None, None) => None,
            }
        }
        Expr::Nested(inner) => {
            remove_condition(*inner, column).map(|kept| Expr::Nested(Box::new(kept)))
        }
        leaf => {
            if predicate_column(&leaf).as_deref() == Some(column) {
                None
            } else {
                Some(leaf)
            }
        }
    }
}

/// Rewrite the values of every predicate on `column` in place, never adding
/// or removing nodes. Range updates overwrite the bounds of `>=`/`<=`
/// comparisons; list updates replace `IN` lists with quoted string literals.
pub fn modify_where_clause(expr: &mut Expr, column: &str, update: &FilterUpdate) {
    match expr {
        Expr::BinaryOp {
            left,
            op: BinaryOperator::And | BinaryOperator::Or,
            right,
        } => {
            modify_where_clause(left, column, update);
            modify_where_clause(right, column, update);
        }
        Expr::Nested(inner) => modify_where_clause(inner, column, update),
        Expr::BinaryOp {
            left,
            op: BinaryOperator::GtEq,
            right,
        } => {
            if let FilterUpdate::Range { min, .. } = update {
                if column_name(left).as_deref() == Some(column) {
                    **right = Expr::Value(Value::Number(min.to_string(), false));
                }
            }
        }
        Expr::BinaryOp {
            left,
            op: BinaryOperator::LtEq,
            right,
        } => {
            if let FilterUpdate::Range { max, .. } = update {
                if column_name(left).as_deref() == Some(column) {
                    **right = Expr::Value(Value::Number(max.to_string(), false));
                }
            }
        }
        Expr::InList {
            expr: target, list, ..
        } => {
            if let FilterUpdate::List(values) = update {
                if column_name(target).as_deref() == Some(column) {
                    *list = values
                        .iter()
                        .map(|v| Expr::Value(Value::SingleQuotedString(v.clone())))
                        .collect();
                }
            }
        }
        _ => {}
    }
}

/// Parse, remove every predicate on `column`, and re-serialize. An `Err`
/// means the edit was not applied and the caller keeps its original SQL.
pub fn remove_filter_from_sql(sql: &str, column: &str) -> Result<String> {
    let engine = SqlEngine::global();
    let mut statement = engine.parse_select(sql)?;
    let select = select_mut(&mut statement)?;
    if let Some(selection) = select.selection.take() {
        select.selection = remove_condition(selection, column);
    }
    Ok(engine.print(&statement))
}

/// Parse, rewrite `column`'s values, and re-serialize.
pub fn update_filter_values(sql: &str, column: &str, update: &FilterUpdate) -> Result<String> {
    let engine = SqlEngine::global();
    let mut statement = engine.parse_select(sql)?;
    let select = select_mut(&mut statement)?;
    if let Some(selection) = select.selection.as_mut() {
        modify_where_clause(selection, column, update);
    }
    Ok(engine.print(&statement))
}
