//! Filter extraction: a parsed `WHERE` subtree becomes the nested AND/OR
//! condition groups the filter widgets render.
//!
//! Extraction is total. Any shape outside the closed predicate set collapses
//! the whole result to [`FilterGroup::empty`], so the UI shows "no filter"
//! instead of a half-translated tree.

use sqlparser::ast::{BinaryOperator, Expr};

use crate::error::{Result, SqlMirrorError};
use crate::expr_utils::{column_name, function_args, is_field, is_value, trim_quotes};
use crate::model::{
    CompareOp, FilterCondition, FilterGroup, FilterNode, LogicalOperator, Predicate,
};

/// Search functions that carry their target column as the first argument.
const COLUMN_MATCH_FUNCTIONS: &[&str] = &[
    "str_match",
    "str_match_ignore_case",
    "re_match",
    "re_not_match",
];

fn is_match_all(name: &str) -> bool {
    name.starts_with("match_all")
}

/// Convert a statement's `WHERE` subtree (or its absence) into a filter group.
pub fn extract_filter_group(selection: Option<&Expr>) -> FilterGroup {
    let Some(expr) = selection else {
        return FilterGroup::empty();
    };
    match try_extract(expr) {
        Ok(group) => group,
        Err(err) => {
            tracing::debug!(error = %err, "WHERE clause not representable as filter group");
            FilterGroup::empty()
        }
    }
}

fn try_extract(expr: &Expr) -> Result<FilterGroup> {
    let mut conditions = Vec::new();
    walk(expr, LogicalOperator::And, &mut conditions)?;
    Ok(FilterGroup {
        logical_operator: LogicalOperator::And,
        conditions,
    })
}

/// Flatten unparenthesized connectives into `out`; parenthesized connectives
/// become nested groups. `connective` is the operator that joined `expr` to
/// its left-hand sibling (the leftmost child keeps the default `AND`).
fn walk(expr: &Expr, connective: LogicalOperator, out: &mut Vec<FilterNode>) -> Result<()> {
    match expr {
        Expr::BinaryOp {
            left,
            op: BinaryOperator::And,
            right,
        } => {
            walk(left, connective, out)?;
            walk(right, LogicalOperator::And, out)?;
        }
        Expr::BinaryOp {
            left,
            op: BinaryOperator::Or,
            right,
        } => {
            walk(left, connective, out)?;
            walk(right, LogicalOperator::Or, out)?;
        }
        Expr::Nested(inner) => match inner.as_ref() {
            grouped @ Expr::BinaryOp {
                op: BinaryOperator::And | BinaryOperator::Or,
                ..
            } => {
                let mut children = Vec::new();
                walk(grouped, LogicalOperator::And, &mut children)?;
                out.push(FilterNode::Group(FilterGroup {
                    logical_operator: connective,
                    conditions: children,
                }));
            }
            // Parentheses around a single predicate carry no grouping.
            other => walk(other, connective, out)?,
        },
        leaf => out.push(FilterNode::Condition(FilterCondition {
            logical_operator: connective,
            predicate: extract_predicate(leaf)?,
        })),
    }
    Ok(())
}

fn extract_predicate(expr: &Expr) -> Result<Predicate> {
    match expr {
        Expr::BinaryOp { left, op, right } => {
            let op = match op {
                BinaryOperator::Eq => CompareOp::Eq,
                BinaryOperator::NotEq => CompareOp::Neq,
                BinaryOperator::Gt => CompareOp::Gt,
                BinaryOperator::GtEq => CompareOp::Gte,
                BinaryOperator::Lt => CompareOp::Lt,
                BinaryOperator::LtEq => CompareOp::Lte,
                _ => return Err(unrecognized(expr)),
            };
            // Literal-on-the-left equality is normalized around; for ordering
            // comparisons a swap would flip the operator, so only the
            // field-on-the-left form is accepted.
            let (field, literal) = if is_field(left) && is_value(right) {
                (left, right)
            } else if is_value(left)
                && is_field(right)
                && matches!(op, CompareOp::Eq | CompareOp::Neq)
            {
                (right, left)
            } else {
                return Err(unrecognized(expr));
            };
            Ok(Predicate::Comparison {
                column: column_name(field).ok_or_else(|| unrecognized(expr))?,
                op,
                // Keep the literal's SQL spelling: strings stay quoted.
                value: literal.to_string(),
            })
        }
        Expr::InList {
            expr: target,
            list,
            negated,
        } => {
            let column = column_name(target).ok_or_else(|| unrecognized(expr))?;
            Ok(Predicate::ListMembership {
                column,
                values: list.iter().map(|item| trim_quotes(&item.to_string())).collect(),
                negated: *negated,
            })
        }
        Expr::IsNull(inner) => Ok(Predicate::NullCheck {
            column: column_name(inner).ok_or_else(|| unrecognized(expr))?,
            negated: false,
        }),
        Expr::IsNotNull(inner) => Ok(Predicate::NullCheck {
            column: column_name(inner).ok_or_else(|| unrecognized(expr))?,
            negated: true,
        }),
        Expr::Like {
            negated,
            expr: target,
            pattern,
            ..
        }
        | Expr::ILike {
            negated,
            expr: target,
            pattern,
            ..
        } => {
            let column = column_name(target).ok_or_else(|| unrecognized(expr))?;
            Ok(Predicate::Pattern {
                column,
                value: strip_wildcards(&trim_quotes(&pattern.to_string())),
                negated: *negated,
            })
        }
        Expr::Function(func) => {
            let name = func.name.to_string().to_lowercase();
            let args = function_args(&func.args);
            if is_match_all(&name) {
                let value = args.first().ok_or_else(|| unrecognized(expr))?;
                return Ok(Predicate::FunctionMatch {
                    function: name,
                    column: None,
                    value: trim_quotes(&value.to_string()),
                });
            }
            if COLUMN_MATCH_FUNCTIONS.contains(&name.as_str()) {
                let column = args.first().and_then(|a| column_name(a));
                let value = args.get(1).ok_or_else(|| unrecognized(expr))?;
                return Ok(Predicate::FunctionMatch {
                    function: name,
                    column,
                    value: trim_quotes(&value.to_string()),
                });
            }
            Err(unrecognized(expr))
        }
        _ => Err(unrecognized(expr)),
    }
}

/// The UI stores the user's needle, not the SQL wildcard pattern.
fn strip_wildcards(pattern: &str) -> String {
    pattern.trim_matches('%').to_string()
}

fn unrecognized(expr: &Expr) -> SqlMirrorError {
    SqlMirrorError::Unsupported(format!("predicate shape not recognized: {expr}"))
}
