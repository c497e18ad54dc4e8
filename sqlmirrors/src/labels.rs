//! Drill-down label injection.
//!
//! A click on a chart series turns into one `(column, operator, value)`
//! triple that must land in the query's `WHERE` clause without restructuring
//! whatever the user already typed there.

use sqlparser::ast::{BinaryOperator, Expr, Ident, Value};

use crate::engine::{select_mut, SqlEngine};
use crate::error::Result;
use crate::expr_utils::trim_quotes;
use crate::model::{Label, LabelOperator};

/// Disposable statement the multi-label fold accumulates predicates on.
const SCRATCH_QUERY: &str = "SELECT * FROM scratch";

/// Add one predicate to the query. An existing clause stays on the left,
/// unparenthesized, ANDed with the new predicate.
pub fn add_label_to_sql_query(
    sql: &str,
    column: &str,
    value: &str,
    operator: LabelOperator,
) -> Result<String> {
    let engine = SqlEngine::global();
    let mut statement = engine.parse_select(sql)?;
    let select = select_mut(&mut statement)?;
    push_predicate(
        &mut select.selection,
        label_predicate(column, value, operator),
    );
    Ok(engine.print(&statement))
}

/// Fold a list of labels onto the query. The labels are first combined on a
/// scratch statement, then ANDed onto the real clause with both sides
/// parenthesized so a pre-existing multi-predicate clause keeps its grouping.
pub fn add_labels_to_sql_query(sql: &str, labels: &[Label]) -> Result<String> {
    if labels.is_empty() {
        return Ok(sql.to_string());
    }
    let engine = SqlEngine::global();
    let mut statement = engine.parse_select(sql)?;
    let mut scratch = engine.parse_select(SCRATCH_QUERY)?;

    let scratch_select = select_mut(&mut scratch)?;
    for label in labels {
        push_predicate(
            &mut scratch_select.selection,
            label_predicate(&label.name, &label.value, label.operator),
        );
    }
    let Some(combined) = scratch_select.selection.take() else {
        return Ok(engine.print(&statement));
    };

    let select = select_mut(&mut statement)?;
    select.selection = Some(match select.selection.take() {
        None => combined,
        Some(existing) => Expr::BinaryOp {
            left: Box::new(Expr::Nested(Box::new(existing))),
            op: BinaryOperator::And,
            right: Box::new(Expr::Nested(Box::new(combined))),
        },
    });
    Ok(engine.print(&statement))
}

fn push_predicate(selection: &mut Option<Expr>, predicate: Expr) {
    *selection = Some(match selection.take() {
        None => predicate,
        Some(existing) => Expr::BinaryOp {
            left: Box::new(existing),
            op: BinaryOperator::And,
            right: Box::new(predicate),
        },
    });
}

fn label_predicate(column: &str, value: &str, operator: LabelOperator) -> Expr {
    match operator {
        LabelOperator::Contains => like_predicate(column, value, false),
        LabelOperator::NotContains => like_predicate(column, value, true),
        LabelOperator::IsNull => Expr::IsNull(Box::new(column_ref(column))),
        LabelOperator::IsNotNull => Expr::IsNotNull(Box::new(column_ref(column))),
        // A delimited value string expands into a quoted literal list.
        LabelOperator::In => Expr::InList {
            expr: Box::new(column_ref(column)),
            list: value
                .split(',')
                .map(|item| string_literal(&trim_quotes(item)))
                .collect(),
            negated: false,
        },
        comparison => Expr::BinaryOp {
            left: Box::new(column_ref(column)),
            op: comparison_operator(comparison),
            right: Box::new(string_literal(&trim_quotes(value))),
        },
    }
}

fn like_predicate(column: &str, value: &str, negated: bool) -> Expr {
    Expr::Like {
        negated,
        expr: Box::new(column_ref(column)),
        pattern: Box::new(string_literal(&format!("%{}%", trim_quotes(value)))),
        escape_char: None,
    }
}

fn comparison_operator(operator: LabelOperator) -> BinaryOperator {
    match operator {
        LabelOperator::Eq => BinaryOperator::Eq,
        LabelOperator::Neq => BinaryOperator::NotEq,
        LabelOperator::Gt => BinaryOperator::Gt,
        LabelOperator::Gte => BinaryOperator::GtEq,
        LabelOperator::Lt => BinaryOperator::Lt,
        LabelOperator::Lte => BinaryOperator::LtEq,
        LabelOperator::Contains
        | LabelOperator::NotContains
        | LabelOperator::IsNull
        | LabelOperator::IsNotNull
        | LabelOperator::In => unreachable!("handled before comparison dispatch"),
    }
}

fn column_ref(column: &str) -> Expr {
    Expr::Identifier(Ident::new(column))
}

/// The printer doubles embedded single quotes, which is the injection-safety
/// boundary for user-controlled values.
fn string_literal(value: &str) -> Expr {
    Expr::Value(Value::SingleQuotedString(value.to_string()))
}
