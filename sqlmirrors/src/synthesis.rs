//! SQL synthesis: a complete `SELECT` built from the panel's structured axis
//! and join descriptors, independent of any pre-existing SQL text.

use crate::error::{Result, SqlMirrorError};
use crate::model::{AxisField, AxisSet, CompareOp, JoinSpec};
use crate::sql_ast::{
    quote_ident, Aggregation, Join, OrderItem, SelectItem, SelectQuery, SqlBinaryOperator, SqlExpr,
    SqlRenderer, TableRef,
};

/// Build the panel query: one SELECT column per x/breakdown/y field, GROUP BY
/// over every x and breakdown alias, ORDER BY over fields carrying a sort
/// directive (in x, breakdown, y declaration order), and one join entry per
/// join spec.
pub fn synthesize_query(stream: &str, fields: &AxisSet, joins: &[JoinSpec]) -> Result<String> {
    if fields.x.is_empty() && fields.breakdown.is_empty() && fields.y.is_empty() {
        return Err(SqlMirrorError::Synthesis(
            "at least one axis field is required".to_string(),
        ));
    }

    let mut query = SelectQuery {
        from: TableRef {
            name: stream.to_string(),
            alias: None,
        },
        ..SelectQuery::default()
    };

    for field in axis_order(fields) {
        query.select.push(SelectItem {
            expr: process_field(field),
            alias: Some(field.alias.clone()),
        });
    }

    // y-axis fields are aggregated, never grouped
    for field in fields.x.iter().chain(&fields.breakdown) {
        query.group_by.push(alias_ref(&field.alias));
    }

    for field in axis_order(fields) {
        if let Some(direction) = field.sort_by {
            query.order_by.push(OrderItem {
                expr: alias_ref(&field.alias),
                direction,
            });
        }
    }

    for join in joins {
        query.joins.push(build_join(join)?);
    }

    Ok(SqlRenderer::new().render_select(&query))
}

/// Textual fallback for callers that already hold pre-formatted column
/// expressions. No AST is constructed.
pub fn build_sql_query(table: &str, fields: &[String], where_clause: Option<&str>) -> String {
    let columns = if fields.is_empty() {
        "*".to_string()
    } else {
        fields.join(", ")
    };
    let mut sql = format!("SELECT {columns} FROM {}", quote_ident(table));
    if let Some(clause) = where_clause.filter(|clause| !clause.trim().is_empty()) {
        sql.push_str(&format!(" WHERE {clause}"));
    }
    sql
}

fn axis_order(fields: &AxisSet) -> impl Iterator<Item = &AxisField> {
    fields.x.iter().chain(&fields.breakdown).chain(&fields.y)
}

/// Pick the expression shape for one field: a member of the aggregation set
/// becomes an aggregate call, any other function name a plain call, and no
/// function at all a bare column reference.
fn process_field(field: &AxisField) -> SqlExpr {
    let column = column_expr(&field.column);
    match &field.aggregation_function {
        None => column,
        Some(name) => match Aggregation::from_name(name) {
            Some(agg) => SqlExpr::Aggregate {
                agg,
                expr: Box::new(column),
            },
            None => SqlExpr::Function {
                name: name.to_lowercase(),
                args: vec![column],
            },
        },
    }
}

fn build_join(spec: &JoinSpec) -> Result<Join> {
    if spec.conditions.is_empty() {
        return Err(SqlMirrorError::Synthesis(format!(
            "join on {} requires at least one condition",
            spec.stream
        )));
    }
    let on = spec
        .conditions
        .iter()
        .map(|condition| SqlExpr::BinaryOp {
            op: comparison_operator(condition.operation),
            left: Box::new(column_expr(&condition.left_field)),
            right: Box::new(column_expr(&condition.right_field)),
        })
        .collect();
    Ok(Join {
        join_type: spec.join_type,
        table: TableRef {
            name: spec.stream.clone(),
            alias: (!spec.stream_alias.is_empty()).then(|| spec.stream_alias.clone()),
        },
        on,
    })
}

fn comparison_operator(op: CompareOp) -> SqlBinaryOperator {
    match op {
        CompareOp::Eq => SqlBinaryOperator::Eq,
        CompareOp::Neq => SqlBinaryOperator::Neq,
        CompareOp::Gt => SqlBinaryOperator::Gt,
        CompareOp::Gte => SqlBinaryOperator::Gte,
        CompareOp::Lt => SqlBinaryOperator::Lt,
        CompareOp::Lte => SqlBinaryOperator::Lte,
    }
}

fn alias_ref(alias: &str) -> SqlExpr {
    SqlExpr::Column {
        table: None,
        name: alias.to_string(),
    }
}

/// Qualified field names (`a.customer_id`) split into table and column.
fn column_expr(name: &str) -> SqlExpr {
    match parse_qualified(name) {
        Some((table, column)) => SqlExpr::Column {
            table: Some(table.to_string()),
            name: column.to_string(),
        },
        None => SqlExpr::Column {
            table: None,
            name: name.to_string(),
        },
    }
}

fn parse_qualified(name: &str) -> Option<(&str, &str)> {
    let mut parts = name.splitn(2, '.');
    let table = parts.next()?;
    let column = parts.next()?;
    if table.is_empty() || column.is_empty() {
        return None;
    }
    Some((table, column))
}
