//! Field extraction: the SELECT list becomes the descriptors that drive the
//! axis and field pickers, plus the stream name the query reads from.

use sqlparser::ast::{
    Expr, FunctionArg, FunctionArgExpr, FunctionArguments, SelectItem, Statement, TableFactor,
};

use crate::config::get_config;
use crate::engine::{select_of, SqlEngine};
use crate::expr_utils::{column_name, first_function_arg};
use crate::filters::extract_filter_group;
use crate::model::{FieldDescriptor, QueryView};

/// Map each SELECT-list entry to a field descriptor. A wildcard anywhere
/// empties the whole list; the caller falls back to "all columns".
pub fn extract_fields(statement: &Statement, time_field: Option<&str>) -> Vec<FieldDescriptor> {
    let Ok(select) = select_of(statement) else {
        return Vec::new();
    };
    let mut fields = Vec::new();
    for item in &select.projection {
        match item {
            SelectItem::Wildcard(_) | SelectItem::QualifiedWildcard(_, _) => return Vec::new(),
            SelectItem::UnnamedExpr(expr) => {
                if let Some(field) = classify(expr, None, time_field) {
                    fields.push(field);
                }
            }
            SelectItem::ExprWithAlias { expr, alias } => {
                if let Some(field) = classify(expr, Some(&alias.value), time_field) {
                    fields.push(field);
                }
            }
        }
    }
    fields
}

fn classify(expr: &Expr, alias: Option<&str>, time_field: Option<&str>) -> Option<FieldDescriptor> {
    match expr {
        Expr::Identifier(_) | Expr::CompoundIdentifier(_) => {
            let column = column_name(expr)?;
            Some(FieldDescriptor {
                alias: alias.unwrap_or(&column).to_string(),
                column,
                aggregation_function: None,
            })
        }
        Expr::Function(func) => {
            let name = func.name.to_string().to_lowercase();
            let column = if has_wildcard_arg(&func.args) {
                "*".to_string()
            } else {
                match first_function_arg(&func.args).and_then(column_name) {
                    Some(column) => column,
                    // histogram() with no argument buckets the time column.
                    None if name == "histogram" => time_field
                        .unwrap_or(&get_config().timestamp_column)
                        .to_string(),
                    None => return None,
                }
            };
            Some(FieldDescriptor {
                alias: alias.unwrap_or(&column).to_string(),
                column,
                aggregation_function: Some(name),
            })
        }
        _ => None,
    }
}

fn has_wildcard_arg(args: &FunctionArguments) -> bool {
    if let FunctionArguments::List(list) = args {
        return list
            .args
            .iter()
            .any(|arg| matches!(arg, FunctionArg::Unnamed(FunctionArgExpr::Wildcard)));
    }
    false
}

/// The first table the statement reads from. Joined tables are ignored: the
/// UI scopes field lookups to the primary stream.
pub fn stream_name(statement: &Statement) -> Option<String> {
    let select = select_of(statement).ok()?;
    let first = select.from.first()?;
    match &first.relation {
        TableFactor::Table { name, .. } => name
            .0
            .last()
            .map(|ident| ident.value.clone()),
        _ => None,
    }
}

/// Rebuild the complete UI state from a SQL string. Total: parse failures log
/// and return [`QueryView::fallback`] so the UI always has something to
/// render.
pub fn get_fields_from_query(sql: &str, time_field: Option<&str>) -> QueryView {
    let engine = SqlEngine::global();
    let statement = match engine.parse_select(sql) {
        Ok(statement) => statement,
        Err(err) => {
            tracing::debug!(error = %err, "query not parseable, using fallback view");
            return QueryView::fallback(time_field);
        }
    };
    let fields = extract_fields(&statement, time_field);
    let filters = match select_of(&statement) {
        Ok(select) => extract_filter_group(select.selection.as_ref()),
        Err(_) => crate::model::FilterGroup::empty(),
    };
    QueryView {
        fields,
        filters,
        stream_name: stream_name(&statement),
    }
}
