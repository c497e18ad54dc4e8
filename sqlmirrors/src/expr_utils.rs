//! Expression utility functions.
//!
//! Shared helpers for probing `sqlparser` expression trees. Extraction and
//! mutation both reason about "which column does this leaf talk about", so the
//! answer lives here instead of being re-derived at every call site.

use sqlparser::ast::{BinaryOperator, Expr, FunctionArg, FunctionArgExpr, FunctionArguments};

/// Strip one layer of wrapping single or double quotes.
pub fn trim_quotes(s: &str) -> String {
    let s = s.trim();
    if let Some(stripped) = s.strip_prefix('\'').and_then(|r| r.strip_suffix('\'')) {
        return stripped.to_string();
    }
    if let Some(stripped) = s.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
        return stripped.to_string();
    }
    s.to_string()
}

pub fn is_field(expr: &Expr) -> bool {
    matches!(expr, Expr::Identifier(_) | Expr::CompoundIdentifier(_))
}

pub fn is_value(expr: &Expr) -> bool {
    matches!(expr, Expr::Value(_))
}

/// Column name of a direct column reference. Compound identifiers resolve to
/// their last segment (`t.status` -> `status`).
pub fn column_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Identifier(ident) => Some(ident.value.clone()),
        Expr::CompoundIdentifier(idents) => idents.last().map(|ident| ident.value.clone()),
        _ => None,
    }
}

/// Unnamed plain-expression arguments of a function call, in order.
pub fn function_args(args: &FunctionArguments) -> Vec<&Expr> {
    let mut out = Vec::new();
    if let FunctionArguments::List(list) = args {
        for arg in &list.args {
            if let FunctionArg::Unnamed(FunctionArgExpr::Expr(expr)) = arg {
                out.push(expr);
            }
        }
    }
    out
}

/// First unnamed argument of a function call, if it is a plain expression.
pub fn first_function_arg(args: &FunctionArguments) -> Option<&Expr> {
    function_args(args).into_iter().next()
}

/// The column a predicate leaf constrains, when there is exactly one obvious
/// candidate. Connectives and unrecognized shapes return `None`.
pub fn predicate_column(expr: &Expr) -> Option<String> {
    match expr {
        Expr::BinaryOp { left, op, .. } => match op {
            BinaryOperator::And | BinaryOperator::Or => None,
            _ => column_name(left),
        },
        Expr::InList { expr, .. } => column_name(expr),
        Expr::IsNull(inner) | Expr::IsNotNull(inner) => column_name(inner),
        Expr::Like { expr, .. } | Expr::ILike { expr, .. } => column_name(expr),
        Expr::Function(func) => first_function_arg(&func.args).and_then(column_name),
        Expr::Nested(inner) => predicate_column(inner),
        _ => None,
    }
}
