//! Histogram interval rewriting.
//!
//! The x-axis histogram call carries an optional bucket-interval argument:
//! `histogram(_timestamp, '5 minute')`. The UI edits that argument without
//! touching the rest of the statement.

use chrono::Duration;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use sqlparser::ast::{
    Expr, FunctionArg, FunctionArgExpr, FunctionArguments, SelectItem, Value,
};

use crate::config::get_config;
use crate::engine::{select_mut, SqlEngine};
use crate::error::{Result, SqlMirrorError};

static RE_HISTOGRAM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)histogram\(([^\)]*)\)").unwrap());

/// Insert, keep, or remove the bucket-interval argument of the `histogram`
/// call in the SELECT list.
///
/// - `None` truncates the call back to its time-column argument.
/// - `Some` appends an interval only when the call has none; an explicit
///   existing interval is left alone, so the operation is idempotent.
pub fn change_histogram_interval(sql: &str, interval: Option<&str>) -> Result<String> {
    if sql.trim().is_empty() {
        return Ok(sql.to_string());
    }
    // Nothing to remove and nothing to parse.
    if interval.is_none() && !RE_HISTOGRAM.is_match(sql) {
        return Ok(sql.to_string());
    }
    let engine = SqlEngine::global();
    let mut statement = engine.parse_select(sql)?;
    let select = select_mut(&mut statement)?;
    for item in select.projection.iter_mut() {
        let expr = match item {
            SelectItem::UnnamedExpr(expr) => expr,
            SelectItem::ExprWithAlias { expr, .. } => expr,
            _ => continue,
        };
        rewrite_histogram_args(expr, interval);
    }
    Ok(engine.print(&statement))
}

fn rewrite_histogram_args(expr: &mut Expr, interval: Option<&str>) {
    let Expr::Function(func) = expr else {
        return;
    };
    if func.name.to_string().to_lowercase() != "histogram" {
        return;
    }
    let FunctionArguments::List(list) = &mut func.args else {
        return;
    };
    match interval {
        None => list.args.truncate(1),
        Some(interval) => {
            if list.args.len() == 1 {
                list.args.push(FunctionArg::Unnamed(FunctionArgExpr::Expr(Expr::Value(
                    Value::SingleQuotedString(interval.to_string()),
                ))));
            }
        }
    }
}

/// Pick a bucket interval for a time range, in microseconds. With a bucket
/// count the range is split evenly; otherwise a fixed ladder keeps the
/// bucket count reasonable at any zoom level.
pub fn generate_histogram_interval(time_range: Option<(i64, i64)>, buckets: u16) -> String {
    let Some(time_range) = time_range.filter(|range| *range != (0, 0)) else {
        return get_config().default_histogram_interval.clone();
    };
    let span = time_range.1 - time_range.0;
    if buckets > 0 {
        let micros_per_second = Duration::seconds(1).num_microseconds().unwrap_or(1_000_000);
        return format!(
            "{} second",
            std::cmp::max(span / micros_per_second / buckets as i64, 1)
        );
    }

    let ladder = [
        (Duration::hours(24 * 60), "1 day"),
        (Duration::hours(24 * 30), "12 hour"),
        (Duration::hours(24 * 28), "6 hour"),
        (Duration::hours(24 * 21), "3 hour"),
        (Duration::hours(24 * 15), "2 hour"),
        (Duration::hours(6), "1 hour"),
        (Duration::hours(2), "1 minute"),
        (Duration::hours(1), "30 second"),
        (Duration::minutes(30), "15 second"),
        (Duration::minutes(15), "10 second"),
    ];
    for (width, interval) in ladder.iter() {
        if span >= width.num_microseconds().unwrap_or(i64::MAX) {
            return interval.to_string();
        }
    }
    "10 second".to_string()
}

/// Convert a `"<n> <unit>"` interval string to seconds.
pub fn histogram_interval_to_seconds(interval: &str) -> Result<i64> {
    let Some((amount, unit)) = interval.splitn(2, ' ').collect_tuple() else {
        return Err(SqlMirrorError::Unsupported(format!(
            "invalid interval format: {interval}"
        )));
    };
    let seconds = match unit.to_lowercase().as_str() {
        "second" | "seconds" => amount.parse::<i64>(),
        "minute" | "minutes" => amount.parse::<i64>().map(|n| n * 60),
        "hour" | "hours" => amount.parse::<i64>().map(|n| n * 3600),
        "day" | "days" => amount.parse::<i64>().map(|n| n * 86400),
        _ => {
            return Err(SqlMirrorError::Unsupported(format!(
                "unknown interval unit: {unit}"
            )))
        }
    };
    seconds.map_err(|_| {
        SqlMirrorError::Unsupported(format!("invalid interval amount: {interval}"))
    })
}
