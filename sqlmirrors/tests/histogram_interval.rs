//! Integration tests for histogram interval rewriting.

use sqlmirror::change_histogram_interval;

const BASE: &str = "SELECT histogram(_timestamp) AS x_axis_1, count(_timestamp) AS y_axis_1 FROM logs";

#[test]
fn appends_interval_when_absent() {
    let sql = change_histogram_interval(BASE, Some("5 minute")).unwrap();
    assert_eq!(
        sql,
        "SELECT histogram(_timestamp, '5 minute') AS x_axis_1, \
         count(_timestamp) AS y_axis_1 FROM logs"
    );
}

#[test]
fn rewrite_is_idempotent() {
    let once = change_histogram_interval(BASE, Some("5 minute")).unwrap();
    let twice = change_histogram_interval(&once, Some("5 minute")).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn existing_interval_is_not_overwritten() {
    let sql = "SELECT histogram(_timestamp, '1 hour') AS x FROM logs";
    let rewritten = change_histogram_interval(sql, Some("5 minute")).unwrap();
    assert_eq!(
        rewritten,
        "SELECT histogram(_timestamp, '1 hour') AS x FROM logs"
    );
}

#[test]
fn null_interval_truncates_to_time_column() {
    let sql = "SELECT histogram(_timestamp, '1 hour') AS x FROM logs";
    let rewritten = change_histogram_interval(sql, None).unwrap();
    assert_eq!(rewritten, "SELECT histogram(_timestamp) AS x FROM logs");
}

#[test]
fn removing_then_adding_round_trips() {
    let with_interval = change_histogram_interval(BASE, Some("5 minute")).unwrap();
    let stripped = change_histogram_interval(&with_interval, None).unwrap();
    assert_eq!(stripped, BASE);
}

#[test]
fn empty_sql_is_untouched() {
    assert_eq!(change_histogram_interval("", Some("5 minute")).unwrap(), "");
    assert_eq!(change_histogram_interval("   ", None).unwrap(), "   ");
}

#[test]
fn null_interval_without_histogram_skips_parsing() {
    // No interval to remove means no parse: even unparseable text passes
    // through unchanged.
    let sql = "SELECT count(_timestamp) FROM logs";
    assert_eq!(change_histogram_interval(sql, None).unwrap(), sql);
    assert_eq!(
        change_histogram_interval("not sql at all", None).unwrap(),
        "not sql at all"
    );
}

#[test]
fn queries_without_histogram_are_preserved() {
    let sql = "SELECT count(_timestamp) AS y FROM logs";
    assert_eq!(
        change_histogram_interval(sql, Some("5 minute")).unwrap(),
        sql
    );
}
