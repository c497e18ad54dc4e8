//! Integration tests for SQL synthesis and the synthesize -> extract round
//! trip.

use sqlmirror::model::{
    AxisField, AxisSet, CompareOp, JoinCondition, JoinSpec, JoinType, SortDirection,
};
use sqlmirror::{build_sql_query, get_fields_from_query, synthesize_query};

// ============================================================================
// Fixtures
// ============================================================================

fn axis(column: &str, alias: &str, aggregation: Option<&str>) -> AxisField {
    AxisField {
        column: column.to_string(),
        alias: alias.to_string(),
        aggregation_function: aggregation.map(str::to_string),
        sort_by: None,
    }
}

fn sorted(mut field: AxisField, direction: SortDirection) -> AxisField {
    field.sort_by = Some(direction);
    field
}

fn histogram_count_fields() -> AxisSet {
    AxisSet {
        x: vec![axis("_timestamp", "x_axis_1", Some("histogram"))],
        breakdown: vec![],
        y: vec![axis("_timestamp", "y_axis_1", Some("count"))],
    }
}

// ============================================================================
// Synthesis
// ============================================================================

#[test]
fn builds_histogram_count_panel_query() {
    let sql = synthesize_query("logs", &histogram_count_fields(), &[]).unwrap();
    assert_eq!(
        sql,
        "SELECT histogram(\"_timestamp\") AS \"x_axis_1\", \
         count(\"_timestamp\") AS \"y_axis_1\" FROM \"logs\" GROUP BY \"x_axis_1\""
    );
}

#[test]
fn breakdown_fields_join_the_group_by() {
    let fields = AxisSet {
        x: vec![axis("_timestamp", "x_axis_1", Some("histogram"))],
        breakdown: vec![axis("service", "breakdown_1", None)],
        y: vec![axis("_timestamp", "y_axis_1", Some("count"))],
    };
    let sql = synthesize_query("logs", &fields, &[]).unwrap();
    assert!(sql.contains("\"service\" AS \"breakdown_1\""));
    assert!(sql.ends_with("GROUP BY \"x_axis_1\", \"breakdown_1\""));
}

#[test]
fn order_by_preserves_axis_declaration_order() {
    let fields = AxisSet {
        x: vec![sorted(
            axis("_timestamp", "x_axis_1", Some("histogram")),
            SortDirection::Asc,
        )],
        breakdown: vec![],
        y: vec![sorted(
            axis("duration", "y_axis_1", Some("avg")),
            SortDirection::Desc,
        )],
    };
    let sql = synthesize_query("logs", &fields, &[]).unwrap();
    assert!(sql.ends_with("ORDER BY \"x_axis_1\" ASC, \"y_axis_1\" DESC"));
}

#[test]
fn percentiles_render_as_approx_percentile_cont() {
    let fields = AxisSet {
        x: vec![axis("service", "x_axis_1", None)],
        breakdown: vec![],
        y: vec![axis("duration", "y_axis_1", Some("p95"))],
    };
    let sql = synthesize_query("logs", &fields, &[]).unwrap();
    assert!(sql.contains("approx_percentile_cont(\"duration\", 0.95) AS \"y_axis_1\""));
}

#[test]
fn count_distinct_renders_distinct_keyword() {
    let fields = AxisSet {
        x: vec![axis("service", "x_axis_1", None)],
        breakdown: vec![],
        y: vec![axis("user_id", "y_axis_1", Some("count-distinct"))],
    };
    let sql = synthesize_query("logs", &fields, &[]).unwrap();
    assert!(sql.contains("count(distinct \"user_id\") AS \"y_axis_1\""));
}

#[test]
fn unknown_function_names_render_as_plain_calls() {
    let fields = AxisSet {
        x: vec![axis("payload", "x_axis_1", Some("length"))],
        breakdown: vec![],
        y: vec![axis("_timestamp", "y_axis_1", Some("count"))],
    };
    let sql = synthesize_query("logs", &fields, &[]).unwrap();
    assert!(sql.contains("length(\"payload\") AS \"x_axis_1\""));
    // non-aggregates still group
    assert!(sql.contains("GROUP BY \"x_axis_1\""));
}

#[test]
fn joins_chain_conditions_with_and() {
    let joins = vec![JoinSpec {
        stream: "services".to_string(),
        stream_alias: "s".to_string(),
        join_type: JoinType::Left,
        conditions: vec![
            JoinCondition {
                left_field: "logs.service_id".to_string(),
                right_field: "s.id".to_string(),
                operation: CompareOp::Eq,
            },
            JoinCondition {
                left_field: "logs.region".to_string(),
                right_field: "s.region".to_string(),
                operation: CompareOp::Eq,
            },
        ],
    }];
    let sql = synthesize_query("logs", &histogram_count_fields(), &joins).unwrap();
    assert!(sql.contains(
        "FROM \"logs\" LEFT JOIN \"services\" AS \"s\" ON \
         \"logs\".\"service_id\" = \"s\".\"id\" AND \"logs\".\"region\" = \"s\".\"region\""
    ));
}

#[test]
fn join_without_conditions_is_rejected() {
    let joins = vec![JoinSpec {
        stream: "services".to_string(),
        stream_alias: "s".to_string(),
        join_type: JoinType::Inner,
        conditions: vec![],
    }];
    assert!(synthesize_query("logs", &histogram_count_fields(), &joins).is_err());
}

#[test]
fn empty_axis_set_is_rejected() {
    assert!(synthesize_query("logs", &AxisSet::default(), &[]).is_err());
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn synthesized_query_extracts_back_to_same_fields() {
    let sql = synthesize_query("logs", &histogram_count_fields(), &[]).unwrap();
    let view = get_fields_from_query(&sql, None);

    assert_eq!(view.stream_name.as_deref(), Some("logs"));
    assert_eq!(view.fields.len(), 2);
    assert_eq!(view.fields[0].column, "_timestamp");
    assert_eq!(view.fields[0].alias, "x_axis_1");
    assert_eq!(
        view.fields[0].aggregation_function.as_deref(),
        Some("histogram")
    );
    assert_eq!(view.fields[1].alias, "y_axis_1");
    assert_eq!(view.fields[1].aggregation_function.as_deref(), Some("count"));
    assert!(view.filters.is_empty());
}

// ============================================================================
// Textual fallback
// ============================================================================

#[test]
fn textual_fallback_concatenates_parts() {
    let sql = build_sql_query(
        "logs",
        &["count(*)".to_string(), "status".to_string()],
        Some("status = '500'"),
    );
    assert_eq!(
        sql,
        "SELECT count(*), status FROM \"logs\" WHERE status = '500'"
    );
}

#[test]
fn textual_fallback_defaults_to_star_without_fields() {
    assert_eq!(build_sql_query("logs", &[], None), "SELECT * FROM \"logs\"");
    assert_eq!(
        build_sql_query("logs", &[], Some("  ")),
        "SELECT * FROM \"logs\""
    );
}
