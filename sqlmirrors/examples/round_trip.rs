use sqlmirror::model::{AxisField, AxisSet, LabelOperator, SortDirection};
use sqlmirror::{
    add_label_to_sql_query, change_histogram_interval, get_fields_from_query, synthesize_query,
};

fn axis(column: &str, alias: &str, aggregation: Option<&str>) -> AxisField {
    AxisField {
        column: column.to_string(),
        alias: alias.to_string(),
        aggregation_function: aggregation.map(str::to_string),
        sort_by: None,
    }
}

fn main() -> Result<(), sqlmirror::SqlMirrorError> {
    tracing_subscriber::fmt::init();

    let mut fields = AxisSet {
        x: vec![axis("_timestamp", "x_axis_1", Some("histogram"))],
        breakdown: vec![axis("service", "breakdown_1", None)],
        y: vec![axis("_timestamp", "y_axis_1", Some("count"))],
    };
    fields.x[0].sort_by = Some(SortDirection::Asc);

    let sql = synthesize_query("logs", &fields, &[])?;
    println!("synthesized: {sql}");

    let sql = change_histogram_interval(&sql, Some("5 minute"))?;
    println!("with interval: {sql}");

    let sql = add_label_to_sql_query(&sql, "status", "500", LabelOperator::Eq)?;
    println!("with label: {sql}");

    let view = get_fields_from_query(&sql, None);
    println!("extracted: {}", serde_json::to_string_pretty(&view).unwrap());
    Ok(())
}
