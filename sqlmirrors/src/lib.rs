pub mod config;
pub mod engine;
pub mod error;
pub mod expr_utils;
pub mod fields;
pub mod filters;
pub mod histogram;
pub mod labels;
pub mod model;
pub mod mutate;
pub mod sql_ast;
pub mod synthesis;

pub use engine::SqlEngine;
pub use error::SqlMirrorError;
pub use fields::{extract_fields, get_fields_from_query, stream_name};
pub use filters::extract_filter_group;
pub use histogram::{
    change_histogram_interval, generate_histogram_interval, histogram_interval_to_seconds,
};
pub use labels::{add_label_to_sql_query, add_labels_to_sql_query};
pub use model::{
    AxisField, AxisSet, FieldDescriptor, FilterCondition, FilterGroup, FilterNode, FilterUpdate,
    JoinCondition, JoinSpec, Label, LabelOperator, Predicate, QueryView,
};
pub use mutate::{remove_filter_from_sql, update_filter_values};
pub use synthesis::{build_sql_query, synthesize_query};
