//! UI-facing data model.
//!
//! These types cross the host-UI boundary as JSON: filter trees and field
//! descriptors flow out of extraction into the visual builder, and axis/join
//! descriptors flow back in for synthesis. Field names follow the UI's
//! camelCase convention.

use serde::{Deserialize, Serialize};

use crate::config::get_config;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOperator {
    #[default]
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

/// Comparison operators the filter widgets expose. `!=` is accepted on input
/// and normalized to `<>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "<>", alias = "!=")]
    Neq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
}

impl CompareOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Neq => "<>",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
        }
    }
}

/// One predicate leaf, re-expressed as a closed set of shapes instead of the
/// grammar engine's open expression type. Extraction refuses anything that
/// does not fit one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Predicate {
    /// `column <op> literal`. The value keeps its SQL spelling, so string
    /// literals stay quoted (`'500'`) and numbers stay bare.
    Comparison {
        column: String,
        op: CompareOp,
        value: String,
    },
    /// `column IN (...)`. Values are unwrapped from their literal form.
    ListMembership {
        column: String,
        values: Vec<String>,
        negated: bool,
    },
    /// `column LIKE '%needle%'` and its negation; the needle is stored
    /// without the wrapping wildcards.
    Pattern {
        column: String,
        value: String,
        negated: bool,
    },
    /// `column IS [NOT] NULL`.
    NullCheck { column: String, negated: bool },
    /// Search-function predicates: `str_match`, `str_match_ignore_case`,
    /// `re_match`, `re_not_match`, and the field-less `match_all` family.
    FunctionMatch {
        function: String,
        column: Option<String>,
        value: String,
    },
}

impl Predicate {
    pub fn column(&self) -> Option<&str> {
        match self {
            Predicate::Comparison { column, .. }
            | Predicate::ListMembership { column, .. }
            | Predicate::Pattern { column, .. }
            | Predicate::NullCheck { column, .. } => Some(column),
            Predicate::FunctionMatch { column, .. } => column.as_deref(),
        }
    }

    /// The operator label the filter widgets render, `None` for list
    /// membership (the UI shows lists as value chips without an operator).
    pub fn operator(&self) -> Option<String> {
        match self {
            Predicate::Comparison { op, .. } => Some(op.as_sql().to_string()),
            Predicate::ListMembership { .. } => None,
            Predicate::Pattern { negated: false, .. } => Some("Contains".to_string()),
            Predicate::Pattern { negated: true, .. } => Some("Not Contains".to_string()),
            Predicate::NullCheck { negated: false, .. } => Some("Is Null".to_string()),
            Predicate::NullCheck { negated: true, .. } => Some("Is Not Null".to_string()),
            Predicate::FunctionMatch { function, .. } => Some(function.clone()),
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Predicate::Comparison { value, .. }
            | Predicate::Pattern { value, .. }
            | Predicate::FunctionMatch { value, .. } => Some(value),
            Predicate::ListMembership { .. } | Predicate::NullCheck { .. } => None,
        }
    }
}

/// A predicate plus the connective that joined it to its left-hand sibling.
/// The first condition in a group carries the default `AND`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCondition {
    pub logical_operator: LogicalOperator,
    #[serde(flatten)]
    pub predicate: Predicate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterNode {
    Group(FilterGroup),
    Condition(FilterCondition),
}

/// Nested boolean grouping mirrored from parenthesized `WHERE` subtrees.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterGroup {
    pub logical_operator: LogicalOperator,
    pub conditions: Vec<FilterNode>,
}

impl FilterGroup {
    /// The documented extraction fallback: renders as "no filter".
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// One SELECT-list entry as the field pickers see it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub column: String,
    pub alias: String,
    pub aggregation_function: Option<String>,
}

/// Everything the UI needs to rebuild its state from a SQL string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryView {
    pub fields: Vec<FieldDescriptor>,
    pub filters: FilterGroup,
    pub stream_name: Option<String>,
}

impl QueryView {
    /// Fixed safe default: a histogram/count pair over the time field and no
    /// filters, so the UI always has a renderable state.
    pub fn fallback(time_field: Option<&str>) -> Self {
        let time_field = time_field.unwrap_or(&get_config().timestamp_column);
        Self {
            fields: vec![
                FieldDescriptor {
                    column: time_field.to_string(),
                    alias: "x_axis_1".to_string(),
                    aggregation_function: Some("histogram".to_string()),
                },
                FieldDescriptor {
                    column: time_field.to_string(),
                    alias: "y_axis_1".to_string(),
                    aggregation_function: Some("count".to_string()),
                },
            ],
            filters: FilterGroup::empty(),
            stream_name: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One axis entry of the chart builder. `aggregation_function` of `None`
/// means a bare column; names outside the aggregation set render as plain
/// function calls (`histogram`, UDFs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisField {
    pub column: String,
    pub alias: String,
    pub aggregation_function: Option<String>,
    pub sort_by: Option<SortDirection>,
}

/// The x/breakdown/y field lists a panel is built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisSet {
    pub x: Vec<AxisField>,
    pub breakdown: Vec<AxisField>,
    pub y: Vec<AxisField>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinCondition {
    pub left_field: String,
    pub right_field: String,
    pub operation: CompareOp,
}

/// A join the panel editor configured. Only consumed by synthesis; extraction
/// never produces one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinSpec {
    pub stream: String,
    pub stream_alias: String,
    pub join_type: JoinType,
    pub conditions: Vec<JoinCondition>,
}

/// Operator names drill-down interactions use when injecting a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelOperator {
    #[serde(rename = "Contains")]
    Contains,
    #[serde(rename = "Not Contains")]
    NotContains,
    #[serde(rename = "Is Null")]
    IsNull,
    #[serde(rename = "Is Not Null")]
    IsNotNull,
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "<>", alias = "!=")]
    Neq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
}

/// A drill-down label triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub value: String,
    pub operator: LabelOperator,
}

/// Replacement payload for in-place filter edits. The payload type selects
/// the behavior: ranges rewrite `>=`/`<=` bounds, lists rewrite `IN` lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterUpdate {
    Range {
        min: serde_json::Number,
        max: serde_json::Number,
    },
    List(Vec<String>),
}
