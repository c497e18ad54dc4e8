//! Integration tests for filter extraction.
//!
//! These exercise the WHERE-subtree -> filter-group path end to end, going
//! through the same parse the UI-facing entry points use.

use sqlmirror::engine::{select_of, SqlEngine};
use sqlmirror::model::{CompareOp, FilterGroup, FilterNode, LogicalOperator, Predicate};
use sqlmirror::extract_filter_group;

fn filters_of(sql: &str) -> FilterGroup {
    let engine = SqlEngine::new();
    let statement = engine.parse_select(sql).unwrap();
    let select = select_of(&statement).unwrap();
    extract_filter_group(select.selection.as_ref())
}

fn condition(node: &FilterNode) -> (&LogicalOperator, &Predicate) {
    match node {
        FilterNode::Condition(condition) => (&condition.logical_operator, &condition.predicate),
        FilterNode::Group(_) => panic!("expected a condition, got a group"),
    }
}

#[test]
fn extracts_single_comparison() {
    let group = filters_of("SELECT * FROM logs WHERE status = '500'");
    assert_eq!(group.logical_operator, LogicalOperator::And);
    assert_eq!(group.conditions.len(), 1);
    let (_, predicate) = condition(&group.conditions[0]);
    assert_eq!(predicate.column(), Some("status"));
    assert_eq!(predicate.operator().as_deref(), Some("="));
    assert_eq!(predicate.value(), Some("'500'"));
}

#[test]
fn flattens_unparenthesized_connectives() {
    let group = filters_of("SELECT * FROM logs WHERE a = 1 AND b = 2 OR c = 3");
    assert_eq!(group.conditions.len(), 3);
    let joins: Vec<LogicalOperator> = group
        .conditions
        .iter()
        .map(|node| *condition(node).0)
        .collect();
    assert_eq!(
        joins,
        vec![
            LogicalOperator::And,
            LogicalOperator::And,
            LogicalOperator::Or
        ]
    );
}

#[test]
fn group_keeps_original_or_connective() {
    // The reference implementation tagged every parenthesized group with AND;
    // the original connective is authoritative here.
    let group = filters_of("SELECT * FROM logs WHERE status = 'a' OR (level = 'b' AND code = 'c')");
    assert_eq!(group.conditions.len(), 2);
    match &group.conditions[1] {
        FilterNode::Group(nested) => {
            assert_eq!(nested.logical_operator, LogicalOperator::Or);
            assert_eq!(nested.conditions.len(), 2);
            assert_eq!(*condition(&nested.conditions[0]).0, LogicalOperator::And);
            assert_eq!(*condition(&nested.conditions[1]).0, LogicalOperator::And);
        }
        FilterNode::Condition(_) => panic!("expected a nested group"),
    }
}

#[test]
fn root_level_parentheses_form_a_group() {
    let group = filters_of("SELECT * FROM logs WHERE (a = 1 OR b = 2)");
    assert_eq!(group.conditions.len(), 1);
    match &group.conditions[0] {
        FilterNode::Group(nested) => {
            assert_eq!(nested.conditions.len(), 2);
            assert_eq!(*condition(&nested.conditions[1]).0, LogicalOperator::Or);
        }
        FilterNode::Condition(_) => panic!("expected a group"),
    }
}

#[test]
fn unwraps_in_list_values() {
    let group = filters_of("SELECT * FROM logs WHERE name IN ('a', 'b')");
    let (_, predicate) = condition(&group.conditions[0]);
    match predicate {
        Predicate::ListMembership {
            column,
            values,
            negated,
        } => {
            assert_eq!(column, "name");
            assert_eq!(values, &vec!["a".to_string(), "b".to_string()]);
            assert!(!negated);
        }
        other => panic!("expected list membership, got {other:?}"),
    }
    assert_eq!(predicate.operator(), None);
}

#[test]
fn normalizes_null_checks() {
    let group = filters_of("SELECT * FROM logs WHERE code IS NULL AND trace IS NOT NULL");
    let (_, first) = condition(&group.conditions[0]);
    let (_, second) = condition(&group.conditions[1]);
    assert_eq!(first.operator().as_deref(), Some("Is Null"));
    assert_eq!(second.operator().as_deref(), Some("Is Not Null"));
}

#[test]
fn like_surfaces_as_contains_without_wildcards() {
    let group =
        filters_of("SELECT * FROM logs WHERE msg LIKE '%oops%' AND path NOT LIKE '%health%'");
    let (_, first) = condition(&group.conditions[0]);
    assert_eq!(first.operator().as_deref(), Some("Contains"));
    assert_eq!(first.value(), Some("oops"));
    let (_, second) = condition(&group.conditions[1]);
    assert_eq!(second.operator().as_deref(), Some("Not Contains"));
    assert_eq!(second.value(), Some("health"));
}

#[test]
fn extracts_search_function_predicates() {
    let group =
        filters_of("SELECT * FROM logs WHERE str_match(level, 'err') AND match_all('boom')");
    let (_, first) = condition(&group.conditions[0]);
    match first {
        Predicate::FunctionMatch {
            function,
            column,
            value,
        } => {
            assert_eq!(function, "str_match");
            assert_eq!(column.as_deref(), Some("level"));
            assert_eq!(value, "err");
        }
        other => panic!("expected function match, got {other:?}"),
    }
    let (_, second) = condition(&group.conditions[1]);
    match second {
        Predicate::FunctionMatch { column, value, .. } => {
            assert_eq!(column.as_deref(), None);
            assert_eq!(value, "boom");
        }
        other => panic!("expected function match, got {other:?}"),
    }
}

#[test]
fn reversed_equality_normalizes_column_to_the_left() {
    let group = filters_of("SELECT * FROM logs WHERE '500' = status");
    let (_, predicate) = condition(&group.conditions[0]);
    assert_eq!(predicate.column(), Some("status"));
    assert_eq!(predicate.operator().as_deref(), Some("="));
    assert_eq!(predicate.value(), Some("'500'"));
}

#[test]
fn reversed_ordering_comparison_is_not_representable() {
    // Swapping sides would flip the operator; bail to the empty group.
    let group = filters_of("SELECT * FROM logs WHERE 5 > duration");
    assert!(group.is_empty());
}

#[test]
fn bang_equals_normalizes_to_angle_brackets() {
    let group = filters_of("SELECT * FROM logs WHERE a != 'x'");
    let (_, predicate) = condition(&group.conditions[0]);
    assert_eq!(predicate.operator().as_deref(), Some("<>"));
    match predicate {
        Predicate::Comparison { op, .. } => assert_eq!(*op, CompareOp::Neq),
        other => panic!("expected comparison, got {other:?}"),
    }
}

#[test]
fn unrecognized_shape_yields_empty_group() {
    let group = filters_of("SELECT * FROM logs WHERE a + 1 = 2");
    assert!(group.is_empty());
    assert_eq!(group.logical_operator, LogicalOperator::And);
}

#[test]
fn missing_where_yields_empty_group() {
    let group = filters_of("SELECT * FROM logs");
    assert!(group.is_empty());
}
