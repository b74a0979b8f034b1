//! Tests for the rule group reducer.

use serde_json::Map;

use super::*;
use crate::model::{AlertingRule, GrafanaAlert, GrafanaManagedRule, RecordingRule};

fn alerting(name: &str) -> RulerRule {
    RulerRule::Alerting(AlertingRule {
        alert: name.to_string(),
        expr: format!("{name}_errors > 0"),
        for_duration: Some("5m".to_string()),
        keep_firing_for: None,
        labels: None,
        annotations: None,
        extra: Map::new(),
    })
}

fn recording(name: &str) -> RulerRule {
    RulerRule::Recording(RecordingRule {
        record: name.to_string(),
        expr: "sum(up)".to_string(),
        labels: None,
        extra: Map::new(),
    })
}

fn grafana(uid: &str, title: &str) -> RulerRule {
    RulerRule::Grafana(GrafanaManagedRule {
        grafana_alert: GrafanaAlert {
            uid: Some(uid.to_string()),
            title: title.to_string(),
            condition: "C".to_string(),
            data: vec![],
            no_data_state: None,
            exec_err_state: None,
            is_paused: None,
            extra: Map::new(),
        },
        for_duration: None,
        labels: None,
        annotations: None,
        extra: Map::new(),
    })
}

fn group(rules: Vec<RulerRule>) -> RuleGroupDefinition {
    RuleGroupDefinition::with_rules("g1", "1m", rules)
}

fn names(group: &RuleGroupDefinition) -> Vec<&str> {
    group.rules.iter().map(|r| r.name()).collect()
}

// -- add ---------------------------------------------------------------

#[test]
fn add_rule_to_blank_group() {
    let action = RuleGroupAction::AddRule {
        rule: alerting("R"),
        interval: None,
    };
    let result = reduce(RuleGroupDefinition::blank("g1"), &action).unwrap();
    assert_eq!(result, group(vec![alerting("R")]));
}

#[test]
fn add_rule_appends_and_sets_interval() {
    let action = RuleGroupAction::AddRule {
        rule: recording("C"),
        interval: Some("5m".to_string()),
    };
    let result = reduce(group(vec![alerting("A"), alerting("B")]), &action).unwrap();
    assert_eq!(names(&result), vec!["A", "B", "C"]);
    assert_eq!(result.interval.as_deref(), Some("5m"));
}

#[test]
fn add_rule_rejects_bad_interval() {
    let action = RuleGroupAction::AddRule {
        rule: alerting("R"),
        interval: Some("often".to_string()),
    };
    let err = reduce(group(vec![]), &action).unwrap_err();
    assert_eq!(err, ReduceError::InvalidInterval("often".to_string()));
}

// -- delete ------------------------------------------------------------

#[test]
fn delete_rule_at_index_zero() {
    let action = RuleGroupAction::DeleteRule {
        locator: RuleLocator::Position(0),
    };
    let result = reduce(group(vec![alerting("A"), alerting("B")]), &action).unwrap();
    assert_eq!(result, group(vec![alerting("B")]));
}

#[test]
fn delete_rule_by_uid_keeps_order() {
    let rules = vec![grafana("u1", "One"), grafana("u2", "Two"), grafana("u3", "Three")];
    let action = RuleGroupAction::DeleteRule {
        locator: RuleLocator::Uid("u2".to_string()),
    };
    let result = reduce(group(rules), &action).unwrap();
    assert_eq!(names(&result), vec!["One", "Three"]);
}

#[test]
fn delete_missing_position_fails() {
    let action = RuleGroupAction::DeleteRule {
        locator: RuleLocator::Position(3),
    };
    let err = reduce(group(vec![alerting("A")]), &action).unwrap_err();
    assert_eq!(err, ReduceError::PositionOutOfRange { position: 3, len: 1 });
}

#[test]
fn delete_unknown_uid_fails() {
    let action = RuleGroupAction::DeleteRule {
        locator: RuleLocator::Uid("nope".to_string()),
    };
    let err = reduce(group(vec![grafana("u1", "One")]), &action).unwrap_err();
    assert!(matches!(err, ReduceError::RuleNotFound { .. }));
}

// -- update ------------------------------------------------------------

#[test]
fn update_rule_replaces_in_place() {
    let action = RuleGroupAction::UpdateRule {
        locator: RuleLocator::Position(1),
        rule: recording("B2"),
    };
    let result = reduce(
        group(vec![alerting("A"), alerting("B"), alerting("C")]),
        &action,
    )
    .unwrap();
    assert_eq!(names(&result), vec!["A", "B2", "C"]);
    assert_eq!(result.rules[1].kind(), "recording");
}

// -- pause -------------------------------------------------------------

#[test]
fn pause_and_resume_grafana_rule() {
    let pause = RuleGroupAction::PauseRule {
        locator: RuleLocator::Uid("u1".to_string()),
        paused: true,
    };
    let paused = reduce(group(vec![grafana("u1", "One")]), &pause).unwrap();
    assert!(paused.rules[0].is_paused());

    let resume = RuleGroupAction::PauseRule {
        locator: RuleLocator::Position(0),
        paused: false,
    };
    let resumed = reduce(paused, &resume).unwrap();
    assert!(!resumed.rules[0].is_paused());
}

#[test]
fn pause_datasource_rule_is_unsupported() {
    let action = RuleGroupAction::PauseRule {
        locator: RuleLocator::Position(0),
        paused: true,
    };
    let err = reduce(group(vec![alerting("A")]), &action).unwrap_err();
    assert!(matches!(err, ReduceError::PauseUnsupported { .. }));
}

// -- move --------------------------------------------------------------

#[test]
fn move_rule_forward_and_back() {
    let base = group(vec![alerting("A"), alerting("B"), alerting("C")]);

    let forward = reduce(base.clone(), &RuleGroupAction::MoveRule { from: 0, to: 2 }).unwrap();
    assert_eq!(names(&forward), vec!["B", "C", "A"]);

    let back = reduce(base, &RuleGroupAction::MoveRule { from: 2, to: 0 }).unwrap();
    assert_eq!(names(&back), vec!["C", "A", "B"]);
}

#[test]
fn move_rule_out_of_range() {
    let err = reduce(
        group(vec![alerting("A")]),
        &RuleGroupAction::MoveRule { from: 0, to: 1 },
    )
    .unwrap_err();
    assert_eq!(err, ReduceError::PositionOutOfRange { position: 1, len: 1 });
}

// -- group -------------------------------------------------------------

#[test]
fn update_group_renames_and_changes_interval() {
    let action = RuleGroupAction::UpdateGroup {
        name: Some(" g2 ".to_string()),
        interval: Some("10m".to_string()),
    };
    let result = reduce(group(vec![alerting("A")]), &action).unwrap();
    assert_eq!(result.name, "g2");
    assert_eq!(result.interval.as_deref(), Some("10m"));
    assert_eq!(names(&result), vec!["A"]);
}

#[test]
fn update_group_rejects_empty_name() {
    let action = RuleGroupAction::UpdateGroup {
        name: Some("   ".to_string()),
        interval: None,
    };
    assert_eq!(
        reduce(group(vec![]), &action).unwrap_err(),
        ReduceError::EmptyGroupName
    );
}

#[test]
fn reduce_is_deterministic() {
    let base = group(vec![alerting("A"), grafana("u1", "One")]);
    let action = RuleGroupAction::PauseRule {
        locator: RuleLocator::Uid("u1".to_string()),
        paused: true,
    };
    let first = reduce(base.clone(), &action).unwrap();
    let second = reduce(base, &action).unwrap();
    assert_eq!(first, second);
}

#[test]
fn action_wire_format_is_tagged() {
    let action = RuleGroupAction::DeleteRule {
        locator: RuleLocator::Position(2),
    };
    let json = serde_json::to_value(&action).unwrap();
    assert_eq!(json["type"], "delete_rule");
    assert_eq!(json["locator"]["position"], 2);
}
