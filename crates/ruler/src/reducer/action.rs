//! Tagged actions describing a single change to a rule group.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::RulerRule;

/// Points at one rule inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleLocator {
    /// Zero-based position in the group's rule list.
    Position(usize),
    /// `grafana_alert.uid` of a Grafana-managed rule.
    Uid(String),
}

impl fmt::Display for RuleLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleLocator::Position(index) => write!(f, "position {}", index),
            RuleLocator::Uid(uid) => write!(f, "uid '{}'", uid),
        }
    }
}

/// One intended change to a rule group.
///
/// Applied by [`reduce`](super::reduce); every variant is handled there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleGroupAction {
    /// Append a rule. When `interval` is set the group interval changes too.
    AddRule {
        rule: RulerRule,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        interval: Option<String>,
    },
    /// Replace a rule in place, keeping its position.
    UpdateRule { locator: RuleLocator, rule: RulerRule },
    /// Remove a rule; the remaining rules keep their relative order.
    DeleteRule { locator: RuleLocator },
    /// Pause or resume evaluation of a Grafana-managed rule.
    PauseRule { locator: RuleLocator, paused: bool },
    /// Move the rule at `from` so that it ends up at `to`.
    MoveRule { from: usize, to: usize },
    /// Rename the group and/or change its evaluation interval.
    UpdateGroup {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        interval: Option<String>,
    },
}

impl RuleGroupAction {
    /// Short action name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            RuleGroupAction::AddRule { .. } => "add_rule",
            RuleGroupAction::UpdateRule { .. } => "update_rule",
            RuleGroupAction::DeleteRule { .. } => "delete_rule",
            RuleGroupAction::PauseRule { .. } => "pause_rule",
            RuleGroupAction::MoveRule { .. } => "move_rule",
            RuleGroupAction::UpdateGroup { .. } => "update_group",
        }
    }
}
