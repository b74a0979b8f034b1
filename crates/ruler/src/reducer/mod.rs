//! Pure reducer applying a [`RuleGroupAction`] to a [`RuleGroupDefinition`].
//!
//! Same `(group, action)` in, same group out: no I/O, no hidden state.

mod action;
mod error;

#[cfg(test)]
mod tests;

pub use self::action::{RuleGroupAction, RuleLocator};
pub use self::error::ReduceError;

use crate::duration::is_valid_interval;
use crate::model::{RuleGroupDefinition, RulerRule};

/// Apply `action` to `group`, returning the complete new group.
pub fn reduce(
    mut group: RuleGroupDefinition,
    action: &RuleGroupAction,
) -> Result<RuleGroupDefinition, ReduceError> {
    match action {
        RuleGroupAction::AddRule { rule, interval } => {
            if let Some(interval) = interval {
                group.interval = Some(checked_interval(interval)?);
            }
            group.rules.push(rule.clone());
        }
        RuleGroupAction::UpdateRule { locator, rule } => {
            let index = locate(&group.rules, locator)?;
            group.rules[index] = rule.clone();
        }
        RuleGroupAction::DeleteRule { locator } => {
            let index = locate(&group.rules, locator)?;
            group.rules.remove(index);
        }
        RuleGroupAction::PauseRule { locator, paused } => {
            let index = locate(&group.rules, locator)?;
            match &mut group.rules[index] {
                RulerRule::Grafana(rule) => rule.grafana_alert.is_paused = Some(*paused),
                _ => {
                    return Err(ReduceError::PauseUnsupported {
                        locator: locator.clone(),
                    })
                }
            }
        }
        RuleGroupAction::MoveRule { from, to } => {
            let len = group.rules.len();
            for &position in [from, to] {
                if position >= len {
                    return Err(ReduceError::PositionOutOfRange { position, len });
                }
            }
            let rule = group.rules.remove(*from);
            group.rules.insert(*to, rule);
        }
        RuleGroupAction::UpdateGroup { name, interval } => {
            if let Some(name) = name {
                let name = name.trim();
                if name.is_empty() {
                    return Err(ReduceError::EmptyGroupName);
                }
                group.name = name.to_string();
            }
            if let Some(interval) = interval {
                group.interval = Some(checked_interval(interval)?);
            }
        }
    }
    Ok(group)
}

fn checked_interval(interval: &str) -> Result<String, ReduceError> {
    let trimmed = interval.trim();
    if is_valid_interval(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(ReduceError::InvalidInterval(interval.to_string()))
    }
}

fn locate(rules: &[RulerRule], locator: &RuleLocator) -> Result<usize, ReduceError> {
    match locator {
        RuleLocator::Position(index) if *index < rules.len() => Ok(*index),
        RuleLocator::Position(index) => Err(ReduceError::PositionOutOfRange {
            position: *index,
            len: rules.len(),
        }),
        RuleLocator::Uid(uid) => rules
            .iter()
            .position(|rule| rule.grafana_uid() == Some(uid.as_str()))
            .ok_or_else(|| ReduceError::RuleNotFound {
                locator: locator.clone(),
            }),
    }
}
