//! Errors raised when an action cannot be applied to a group.

use super::action::RuleLocator;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReduceError {
    #[error("no rule found at {locator}")]
    RuleNotFound { locator: RuleLocator },

    #[error("position {position} is out of range for a group of {len} rules")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("invalid evaluation interval: '{0}'")]
    InvalidInterval(String),

    #[error("rule group name must not be empty")]
    EmptyGroupName,

    #[error("rule at {locator} is not Grafana-managed and cannot be paused")]
    PauseUnsupported { locator: RuleLocator },
}
