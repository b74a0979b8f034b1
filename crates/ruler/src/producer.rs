//! Fetch the latest rule group, apply an action, return the new group.
//!
//! ```text
//! ┌─────────────────────────┐  ┌───────────────┐  ┌──────────────────┐
//! │ fetch latest rule group │─▶│ apply reducer │─▶│  new rule group  │
//! └─────────────────────────┘  └───────────────┘  └──────────────────┘
//! ```
//!
//! The ruler API has no per-rule operations and always overwrites the whole
//! group, so every change is rebased onto the freshest server state right
//! before it is applied. This narrows, but does not close, the window in
//! which two concurrent editors overwrite each other: two producers can
//! still read the same state and the later write wins. No locking or
//! version tokens are added here.
//!
//! The producer never persists. Callers (see [`RuleGroupUpdater`]) write
//! `new_definition` back using the returned `ruler_config`.
//!
//! [`RuleGroupUpdater`]: crate::updater::RuleGroupUpdater

use std::sync::Arc;

use tracing::debug;

use crate::build_info::{ResolveError, RulerConfig, RulerConfigSource};
use crate::client::{RuleGroupReader, RulerApiError};
use crate::model::{FetchedRuleGroup, RuleGroupDefinition, RuleGroupIdentifier};
use crate::reducer::{reduce, ReduceError, RuleGroupAction};

/// Errors from a single produce cycle. A missing group is not one of them.
#[derive(Debug, thiserror::Error)]
pub enum ProduceError {
    #[error("failed to resolve ruler config: {0}")]
    Resolution(#[from] ResolveError),

    #[error("failed to fetch rule group '{group}': {source}")]
    Transport {
        group: RuleGroupIdentifier,
        #[source]
        source: RulerApiError,
    },

    #[error("cannot apply action to rule group '{group}': {source}")]
    Reduction {
        group: RuleGroupIdentifier,
        #[source]
        source: ReduceError,
    },
}

/// The new group plus the config needed to persist it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProducedRuleGroup {
    pub new_definition: RuleGroupDefinition,
    pub ruler_config: RulerConfig,
}

/// Read-and-transform half of a rule group edit.
#[derive(Clone)]
pub struct RuleGroupProducer {
    resolver: Arc<dyn RulerConfigSource>,
    reader: Arc<dyn RuleGroupReader>,
}

impl RuleGroupProducer {
    pub fn new(resolver: Arc<dyn RulerConfigSource>, reader: Arc<dyn RuleGroupReader>) -> Self {
        Self { resolver, reader }
    }

    pub(crate) fn reader(&self) -> &dyn RuleGroupReader {
        self.reader.as_ref()
    }

    /// Resolve config, fetch the latest group, and apply `action` to it.
    ///
    /// Fetches on every call. When the group does not exist the action is
    /// applied to [`RuleGroupDefinition::blank`]. Dropping the returned
    /// future abandons any in-flight request.
    pub async fn produce(
        &self,
        identifier: &RuleGroupIdentifier,
        action: &RuleGroupAction,
    ) -> Result<ProducedRuleGroup, ProduceError> {
        let ruler_config = self
            .resolver
            .ruler_config(&identifier.data_source_name)
            .await?;

        let base = self.fetch_base(identifier, &ruler_config).await?;

        let new_definition = reduce(base, action).map_err(|source| ProduceError::Reduction {
            group: identifier.clone(),
            source,
        })?;

        debug!(
            group = %identifier,
            action = action.label(),
            rules = new_definition.rules.len(),
            "produced new rule group"
        );

        Ok(ProducedRuleGroup {
            new_definition,
            ruler_config,
        })
    }

    /// Latest server-side definition, or a blank group if there is none.
    async fn fetch_base(
        &self,
        identifier: &RuleGroupIdentifier,
        ruler_config: &RulerConfig,
    ) -> Result<RuleGroupDefinition, ProduceError> {
        let fetched = self
            .reader
            .fetch_group(
                ruler_config,
                &identifier.namespace_name,
                &identifier.group_name,
            )
            .await
            .map_err(|source| ProduceError::Transport {
                group: identifier.clone(),
                source,
            })?;

        Ok(match fetched {
            FetchedRuleGroup::Found(definition) => {
                debug!(group = %identifier, rules = definition.rules.len(), "fetched latest rule group");
                definition
            }
            FetchedRuleGroup::Absent => {
                debug!(group = %identifier, "rule group does not exist yet, starting from blank");
                RuleGroupDefinition::blank(&identifier.group_name)
            }
        })
    }
}
