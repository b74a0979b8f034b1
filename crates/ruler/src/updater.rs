//! Produce a new rule group and persist it.

use std::sync::Arc;

use tracing::{info, warn};

use crate::build_info::RulerConfig;
use crate::client::{RuleGroupWriter, RulerApiError};
use crate::model::{RuleGroupDefinition, RuleGroupIdentifier};
use crate::producer::{ProduceError, ProducedRuleGroup, RuleGroupProducer};
use crate::reducer::RuleGroupAction;

#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error(transparent)]
    Produce(#[from] ProduceError),

    #[error("failed to persist rule group '{group}': {source}")]
    Persist {
        group: RuleGroupIdentifier,
        #[source]
        source: RulerApiError,
    },

    #[error("rule group '{group}' already exists in namespace '{namespace}'")]
    GroupAlreadyExists { namespace: String, group: String },

    #[error("cannot rename rule group '{group}': it does not exist or has no rules")]
    NothingToRename { group: RuleGroupIdentifier },
}

/// What was written to the ruler.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The group was created or overwritten.
    Upserted(RuleGroupDefinition),
    /// The last rule was deleted, so the group itself was removed.
    Deleted,
    /// The group was written under a new name and the old name removed.
    Renamed {
        from: String,
        group: RuleGroupDefinition,
    },
}

/// Runs the producer and writes its result back.
pub struct RuleGroupUpdater {
    producer: RuleGroupProducer,
    writer: Arc<dyn RuleGroupWriter>,
}

impl RuleGroupUpdater {
    pub fn new(producer: RuleGroupProducer, writer: Arc<dyn RuleGroupWriter>) -> Self {
        Self { producer, writer }
    }

    /// Produce the new group without writing it.
    pub async fn preview(
        &self,
        identifier: &RuleGroupIdentifier,
        action: &RuleGroupAction,
    ) -> Result<ProducedRuleGroup, UpdateError> {
        Ok(self.producer.produce(identifier, action).await?)
    }

    /// Apply `action` and persist the result.
    ///
    /// Deleting the last rule removes the group. A rename writes the new
    /// group first and only then deletes the old one, so a failure in
    /// between leaves a duplicate rather than losing rules. A rename onto a
    /// name already taken in the namespace, or of a group with no rules,
    /// writes nothing.
    pub async fn apply(
        &self,
        identifier: &RuleGroupIdentifier,
        action: &RuleGroupAction,
    ) -> Result<UpdateOutcome, UpdateError> {
        let ProducedRuleGroup {
            new_definition,
            ruler_config,
        } = self.producer.produce(identifier, action).await?;

        let namespace = identifier.namespace_name.as_str();
        let persist_err = |source| UpdateError::Persist {
            group: identifier.clone(),
            source,
        };

        if matches!(action, RuleGroupAction::DeleteRule { .. }) && new_definition.rules.is_empty() {
            self.writer
                .delete_group(&ruler_config, namespace, &identifier.group_name)
                .await
                .map_err(persist_err)?;
            info!(group = %identifier, "deleted last rule, removed rule group");
            return Ok(UpdateOutcome::Deleted);
        }

        let renamed = new_definition.name != identifier.group_name;
        if renamed {
            self.check_rename_target(identifier, &ruler_config, &new_definition)
                .await?;
        }

        self.writer
            .upsert_group(&ruler_config, namespace, &new_definition)
            .await
            .map_err(persist_err)?;

        if renamed {
            self.writer
                .delete_group(&ruler_config, namespace, &identifier.group_name)
                .await
                .map_err(persist_err)?;
            info!(
                group = %identifier,
                new_name = %new_definition.name,
                "renamed rule group"
            );
            return Ok(UpdateOutcome::Renamed {
                from: identifier.group_name.clone(),
                group: new_definition,
            });
        }

        info!(
            group = %identifier,
            action = action.label(),
            rules = new_definition.rules.len(),
            "rule group updated"
        );
        Ok(UpdateOutcome::Upserted(new_definition))
    }

    /// A rename must move existing rules onto a free name.
    async fn check_rename_target(
        &self,
        identifier: &RuleGroupIdentifier,
        ruler_config: &RulerConfig,
        new_definition: &RuleGroupDefinition,
    ) -> Result<(), UpdateError> {
        if new_definition.rules.is_empty() {
            return Err(UpdateError::NothingToRename {
                group: identifier.clone(),
            });
        }

        let target = RuleGroupIdentifier::new(
            identifier.data_source_name.clone(),
            identifier.namespace_name.clone(),
            new_definition.name.clone(),
        );
        let existing = self
            .producer
            .reader()
            .fetch_group(ruler_config, &target.namespace_name, &target.group_name)
            .await
            .map_err(|source| ProduceError::Transport {
                group: target.clone(),
                source,
            })?;

        if existing.is_found() {
            warn!(group = %identifier, target = %target, "rename target already exists");
            return Err(UpdateError::GroupAlreadyExists {
                namespace: target.namespace_name,
                group: target.group_name,
            });
        }
        Ok(())
    }
}
