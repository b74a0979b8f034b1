//! Maps subcommands onto rule group actions and runs them.

use anyhow::{Context, Result};

use rulesmith_ruler::{
    FetchedRuleGroup, RuleGroupAction, RuleGroupIdentifier, RuleGroupReader, RuleGroupUpdater,
    RulerConfigSource, UpdateOutcome,
};

use crate::cli::{Command, OutputFormat};
use crate::output::render;
use crate::rule_file::load_rule;

/// The action an edit subcommand stands for; `None` for read-only commands.
pub fn build_action(command: &Command) -> Result<Option<RuleGroupAction>> {
    let action = match command {
        Command::Show | Command::Config => return Ok(None),
        Command::AddRule { file, interval } => RuleGroupAction::AddRule {
            rule: load_rule(file)?,
            interval: interval.clone(),
        },
        Command::UpdateRule { target, file } => RuleGroupAction::UpdateRule {
            locator: target.locator()?,
            rule: load_rule(file)?,
        },
        Command::DeleteRule { target } => RuleGroupAction::DeleteRule {
            locator: target.locator()?,
        },
        Command::PauseRule { target, resume } => RuleGroupAction::PauseRule {
            locator: target.locator()?,
            paused: !resume,
        },
        Command::MoveRule { from, to } => RuleGroupAction::MoveRule {
            from: *from,
            to: *to,
        },
        Command::SetInterval { interval } => RuleGroupAction::UpdateGroup {
            name: None,
            interval: Some(interval.clone()),
        },
        Command::Rename { new_name } => RuleGroupAction::UpdateGroup {
            name: Some(new_name.clone()),
            interval: None,
        },
    };
    Ok(Some(action))
}

/// Fetch and print the current group. A missing group is reported, not an error.
pub async fn show(
    resolver: &dyn RulerConfigSource,
    reader: &dyn RuleGroupReader,
    identifier: &RuleGroupIdentifier,
    format: OutputFormat,
) -> Result<String> {
    let config = resolver
        .ruler_config(&identifier.data_source_name)
        .await
        .context("failed to resolve ruler config")?;
    let fetched = reader
        .fetch_group(&config, &identifier.namespace_name, &identifier.group_name)
        .await
        .with_context(|| format!("failed to fetch rule group {identifier}"))?;

    match fetched {
        FetchedRuleGroup::Found(group) => render(&group, format),
        FetchedRuleGroup::Absent => Ok(format!("rule group {identifier} does not exist\n")),
    }
}

/// Apply (or with `dry_run`, preview) one action.
pub async fn edit(
    updater: &RuleGroupUpdater,
    identifier: &RuleGroupIdentifier,
    action: &RuleGroupAction,
    dry_run: bool,
    format: OutputFormat,
) -> Result<String> {
    if dry_run {
        let produced = updater.preview(identifier, action).await?;
        return render(&produced.new_definition, format);
    }

    let outcome = updater.apply(identifier, action).await?;
    Ok(match outcome {
        UpdateOutcome::Upserted(group) => render(&group, format)?,
        UpdateOutcome::Deleted => format!("rule group {identifier} deleted (no rules left)\n"),
        UpdateOutcome::Renamed { from, group } => {
            format!("renamed rule group '{from}' to '{}'\n{}", group.name, render(&group, format)?)
        }
    })
}
