mod cli;
mod commands;
mod output;
mod rule_file;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use rulesmith_core::config::load_dotenv;
use rulesmith_ruler::{
    BuildInfoCache, BuildInfoResolver, HttpRulerClient, RuleGroupProducer, RuleGroupUpdater,
};

use crate::cli::{CliArgs, Command};
use crate::commands::{build_action, edit, show};
use crate::output::render;

#[tokio::main]
async fn main() -> Result<()> {
    // Before anything reads the environment, so .env values apply to
    // RUST_LOG and to env-backed flags.
    load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let config = args.config();
    config.validate().context("invalid configuration")?;
    config.log_summary();

    if let Command::Config = args.command {
        print!("{}", render(&config.redacted_summary(), args.output)?);
        return Ok(());
    }

    let identifier = args.identifier()?;
    let action = build_action(&args.command)?;

    let client = Arc::new(
        HttpRulerClient::new(&config.grafana).context("failed to create ruler client")?,
    );
    let cache = Arc::new(BuildInfoCache::new());
    let resolver = Arc::new(BuildInfoResolver::new(client.clone(), cache));

    let text = match action {
        None => show(resolver.as_ref(), client.as_ref(), &identifier, args.output).await?,
        Some(action) => {
            debug!(group = %identifier, action = action.label(), dry_run = args.dry_run, "editing rule group");
            let producer = RuleGroupProducer::new(resolver.clone(), client.clone());
            let updater = RuleGroupUpdater::new(producer, client.clone());
            edit(&updater, &identifier, &action, args.dry_run, args.output).await?
        }
    };

    print!("{text}");
    Ok(())
}
