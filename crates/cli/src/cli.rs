use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use rulesmith_core::Config;
use rulesmith_ruler::{RuleGroupIdentifier, RuleLocator, GRAFANA_RULES_SOURCE_NAME};

/// Inspect and edit alert rule groups through the Grafana ruler API.
///
/// Every edit fetches the latest version of the group, applies the change,
/// and writes the whole group back.
#[derive(Parser, Debug)]
#[command(name = "rulesmith", version, about = "Inspect and edit alert rule groups")]
pub struct CliArgs {
    /// Config profile (keys are read as {PROFILE}_{KEY} first)
    #[arg(long, env = "RULESMITH_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Grafana base URL (overrides GRAFANA_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Service account token (overrides GRAFANA_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Request timeout in seconds (overrides RULER_TIMEOUT_SECS)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Rules source name; "grafana" for Grafana-managed rules
    #[arg(long, short = 'd', global = true, default_value = GRAFANA_RULES_SOURCE_NAME)]
    pub datasource: String,

    /// Namespace (folder uid for Grafana-managed rules)
    #[arg(long, short = 'n', global = true)]
    pub namespace: Option<String>,

    /// Rule group name
    #[arg(long, short = 'g', global = true)]
    pub group: Option<String>,

    /// Print the resulting group instead of writing it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the current definition of the group
    Show,
    /// Append a rule read from a YAML or JSON file
    AddRule {
        #[arg(long)]
        file: PathBuf,
        /// Also set the group evaluation interval
        #[arg(long)]
        interval: Option<String>,
    },
    /// Replace a rule with one read from a file
    UpdateRule {
        #[command(flatten)]
        target: RuleTarget,
        #[arg(long)]
        file: PathBuf,
    },
    /// Remove a rule; removing the last one deletes the group
    DeleteRule {
        #[command(flatten)]
        target: RuleTarget,
    },
    /// Pause (or with --resume, resume) a Grafana-managed rule
    PauseRule {
        #[command(flatten)]
        target: RuleTarget,
        #[arg(long)]
        resume: bool,
    },
    /// Move a rule to another position
    MoveRule {
        #[arg(long)]
        from: usize,
        #[arg(long)]
        to: usize,
    },
    /// Change the group evaluation interval
    SetInterval { interval: String },
    /// Rename the group
    Rename { new_name: String },
    /// Print the effective configuration (secrets redacted)
    Config,
}

/// Selects one rule, by position or by Grafana rule uid.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct RuleTarget {
    /// Zero-based position in the group
    #[arg(long)]
    pub index: Option<usize>,
    /// Grafana rule uid
    #[arg(long)]
    pub uid: Option<String>,
}

impl RuleTarget {
    pub fn locator(&self) -> Result<RuleLocator> {
        match (self.index, &self.uid) {
            (Some(index), _) => Ok(RuleLocator::Position(index)),
            (None, Some(uid)) => Ok(RuleLocator::Uid(uid.clone())),
            (None, None) => bail!("either --index or --uid is required"),
        }
    }
}

impl CliArgs {
    /// Environment config with command-line overrides applied.
    pub fn config(&self) -> Config {
        let mut config = match &self.profile {
            Some(profile) => Config::for_profile(profile),
            None => Config::from_env(),
        };
        if let Some(url) = &self.url {
            config.grafana.url = url.clone();
        }
        if let Some(token) = &self.token {
            config.grafana.token = Some(token.clone());
        }
        if let Some(timeout) = self.timeout {
            config.grafana.timeout_secs = timeout;
        }
        config
    }

    pub fn identifier(&self) -> Result<RuleGroupIdentifier> {
        let (Some(namespace), Some(group)) = (&self.namespace, &self.group) else {
            bail!("--namespace and --group are required for this command");
        };
        Ok(RuleGroupIdentifier::new(
            self.datasource.clone(),
            namespace.clone(),
            group.clone(),
        ))
    }
}
