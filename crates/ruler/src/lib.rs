//! Rule group editing against a Grafana-style ruler API.
//!
//! This crate provides:
//! - Rule group data model with lossless round-tripping of unknown fields
//! - Tagged rule group actions and a pure reducer applying them
//! - Ruler HTTP client (fetch / upsert / delete, build info lookup)
//! - Build-info resolver with an injected, shared per-data-source cache
//! - `RuleGroupProducer`: fetch latest group, apply action, return new group
//! - `RuleGroupUpdater`: produce, then persist via whole-group overwrite

pub mod build_info;
pub mod client;
pub mod duration;
pub mod model;
pub mod producer;
pub mod reducer;
pub mod updater;

pub use build_info::{
    BuildInfoCache, BuildInfoResolver, DataSourceBuildInfo, ResolveError, RulerApiVersion,
    RulerConfig, RulerConfigSource, GRAFANA_RULES_SOURCE_NAME,
};
pub use client::{BuildInfoSource, HttpRulerClient, RuleGroupReader, RuleGroupWriter, RulerApiError};
pub use model::{
    FetchedRuleGroup, RuleGroupDefinition, RuleGroupIdentifier, RulerRule,
    DEFAULT_GROUP_EVALUATION_INTERVAL,
};
pub use producer::{ProduceError, ProducedRuleGroup, RuleGroupProducer};
pub use reducer::{reduce, ReduceError, RuleGroupAction, RuleLocator};
pub use updater::{RuleGroupUpdater, UpdateError, UpdateOutcome};
