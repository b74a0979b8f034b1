//! Rule group documents as exchanged with the ruler API.
//!
//! The ruler API only accepts whole-group writes, so every struct here keeps
//! fields it does not model in a flattened `extra` map. A fetched group
//! written back unchanged carries the same content.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Evaluation interval given to groups that do not exist server-side yet.
pub const DEFAULT_GROUP_EVALUATION_INTERVAL: &str = "1m";

/// Uniquely identifies a rule group: data source, namespace, group name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleGroupIdentifier {
    pub data_source_name: String,
    pub namespace_name: String,
    pub group_name: String,
}

impl RuleGroupIdentifier {
    pub fn new(
        data_source_name: impl Into<String>,
        namespace_name: impl Into<String>,
        group_name: impl Into<String>,
    ) -> Self {
        Self {
            data_source_name: data_source_name.into(),
            namespace_name: namespace_name.into(),
            group_name: group_name.into(),
        }
    }
}

impl fmt::Display for RuleGroupIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.data_source_name, self.namespace_name, self.group_name
        )
    }
}

/// The authoritative, postable document for one rule group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleGroupDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    #[serde(default)]
    pub rules: Vec<RulerRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_tenants: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RuleGroupDefinition {
    /// An empty group carrying the default evaluation interval.
    ///
    /// Used as the reducer's base document when the group does not exist yet.
    pub fn blank(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interval: Some(DEFAULT_GROUP_EVALUATION_INTERVAL.to_string()),
            rules: Vec::new(),
            source_tenants: None,
            limit: None,
            extra: Map::new(),
        }
    }

    /// Build a group with the given interval and rules and no extras.
    pub fn with_rules(
        name: impl Into<String>,
        interval: impl Into<String>,
        rules: Vec<RulerRule>,
    ) -> Self {
        Self {
            name: name.into(),
            interval: Some(interval.into()),
            rules,
            source_tenants: None,
            limit: None,
            extra: Map::new(),
        }
    }
}

/// Outcome of fetching a group: either it exists or it does not.
///
/// "Not found" is an expected answer from the ruler API, not a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchedRuleGroup {
    Found(RuleGroupDefinition),
    Absent,
}

impl FetchedRuleGroup {
    pub fn into_option(self) -> Option<RuleGroupDefinition> {
        match self {
            FetchedRuleGroup::Found(group) => Some(group),
            FetchedRuleGroup::Absent => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, FetchedRuleGroup::Found(_))
    }
}

// ── Rules ─────────────────────────────────────────────────────

/// One rule inside a group.
///
/// The wire format is untagged; the variant is decided by which identifying
/// field is present (`grafana_alert`, `alert` or `record`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RulerRule {
    Grafana(GrafanaManagedRule),
    Alerting(AlertingRule),
    Recording(RecordingRule),
}

impl RulerRule {
    /// Display name: alert title, alert name or recorded metric name.
    pub fn name(&self) -> &str {
        match self {
            RulerRule::Grafana(rule) => &rule.grafana_alert.title,
            RulerRule::Alerting(rule) => &rule.alert,
            RulerRule::Recording(rule) => &rule.record,
        }
    }

    /// The stable uid of a Grafana-managed rule, if it has been assigned one.
    pub fn grafana_uid(&self) -> Option<&str> {
        match self {
            RulerRule::Grafana(rule) => rule.grafana_alert.uid.as_deref(),
            _ => None,
        }
    }

    pub fn is_paused(&self) -> bool {
        match self {
            RulerRule::Grafana(rule) => rule.grafana_alert.is_paused.unwrap_or(false),
            _ => false,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RulerRule::Grafana(_) => "grafana",
            RulerRule::Alerting(_) => "alerting",
            RulerRule::Recording(_) => "recording",
        }
    }
}

/// Rule evaluated by Grafana itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrafanaManagedRule {
    pub grafana_alert: GrafanaAlert,
    #[serde(rename = "for", default, skip_serializing_if = "Option::is_none")]
    pub for_duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrafanaAlert {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub title: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_data_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec_err_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_paused: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Prometheus-style alerting rule evaluated by the data source's ruler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertingRule {
    pub alert: String,
    pub expr: String,
    #[serde(rename = "for", default, skip_serializing_if = "Option::is_none")]
    pub for_duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_firing_for: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Prometheus-style recording rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingRule {
    pub record: String,
    pub expr: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
