//! Build info and ruler connection settings per data source.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the built-in rules source evaluated by Grafana itself.
pub const GRAFANA_RULES_SOURCE_NAME: &str = "grafana";

/// Which flavour of ruler API a data source exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RulerApiVersion {
    /// Cortex/Loki style ruler.
    Legacy,
    /// Mimir style ruler with the config API enabled.
    Config,
}

impl RulerApiVersion {
    /// Value of the `subtype` query parameter understood by the ruler proxy.
    pub fn subtype(&self) -> &'static str {
        match self {
            RulerApiVersion::Legacy => "cortex",
            RulerApiVersion::Config => "mimir",
        }
    }
}

/// How to reach the ruler API for one data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulerConfig {
    pub data_source_name: String,
    pub data_source_uid: String,
    pub api_version: RulerApiVersion,
}

impl RulerConfig {
    /// Config for Grafana-managed rules.
    pub fn grafana() -> Self {
        Self {
            data_source_name: GRAFANA_RULES_SOURCE_NAME.to_string(),
            data_source_uid: GRAFANA_RULES_SOURCE_NAME.to_string(),
            api_version: RulerApiVersion::Config,
        }
    }

    pub fn is_grafana(&self) -> bool {
        self.data_source_name == GRAFANA_RULES_SOURCE_NAME
    }

    /// `subtype` query parameter, or `None` for Grafana-managed rules.
    pub fn subtype(&self) -> Option<&'static str> {
        if self.is_grafana() {
            None
        } else {
            Some(self.api_version.subtype())
        }
    }
}

/// What kind of backend sits behind a rules source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RulesSourceApplication {
    Grafana,
    Prometheus,
    Cortex,
    Mimir,
    Loki,
}

impl fmt::Display for RulesSourceApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulesSourceApplication::Grafana => write!(f, "grafana"),
            RulesSourceApplication::Prometheus => write!(f, "prometheus"),
            RulesSourceApplication::Cortex => write!(f, "cortex"),
            RulesSourceApplication::Mimir => write!(f, "mimir"),
            RulesSourceApplication::Loki => write!(f, "loki"),
        }
    }
}

/// Capabilities of a data source relevant to rule editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceBuildInfo {
    pub data_source_uid: String,
    pub application: RulesSourceApplication,
    pub version: Option<String>,
    /// `None` when the data source has no usable ruler API.
    pub ruler_api_version: Option<RulerApiVersion>,
}

/// Body of `GET .../api/v1/status/buildinfo`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildInfoResponse {
    #[serde(default)]
    pub data: BuildInfoData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildInfoData {
    pub application: Option<String>,
    pub version: Option<String>,
    #[serde(default)]
    pub features: HashMap<String, String>,
}

impl DataSourceBuildInfo {
    /// Build info of the built-in Grafana rules source.
    pub fn grafana() -> Self {
        Self {
            data_source_uid: GRAFANA_RULES_SOURCE_NAME.to_string(),
            application: RulesSourceApplication::Grafana,
            version: None,
            ruler_api_version: Some(RulerApiVersion::Config),
        }
    }

    /// Interpret a build info answer.
    ///
    /// `response` is `None` when the data source has no buildinfo endpoint,
    /// which identifies a Cortex-style (or Loki) backend with the legacy ruler.
    pub fn from_response(
        data_source_uid: &str,
        data_source_type: &str,
        response: Option<BuildInfoResponse>,
    ) -> Self {
        let is_loki = data_source_type.eq_ignore_ascii_case("loki");

        let Some(response) = response else {
            return Self {
                data_source_uid: data_source_uid.to_string(),
                application: if is_loki {
                    RulesSourceApplication::Loki
                } else {
                    RulesSourceApplication::Cortex
                },
                version: None,
                ruler_api_version: Some(RulerApiVersion::Legacy),
            };
        };

        let data = response.data;
        let application = match data.application.as_deref() {
            _ if is_loki => RulesSourceApplication::Loki,
            Some(app) if app.to_lowercase().contains("mimir") => RulesSourceApplication::Mimir,
            Some(_) => RulesSourceApplication::Cortex,
            None => RulesSourceApplication::Prometheus,
        };

        let config_api = data
            .features
            .get("ruler_config_api")
            .map(|v| v == "true")
            .unwrap_or(false);

        let ruler_api_version = if config_api {
            Some(RulerApiVersion::Config)
        } else if application == RulesSourceApplication::Loki {
            // Loki's buildinfo does not say whether a ruler is enabled; assume it is.
            Some(RulerApiVersion::Legacy)
        } else {
            None
        };

        Self {
            data_source_uid: data_source_uid.to_string(),
            application,
            version: data.version,
            ruler_api_version,
        }
    }

    /// Ruler config for this data source, or `None` if it has no ruler.
    pub fn ruler_config(&self, data_source_name: &str) -> Option<RulerConfig> {
        let api_version = self.ruler_api_version?;
        Some(RulerConfig {
            data_source_name: data_source_name.to_string(),
            data_source_uid: self.data_source_uid.clone(),
            api_version,
        })
    }
}
