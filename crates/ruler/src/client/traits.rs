//! Trait seams between the producer and the ruler backend.
//!
//! The producer and resolver only see these traits; [`HttpRulerClient`]
//! implements all of them, and tests inject counting mocks.
//!
//! [`HttpRulerClient`]: super::HttpRulerClient

use async_trait::async_trait;

use crate::build_info::{DataSourceBuildInfo, RulerConfig};
use crate::model::{FetchedRuleGroup, RuleGroupDefinition};

use super::error::RulerApiError;

/// Reads the current server-side definition of a rule group.
#[async_trait]
pub trait RuleGroupReader: Send + Sync {
    /// Fetch one group. A missing group yields [`FetchedRuleGroup::Absent`].
    async fn fetch_group(
        &self,
        config: &RulerConfig,
        namespace: &str,
        group: &str,
    ) -> Result<FetchedRuleGroup, RulerApiError>;
}

/// Persists rule groups. Writes always replace the whole group.
#[async_trait]
pub trait RuleGroupWriter: Send + Sync {
    async fn upsert_group(
        &self,
        config: &RulerConfig,
        namespace: &str,
        group: &RuleGroupDefinition,
    ) -> Result<(), RulerApiError>;

    async fn delete_group(
        &self,
        config: &RulerConfig,
        namespace: &str,
        group: &str,
    ) -> Result<(), RulerApiError>;
}

/// Looks up what a data source is and whether it exposes a ruler API.
#[async_trait]
pub trait BuildInfoSource: Send + Sync {
    async fn fetch_build_info(
        &self,
        data_source_name: &str,
    ) -> Result<DataSourceBuildInfo, RulerApiError>;
}
