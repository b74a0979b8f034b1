//! Resolves a data source name to its [`RulerConfig`], populating the
//! shared [`BuildInfoCache`] on first use.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::client::{BuildInfoSource, RulerApiError};

use super::cache::BuildInfoCache;
use super::types::{DataSourceBuildInfo, RulerConfig, RulesSourceApplication, GRAFANA_RULES_SOURCE_NAME};

/// Errors resolving a ruler config.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("failed to look up data source '{data_source}': {source}")]
    Lookup {
        data_source: String,
        #[source]
        source: RulerApiError,
    },

    #[error("data source '{data_source}' ({application}) does not expose a ruler API")]
    RulerUnsupported {
        data_source: String,
        application: RulesSourceApplication,
    },
}

/// Anything that can turn a data source name into a [`RulerConfig`].
#[async_trait]
pub trait RulerConfigSource: Send + Sync {
    async fn ruler_config(&self, data_source_name: &str) -> Result<RulerConfig, ResolveError>;
}

/// Build-info backed resolver.
///
/// Fetches build info once per data source and keeps it in the injected
/// cache. Concurrent first resolves of the same data source may both fetch;
/// the last insert wins, and both results are equivalent.
pub struct BuildInfoResolver {
    source: Arc<dyn BuildInfoSource>,
    cache: Arc<BuildInfoCache>,
}

impl BuildInfoResolver {
    pub fn new(source: Arc<dyn BuildInfoSource>, cache: Arc<BuildInfoCache>) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &Arc<BuildInfoCache> {
        &self.cache
    }

    /// Cached build info, fetching and caching it on a miss.
    pub async fn build_info(&self, data_source_name: &str) -> Result<DataSourceBuildInfo, ResolveError> {
        if data_source_name == GRAFANA_RULES_SOURCE_NAME {
            return Ok(DataSourceBuildInfo::grafana());
        }

        if let Some(info) = self.cache.get(data_source_name) {
            debug!(data_source = %data_source_name, "build info cache hit");
            return Ok(info);
        }

        let info = self
            .source
            .fetch_build_info(data_source_name)
            .await
            .map_err(|source| ResolveError::Lookup {
                data_source: data_source_name.to_string(),
                source,
            })?;

        info!(
            data_source = %data_source_name,
            application = %info.application,
            ruler = ?info.ruler_api_version,
            "fetched data source build info"
        );
        self.cache.insert(data_source_name, info.clone());
        Ok(info)
    }
}

#[async_trait]
impl RulerConfigSource for BuildInfoResolver {
    async fn ruler_config(&self, data_source_name: &str) -> Result<RulerConfig, ResolveError> {
        let info = self.build_info(data_source_name).await?;
        info.ruler_config(data_source_name)
            .ok_or_else(|| ResolveError::RulerUnsupported {
                data_source: data_source_name.to_string(),
                application: info.application,
            })
    }
}
