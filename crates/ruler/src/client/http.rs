//! reqwest-backed client for Grafana's ruler proxy and data source API.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use rulesmith_core::config::GrafanaConfig;

use crate::build_info::{
    BuildInfoResponse, DataSourceBuildInfo, RulerConfig, GRAFANA_RULES_SOURCE_NAME,
};
use crate::model::{FetchedRuleGroup, RuleGroupDefinition};

use super::error::RulerApiError;
use super::traits::{BuildInfoSource, RuleGroupReader, RuleGroupWriter};

/// Data source record returned by `GET /api/datasources/name/{name}`.
#[derive(Debug, Clone, Deserialize)]
struct DataSourceRecord {
    uid: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Client for a single Grafana instance.
///
/// One shared `reqwest::Client` (connection pooling) with the configured
/// timeout. Every request carries the bearer token and org header.
#[derive(Debug, Clone)]
pub struct HttpRulerClient {
    base_url: Url,
    token: Option<String>,
    org_id: u64,
    http: reqwest::Client,
}

impl HttpRulerClient {
    pub fn new(config: &GrafanaConfig) -> Result<Self, RulerApiError> {
        let base_url = Url::parse(&config.url)
            .map_err(|e| RulerApiError::InvalidUrl(format!("{}: {e}", config.url)))?;
        if base_url.cannot_be_a_base() {
            return Err(RulerApiError::InvalidUrl(config.url.clone()));
        }
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            base_url,
            token: config.token.clone(),
            org_id: config.org_id,
            http,
        })
    }

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, RulerApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RulerApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `/api/ruler/{uid}/api/v1/rules/{namespace}[/{group}][?subtype=…]`
    pub(crate) fn rules_url(
        &self,
        config: &RulerConfig,
        namespace: &str,
        group: Option<&str>,
    ) -> Result<Url, RulerApiError> {
        let mut segments = vec![
            "api",
            "ruler",
            config.data_source_uid.as_str(),
            "api",
            "v1",
            "rules",
            namespace,
        ];
        if let Some(group) = group {
            segments.push(group);
        }
        let mut url = self.endpoint(&segments)?;
        if let Some(subtype) = config.subtype() {
            url.query_pairs_mut().append_pair("subtype", subtype);
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let mut request = self
            .http
            .request(method, url)
            .header("X-Grafana-Org-Id", self.org_id.to_string());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn data_source(&self, name: &str) -> Result<DataSourceRecord, RulerApiError> {
        let url = self.endpoint(&["api", "datasources", "name", name])?;
        let response = self.request(Method::GET, url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(status_error(&url, response).await);
        }
        decode(response).await
    }
}

/// Turn a non-2xx response into [`RulerApiError::Status`], logging it.
async fn status_error(url: &Url, response: Response) -> RulerApiError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());
    warn!(url = %url, %status, body = %body, "ruler API returned non-2xx status");
    RulerApiError::Status {
        status: status.as_u16(),
        body,
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, RulerApiError> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| RulerApiError::Decode(e.to_string()))
}

#[async_trait]
impl RuleGroupReader for HttpRulerClient {
    async fn fetch_group(
        &self,
        config: &RulerConfig,
        namespace: &str,
        group: &str,
    ) -> Result<FetchedRuleGroup, RulerApiError> {
        let url = self.rules_url(config, namespace, Some(group))?;
        let response = self.request(Method::GET, url.clone()).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!(url = %url, "rule group not found");
                Ok(FetchedRuleGroup::Absent)
            }
            status if status.is_success() => {
                let definition: RuleGroupDefinition = decode(response).await?;
                Ok(FetchedRuleGroup::Found(definition))
            }
            _ => Err(status_error(&url, response).await),
        }
    }
}

#[async_trait]
impl RuleGroupWriter for HttpRulerClient {
    async fn upsert_group(
        &self,
        config: &RulerConfig,
        namespace: &str,
        group: &RuleGroupDefinition,
    ) -> Result<(), RulerApiError> {
        let url = self.rules_url(config, namespace, None)?;
        let response = self
            .request(Method::POST, url.clone())
            .json(group)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(status_error(&url, response).await);
        }
        debug!(url = %url, group = %group.name, rules = group.rules.len(), "rule group written");
        Ok(())
    }

    async fn delete_group(
        &self,
        config: &RulerConfig,
        namespace: &str,
        group: &str,
    ) -> Result<(), RulerApiError> {
        let url = self.rules_url(config, namespace, Some(group))?;
        let response = self.request(Method::DELETE, url.clone()).send().await?;
        match response.status() {
            // Already gone.
            StatusCode::NOT_FOUND => Ok(()),
            status if status.is_success() => Ok(()),
            _ => Err(status_error(&url, response).await),
        }
    }
}

#[async_trait]
impl BuildInfoSource for HttpRulerClient {
    async fn fetch_build_info(
        &self,
        data_source_name: &str,
    ) -> Result<DataSourceBuildInfo, RulerApiError> {
        if data_source_name == GRAFANA_RULES_SOURCE_NAME {
            return Ok(DataSourceBuildInfo::grafana());
        }

        let record = self.data_source(data_source_name).await?;
        let url = self.endpoint(&[
            "api",
            "datasources",
            "uid",
            record.uid.as_str(),
            "resources",
            "api",
            "v1",
            "status",
            "buildinfo",
        ])?;
        let response = self.request(Method::GET, url.clone()).send().await?;

        let body = match response.status() {
            StatusCode::NOT_FOUND => None,
            status if status.is_success() => Some(decode::<BuildInfoResponse>(response).await?),
            _ => return Err(status_error(&url, response).await),
        };

        Ok(DataSourceBuildInfo::from_response(&record.uid, &record.kind, body))
    }
}
