//! Counting in-memory ruler backend shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Map;

use rulesmith_ruler::build_info::{ResolveError, RulerConfig, RulerConfigSource};
use rulesmith_ruler::client::{RuleGroupReader, RuleGroupWriter, RulerApiError};
use rulesmith_ruler::model::{AlertingRule, FetchedRuleGroup, RuleGroupDefinition, RulerRule};
use rulesmith_ruler::{RuleGroupProducer, RuleGroupUpdater};

pub fn alerting(name: &str) -> RulerRule {
    RulerRule::Alerting(AlertingRule {
        alert: name.to_string(),
        expr: format!("{name} > 0"),
        for_duration: None,
        keep_firing_for: None,
        labels: None,
        annotations: None,
        extra: Map::new(),
    })
}

pub fn ruler_config(name: &str) -> RulerConfig {
    RulerConfig {
        data_source_name: name.to_string(),
        data_source_uid: format!("{name}-uid"),
        api_version: rulesmith_ruler::RulerApiVersion::Config,
    }
}

// ── Resolver ────────────────────────────────────────────────────────

pub struct MockResolver {
    pub calls: AtomicUsize,
    pub unsupported: bool,
}

impl MockResolver {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            unsupported: false,
        }
    }

    pub fn unsupported() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            unsupported: true,
        }
    }
}

#[async_trait]
impl RulerConfigSource for MockResolver {
    async fn ruler_config(&self, data_source_name: &str) -> Result<RulerConfig, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unsupported {
            return Err(ResolveError::RulerUnsupported {
                data_source: data_source_name.to_string(),
                application: rulesmith_ruler::build_info::RulesSourceApplication::Prometheus,
            });
        }
        Ok(ruler_config(data_source_name))
    }
}

// ── Ruler backend ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    Upsert { namespace: String, group: String },
    Delete { namespace: String, group: String },
}

#[derive(Default)]
pub struct MockRuler {
    pub fetch_calls: AtomicUsize,
    pub groups: Mutex<HashMap<(String, String), RuleGroupDefinition>>,
    pub writes: Mutex<Vec<WriteOp>>,
    /// Status code every fetch fails with, if set.
    pub fetch_failure: Option<u16>,
    /// Status code every write fails with, if set.
    pub write_failure: Option<u16>,
    /// Fetches never complete.
    pub hang: bool,
}

impl MockRuler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(self, namespace: &str, group: RuleGroupDefinition) -> Self {
        self.groups
            .lock()
            .unwrap()
            .insert((namespace.to_string(), group.name.clone()), group);
        self
    }

    pub fn group(&self, namespace: &str, name: &str) -> Option<RuleGroupDefinition> {
        self.groups
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    pub fn writes(&self) -> Vec<WriteOp> {
        self.writes.lock().unwrap().clone()
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RuleGroupReader for MockRuler {
    async fn fetch_group(
        &self,
        _config: &RulerConfig,
        namespace: &str,
        group: &str,
    ) -> Result<FetchedRuleGroup, RulerApiError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.hang {
            std::future::pending::<()>().await;
        }
        if let Some(status) = self.fetch_failure {
            return Err(RulerApiError::Status {
                status,
                body: "mock failure".to_string(),
            });
        }
        Ok(match self.group(namespace, group) {
            Some(found) => FetchedRuleGroup::Found(found),
            None => FetchedRuleGroup::Absent,
        })
    }
}

#[async_trait]
impl RuleGroupWriter for MockRuler {
    async fn upsert_group(
        &self,
        _config: &RulerConfig,
        namespace: &str,
        group: &RuleGroupDefinition,
    ) -> Result<(), RulerApiError> {
        if let Some(status) = self.write_failure {
            return Err(RulerApiError::Status {
                status,
                body: "mock write failure".to_string(),
            });
        }
        self.writes.lock().unwrap().push(WriteOp::Upsert {
            namespace: namespace.to_string(),
            group: group.name.clone(),
        });
        self.groups
            .lock()
            .unwrap()
            .insert((namespace.to_string(), group.name.clone()), group.clone());
        Ok(())
    }

    async fn delete_group(
        &self,
        _config: &RulerConfig,
        namespace: &str,
        group: &str,
    ) -> Result<(), RulerApiError> {
        self.writes.lock().unwrap().push(WriteOp::Delete {
            namespace: namespace.to_string(),
            group: group.to_string(),
        });
        self.groups
            .lock()
            .unwrap()
            .remove(&(namespace.to_string(), group.to_string()));
        Ok(())
    }
}

pub fn producer(resolver: Arc<MockResolver>, ruler: Arc<MockRuler>) -> RuleGroupProducer {
    RuleGroupProducer::new(resolver, ruler)
}

pub fn updater(ruler: Arc<MockRuler>) -> RuleGroupUpdater {
    let producer = RuleGroupProducer::new(Arc::new(MockResolver::new()), ruler.clone());
    RuleGroupUpdater::new(producer, ruler)
}
