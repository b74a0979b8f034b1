//! Process-level cache of data source build info.
//!
//! Shared through `Arc` by everything that resolves ruler configs. Uses
//! `std::sync::RwLock`; the lock is never held across an await point.

use std::collections::HashMap;
use std::sync::RwLock;

use super::types::DataSourceBuildInfo;

/// Build info keyed by data source name.
#[derive(Debug, Default)]
pub struct BuildInfoCache {
    entries: RwLock<HashMap<String, DataSourceBuildInfo>>,
}

impl BuildInfoCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, data_source_name: &str) -> Option<DataSourceBuildInfo> {
        self.entries
            .read()
            .expect("build info cache lock poisoned")
            .get(data_source_name)
            .cloned()
    }

    pub fn insert(&self, data_source_name: impl Into<String>, info: DataSourceBuildInfo) {
        self.entries
            .write()
            .expect("build info cache lock poisoned")
            .insert(data_source_name.into(), info);
    }

    /// Forget one data source so the next resolve fetches again.
    pub fn invalidate(&self, data_source_name: &str) -> bool {
        self.entries
            .write()
            .expect("build info cache lock poisoned")
            .remove(data_source_name)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .expect("build info cache lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
