//! Data source build info: what backend a rules source is, and how to
//! reach its ruler API.

mod cache;
mod resolver;
mod types;

pub use self::cache::BuildInfoCache;
pub use self::resolver::{BuildInfoResolver, ResolveError, RulerConfigSource};
pub use self::types::{
    BuildInfoResponse, DataSourceBuildInfo, RulerApiVersion, RulerConfig, RulesSourceApplication,
    GRAFANA_RULES_SOURCE_NAME,
};
