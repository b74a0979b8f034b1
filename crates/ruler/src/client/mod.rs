//! Ruler API access: trait seams plus the reqwest-backed implementation.

mod error;
mod http;
mod traits;

pub use self::error::RulerApiError;
pub use self::http::HttpRulerClient;
pub use self::traits::{BuildInfoSource, RuleGroupReader, RuleGroupWriter};
