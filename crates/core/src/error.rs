use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid Grafana URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}
