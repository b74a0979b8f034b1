//! Rendering results for the terminal.

use anyhow::Result;
use serde::Serialize;

use crate::cli::OutputFormat;

pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
        OutputFormat::Json => serde_json::to_string_pretty(value)? + "\n",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulesmith_ruler::RuleGroupDefinition;

    #[test]
    fn render_blank_group_yaml() {
        let text = render(&RuleGroupDefinition::blank("g1"), OutputFormat::Yaml).unwrap();
        assert!(text.contains("name: g1"));
        assert!(text.contains("interval: 1m"));
        assert!(text.contains("rules: []"));
    }

    #[test]
    fn render_blank_group_json() {
        let text = render(&RuleGroupDefinition::blank("g1"), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["name"], "g1");
        assert_eq!(parsed["rules"], serde_json::json!([]));
    }
}
