//! Loading single rules from YAML or JSON files.

use std::path::Path;

use anyhow::{Context, Result};

use rulesmith_ruler::RulerRule;

/// Read one rule from `path`. YAML is a superset of JSON, so both parse.
pub fn load_rule(path: &Path) -> Result<RulerRule> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read rule file {}", path.display()))?;
    serde_yaml::from_str(&contents)
        .with_context(|| format!("{} is not a valid alerting, recording or Grafana rule", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use tempfile::TempDir;

    #[test]
    fn load_yaml_alerting_rule() {
        let dir = TempDir::new().expect("create tempdir");
        let path = dir.path().join("rule.yml");
        fs::write(
            &path,
            r#"
alert: HighLatency
expr: histogram_quantile(0.99, rate(http_duration_seconds_bucket[5m])) > 1
for: 10m
labels:
  severity: page
"#,
        )
        .unwrap();

        let rule = load_rule(&path).unwrap();
        assert_eq!(rule.kind(), "alerting");
        assert_eq!(rule.name(), "HighLatency");
    }

    #[test]
    fn load_json_grafana_rule() {
        let dir = TempDir::new().expect("create tempdir");
        let path = dir.path().join("rule.json");
        fs::write(
            &path,
            r#"{"grafana_alert": {"title": "Disk full", "condition": "B", "data": []}, "for": "5m"}"#,
        )
        .unwrap();

        let rule = load_rule(&path).unwrap();
        assert_eq!(rule.kind(), "grafana");
        assert_eq!(rule.name(), "Disk full");
        assert_eq!(rule.grafana_uid(), None);
    }

    #[test]
    fn load_rejects_unrecognised_shape() {
        let dir = TempDir::new().expect("create tempdir");
        let path = dir.path().join("bad.yml");
        fs::write(&path, "name: not-a-rule\n").unwrap();

        let err = load_rule(&path).unwrap_err();
        assert!(err.to_string().contains("bad.yml"));
    }

    #[test]
    fn load_missing_file() {
        let err = load_rule(Path::new("/definitely/not/here.yml")).unwrap_err();
        assert!(err.to_string().contains("failed to read rule file"));
    }
}
