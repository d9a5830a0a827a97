//! Rule files: one `*.json` or `*.toml` file per rule, named after the file.

use std::fs;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use super::Rule;
use crate::entries::strip_complete_extension;
use crate::error::{ConfigError, Result};

/// Read every rule file directly inside `dir`, sorted by file name.
///
/// Files with other extensions are ignored. A rule that fails to parse or
/// whose patterns do not compile aborts discovery.
pub fn discover_rules(dir: &Path) -> Result<Vec<(String, Rule)>> {
    let mut rules = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for item in walker {
        let item = item.map_err(|err| ConfigError::walk(dir, err))?;
        if !item.file_type().is_file() {
            continue;
        }

        let path = item.path();
        let Some(format) = path.extension().and_then(|ext| ext.to_str()) else {
            continue;
        };

        let rule = match format {
            "json" => parse_json(path)?,
            "toml" => parse_toml(path)?,
            _ => {
                debug!(path = %path.display(), "skipping non-rule file");
                continue;
            }
        };

        rule.validate().map_err(|err| ConfigError::InvalidRule {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

        let file_name = item.file_name().to_string_lossy();
        let name = strip_complete_extension(&file_name).to_string();
        debug!(rule = %name, path = %path.display(), "discovered rule file");
        rules.push((name, rule));
    }

    Ok(rules)
}

fn parse_json(path: &Path) -> Result<Rule> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|err| ConfigError::InvalidRule {
        path: path.to_path_buf(),
        message: format!("invalid JSON: {err}"),
    })
}

fn parse_toml(path: &Path) -> Result<Rule> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|err| ConfigError::InvalidRule {
        path: path.to_path_buf(),
        message: format!("invalid TOML: {err}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_json_and_toml_rules_in_name_order() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("vue.json"),
            r#"{"test": "\\.vue$", "use": [{"loader": "vue-loader"}]}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("elm.toml"),
            r#"
test = '\.elm$'
exclude = 'elm-stuff'

[[use]]
loader = "elm-webpack-loader"
options = { optimize = true }
"#,
        )
        .unwrap();
        fs::write(dir.path().join("notes.md"), "not a rule").unwrap();

        let rules = discover_rules(dir.path()).unwrap();
        let names: Vec<_> = rules.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["elm", "vue"]);

        let elm = &rules[0].1;
        assert_eq!(elm.exclude.as_deref(), Some("elm-stuff"));
        assert_eq!(elm.uses[0].loader, "elm-webpack-loader");
        assert_eq!(elm.uses[0].options["optimize"], true);
    }

    #[test]
    fn malformed_rule_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.json"), "{ nope").unwrap();

        let err = discover_rules(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRule { .. }));
    }

    #[test]
    fn rule_with_bad_regex_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.json"), r#"{"test": "(unclosed"}"#).unwrap();

        let err = discover_rules(dir.path()).unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }
}
