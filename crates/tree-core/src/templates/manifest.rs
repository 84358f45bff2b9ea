//! Component manifest types and parsing

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// File name of the manifest inside a template directory
pub const MANIFEST_FILE: &str = "dependencies.json";

/// Per-template manifest (templates/<name>/dependencies.json)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentManifest {
    /// Package specifiers (`name` or `name@version`) the component needs
    #[serde(default)]
    pub packages: Vec<String>,

    /// Other templates this one depends on, materialized in order
    #[serde(default)]
    pub components: Vec<String>,

    /// Hook files copied individually from the catalog's hooks directory
    #[serde(default)]
    pub hooks: Vec<String>,

    /// CSS custom properties merged into the project stylesheet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleFragment>,

    /// Keys the tool does not understand, kept so they can be reported
    #[serde(flatten, skip_serializing)]
    pub unknown: BTreeMap<String, Value>,
}

impl ComponentManifest {
    /// Parse a manifest from JSON text
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// A manifest that declares nothing behaves exactly like no manifest
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
            && self.components.is_empty()
            && self.hooks.is_empty()
            && self.styles.as_ref().map_or(true, StyleFragment::is_empty)
    }

    /// Names of unrecognized top-level keys, sorted
    pub fn unknown_keys(&self) -> Vec<&str> {
        self.unknown.keys().map(String::as_str).collect()
    }
}

/// A named group of CSS variables, e.g. `theme` or `animations`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleGroup {
    pub name: String,
    /// `(--variable, value)` pairs in authored order
    pub variables: Vec<(String, String)>,
}

/// Style fragment: variable groups in authored order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct StyleFragment {
    pub groups: Vec<StyleGroup>,
}

impl StyleFragment {
    /// Build a fragment from `(group, [(variable, value)])` pairs
    pub fn from_groups<G, V, K, S>(groups: G) -> Self
    where
        G: IntoIterator<Item = (K, V)>,
        V: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<String>,
    {
        Self {
            groups: groups
                .into_iter()
                .map(|(name, vars)| StyleGroup {
                    name: name.into(),
                    variables: vars
                        .into_iter()
                        .map(|(k, v)| {
                            let k: String = k.into();
                            (normalize_variable(&k), v.into())
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.variables.is_empty())
    }

    /// Every declaration across all groups, in order
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.groups
            .iter()
            .flat_map(|g| g.variables.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

impl TryFrom<Map<String, Value>> for StyleFragment {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut groups = Vec::with_capacity(map.len());

        for (group, vars) in map {
            let Value::Object(vars) = vars else {
                return Err(format!("style group '{}' must be an object", group));
            };

            let mut variables = Vec::with_capacity(vars.len());
            for (name, value) in vars {
                let value = match value {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    other => {
                        return Err(format!(
                            "style variable '{}' in group '{}' must be a string or number, got {}",
                            name, group, other
                        ))
                    }
                };
                variables.push((normalize_variable(&name), value));
            }

            groups.push(StyleGroup {
                name: group,
                variables,
            });
        }

        Ok(Self { groups })
    }
}

impl From<StyleFragment> for Map<String, Value> {
    fn from(fragment: StyleFragment) -> Self {
        fragment
            .groups
            .into_iter()
            .map(|g| {
                let vars = g
                    .variables
                    .into_iter()
                    .map(|(k, v)| (k, Value::String(v)))
                    .collect();
                (g.name, Value::Object(vars))
            })
            .collect()
    }
}

/// Ensure a variable name carries the `--` custom property prefix
fn normalize_variable(name: &str) -> String {
    let name = name.trim();
    if name.starts_with("--") {
        name.to_string()
    } else {
        format!("--{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_manifest() {
        let manifest = ComponentManifest::from_json(
            r#"{
                "packages": ["@tiptap/react", "lucide-react@0.400.0"],
                "components": ["custom-ui"],
                "hooks": ["use-mobile"],
                "styles": {
                    "theme": { "--radius": "8px", "sidebar-width": "16rem" },
                    "animations": { "--animate-spin": "spin 1s linear infinite" }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.packages.len(), 2);
        assert_eq!(manifest.components, vec!["custom-ui"]);
        assert_eq!(manifest.hooks, vec!["use-mobile"]);

        let styles = manifest.styles.unwrap();
        assert_eq!(styles.groups[0].name, "theme");
        assert_eq!(styles.groups[1].name, "animations");
        let decls: Vec<_> = styles.declarations().collect();
        assert_eq!(
            decls,
            vec![
                ("--radius", "8px"),
                ("--sidebar-width", "16rem"),
                ("--animate-spin", "spin 1s linear infinite"),
            ]
        );
    }

    #[test]
    fn test_empty_manifest_is_empty() {
        assert!(ComponentManifest::from_json("{}").unwrap().is_empty());
        assert!(ComponentManifest::from_json(r#"{"packages": [], "styles": {"theme": {}}}"#)
            .unwrap()
            .is_empty());
        assert!(!ComponentManifest::from_json(r#"{"hooks": ["use-mobile"]}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_unknown_keys_are_collected() {
        let manifest =
            ComponentManifest::from_json(r#"{"package": ["typo"], "components": []}"#).unwrap();
        assert_eq!(manifest.unknown_keys(), vec!["package"]);
    }

    #[test]
    fn test_numeric_style_value_is_stringified() {
        let manifest =
            ComponentManifest::from_json(r#"{"styles": {"theme": {"--z-index": 10}}}"#).unwrap();
        let decls: Vec<_> = manifest.styles.as_ref().unwrap().declarations().collect();
        assert_eq!(decls, vec![("--z-index", "10")]);
    }

    #[test]
    fn test_nested_style_value_is_rejected() {
        let result =
            ComponentManifest::from_json(r#"{"styles": {"theme": {"--radius": {"x": 1}}}}"#);
        assert!(result.is_err());
    }
}
