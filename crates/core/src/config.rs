//! Editor configuration loaded from YAML or JSON.

use serde::{Deserialize, Serialize};

use crate::error::BlockError;

/// Knobs of the editing engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorOptions {
    /// Prefix of generated block and tab ids.
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,
    /// Title given to tabs created without one. A number is appended.
    #[serde(default = "default_tab_title")]
    pub default_tab_title: String,
    /// Number of empty tabs a new container starts with.
    #[serde(default = "default_initial_tabs")]
    pub initial_tabs: usize,
}

fn default_id_prefix() -> String {
    "blk".to_string()
}

fn default_tab_title() -> String {
    "Tab".to_string()
}

fn default_initial_tabs() -> usize {
    2
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            id_prefix: default_id_prefix(),
            default_tab_title: default_tab_title(),
            initial_tabs: default_initial_tabs(),
        }
    }
}

impl EditorOptions {
    /// Parses options from YAML; missing keys take their defaults.
    pub fn from_yaml(source: &str) -> Result<Self, BlockError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Parses options from JSON; missing keys take their defaults.
    pub fn from_json(source: &str) -> Result<Self, BlockError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Title for the `n`-th tab (1-based) of a container.
    pub fn tab_title(&self, n: usize) -> String {
        format!("{} {}", self.default_tab_title, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_partial_override() {
        let options = EditorOptions::from_yaml("initial_tabs: 3\nid_prefix: node\n").unwrap();
        assert_eq!(options.initial_tabs, 3);
        assert_eq!(options.id_prefix, "node");
        assert_eq!(options.default_tab_title, "Tab");
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(EditorOptions::from_json("{}").unwrap(), EditorOptions::default());
        assert_eq!(EditorOptions::default().tab_title(2), "Tab 2");
    }

    #[test]
    fn test_bad_yaml_is_an_error() {
        let err = EditorOptions::from_yaml("initial_tabs: many").unwrap_err();
        assert!(matches!(err, BlockError::Yaml(_)));
    }
}
