//! Hint-definition file model: nodes, hint actions, optional ADPF profiles.
//!
//! The document shape follows the platform's hint-definition JSON. Fields the
//! enforcement engine consumes but this daemon does not are ignored on parse.

use std::collections::HashSet;

use serde::Deserialize;

/// A controllable node with its candidate values.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Node {
    /// Unique node name actions refer to.
    pub name: String,
    /// Control-point path the enforcement engine writes to.
    pub path: String,
    /// Candidate values, strongest first.
    pub values: Vec<String>,
    /// Index into `values` applied when no hint holds the node.
    #[serde(default)]
    pub default_index: usize,
    /// Whether the node is written back to its default on activation.
    #[serde(default)]
    pub reset_on_init: bool,
}

/// Binds a hint name to a node value for a duration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Action {
    /// Hint this action belongs to.
    pub power_hint: String,
    /// Referenced node name.
    pub node: String,
    /// Value requested while the hint holds.
    pub value: String,
    /// Hold duration in milliseconds; 0 means until released.
    #[serde(default)]
    pub duration: u64,
}

/// One extended-profile (ADPF) feature set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdpfProfile {
    /// Profile name.
    pub name: String,
}

/// Parsed hint-definition document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HintConfig {
    /// Controllable nodes.
    pub nodes: Vec<Node>,
    /// Hint → node bindings.
    #[serde(default)]
    pub actions: Vec<Action>,
    /// Extended-profile feature sets, if any.
    #[serde(default)]
    pub adpf_config: Vec<AdpfProfile>,
}

impl HintConfig {
    /// Semantic checks the deserializer cannot express.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.nodes.is_empty() {
            return Err("config defines no nodes".to_string());
        }
        let mut names = HashSet::new();
        for node in &self.nodes {
            if !names.insert(node.name.as_str()) {
                return Err(format!("duplicate node name {:?}", node.name));
            }
            if node.values.is_empty() {
                return Err(format!("node {:?} has no values", node.name));
            }
            if node.default_index >= node.values.len() {
                return Err(format!(
                    "node {:?} default index {} out of range",
                    node.name, node.default_index
                ));
            }
        }
        for action in &self.actions {
            if !names.contains(action.node.as_str()) {
                return Err(format!(
                    "action {:?} references unknown node {:?}",
                    action.power_hint, action.node
                ));
            }
        }
        Ok(())
    }

    /// Whether an extended-profile (ADPF) feature set is configured.
    #[must_use]
    pub fn has_extended_profiles(&self) -> bool {
        !self.adpf_config.is_empty()
    }
}
