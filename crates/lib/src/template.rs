//! The rendered stack artifact.
//!
//! A `Template` is the provisioning-engine-facing description of the declared
//! graph: one entry per resource plus the exported outputs. Rendering is
//! deterministic (`BTreeMap` ordering) so identical configurations produce
//! byte-identical artifacts with stable hashes.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::StackError;
use crate::graph::ResourceGraph;
use crate::util::hash::{Hashable, ObjectHash};

/// Reference to another resource's physical id (`Ref`).
pub fn reference(logical_id: &str) -> Value {
  json!({ "Ref": logical_id })
}

/// Reference to an attribute of another resource (`Fn::GetAtt`).
pub fn get_att(logical_id: &str, attribute: &str) -> Value {
  json!({ "Fn::GetAtt": [logical_id, attribute] })
}

/// String substitution over resource references (`Fn::Sub`).
pub fn substitute(pattern: &str) -> Value {
  json!({ "Fn::Sub": pattern })
}

/// An exported stack output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputDecl {
  #[serde(rename = "Value")]
  pub value: Value,
  #[serde(rename = "Export")]
  pub export: Export,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Export {
  #[serde(rename = "Name")]
  pub name: String,
}

impl OutputDecl {
  pub fn exported(value: Value, name: &str) -> Self {
    Self {
      value,
      export: Export { name: name.to_string() },
    }
  }
}

/// A fully rendered template.
#[derive(Debug, Clone, Serialize)]
pub struct Template {
  #[serde(rename = "Description")]
  pub description: String,
  /// Engine-facing annotations, e.g. the target deployment environment.
  #[serde(rename = "Metadata")]
  pub metadata: Value,
  #[serde(rename = "Resources")]
  pub resources: BTreeMap<String, Value>,
  #[serde(rename = "Outputs")]
  pub outputs: BTreeMap<String, OutputDecl>,
}

impl Hashable for Template {}

impl Template {
  /// Render a graph and its outputs into the artifact form.
  ///
  /// Resources are emitted in topological order (then sorted by logical id
  /// in the map), so rendering fails on a graph whose dependencies cannot be
  /// sequenced.
  pub fn render(
    description: String,
    metadata: Value,
    graph: &ResourceGraph,
    outputs: &BTreeMap<String, OutputDecl>,
  ) -> Result<Self, StackError> {
    let mut resources = BTreeMap::new();
    for node in graph.topological_order()? {
      let mut entry = serde_json::Map::new();
      entry.insert("Type".to_string(), json!(node.type_name));
      if let Some(policy) = node.deletion_policy {
        entry.insert("DeletionPolicy".to_string(), json!(policy.as_str()));
      }
      if !node.depends_on.is_empty() {
        entry.insert("DependsOn".to_string(), json!(node.depends_on));
      }
      if let Some(metadata) = &node.metadata {
        entry.insert("Metadata".to_string(), metadata.clone());
      }
      entry.insert("Properties".to_string(), node.properties.clone());
      resources.insert(node.logical_id.clone(), Value::Object(entry));
    }
    Ok(Self {
      description,
      metadata,
      resources,
      outputs: outputs.clone(),
    })
  }

  pub fn to_json_pretty(&self) -> Result<String, StackError> {
    serde_json::to_string_pretty(self).map_err(StackError::Json)
  }

  /// Content-addressed identity of this artifact.
  pub fn hash(&self) -> Result<ObjectHash, StackError> {
    self.compute_hash().map_err(StackError::Json)
  }
}
