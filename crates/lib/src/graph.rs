//! The resource orchestration graph.
//!
//! Resources are declared in dependency order: each declaration names the
//! logical ids it must be created after, and those ids have to be present
//! already. The graph therefore encodes the required build sequence
//! explicitly instead of leaving it implicit in construction order, and the
//! sequence can be checked by inspection or by `topological_order`.

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use serde_json::Value;

use crate::error::StackError;

/// What a node in the graph declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResourceKind {
  Bucket,
  BucketPolicy,
  AccessIdentity,
  Certificate,
  Distribution,
  AliasRecord,
  Deployment,
}

/// What the provisioning engine does with a resource on stack teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeletionPolicy {
  Retain,
  Delete,
}

impl DeletionPolicy {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Retain => "Retain",
      Self::Delete => "Delete",
    }
  }
}

/// A single declared cloud resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceNode {
  pub logical_id: String,
  pub kind: ResourceKind,
  /// Provider type name, e.g. `AWS::S3::Bucket`.
  pub type_name: String,
  pub properties: Value,
  /// Logical ids this resource must be created after.
  pub depends_on: Vec<String>,
  pub deletion_policy: Option<DeletionPolicy>,
  /// Free-form annotations for the provisioning engine.
  pub metadata: Option<Value>,
}

impl ResourceNode {
  pub fn new(logical_id: impl Into<String>, kind: ResourceKind, type_name: &str, properties: Value) -> Self {
    Self {
      logical_id: logical_id.into(),
      kind,
      type_name: type_name.to_string(),
      properties,
      depends_on: Vec::new(),
      deletion_policy: None,
      metadata: None,
    }
  }

  pub fn depends_on(mut self, logical_id: &str) -> Self {
    self.depends_on.push(logical_id.to_string());
    self
  }

  pub fn with_deletion_policy(mut self, policy: DeletionPolicy) -> Self {
    self.deletion_policy = Some(policy);
    self
  }

  pub fn with_metadata(mut self, metadata: Value) -> Self {
    self.metadata = Some(metadata);
    self
  }
}

/// Dependency-ordered collection of resource declarations.
#[derive(Default)]
pub struct ResourceGraph {
  graph: DiGraph<String, ()>,
  indices: HashMap<String, NodeIndex>,
  nodes: Vec<ResourceNode>,
}

impl ResourceGraph {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a declaration.
  ///
  /// Every id in `depends_on` must already be declared; a forward reference
  /// is rejected, which keeps the declaration sequence honest about its
  /// ordering.
  pub fn add(&mut self, node: ResourceNode) -> Result<(), StackError> {
    if self.indices.contains_key(&node.logical_id) {
      return Err(StackError::DuplicateLogicalId(node.logical_id));
    }
    for dep in &node.depends_on {
      if !self.indices.contains_key(dep) {
        return Err(StackError::UndeclaredDependency {
          dependent: node.logical_id.clone(),
          dependency: dep.clone(),
        });
      }
    }

    let idx = self.graph.add_node(node.logical_id.clone());
    for dep in &node.depends_on {
      // Edge from dependency to dependent.
      self.graph.add_edge(self.indices[dep], idx, ());
    }
    self.indices.insert(node.logical_id.clone(), idx);
    self.nodes.push(node);
    Ok(())
  }

  pub fn get(&self, logical_id: &str) -> Option<&ResourceNode> {
    self.nodes.iter().find(|n| n.logical_id == logical_id)
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// All declarations, in declaration order.
  pub fn nodes(&self) -> impl Iterator<Item = &ResourceNode> {
    self.nodes.iter()
  }

  pub fn of_kind(&self, kind: ResourceKind) -> impl Iterator<Item = &ResourceNode> {
    self.nodes.iter().filter(move |n| n.kind == kind)
  }

  pub fn count_of(&self, kind: ResourceKind) -> usize {
    self.of_kind(kind).count()
  }

  /// Declarations ordered so every dependency precedes its dependents.
  ///
  /// Forward references are rejected at `add`, so a cycle cannot actually be
  /// declared; `CycleDetected` is the backstop should that invariant break.
  pub fn topological_order(&self) -> Result<Vec<&ResourceNode>, StackError> {
    let sorted = toposort(&self.graph, None).map_err(|_| StackError::CycleDetected)?;
    Ok(sorted.into_iter().filter_map(|idx| self.get(&self.graph[idx])).collect())
  }
}
