//! Error types for sitestack-lib.

use thiserror::Error;

/// Errors raised while declaring or rendering a stack.
///
/// Everything here is a build-time failure: it happens before the artifact
/// leaves this process. Provisioning-time failures (certificate validation
/// timeouts, DNS propagation, resource limits) belong to the provisioning
/// engine and are never retried or wrapped here.
#[derive(Debug, Error)]
pub enum StackError {
  #[error("invalid configuration for '{field}': {message}")]
  InvalidConfig { field: String, message: String },

  #[error("domain '{domain}' is not hosted zone '{zone}' or a subdomain of it")]
  DomainOutsideZone { domain: String, zone: String },

  #[error("distribution aliases {aliases:?} do not match certificate names {names:?}")]
  AliasCertificateMismatch { aliases: Vec<String>, names: Vec<String> },

  #[error("duplicate logical id '{0}' in resource graph")]
  DuplicateLogicalId(String),

  #[error("resource '{dependent}' depends on undeclared resource '{dependency}'")]
  UndeclaredDependency { dependent: String, dependency: String },

  #[error("dependency cycle detected in resource graph")]
  CycleDetected,

  #[error("asset directory not found: {0}")]
  AssetDirMissing(String),

  #[error("failed to read asset {path}: {message}")]
  AssetRead { path: String, message: String },

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("serialization error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("failed to parse configuration: {0}")]
  Config(#[from] toml::de::Error),
}
