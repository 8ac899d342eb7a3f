//! Stack configuration.
//!
//! The configuration is parsed from a TOML file and validated in full before
//! any resource is declared. Deploy account and region are part of the
//! configuration: nothing in the build reads the process environment.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StackError;
use crate::zone::HostedZone;

/// Complete input for one static-site stack declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StackConfig {
  pub site: SiteConfig,
  pub environment: Environment,
  pub deploy: DeployConfig,
  #[serde(default)]
  pub teardown: TeardownConfig,
}

/// The site itself: domain, zone, and identity prefix.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
  /// Prefix every derived resource identity starts from.
  pub resource_prefix: String,
  /// Id of the existing hosted zone records are written into.
  pub hosted_zone_id: String,
  /// Name of that zone, e.g. `example.com`.
  pub hosted_zone_name: String,
  /// The domain the site is served under. Must live within the hosted zone.
  pub domain_name: String,
  /// Also serve (and cover) `www.<domain_name>`.
  #[serde(default)]
  pub include_www: bool,
}

/// Deployment target environment, passed in explicitly.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Environment {
  pub account: String,
  pub region: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeployConfig {
  /// Directory of site content uploaded verbatim on deploy.
  pub asset_dir: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeardownConfig {
  #[serde(default)]
  pub bucket: TeardownPolicy,
}

/// What happens to the bucket and its contents when the stack is torn down.
///
/// `Destroy` deletes the bucket together with everything in it. That loss is
/// irreversible, so it is an explicit opt-in and never the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TeardownPolicy {
  #[default]
  Retain,
  Destroy,
}

/// The www-alias selection, fixed once per stack.
///
/// Every alias consumer (certificate, distribution, records) derives its name
/// set from this one value, so the sets cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainAliases {
  /// Only the primary domain.
  Bare,
  /// The primary domain plus its `www.` alias.
  WithWww,
}

impl DomainAliases {
  pub fn from_include_www(include_www: bool) -> Self {
    if include_www { Self::WithWww } else { Self::Bare }
  }

  /// Every fully qualified name the site answers under, primary first.
  pub fn covered_names(&self, domain: &str) -> Vec<String> {
    match self {
      Self::Bare => vec![domain.to_string()],
      Self::WithWww => vec![domain.to_string(), format!("www.{domain}")],
    }
  }

  /// How many DNS alias records the stack declares.
  pub fn record_count(&self) -> usize {
    match self {
      Self::Bare => 1,
      Self::WithWww => 2,
    }
  }
}

impl StackConfig {
  /// Load and validate a configuration file.
  pub fn from_file(path: &Path) -> Result<Self, StackError> {
    let raw = fs::read_to_string(path)?;
    let config: Self = toml::from_str(&raw)?;
    config.validate()?;
    Ok(config)
  }

  /// Check every cross-field constraint, before any resource is declared.
  pub fn validate(&self) -> Result<(), StackError> {
    let site = &self.site;
    if site.resource_prefix.is_empty()
      || !site
        .resource_prefix
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
      return Err(StackError::InvalidConfig {
        field: "resource_prefix".to_string(),
        message: "must be non-empty and contain only alphanumerics and dashes".to_string(),
      });
    }

    let zone = self.hosted_zone()?;
    if !zone.contains(&site.domain_name) {
      return Err(StackError::DomainOutsideZone {
        domain: site.domain_name.clone(),
        zone: zone.name().to_string(),
      });
    }

    if self.environment.account.len() != 12 || !self.environment.account.chars().all(|c| c.is_ascii_digit()) {
      return Err(StackError::InvalidConfig {
        field: "environment.account".to_string(),
        message: "must be a 12-digit account id".to_string(),
      });
    }
    if self.environment.region.is_empty() {
      return Err(StackError::InvalidConfig {
        field: "environment.region".to_string(),
        message: "must not be empty".to_string(),
      });
    }

    if self.deploy.asset_dir.as_os_str().is_empty() {
      return Err(StackError::InvalidConfig {
        field: "deploy.asset_dir".to_string(),
        message: "must not be empty".to_string(),
      });
    }

    Ok(())
  }

  /// Resolve the hosted zone handle from the configured attributes.
  pub fn hosted_zone(&self) -> Result<HostedZone, StackError> {
    HostedZone::from_attributes(&self.site.hosted_zone_id, &self.site.hosted_zone_name)
  }

  /// The alias variant selected by `include_www`.
  pub fn aliases(&self) -> DomainAliases {
    DomainAliases::from_include_www(self.site.include_www)
  }
}
