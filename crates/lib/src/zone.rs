//! Hosted zone resolution.
//!
//! The zone is externally owned: it is referenced by id and name and never
//! mutated. Both attributes are required. Looking a zone up by name alone
//! would need a live query against the provider, which would make builds
//! non-deterministic.

use serde::Serialize;

use crate::error::StackError;

/// Read-only handle to an existing DNS zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostedZone {
  id: String,
  name: String,
}

impl HostedZone {
  /// Resolve a zone from its externally supplied id and name.
  ///
  /// Fails on malformed inputs. Whether the id actually belongs to the named
  /// zone is only known to the provisioning engine and surfaces there, not
  /// here.
  pub fn from_attributes(id: &str, name: &str) -> Result<Self, StackError> {
    if id.is_empty() || id.contains(char::is_whitespace) {
      return Err(StackError::InvalidConfig {
        field: "hosted_zone_id".to_string(),
        message: "must be a non-empty identifier without whitespace".to_string(),
      });
    }
    let name = name.trim_end_matches('.');
    if name.is_empty() || !name.contains('.') || name.contains(char::is_whitespace) {
      return Err(StackError::InvalidConfig {
        field: "hosted_zone_name".to_string(),
        message: "must be a domain name such as 'example.com'".to_string(),
      });
    }
    Ok(Self {
      id: id.to_string(),
      name: name.to_string(),
    })
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  /// Zone name without the trailing dot.
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Whether `domain` is the zone apex or a name within the zone.
  pub fn contains(&self, domain: &str) -> bool {
    let domain = domain.trim_end_matches('.');
    domain == self.name || domain.ends_with(&format!(".{}", self.name))
  }
}
