//! The TLS certificate for the site, DNS-validated in the hosted zone.

use serde_json::{Value, json};

use crate::config::DomainAliases;
use crate::consts::CERTIFICATE_REGION;
use crate::graph::{ResourceKind, ResourceNode};
use crate::naming::logical_id;
use crate::zone::HostedZone;

/// Certificate covering the primary domain and, with the www alias enabled,
/// `www.<domain>`. Validation happens through DNS records written into the
/// hosted zone; no manual approval step exists.
#[derive(Debug, Clone)]
pub struct SiteCertificate {
  pub logical_id: String,
  domain_name: String,
  alternative_names: Vec<String>,
  zone_id: String,
}

impl SiteCertificate {
  pub fn declare(prefix: &str, domain_name: &str, aliases: DomainAliases, zone: &HostedZone) -> Self {
    let covered = aliases.covered_names(domain_name);
    Self {
      logical_id: logical_id(prefix, "site-certificate"),
      domain_name: domain_name.to_string(),
      alternative_names: covered.into_iter().skip(1).collect(),
      zone_id: zone.id().to_string(),
    }
  }

  /// Every domain name the certificate covers, primary first.
  pub fn covered_names(&self) -> Vec<String> {
    std::iter::once(self.domain_name.clone())
      .chain(self.alternative_names.iter().cloned())
      .collect()
  }

  pub fn into_node(self) -> ResourceNode {
    let validation_options: Vec<Value> = self
      .covered_names()
      .iter()
      .map(|name| {
        json!({
          "DomainName": name,
          "HostedZoneId": self.zone_id,
        })
      })
      .collect();

    let mut properties = json!({
      "DomainName": self.domain_name,
      "ValidationMethod": "DNS",
      "DomainValidationOptions": validation_options,
    });
    if !self.alternative_names.is_empty() {
      properties["SubjectAlternativeNames"] = json!(self.alternative_names);
    }

    // The viewer certificate must live in us-east-1 even when the stack
    // itself deploys elsewhere; the engine reads the region annotation.
    ResourceNode::new(
      self.logical_id,
      ResourceKind::Certificate,
      "AWS::CertificateManager::Certificate",
      properties,
    )
    .with_metadata(json!({ "Region": CERTIFICATE_REGION }))
  }
}
