//! DNS alias records binding the site's names to the distribution.

use serde_json::json;

use crate::consts::CLOUDFRONT_ALIAS_ZONE_ID;
use crate::graph::{ResourceKind, ResourceNode};
use crate::naming::logical_id;
use crate::template::get_att;
use crate::zone::HostedZone;

/// One A-alias record resolving a covered name straight to the
/// distribution's stable entry point. Not a CNAME: the record follows the
/// distribution if its underlying hostname ever changes, and TTL stays at
/// the provider default.
#[derive(Debug, Clone)]
pub struct AliasRecord {
  pub logical_id: String,
  pub record_name: String,
  zone_id: String,
  distribution_id: String,
}

impl AliasRecord {
  /// Declare one record per covered name: the primary first, then the www
  /// alias when present.
  pub fn declare_all(
    prefix: &str,
    covered_names: &[String],
    zone: &HostedZone,
    distribution_id: &str,
  ) -> Vec<Self> {
    covered_names
      .iter()
      .enumerate()
      .map(|(i, name)| Self {
        logical_id: logical_id(prefix, &format!("site-alias-record-{:02}", i + 1)),
        record_name: format!("{name}."),
        zone_id: zone.id().to_string(),
        distribution_id: distribution_id.to_string(),
      })
      .collect()
  }

  pub fn into_node(self) -> ResourceNode {
    let properties = json!({
      "Name": self.record_name,
      "Type": "A",
      "HostedZoneId": self.zone_id,
      "AliasTarget": {
        "DNSName": get_att(&self.distribution_id, "DomainName"),
        "HostedZoneId": CLOUDFRONT_ALIAS_ZONE_ID,
      },
    });

    ResourceNode::new(self.logical_id, ResourceKind::AliasRecord, "AWS::Route53::RecordSet", properties)
      .depends_on(&self.distribution_id)
  }
}
