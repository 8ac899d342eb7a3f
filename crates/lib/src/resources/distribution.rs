//! The CDN distribution fronting the site bucket.

use serde_json::json;

use crate::consts::{CACHING_OPTIMIZED_POLICY_ID, INDEX_DOCUMENT};
use crate::error::StackError;
use crate::graph::{ResourceKind, ResourceNode};
use crate::naming::logical_id;
use crate::resources::SiteCertificate;
use crate::template::{get_att, reference, substitute};

const ORIGIN_ID: &str = "site-origin";

/// One distribution, one origin (the bucket through the access identity,
/// never directly), one default cache behavior.
#[derive(Debug, Clone)]
pub struct SiteDistribution {
  pub logical_id: String,
  aliases: Vec<String>,
  bucket_id: String,
  identity_id: String,
  certificate_id: String,
  policy_id: String,
}

impl SiteDistribution {
  /// Declare the distribution for the given alias set.
  ///
  /// The alias set must exactly match the certificate's covered names: a
  /// distribution answering for a name its certificate does not cover fails
  /// TLS negotiation at runtime, so the mismatch is rejected while the graph
  /// is still being declared.
  pub fn declare(
    prefix: &str,
    aliases: Vec<String>,
    certificate: &SiteCertificate,
    bucket_id: &str,
    identity_id: &str,
    policy_id: &str,
  ) -> Result<Self, StackError> {
    if aliases != certificate.covered_names() {
      return Err(StackError::AliasCertificateMismatch {
        aliases,
        names: certificate.covered_names(),
      });
    }
    Ok(Self {
      logical_id: logical_id(prefix, "site-distribution"),
      aliases,
      bucket_id: bucket_id.to_string(),
      identity_id: identity_id.to_string(),
      certificate_id: certificate.logical_id.clone(),
      policy_id: policy_id.to_string(),
    })
  }

  /// The host names this distribution answers for.
  pub fn aliases(&self) -> &[String] {
    &self.aliases
  }

  pub fn into_node(self) -> ResourceNode {
    let origin = json!({
      "Id": ORIGIN_ID,
      "DomainName": get_att(&self.bucket_id, "RegionalDomainName"),
      "S3OriginConfig": {
        "OriginAccessIdentity": substitute(&format!("origin-access-identity/cloudfront/${{{}}}", self.identity_id)),
      },
    });
    let properties = json!({
      "DistributionConfig": {
        "Enabled": true,
        "Aliases": self.aliases,
        "DefaultRootObject": INDEX_DOCUMENT,
        "Origins": [origin],
        "DefaultCacheBehavior": {
          "TargetOriginId": ORIGIN_ID,
          "AllowedMethods": ["GET", "HEAD", "OPTIONS"],
          "CachedMethods": ["GET", "HEAD"],
          "Compress": true,
          "ViewerProtocolPolicy": "redirect-to-https",
          "CachePolicyId": CACHING_OPTIMIZED_POLICY_ID,
        },
        "ViewerCertificate": {
          "AcmCertificateArn": reference(&self.certificate_id),
          "SslSupportMethod": "sni-only",
          "MinimumProtocolVersion": "TLSv1.2_2021",
        },
      },
    });

    ResourceNode::new(
      self.logical_id,
      ResourceKind::Distribution,
      "AWS::CloudFront::Distribution",
      properties,
    )
    .depends_on(&self.bucket_id)
    .depends_on(&self.identity_id)
    .depends_on(&self.policy_id)
    .depends_on(&self.certificate_id)
  }
}
