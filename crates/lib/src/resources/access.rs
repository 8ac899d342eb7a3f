//! The origin access identity and the bucket policy binding it.
//!
//! The identity is the only principal ever granted access to the bucket, and
//! the grant is read-only: a single `s3:GetObject` statement scoped to the
//! bucket's objects. This is what keeps the bucket private while still
//! servable through the delivery network.

use serde_json::{Value, json};

use crate::graph::{ResourceKind, ResourceNode};
use crate::naming::logical_id;
use crate::template::{get_att, reference, substitute};

/// The delivery network's dedicated identity for reading the bucket.
#[derive(Debug, Clone)]
pub struct OriginAccessIdentity {
  pub logical_id: String,
  pub comment: String,
}

impl OriginAccessIdentity {
  pub fn declare(prefix: &str, domain_name: &str) -> Self {
    Self {
      logical_id: logical_id(prefix, "cloudfront-oai"),
      comment: format!("origin access identity for {domain_name}"),
    }
  }

  pub fn into_node(self) -> ResourceNode {
    let properties = json!({
      "CloudFrontOriginAccessIdentityConfig": { "Comment": self.comment },
    });
    ResourceNode::new(
      self.logical_id,
      ResourceKind::AccessIdentity,
      "AWS::CloudFront::CloudFrontOriginAccessIdentity",
      properties,
    )
  }
}

/// Grants the access identity read access to every object in the bucket.
///
/// Nothing else: no listing, no writes, no deletes, and never a wildcard
/// principal.
#[derive(Debug, Clone)]
pub struct BucketReadPolicy {
  pub logical_id: String,
  bucket_id: String,
  identity_id: String,
}

impl BucketReadPolicy {
  pub fn declare(prefix: &str, bucket_id: &str, identity_id: &str) -> Self {
    Self {
      logical_id: logical_id(prefix, "site-bucket-policy"),
      bucket_id: bucket_id.to_string(),
      identity_id: identity_id.to_string(),
    }
  }

  pub fn into_node(self) -> ResourceNode {
    let statement: Value = json!({
      "Effect": "Allow",
      "Action": "s3:GetObject",
      "Principal": {
        "CanonicalUser": get_att(&self.identity_id, "S3CanonicalUserId"),
      },
      "Resource": substitute(&format!("arn:aws:s3:::${{{}}}/*", self.bucket_id)),
    });
    let properties = json!({
      "Bucket": reference(&self.bucket_id),
      "PolicyDocument": {
        "Version": "2012-10-17",
        "Statement": [statement],
      },
    });

    ResourceNode::new(self.logical_id, ResourceKind::BucketPolicy, "AWS::S3::BucketPolicy", properties)
      .depends_on(&self.bucket_id)
      .depends_on(&self.identity_id)
  }
}
