//! The storage origin for site content.

use serde_json::json;
use tracing::warn;

use crate::config::TeardownPolicy;
use crate::consts::{ERROR_DOCUMENT, INDEX_DOCUMENT};
use crate::graph::{DeletionPolicy, ResourceKind, ResourceNode};
use crate::naming::logical_id;

/// The bucket holding the published site, configured as a private
/// static-site origin. The delivery network is the only reader; every form
/// of public access stays blocked.
#[derive(Debug, Clone)]
pub struct SiteBucket {
  pub logical_id: String,
  /// Physical bucket name. Buckets are named after the site domain.
  pub bucket_name: String,
  pub index_document: String,
  pub error_document: String,
  pub teardown: TeardownPolicy,
}

impl SiteBucket {
  pub fn declare(prefix: &str, domain_name: &str, teardown: TeardownPolicy) -> Self {
    if teardown == TeardownPolicy::Destroy {
      warn!(
        bucket = domain_name,
        "teardown policy 'destroy': the bucket and all site content will be deleted irreversibly on stack teardown"
      );
    }
    Self {
      logical_id: logical_id(prefix, "site-bucket"),
      bucket_name: domain_name.to_string(),
      index_document: INDEX_DOCUMENT.to_string(),
      error_document: ERROR_DOCUMENT.to_string(),
      teardown,
    }
  }

  pub fn into_node(self) -> ResourceNode {
    let properties = json!({
      "BucketName": self.bucket_name,
      "WebsiteConfiguration": {
        "IndexDocument": self.index_document,
        "ErrorDocument": self.error_document,
      },
      "PublicAccessBlockConfiguration": {
        "BlockPublicAcls": true,
        "BlockPublicPolicy": true,
        "IgnorePublicAcls": true,
        "RestrictPublicBuckets": true,
      },
    });

    let node = ResourceNode::new(self.logical_id, ResourceKind::Bucket, "AWS::S3::Bucket", properties);
    match self.teardown {
      TeardownPolicy::Retain => node.with_deletion_policy(DeletionPolicy::Retain),
      // The engine cannot delete a non-empty bucket on its own; the marker
      // asks it to empty the bucket first.
      TeardownPolicy::Destroy => node
        .with_deletion_policy(DeletionPolicy::Delete)
        .with_metadata(json!({ "AutoDeleteObjects": true })),
    }
  }
}
