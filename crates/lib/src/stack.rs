//! The static-site stack: every resource, declared once, in dependency order.
//!
//! Declaration is a single synchronous pass with no retries and no partial
//! success: either the whole graph is declared or the first error aborts the
//! build. The only shape variation is the www alias, selected once from the
//! configuration. Everything that actually creates resources, waits for
//! certificate validation, or propagates DNS happens in the provisioning
//! engine, outside this crate.

use std::collections::BTreeMap;

use tracing::info;

use crate::assets::DeploymentJob;
use crate::config::StackConfig;
use crate::error::StackError;
use crate::graph::ResourceGraph;
use crate::naming::{identify, logical_id};
use crate::resources::{
  AliasRecord, BucketReadPolicy, OriginAccessIdentity, SiteBucket, SiteCertificate, SiteDistribution,
};
use crate::template::{OutputDecl, Template, reference};

/// A fully declared stack, ready to render.
pub struct StaticSiteStack {
  pub config: StackConfig,
  pub graph: ResourceGraph,
  pub outputs: BTreeMap<String, OutputDecl>,
  pub deployment: DeploymentJob,
}

impl StaticSiteStack {
  /// Declare every resource for the configured site.
  ///
  /// Build order: zone, bucket, access identity, policy, certificate,
  /// distribution, records, deployment, outputs. Each declaration names the
  /// ids it depends on and the graph rejects references to anything not yet
  /// declared, so this order is load-bearing.
  pub fn declare(config: StackConfig) -> Result<Self, StackError> {
    config.validate()?;

    let prefix = &config.site.resource_prefix;
    let domain = &config.site.domain_name;
    let zone = config.hosted_zone()?;
    let aliases = config.aliases();

    let mut graph = ResourceGraph::new();

    let bucket = SiteBucket::declare(prefix, domain, config.teardown.bucket);
    let bucket_id = bucket.logical_id.clone();
    graph.add(bucket.into_node())?;

    let identity = OriginAccessIdentity::declare(prefix, domain);
    let identity_id = identity.logical_id.clone();
    graph.add(identity.into_node())?;

    let policy = BucketReadPolicy::declare(prefix, &bucket_id, &identity_id);
    let policy_id = policy.logical_id.clone();
    graph.add(policy.into_node())?;

    let certificate = SiteCertificate::declare(prefix, domain, aliases, &zone);
    let covered = certificate.covered_names();

    let distribution = SiteDistribution::declare(
      prefix,
      covered.clone(),
      &certificate,
      &bucket_id,
      &identity_id,
      &policy_id,
    )?;
    let distribution_id = distribution.logical_id.clone();

    graph.add(certificate.into_node())?;
    graph.add(distribution.into_node())?;

    for record in AliasRecord::declare_all(prefix, &covered, &zone, &distribution_id) {
      graph.add(record.into_node())?;
    }

    let deployment = DeploymentJob::declare(prefix, &config.deploy.asset_dir, &bucket_id, &distribution_id);
    graph.add(deployment.clone().into_node())?;

    let mut outputs = BTreeMap::new();
    let bucket_export = identify(prefix, "bucket-name");
    outputs.insert(
      logical_id(prefix, "bucket-name"),
      OutputDecl::exported(reference(&bucket_id), &bucket_export),
    );
    let distribution_export = identify(prefix, "distribution");
    outputs.insert(
      logical_id(prefix, "distribution"),
      OutputDecl::exported(reference(&distribution_id), &distribution_export),
    );

    info!(
      domain = %domain,
      resources = graph.len(),
      records = covered.len(),
      "declared static site stack"
    );

    Ok(Self {
      config,
      graph,
      outputs,
      deployment,
    })
  }

  /// Render the provisioning-engine artifact.
  pub fn template(&self) -> Result<Template, StackError> {
    Template::render(
      format!("Static site hosting stack for {}", self.config.site.domain_name),
      serde_json::json!({
        "Environment": {
          "Account": self.config.environment.account,
          "Region": self.config.environment.region,
        },
      }),
      &self.graph,
      &self.outputs,
    )
  }

  /// Every host name the site answers under, primary first.
  pub fn covered_names(&self) -> Vec<String> {
    self.config.aliases().covered_names(&self.config.site.domain_name)
  }
}
