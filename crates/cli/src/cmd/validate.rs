//! Implementation of the `sitestack validate` command.
//!
//! Declares the stack from a configuration and reports what it would
//! contain, without writing any artifact.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use sitestack_lib::config::{StackConfig, TeardownPolicy};
use sitestack_lib::graph::ResourceKind;
use sitestack_lib::stack::StaticSiteStack;

use crate::output::{OutputFormat, print_stat, print_success, print_warning};

pub fn cmd_validate(config_path: &Path, format: OutputFormat) -> Result<()> {
  let config = StackConfig::from_file(config_path)
    .with_context(|| format!("Failed to load config: {}", config_path.display()))?;
  let destroys_bucket = config.teardown.bucket == TeardownPolicy::Destroy;

  let stack = StaticSiteStack::declare(config).context("Invalid stack configuration")?;
  let covered = stack.covered_names();

  if format.is_json() {
    let value = json!({
      "domain": stack.config.site.domain_name,
      "covered_names": covered,
      "resources": stack.graph.len(),
      "alias_records": stack.graph.count_of(ResourceKind::AliasRecord),
      "teardown_destroys_bucket": destroys_bucket,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    return Ok(());
  }

  print_stat("Domain", &stack.config.site.domain_name);
  print_stat("Covered names", &covered.join(", "));
  print_stat("Resources", &stack.graph.len().to_string());
  print_stat(
    "Alias records",
    &stack.graph.count_of(ResourceKind::AliasRecord).to_string(),
  );

  if destroys_bucket {
    print_warning("bucket teardown policy is 'destroy': contents are deleted irreversibly on stack teardown");
  }

  print_success("configuration is valid");
  Ok(())
}
