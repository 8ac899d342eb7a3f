//! Implementation of the `sitestack synth` command.
//!
//! Declares the resource graph for a configuration and writes the rendered
//! template to the output directory for the provisioning engine to pick up.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use sitestack_lib::config::{StackConfig, TeardownPolicy};
use sitestack_lib::graph::ResourceKind;
use sitestack_lib::stack::StaticSiteStack;

use crate::output::{print_stat, print_success, print_warning};

pub fn cmd_synth(config_path: &Path, out_dir: &Path) -> Result<()> {
  let config = StackConfig::from_file(config_path)
    .with_context(|| format!("Failed to load config: {}", config_path.display()))?;
  let destroys_bucket = config.teardown.bucket == TeardownPolicy::Destroy;

  let stack = StaticSiteStack::declare(config).context("Failed to declare stack")?;
  let template = stack.template().context("Failed to render template")?;
  let hash = template.hash().context("Failed to hash template")?;

  fs::create_dir_all(out_dir)
    .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;
  let template_path = out_dir.join("template.json");
  fs::write(&template_path, template.to_json_pretty()?)
    .with_context(|| format!("Failed to write template: {}", template_path.display()))?;
  info!(path = %template_path.display(), "template written");

  println!("Template: {}", hash);
  print_stat("Domain", &stack.config.site.domain_name);
  print_stat("Resources", &stack.graph.len().to_string());
  print_stat(
    "Alias records",
    &stack.graph.count_of(ResourceKind::AliasRecord).to_string(),
  );
  print_stat("Outputs", &stack.outputs.len().to_string());
  print_stat("Path", &template_path.display().to_string());

  if destroys_bucket {
    print_warning("bucket teardown policy is 'destroy': contents are deleted irreversibly on stack teardown");
  }

  print_success("synth complete");
  Ok(())
}
