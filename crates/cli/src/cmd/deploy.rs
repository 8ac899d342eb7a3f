//! Implementation of the `sitestack deploy` command.
//!
//! Stages the local asset tree into a deploy manifest: the file set to upload
//! verbatim plus the cache invalidation to issue after the upload. Every
//! deploy invalidates the whole cache.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::info;

use sitestack_lib::config::StackConfig;
use sitestack_lib::stack::StaticSiteStack;

use crate::output::{format_bytes, print_stat, print_success};

pub fn cmd_deploy(config_path: &Path, out_dir: &Path) -> Result<()> {
  let config = StackConfig::from_file(config_path)
    .with_context(|| format!("Failed to load config: {}", config_path.display()))?;

  let stack = StaticSiteStack::declare(config).context("Failed to declare stack")?;
  let manifest = stack.deployment.stage().context("Failed to stage assets")?;

  let deploy = json!({
    "bucket": stack.deployment.bucket_id,
    "distribution": stack.deployment.distribution_id,
    "invalidation_paths": stack.deployment.invalidation_paths,
    "assets": manifest,
  });

  fs::create_dir_all(out_dir)
    .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;
  let manifest_path = out_dir.join("deploy.json");
  fs::write(&manifest_path, serde_json::to_string_pretty(&deploy)?)
    .with_context(|| format!("Failed to write deploy manifest: {}", manifest_path.display()))?;
  info!(path = %manifest_path.display(), "deploy manifest written");

  println!("Deploy: {}", manifest.tree_hash);
  print_stat("Files", &manifest.len().to_string());
  print_stat("Size", &format_bytes(manifest.total_bytes()));
  print_stat("Invalidation", &stack.deployment.invalidation_paths.join(", "));
  print_stat("Path", &manifest_path.display().to_string());

  print_success("deploy manifest ready");
  Ok(())
}
