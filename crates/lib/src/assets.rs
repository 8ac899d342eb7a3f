//! The deployment job: asset staging and cache invalidation.
//!
//! A deploy copies the local asset tree verbatim into the bucket and then
//! invalidates the entire distribution cache. Staging only reads the tree
//! and produces a manifest; the actual transfer belongs to the provisioning
//! engine. Invalidating everything on every deploy trades edge efficiency
//! for guaranteed freshness.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use walkdir::WalkDir;

use crate::consts::INVALIDATE_ALL;
use crate::error::StackError;
use crate::graph::{ResourceKind, ResourceNode};
use crate::naming::logical_id;
use crate::template::reference;
use crate::util::hash::{ContentHash, hash_bytes, hash_file};

/// One file in the staged asset tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAsset {
  pub sha256: ContentHash,
  pub size: u64,
}

/// Deterministic description of the asset tree at staging time.
///
/// Paths are relative to the asset directory and sorted, so staging an
/// unchanged tree twice produces the same manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetManifest {
  pub files: BTreeMap<String, FileAsset>,
  pub tree_hash: ContentHash,
}

impl AssetManifest {
  pub fn len(&self) -> usize {
    self.files.len()
  }

  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }

  pub fn total_bytes(&self) -> u64 {
    self.files.values().map(|f| f.size).sum()
  }
}

/// The one-shot deploy step: upload the tree, then flush the whole cache.
#[derive(Debug, Clone)]
pub struct DeploymentJob {
  pub logical_id: String,
  pub source_dir: PathBuf,
  pub bucket_id: String,
  pub distribution_id: String,
  /// Always the full-flush pattern; partial invalidation is not offered.
  pub invalidation_paths: Vec<String>,
}

impl DeploymentJob {
  pub fn declare(prefix: &str, source_dir: &Path, bucket_id: &str, distribution_id: &str) -> Self {
    Self {
      logical_id: logical_id(prefix, "bucket-deployment"),
      source_dir: source_dir.to_path_buf(),
      bucket_id: bucket_id.to_string(),
      distribution_id: distribution_id.to_string(),
      invalidation_paths: vec![INVALIDATE_ALL.to_string()],
    }
  }

  /// Walk the asset tree and compute its manifest.
  ///
  /// Fails if the directory is missing. An empty directory stages an empty
  /// manifest; deploying nothing is legal, if unusual.
  pub fn stage(&self) -> Result<AssetManifest, StackError> {
    if !self.source_dir.is_dir() {
      return Err(StackError::AssetDirMissing(self.source_dir.display().to_string()));
    }

    let mut files = BTreeMap::new();
    for entry in WalkDir::new(&self.source_dir).sort_by_file_name() {
      let entry = entry.map_err(|e| StackError::AssetRead {
        path: self.source_dir.display().to_string(),
        message: e.to_string(),
      })?;
      if !entry.file_type().is_file() {
        continue;
      }

      let rel_path = entry
        .path()
        .strip_prefix(&self.source_dir)
        .unwrap_or(entry.path())
        .to_string_lossy()
        .replace('\\', "/");
      let sha256 = hash_file(entry.path())?;
      let size = entry
        .metadata()
        .map_err(|e| StackError::AssetRead {
          path: entry.path().display().to_string(),
          message: e.to_string(),
        })?
        .len();
      files.insert(rel_path, FileAsset { sha256, size });
    }

    let tree_hash = manifest_tree_hash(&files);
    debug!(files = files.len(), "staged asset tree");
    Ok(AssetManifest { files, tree_hash })
  }

  /// Graph node for the deploy step. It runs only once both the bucket and
  /// the distribution exist.
  pub fn into_node(self) -> ResourceNode {
    let properties = json!({
      "SourceDir": self.source_dir.display().to_string(),
      "DestinationBucket": reference(&self.bucket_id),
      "Distribution": reference(&self.distribution_id),
      "DistributionPaths": self.invalidation_paths,
    });

    ResourceNode::new(self.logical_id, ResourceKind::Deployment, "Custom::SiteDeployment", properties)
      .depends_on(&self.bucket_id)
      .depends_on(&self.distribution_id)
  }
}

/// Combined hash over every staged file, stable under re-staging.
fn manifest_tree_hash(files: &BTreeMap<String, FileAsset>) -> ContentHash {
  let mut combined = String::new();
  for (path, asset) in files {
    combined.push_str(path);
    combined.push(':');
    combined.push_str(&asset.sha256.0);
    combined.push('\n');
  }
  hash_bytes(combined.as_bytes())
}
