//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding a generated config,
/// an asset directory, and an output directory.
pub struct TestEnv {
  pub temp: TempDir,
  pub config_path: PathBuf,
}

impl TestEnv {
  /// Create an environment with a generated config and a small asset tree.
  pub fn new(prefix: &str, include_www: bool) -> Self {
    Self::with_config(prefix, include_www, "")
  }

  /// Same as `new`, with extra TOML appended to the config.
  pub fn with_config(prefix: &str, include_www: bool, extra: &str) -> Self {
    let temp = TempDir::new().unwrap();

    let assets = temp.path().join("dist");
    std::fs::create_dir_all(&assets).unwrap();
    std::fs::write(assets.join("index.html"), "<html>hello</html>").unwrap();
    std::fs::write(assets.join("error.html"), "<html>oops</html>").unwrap();

    let config_path = temp.path().join("site.toml");
    let config = format!(
      r#"[site]
resource_prefix = "{prefix}"
hosted_zone_id = "Z10008191COSSLORKT6ZO"
hosted_zone_name = "example.com"
domain_name = "site.example.com"
include_www = {include_www}

[environment]
account = "037729278610"
region = "ap-northeast-2"

[deploy]
asset_dir = "{assets}"

{extra}
"#,
      assets = assets.display()
    );
    std::fs::write(&config_path, config).unwrap();

    Self { temp, config_path }
  }

  pub fn asset_dir(&self) -> PathBuf {
    self.temp.path().join("dist")
  }

  pub fn out_dir(&self) -> PathBuf {
    self.temp.path().join("out")
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Get a Command for the sitestack binary.
  pub fn sitestack_cmd(&self) -> Command {
    cargo_bin_cmd!("sitestack")
  }

  /// Run `synth` and parse the written template.
  pub fn synth_template(&self) -> serde_json::Value {
    let output = self
      .sitestack_cmd()
      .args([
        "synth",
        self.config_path.to_str().unwrap(),
        "--out",
        self.out_dir().to_str().unwrap(),
      ])
      .output()
      .unwrap();
    assert!(
      output.status.success(),
      "synth failed: {}",
      String::from_utf8_lossy(&output.stderr)
    );
    let raw = std::fs::read_to_string(self.out_dir().join("template.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
  }

  /// Run `deploy` and parse the written manifest.
  pub fn deploy_manifest(&self) -> serde_json::Value {
    let output = self
      .sitestack_cmd()
      .args([
        "deploy",
        self.config_path.to_str().unwrap(),
        "--out",
        self.out_dir().to_str().unwrap(),
      ])
      .output()
      .unwrap();
    assert!(
      output.status.success(),
      "deploy failed: {}",
      String::from_utf8_lossy(&output.stderr)
    );
    let raw = std::fs::read_to_string(self.out_dir().join("deploy.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
  }
}
