use super::common::TestEnv;

#[test]
fn test_deploy_writes_manifest() {
  let env = TestEnv::new("ecme", false);
  let manifest = env.deploy_manifest();

  assert_eq!(manifest["bucket"], "EcmeSiteBucket");
  assert_eq!(manifest["distribution"], "EcmeSiteDistribution");
  assert_eq!(manifest["invalidation_paths"], serde_json::json!(["/*"]));

  let files = manifest["assets"]["files"].as_object().unwrap();
  assert_eq!(files.len(), 2);
  assert!(files.contains_key("index.html"));
  assert!(files.contains_key("error.html"));
}

#[test]
fn test_redeploy_is_idempotent() {
  // Two deploys of the same tree invalidate /* both times and produce the
  // exact same manifest.
  let env = TestEnv::new("ecme", false);
  let first = env.deploy_manifest();
  let second = env.deploy_manifest();

  assert_eq!(first, second);
  assert_eq!(second["invalidation_paths"], serde_json::json!(["/*"]));
}

#[test]
fn test_changed_assets_change_the_manifest() {
  let env = TestEnv::new("ecme", false);
  let first = env.deploy_manifest();

  env.write_file("dist/index.html", "<html>updated</html>");
  let second = env.deploy_manifest();

  assert_ne!(first["assets"]["tree_hash"], second["assets"]["tree_hash"]);
  assert_eq!(second["invalidation_paths"], serde_json::json!(["/*"]));
}

#[test]
fn test_nested_assets_keep_relative_paths() {
  let env = TestEnv::new("ecme", false);
  env.write_file("dist/css/app.css", "body{}");
  env.write_file("dist/js/app.js", "console.log(1)");

  let manifest = env.deploy_manifest();
  let files = manifest["assets"]["files"].as_object().unwrap();
  assert!(files.contains_key("css/app.css"));
  assert!(files.contains_key("js/app.js"));
}

#[test]
fn test_missing_asset_dir_fails() {
  let env = TestEnv::new("ecme", false);
  std::fs::remove_dir_all(env.asset_dir()).unwrap();

  let output = env
    .sitestack_cmd()
    .args([
      "deploy",
      env.config_path.to_str().unwrap(),
      "--out",
      env.out_dir().to_str().unwrap(),
    ])
    .output()
    .unwrap();
  assert!(!output.status.success());
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("asset"), "unexpected error output: {stderr}");
}
