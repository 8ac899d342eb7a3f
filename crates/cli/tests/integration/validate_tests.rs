use super::common::TestEnv;

#[test]
fn test_validate_accepts_a_good_config() {
  let env = TestEnv::new("ecme", false);

  let output = env
    .sitestack_cmd()
    .args(["validate", env.config_path.to_str().unwrap()])
    .output()
    .unwrap();
  assert!(output.status.success());
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("site.example.com"));
}

#[test]
fn test_validate_json_output() {
  let env = TestEnv::new("ecme", true);

  let output = env
    .sitestack_cmd()
    .args(["validate", env.config_path.to_str().unwrap(), "-o", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let parsed: serde_json::Value = serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
  assert_eq!(parsed["domain"], "site.example.com");
  assert_eq!(parsed["alias_records"], 2);
  assert_eq!(
    parsed["covered_names"],
    serde_json::json!(["site.example.com", "www.site.example.com"])
  );
  assert_eq!(parsed["teardown_destroys_bucket"], false);
}

#[test]
fn test_validate_rejects_unknown_fields() {
  let env = TestEnv::new("ecme", false);
  let raw = std::fs::read_to_string(&env.config_path).unwrap();
  std::fs::write(&env.config_path, format!("{raw}\n[mystery]\nvalue = 1\n")).unwrap();

  let output = env
    .sitestack_cmd()
    .args(["validate", env.config_path.to_str().unwrap()])
    .output()
    .unwrap();
  assert!(!output.status.success());
}
