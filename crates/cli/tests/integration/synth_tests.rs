use super::common::TestEnv;

fn resources_of_type<'a>(template: &'a serde_json::Value, type_name: &str) -> Vec<&'a str> {
  template["Resources"]
    .as_object()
    .unwrap()
    .iter()
    .filter(|(_, entry)| entry["Type"] == type_name)
    .map(|(id, _)| id.as_str())
    .collect()
}

#[test]
fn test_synth_writes_template() {
  let env = TestEnv::new("ecme", false);
  let template = env.synth_template();

  assert!(template["Description"].as_str().unwrap().contains("site.example.com"));
  assert!(template["Resources"].is_object());
  assert!(template["Outputs"].is_object());
}

#[test]
fn test_core_resources_appear_exactly_once() {
  let env = TestEnv::new("ecme", true);
  let template = env.synth_template();

  assert_eq!(resources_of_type(&template, "AWS::S3::Bucket").len(), 1);
  assert_eq!(resources_of_type(&template, "AWS::S3::BucketPolicy").len(), 1);
  assert_eq!(
    resources_of_type(&template, "AWS::CloudFront::CloudFrontOriginAccessIdentity").len(),
    1
  );
  assert_eq!(resources_of_type(&template, "AWS::CertificateManager::Certificate").len(), 1);
  assert_eq!(resources_of_type(&template, "AWS::CloudFront::Distribution").len(), 1);
  assert_eq!(resources_of_type(&template, "Custom::SiteDeployment").len(), 1);
}

#[test]
fn test_record_count_without_www() {
  let env = TestEnv::new("ecme", false);
  let template = env.synth_template();
  assert_eq!(resources_of_type(&template, "AWS::Route53::RecordSet").len(), 1);
}

#[test]
fn test_record_count_with_www() {
  let env = TestEnv::new("ecme", true);
  let template = env.synth_template();
  assert_eq!(resources_of_type(&template, "AWS::Route53::RecordSet").len(), 2);
}

#[test]
fn test_distribution_aliases_match_certificate_names() {
  let env = TestEnv::new("ecme", true);
  let template = env.synth_template();

  let cert = &template["Resources"]["EcmeSiteCertificate"]["Properties"];
  let mut covered = vec![cert["DomainName"].as_str().unwrap().to_string()];
  covered.extend(
    cert["SubjectAlternativeNames"]
      .as_array()
      .unwrap()
      .iter()
      .map(|v| v.as_str().unwrap().to_string()),
  );

  let aliases: Vec<String> = template["Resources"]["EcmeSiteDistribution"]["Properties"]["DistributionConfig"]
    ["Aliases"]
    .as_array()
    .unwrap()
    .iter()
    .map(|v| v.as_str().unwrap().to_string())
    .collect();

  assert_eq!(covered, aliases);
  assert_eq!(covered, vec!["site.example.com", "www.site.example.com"]);
}

#[test]
fn test_bucket_blocks_public_access() {
  let env = TestEnv::new("ecme", false);
  let template = env.synth_template();

  let block = &template["Resources"]["EcmeSiteBucket"]["Properties"]["PublicAccessBlockConfiguration"];
  for key in ["BlockPublicAcls", "BlockPublicPolicy", "IgnorePublicAcls", "RestrictPublicBuckets"] {
    assert_eq!(block[key], serde_json::json!(true));
  }
}

#[test]
fn test_outputs_export_prefix_derived_names() {
  let env = TestEnv::new("myprefix", false);
  let template = env.synth_template();

  let outputs = template["Outputs"].as_object().unwrap();
  let exports: Vec<&str> = outputs
    .values()
    .map(|o| o["Export"]["Name"].as_str().unwrap())
    .collect();
  assert!(exports.contains(&"myprefix-bucket-name"));
  assert!(exports.contains(&"myprefix-distribution"));
}

#[test]
fn test_template_names_the_target_environment() {
  let env = TestEnv::new("ecme", false);
  let template = env.synth_template();
  assert_eq!(template["Metadata"]["Environment"]["Region"], "ap-northeast-2");
  assert_eq!(template["Metadata"]["Environment"]["Account"], "037729278610");
}

#[test]
fn test_certificate_region_is_pinned() {
  let env = TestEnv::new("ecme", false);
  let template = env.synth_template();
  assert_eq!(
    template["Resources"]["EcmeSiteCertificate"]["Metadata"]["Region"],
    "us-east-1"
  );
}

#[test]
fn test_destroy_teardown_warns() {
  let env = TestEnv::with_config("ecme", false, "[teardown]\nbucket = \"destroy\"\n");

  let output = env
    .sitestack_cmd()
    .args([
      "synth",
      env.config_path.to_str().unwrap(),
      "--out",
      env.out_dir().to_str().unwrap(),
    ])
    .output()
    .unwrap();
  assert!(output.status.success());
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("irreversibly"), "no teardown warning in: {stderr}");

  let raw = std::fs::read_to_string(env.out_dir().join("template.json")).unwrap();
  let template: serde_json::Value = serde_json::from_str(&raw).unwrap();
  assert_eq!(template["Resources"]["EcmeSiteBucket"]["DeletionPolicy"], "Delete");
}

#[test]
fn test_domain_outside_zone_fails_fast() {
  let env = TestEnv::new("ecme", false);
  let raw = std::fs::read_to_string(&env.config_path).unwrap();
  std::fs::write(&env.config_path, raw.replace("site.example.com", "site.other.org")).unwrap();

  let output = env
    .sitestack_cmd()
    .args([
      "synth",
      env.config_path.to_str().unwrap(),
      "--out",
      env.out_dir().to_str().unwrap(),
    ])
    .output()
    .unwrap();
  assert!(!output.status.success());
  assert!(!env.out_dir().join("template.json").exists());
}
