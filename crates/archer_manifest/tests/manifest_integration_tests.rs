//! Integration tests for manifest decoding.

use archer_manifest::{decode, AppManifest, AppType, ManifestError};

const FRONTEND: &str = r#"
# The manifest for the "frontend" application.
name: frontend
type: Load Balanced Web App

image:
  build: frontend/Dockerfile
  port: 80

http:
  path: '*'

cpu: 256
memory: 512
count: 1

secrets:
  GITHUB_TOKEN: GH_TOKEN_SECRET

environments:
  test:
    count: 2
"#;

#[test]
fn test_decode_load_balanced_web_app() {
    let manifest = decode(FRONTEND.as_bytes()).unwrap();

    assert_eq!(manifest.name(), "frontend");
    assert_eq!(manifest.app_type(), AppType::LoadBalancedWebApp);

    let AppManifest::LoadBalancedWebApp(app) = manifest;
    assert_eq!(app.image.port, 80);
    assert_eq!(app.image.build.as_deref(), Some("frontend/Dockerfile"));
    assert_eq!(app.secrets["GITHUB_TOKEN"], "GH_TOKEN_SECRET");
    assert_eq!(app.env_config("test").count, 2);
    assert_eq!(app.env_config("prod").count, 1);
}

#[test]
fn test_decode_every_supported_type() {
    for app_type in AppType::all() {
        let raw = format!(
            "name: svc\ntype: {}\nimage:\n  port: 8080\n",
            app_type.as_str()
        );
        let manifest = decode(raw.as_bytes()).unwrap();
        assert_eq!(manifest.app_type(), app_type);
    }
}

#[test]
fn test_decode_unsupported_type() {
    let raw = FRONTEND.replace("Load Balanced Web App", "Scheduled Job");
    let err = decode(raw.as_bytes()).unwrap_err();
    assert!(matches!(err, ManifestError::UnsupportedType { ref found, .. } if found == "Scheduled Job"));
}

#[test]
fn test_decode_wrong_field_shape_is_malformed() {
    let raw = FRONTEND.replace("port: 80", "port: eighty");
    let err = decode(raw.as_bytes()).unwrap_err();
    assert!(matches!(err, ManifestError::Malformed(_)));
}

#[test]
fn test_decode_missing_image_is_malformed() {
    let raw = "name: frontend\ntype: Load Balanced Web App\n";
    let err = decode(raw.as_bytes()).unwrap_err();
    assert!(matches!(err, ManifestError::Malformed(_)));
}

#[test]
fn test_rule_path_follows_environment_override() {
    let raw = format!("{FRONTEND}  prod:\n    http:\n      path: 'web'\n");
    let manifest = decode(raw.as_bytes()).unwrap();
    assert_eq!(manifest.rule_path("test"), "*");
    assert_eq!(manifest.rule_path("prod"), "web");
}
