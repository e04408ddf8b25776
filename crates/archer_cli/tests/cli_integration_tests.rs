//! Integration tests for the archer binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

use archer_store::{Environment, FileEnvironmentStore, FsWorkspace};

const FRONTEND: &str = r#"name: frontend
type: Load Balanced Web App
image:
  build: frontend/Dockerfile
  port: 80
http:
  path: '*'
cpu: 256
memory: 512
count: 1
environments:
  prod:
    count: 3
"#;

fn setup_workspace(root: &Path) {
    let ws = FsWorkspace::init(root, Some("demo")).unwrap();
    ws.write_manifest("frontend", FRONTEND).unwrap();

    let store = FileEnvironmentStore::new(root.join(".archer"));
    store
        .create_environment(&Environment::new("demo", "test", "123456789012", "us-east-1"))
        .unwrap();
    store
        .create_environment(
            &Environment::new("demo", "prod", "210987654321", "eu-west-1").production(),
        )
        .unwrap();
}

fn archer(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("archer").unwrap();
    cmd.current_dir(dir)
        .env_remove("ARCHER_PROJECT")
        .env_remove("ARCHER_STORE_DIR")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_package_writes_stack_and_params() {
    let temp = tempdir().unwrap();
    setup_workspace(temp.path());

    archer(temp.path())
        .args(["app", "package", "-n", "frontend", "-e", "test", "--tag", "latest"])
        .args(["--output-dir", "infrastructure"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let out = temp.path().join("infrastructure");
    let template = fs::read_to_string(out.join("frontend.stack.yml")).unwrap();
    assert!(template.starts_with("AWSTemplateFormatVersion"));
    assert!(template.contains("demo-test-frontend-app-ServiceName"));

    let params = fs::read_to_string(out.join("frontend-test.params.json")).unwrap();
    assert!(params.contains(
        "ContainerImage: 123456789012.dkr.ecr.us-east-1.amazonaws.com/demo/test/frontend:latest"
    ));
    assert!(params.contains("TaskCount: 1"));
    assert_eq!(fs::read_dir(&out).unwrap().count(), 2);
}

#[test]
fn test_package_prints_template_to_stdout() {
    let temp = tempdir().unwrap();
    setup_workspace(temp.path());

    archer(temp.path())
        .args(["app", "package", "--name", "frontend", "--env", "prod", "--tag", "v1.2.0"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("AWSTemplateFormatVersion"))
        .stdout(predicate::str::contains("demo-prod-frontend-app-ServiceName"));
}

#[test]
fn test_package_applies_environment_override() {
    let temp = tempdir().unwrap();
    setup_workspace(temp.path());

    archer(temp.path())
        .args(["app", "package", "-n", "frontend", "-e", "prod", "--tag", "latest"])
        .args(["--output-dir", "out"])
        .assert()
        .success();

    let params = fs::read_to_string(temp.path().join("out/frontend-prod.params.json")).unwrap();
    assert!(params.contains("TaskCount: 3"));
    assert!(params.contains("210987654321.dkr.ecr.eu-west-1.amazonaws.com/demo/prod/frontend:latest"));
}

#[test]
fn test_package_unknown_application() {
    let temp = tempdir().unwrap();
    setup_workspace(temp.path());

    archer(temp.path())
        .args(["app", "package", "-n", "backend", "-e", "test", "--tag", "latest"])
        .args(["--output-dir", "out"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("application 'backend' does not exist"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_package_unknown_environment() {
    let temp = tempdir().unwrap();
    setup_workspace(temp.path());

    archer(temp.path())
        .args(["app", "package", "-n", "frontend", "-e", "staging", "--tag", "latest"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("staging"));
}

#[test]
fn test_package_without_project() {
    let temp = tempdir().unwrap();
    let ws = FsWorkspace::init(temp.path(), None).unwrap();
    ws.write_manifest("frontend", FRONTEND).unwrap();

    archer(temp.path())
        .args(["app", "package", "-n", "frontend", "-e", "test", "--tag", "latest"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("could not find a project"));
}

#[test]
fn test_package_project_from_environment_variable() {
    let temp = tempdir().unwrap();
    let ws = FsWorkspace::init(temp.path(), None).unwrap();
    ws.write_manifest("frontend", FRONTEND).unwrap();
    FileEnvironmentStore::new(temp.path().join("envs"))
        .create_environment(&Environment::new("other", "test", "1", "us-east-1"))
        .unwrap();

    archer(temp.path())
        .env("ARCHER_PROJECT", "other")
        .env("ARCHER_STORE_DIR", temp.path().join("envs"))
        .args(["app", "package", "-n", "frontend", "-e", "test", "--tag", "latest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("other-test-frontend-app-ServiceName"));
}

#[test]
fn test_package_invalid_manifest() {
    let temp = tempdir().unwrap();
    setup_workspace(temp.path());
    let ws = FsWorkspace::open(temp.path()).unwrap();
    ws.write_manifest("worker", "name: worker\ntype: Backend Service\n")
        .unwrap();

    archer(temp.path())
        .args(["app", "package", "-n", "worker", "-e", "test", "--tag", "latest"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Backend Service"));
}

#[test]
fn test_outside_workspace() {
    let temp = tempdir().unwrap();

    archer(temp.path())
        .args(["app", "package", "-n", "frontend", "-e", "test", "--tag", "latest"])
        .assert()
        .failure();
}

#[test]
fn test_package_help_lists_flags() {
    let temp = tempdir().unwrap();

    archer(temp.path())
        .args(["app", "package", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--output-dir"))
        .stdout(predicate::str::contains("--tag"));
}
