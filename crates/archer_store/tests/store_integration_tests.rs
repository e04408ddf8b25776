//! Integration tests for the workspace and environment store.

use std::fs;

use archer_store::{
    Environment, EnvironmentStore, FileEnvironmentStore, FsWorkspace, ProjectContext, StoreError,
    Workspace,
};
use tempfile::tempdir;

#[test]
fn test_workspace_and_store_together() {
    let temp = tempdir().unwrap();
    let ws = FsWorkspace::init(temp.path(), Some("demo")).unwrap();
    ws.write_manifest("frontend", "name: frontend\ntype: Load Balanced Web App\n")
        .unwrap();

    let store = FileEnvironmentStore::new(temp.path().join(".archer"));
    store
        .create_environment(&Environment::new("demo", "test", "123", "us-east-1"))
        .unwrap();

    let nested = temp.path().join("frontend");
    fs::create_dir_all(&nested).unwrap();
    let found = FsWorkspace::discover(&nested).unwrap();

    let ctx = ProjectContext::resolve(None, &found).unwrap();
    let project = ctx.name().unwrap();
    assert_eq!(project, "demo");

    let apps = found.app_names().unwrap();
    assert_eq!(apps, vec!["frontend"]);

    let raw = found
        .read_manifest_file(&found.manifest_file_name(&apps[0]))
        .unwrap();
    assert!(String::from_utf8(raw).unwrap().starts_with("name: frontend"));

    let env = store.get_environment(project, "test").unwrap();
    assert_eq!(env.region, "us-east-1");
}

#[test]
fn test_invalid_environment_record() {
    let temp = tempdir().unwrap();
    let store = FileEnvironmentStore::new(temp.path());
    let dir = temp.path().join("demo").join("environments");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("test.yml"), "name: test\n").unwrap();

    let err = store.get_environment("demo", "test").unwrap_err();
    assert!(matches!(err, StoreError::InvalidEnvironment { .. }));
}

#[test]
fn test_open_requires_workspace_dir() {
    let temp = tempdir().unwrap();
    assert!(FsWorkspace::open(temp.path()).is_err());

    FsWorkspace::init(temp.path(), None).unwrap();
    assert!(FsWorkspace::open(temp.path()).is_ok());
}
