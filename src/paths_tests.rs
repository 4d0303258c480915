//! Tests for paths module.

use super::*;
use std::env;
use tempfile::tempdir;

#[test]
fn test_resolve_usage_dir_prefers_override() {
    let dir = tempdir().unwrap();
    let resolved = resolve_usage_dir(Some(dir.path())).unwrap();
    assert_eq!(resolved, dir.path());
}

#[test]
fn test_resolve_usage_dir_defaults_to_home() {
    if env::var("HOME").is_err() {
        return;
    }

    let resolved = resolve_usage_dir(None).unwrap();
    assert!(resolved.ends_with(".mcp-google-search"));
}

#[test]
fn test_resolve_usage_dir_does_not_create() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("not-yet");
    let resolved = resolve_usage_dir(Some(target.as_path())).unwrap();
    assert!(!resolved.exists());
}

#[test]
fn test_ensure_dir_creates_parents() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("a").join("b").join("c");
    ensure_dir(&nested).unwrap();
    assert!(nested.is_dir());
}

#[test]
fn test_ensure_dir_existing_is_ok() {
    let dir = tempdir().unwrap();
    ensure_dir(dir.path()).unwrap();
    ensure_dir(dir.path()).unwrap();
    assert!(dir.path().is_dir());
}

#[test]
fn test_usage_file_path() {
    let dir = tempdir().unwrap();
    let path = usage_file_path(dir.path());
    assert!(path.ends_with("usage.json"));
    assert!(path.starts_with(dir.path()));
}
