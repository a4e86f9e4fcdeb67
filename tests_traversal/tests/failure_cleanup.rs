//! Failure Cleanup Tests
//!
//! Tests that every failed operation releases the handles it acquired
//! before returning the error.

use tests_traversal::{stack_at, test_bootstrap, CountingFs};
use vfs_core::{resolve, FileSystem, FileSystemOperations};
use vfs_types::{FsError, OpenFlags, VfsConfig, DEFAULT_MAX_RECURSION};

fn deep_path(levels: usize) -> String {
    vec!["d"; levels].join("/")
}

#[test]
fn test_too_deep_releases_partial_chain() {
    let path = deep_path(DEFAULT_MAX_RECURSION + 4);
    let backend = CountingFs::with_dirs(&[path.as_str()]);
    let cwd = stack_at(&backend, "").unwrap();

    let err = resolve(&cwd, &path, None, DEFAULT_MAX_RECURSION).unwrap_err();
    assert_eq!(err, FsError::TooDeep);
    assert_eq!(backend.total_live(), 1);
    assert_eq!(backend.over_released(), 0);
}

#[test]
fn test_deepest_reachable_index() {
    let path = deep_path(DEFAULT_MAX_RECURSION);
    let backend = CountingFs::with_dirs(&[path.as_str()]);
    let cwd = stack_at(&backend, "").unwrap();

    let reachable = deep_path(DEFAULT_MAX_RECURSION - 1);
    let traversal = resolve(&cwd, &reachable, None, DEFAULT_MAX_RECURSION).unwrap();
    assert_eq!(traversal.resolved_depth(), DEFAULT_MAX_RECURSION - 1);
    drop(traversal);

    assert_eq!(
        resolve(&cwd, &path, None, DEFAULT_MAX_RECURSION).unwrap_err(),
        FsError::TooDeep
    );
}

#[test]
fn test_too_deep_counts_from_cwd() {
    let backend = CountingFs::with_dirs(&["a/b/c/d"]);
    let mut fs = FileSystem::with_config(VfsConfig {
        max_recursion: 4,
        ..VfsConfig::default()
    });
    fs.set_root(backend.root());
    fs.chdir("a/b").unwrap();

    assert!(fs.stat("c").is_ok());
    assert_eq!(fs.stat("c/d").unwrap_err(), FsError::TooDeep);
    assert_eq!(fs.stat("../b/c").unwrap(), fs.stat("c").unwrap());
    assert_eq!(backend.total_live(), 3);
}

#[test]
fn test_injected_lookup_failure_passes_through() {
    let backend = CountingFs::with_dirs(&["a/b/c"]);
    backend.fail_lookup("c", FsError::Backend("io error".to_string()));
    let cwd = stack_at(&backend, "").unwrap();

    let err = resolve(&cwd, "a/b/c", None, DEFAULT_MAX_RECURSION).unwrap_err();
    assert_eq!(err, FsError::Backend("io error".to_string()));
    assert_eq!(backend.total_live(), 1);
    assert_eq!(backend.over_released(), 0);
}

#[test]
fn test_failure_after_unwinding_leaves_cwd_intact() {
    let backend = CountingFs::with_dirs(&["a/b/c"]);
    backend.fail_lookup("x", FsError::NotFound);
    let cwd = stack_at(&backend, "a/b/c").unwrap();
    backend.clear_log();

    let err = resolve(&cwd, "../../b/x", None, DEFAULT_MAX_RECURSION).unwrap_err();
    assert_eq!(err, FsError::NotFound);
    assert_eq!(backend.release_log(), vec!["a/b"]);
    assert_eq!(backend.live("a/b/c"), 1);
    assert_eq!(backend.live("a/b"), 1);
}

#[test]
fn test_create_with_missing_parent() {
    let (backend, fs) = test_bootstrap(&["a"]);

    let result = fs.open("a/missing/new.txt", OpenFlags::WRITE | OpenFlags::CREATE);
    assert!(matches!(result, Err(FsError::NotFound)));
    assert!(!backend.exists("a/missing/new.txt"));
    assert_eq!(backend.total_live(), 1);
}

#[test]
fn test_chdir_failure_keeps_stack() {
    let (backend, mut fs) = test_bootstrap(&["a/b"]);
    fs.chdir("a/b").unwrap();
    backend.clear_log();

    assert_eq!(fs.chdir("../nope").unwrap_err(), FsError::NotFound);
    assert!(backend.release_log().is_empty());
    assert_eq!(fs.getcwd().unwrap(), "/a/b");
}

#[test]
fn test_realpath_too_long_releases() {
    let backend = CountingFs::with_dirs(&["abcdefgh/abcdefgh"]);
    let mut fs = FileSystem::with_config(VfsConfig {
        path_max: 12,
        ..VfsConfig::default()
    });
    fs.set_root(backend.root());

    assert_eq!(
        fs.realpath("abcdefgh/abcdefgh").unwrap_err(),
        FsError::NameTooLong
    );
    assert_eq!(backend.total_live(), 1);
}
