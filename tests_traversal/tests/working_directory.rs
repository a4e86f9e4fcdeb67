//! Working Directory Tests
//!
//! Tests that `chdir` commits traversals correctly and that `realpath`
//! reproduces the canonical form of the paths it was given.

use tests_traversal::test_bootstrap;
use vfs_core::FileSystemOperations;

#[test]
fn test_chdir_then_realpath() {
    let (_backend, mut fs) = test_bootstrap(&["a/b"]);

    fs.chdir("a/b").unwrap();
    assert_eq!(fs.realpath(".").unwrap(), "/a/b");
}

#[test]
fn test_round_trip_canonical_forms() {
    let (_backend, mut fs) = test_bootstrap(&["a/b/c", "a/x", "y"]);

    let cases = [
        ("a", "/a"),
        ("a/b/c", "/a/b/c"),
        ("./a/./b", "/a/b"),
        ("a/b/../x", "/a/x"),
        ("a/b/c/../../../y", "/y"),
        ("..", "/"),
        ("a/../..", "/"),
        ("//a///b//", "/a/b"),
    ];

    for (path, canonical) in cases {
        fs.chdir("/").unwrap();
        fs.chdir(path).unwrap();
        assert_eq!(fs.getcwd().unwrap(), canonical, "chdir({path:?})");
    }
}

#[test]
fn test_relative_chdir_reuses_stack() {
    let (backend, mut fs) = test_bootstrap(&["a/b/c"]);
    fs.chdir("a").unwrap();
    let acquired = backend.acquired();
    backend.clear_log();

    fs.chdir("b/c").unwrap();
    assert_eq!(backend.acquired() - acquired, 2);
    assert!(backend.release_log().is_empty());
    assert_eq!(fs.cwd_depth(), 3);
}

#[test]
fn test_chdir_up_releases_abandoned_entries() {
    let (backend, mut fs) = test_bootstrap(&["a/b/c", "a/x"]);
    fs.chdir("a/b/c").unwrap();
    backend.clear_log();

    fs.chdir("../../x").unwrap();
    assert_eq!(backend.release_log(), vec!["a/b/c", "a/b"]);
    assert_eq!(backend.live("a"), 1);
    assert_eq!(backend.live("a/x"), 1);
    assert_eq!(fs.getcwd().unwrap(), "/a/x");
}

#[test]
fn test_absolute_chdir_replaces_whole_chain() {
    let (backend, mut fs) = test_bootstrap(&["a/b", "a/c"]);
    fs.chdir("a/b").unwrap();
    backend.clear_log();

    fs.chdir("/a/c").unwrap();
    // The new chain looked up its own "a"; the old one is released
    assert_eq!(backend.release_log(), vec!["a/b", "a"]);
    assert_eq!(backend.live("a"), 1);
    assert_eq!(backend.total_live(), 3);
}

#[test]
fn test_chdir_rejects_files() {
    let (backend, mut fs) = test_bootstrap(&["a"]);
    backend.add_file("a/notes.txt").unwrap();

    let err = fs.chdir("a/notes.txt").unwrap_err();
    assert_eq!(err, vfs_types::FsError::NotADirectory);
    assert_eq!(fs.cwd_depth(), 0);
    assert_eq!(backend.total_live(), 1);
}

#[test]
fn test_set_root_releases_old_chain() {
    let (backend, mut fs) = test_bootstrap(&["a/b"]);
    fs.chdir("a/b").unwrap();

    let replacement = tests_traversal::CountingFs::new();
    fs.set_root(replacement.root());
    assert_eq!(backend.total_live(), 0);
    assert_eq!(backend.over_released(), 0);
    assert_eq!(fs.cwd_depth(), 0);
    assert_eq!(fs.getcwd().unwrap(), "/");
}

#[test]
fn test_context_drop_releases_everything() {
    let (backend, mut fs) = test_bootstrap(&["a/b"]);
    fs.chdir("a/b").unwrap();
    drop(fs);

    assert_eq!(backend.total_live(), 0);
    assert_eq!(backend.acquired(), backend.released());
}
