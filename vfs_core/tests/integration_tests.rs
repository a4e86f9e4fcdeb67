//! Integration tests for the filesystem context
//!
//! These tests drive the public operations over the in-memory backends:
//! - Mounting backends under a root
//! - Directory creation and listing
//! - File creation, writing and reading back
//! - Working-directory changes across mount points

use vfs_core::{FileSystem, FileSystemOperations};
use vfs_memfs::{MemFs, RootFs};
use vfs_types::{FsError, OpenFlags, VfsConfig};

fn mounted() -> (RootFs, MemFs, MemFs, FileSystem) {
    let rootfs = RootFs::new();
    let sd = MemFs::new();
    let rom = MemFs::new();
    rom.create_dir_all("etc").unwrap();
    rom.write_file("etc/motd", b"welcome\n").unwrap();

    let mut fs = FileSystem::new();
    fs.set_root(rootfs.root());
    fs.mount("sd", sd.root()).unwrap();
    fs.mount("rom", rom.root()).unwrap();
    (rootfs, sd, rom, fs)
}

#[test]
fn test_complete_directory_workflow() {
    let (_rootfs, sd, _rom, mut fs) = mounted();

    fs.mkdir("/sd/docs").unwrap();
    fs.mkdir("/sd/docs/projects").unwrap();
    fs.chdir("/sd/docs/projects").unwrap();

    let mut file = fs
        .open("readme.txt", OpenFlags::WRITE | OpenFlags::CREATE)
        .unwrap();
    file.write(b"# notes").unwrap();
    drop(file);

    assert_eq!(fs.getcwd().unwrap(), "/sd/docs/projects");
    assert_eq!(sd.read_file("docs/projects/readme.txt").unwrap(), b"# notes");
    assert!(!fs.stat("readme.txt").unwrap().is_directory);
}

#[test]
fn test_backends_are_isolated() {
    let (_rootfs, sd, rom, fs) = mounted();

    fs.mkdir("/sd/secret").unwrap();
    assert!(sd.exists("secret"));
    assert!(!rom.exists("secret"));
    assert_eq!(fs.stat("/rom/secret").unwrap_err(), FsError::NotFound);
}

#[test]
fn test_parent_walks_back_across_mount() {
    let (_rootfs, _sd, _rom, mut fs) = mounted();

    fs.chdir("/rom/etc").unwrap();
    fs.chdir("../../sd").unwrap();
    assert_eq!(fs.getcwd().unwrap(), "/sd");

    let mut motd = fs.open("../rom/etc/motd", OpenFlags::READ).unwrap();
    let mut out = Vec::new();
    motd.read_to_end(&mut out).unwrap();
    assert_eq!(out, b"welcome\n");
}

#[test]
fn test_cannot_traverse_through_file() {
    let (_rootfs, _sd, rom, fs) = mounted();

    let result = fs.stat("/rom/etc/motd/more");
    assert_eq!(result.unwrap_err(), FsError::NotADirectory);
    assert_eq!(rom.live_handles(), 1);
}

#[test]
fn test_ls_root_lists_mounts() {
    let (_rootfs, _sd, _rom, fs) = mounted();

    let names: Vec<String> = fs
        .opendir("/")
        .unwrap()
        .entries()
        .unwrap()
        .into_iter()
        .map(|entry| entry.name)
        .collect();
    assert_eq!(names, vec!["rom", "sd"]);
}

#[test]
fn test_duplicate_mount_rejected() {
    let (_rootfs, _sd, _rom, fs) = mounted();
    let extra = MemFs::new();

    assert_eq!(
        fs.mount("sd", extra.root()).unwrap_err(),
        FsError::AlreadyExists
    );
    assert_eq!(extra.live_handles(), 0);
}

#[test]
fn test_mount_needs_root_backend_support() {
    let mem = MemFs::new();
    let mut fs = FileSystem::new();
    fs.set_root(mem.root());

    assert_eq!(
        fs.mount("sd", MemFs::new().root()).unwrap_err(),
        FsError::NotSupported
    );
}

#[test]
fn test_truncate_and_append() {
    let (_rootfs, sd, _rom, fs) = mounted();
    sd.write_file("log", b"first").unwrap();

    let mut file = fs
        .open("/sd/log", OpenFlags::WRITE | OpenFlags::APPEND)
        .unwrap();
    file.write(b"+second").unwrap();
    drop(file);
    assert_eq!(sd.read_file("log").unwrap(), b"first+second");

    let mut file = fs
        .open("/sd/log", OpenFlags::WRITE | OpenFlags::TRUNCATE)
        .unwrap();
    file.write(b"new").unwrap();
    drop(file);
    assert_eq!(sd.read_file("log").unwrap(), b"new");
}

#[test]
fn test_config_limits_depth() {
    let config = VfsConfig::from_json(r#"{ "max_recursion": 3 }"#).unwrap();
    let mem = MemFs::new();
    mem.create_dir_all("a/b/c").unwrap();

    let mut fs = FileSystem::with_config(config);
    fs.set_root(mem.root());

    assert!(fs.stat("a/b").is_ok());
    assert_eq!(fs.stat("a/b/c").unwrap_err(), FsError::TooDeep);
    fs.mkdir("a/b/d").unwrap();
    assert_eq!(mem.live_handles(), 1);
}
