//! # VFS Console
//!
//! A line-oriented console over an in-memory filesystem.
//! It is NOT a shell and NOT intended for POSIX compatibility.
//!
//! The namespace it boots with:
//!
//! - `/ram`: an empty writable backend
//! - `/rom`: a backend holding `motd`

pub mod commands;

use commands::CommandHandler;
use tracing::info;
use vfs_core::FileSystem;
use vfs_memfs::{MemFs, RootFs};
use vfs_types::{FsResult, VfsConfig};

/// Message of the day stored in `/rom/motd`
pub const MOTD: &str = "Welcome to the VFS console. Type `help` for commands.\n";

/// A booted console and the backends behind it
pub struct Console {
    /// Command handler owning the filesystem context
    pub handler: CommandHandler<FileSystem>,
    /// Mount-table root
    pub rootfs: RootFs,
    /// Backend mounted at `/ram`
    pub ram: MemFs,
    /// Backend mounted at `/rom`
    pub rom: MemFs,
}

/// Bootstrap function
///
/// Builds the backends, installs the mount-table root and mounts `ram` and
/// `rom` under it. Everything is explicit and returned to the caller; there
/// is no global filesystem.
pub fn bootstrap(config: VfsConfig) -> FsResult<Console> {
    let rootfs = RootFs::new();
    let ram = MemFs::new();
    let rom = MemFs::new();
    rom.write_file("motd", MOTD.as_bytes())?;

    let mut fs = FileSystem::with_config(config);
    fs.set_root(rootfs.root());
    fs.mount("ram", ram.root())?;
    fs.mount("rom", rom.root())?;
    info!(mounts = ?rootfs.mount_names(), "console filesystem ready");

    Ok(Console {
        handler: CommandHandler::new(fs),
        rootfs,
        ram,
        rom,
    })
}
