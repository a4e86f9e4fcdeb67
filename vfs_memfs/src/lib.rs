//! # In-Memory Backends
//!
//! Two backends implementing the inode capability contract:
//!
//! - [`MemFs`]: a tree of directories and byte-content files held in memory
//! - [`RootFs`]: a root directory whose children are other backends, attached
//!   by name through `mount`
//!
//! `MemFs` keeps count of the handles it hands out so callers can check that
//! every handle acquired through it has been released.

pub mod memfs;
pub mod rootfs;

pub use memfs::MemFs;
pub use rootfs::RootFs;
