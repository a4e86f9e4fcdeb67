//! # Inode Capabilities
//!
//! This crate defines the contract between the path layer and the backends
//! that actually hold files and directories.
//!
//! ## Design
//!
//! - A backend implements [`Inode`] for its node type
//! - The path layer only ever holds nodes through an [`InodeHandle`]
//! - An `InodeHandle` owns its node and releases it exactly once, when it
//!   is dropped or explicitly [`released`](InodeHandle::release)
//! - Opening a node yields a session ([`OpenFile`] or [`OpenDir`]) that is
//!   independent of the handle it was opened from

pub mod handle;
pub mod inode;
pub mod session;

pub use handle::InodeHandle;
pub use inode::Inode;
pub use session::{DirEntry, OpenDir, OpenFile};
