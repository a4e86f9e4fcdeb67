//! Filesystem context
//!
//! [`FileSystem`] owns the root and the working-directory stack. Nothing in
//! it is global: each context is independent, and dropping one releases
//! every node it still holds.

use crate::cwd::CwdStack;
use crate::operations::FileSystemOperations;
use crate::traversal::{resolve, Traversal};
use tracing::{debug, info};
use vfs_inode::{InodeHandle, OpenDir, OpenFile};
use vfs_path::{is_valid_name, split_parent};
use vfs_types::{FsError, FsResult, OpenFlags, Stat, VfsConfig};

/// A virtual filesystem context
///
/// No path operation succeeds until [`set_root`](FileSystem::set_root) has
/// installed a root; before that they fail with `InternalError`.
#[derive(Debug)]
pub struct FileSystem {
    config: VfsConfig,
    cwd: CwdStack,
}

impl FileSystem {
    /// Creates a context with the default limits
    pub fn new() -> Self {
        Self::with_config(VfsConfig::default())
    }

    /// Creates a context with the given limits
    pub fn with_config(config: VfsConfig) -> Self {
        Self {
            config,
            cwd: CwdStack::new(),
        }
    }

    /// Returns the limits in effect
    pub fn config(&self) -> &VfsConfig {
        &self.config
    }

    /// True once a root has been installed
    pub fn has_root(&self) -> bool {
        self.cwd.has_root()
    }

    /// Depth of the current directory below the root
    pub fn cwd_depth(&self) -> usize {
        self.cwd.depth()
    }

    /// Installs `root` and makes it the current directory
    ///
    /// Any previous root is released together with the rest of the old
    /// working-directory chain.
    pub fn set_root(&mut self, root: InodeHandle) {
        info!(node = %root.node_id(), replaced = self.cwd.has_root(), "root installed");
        self.cwd.install_root(root);
    }

    /// Attaches `inode` under the root as `name`
    ///
    /// The root must already be installed, and its backend must keep a
    /// mount table.
    pub fn mount(&self, name: &str, inode: InodeHandle) -> FsResult<()> {
        let root = self.cwd.root().ok_or(FsError::InternalError)?;
        root.inode.mount(name, inode)?;
        info!(name, "mounted");
        Ok(())
    }

    fn resolve(&self, path: &str) -> FsResult<Traversal<'_>> {
        resolve(&self.cwd, path, None, self.config.max_recursion)
    }

    /// Resolves the parent of `path` and hands it the leaf name
    fn create_child(
        &self,
        path: &str,
        create: impl FnOnce(&InodeHandle, &str) -> FsResult<()>,
    ) -> FsResult<()> {
        let (parent_len, leaf) = split_parent(path);
        is_valid_name(leaf)?;
        let parent = resolve(
            &self.cwd,
            path,
            Some(parent_len),
            self.config.max_recursion,
        )?;
        create(&parent.terminal().inode, leaf)
    }
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemOperations for FileSystem {
    fn open(&self, path: &str, flags: OpenFlags) -> FsResult<Box<dyn OpenFile>> {
        if flags.creates() {
            match self.create_child(path, |parent, leaf| parent.create_file(leaf)) {
                Ok(()) => debug!(path, "file created"),
                Err(FsError::AlreadyExists) if !flags.is_exclusive() => {}
                Err(err) => return Err(err),
            }
        }

        let traversal = self.resolve(path)?;
        let file = traversal.terminal().inode.open_as_file(flags)?;
        Ok(file)
    }

    fn opendir(&self, path: &str) -> FsResult<Box<dyn OpenDir>> {
        let traversal = self.resolve(path)?;
        let dir = traversal.terminal().inode.open_as_dir()?;
        Ok(dir)
    }

    fn chdir(&mut self, path: &str) -> FsResult<()> {
        let traversal = self.resolve(path)?;
        if !traversal.terminal().inode.is_dir()? {
            return Err(FsError::NotADirectory);
        }

        let (borrowed_depth, owned) = traversal.into_owned();
        self.cwd.commit(borrowed_depth, owned);
        debug!(path, depth = self.cwd.depth(), "chdir");
        Ok(())
    }

    fn stat(&self, path: &str) -> FsResult<Stat> {
        let traversal = self.resolve(path)?;
        let is_directory = traversal.terminal().inode.is_dir()?;
        Ok(Stat { is_directory })
    }

    fn realpath(&self, path: &str) -> FsResult<String> {
        let traversal = self.resolve(path)?;

        // Each name costs one byte more for its separator; the root's
        // empty name accounts for the terminator.
        let mut len = 0;
        for name in traversal.names() {
            len += name.len() + 1;
            if len > self.config.path_max {
                return Err(FsError::NameTooLong);
            }
        }

        let mut canonical = String::with_capacity(len);
        for name in traversal.names().skip(1) {
            canonical.push('/');
            canonical.push_str(name);
        }
        if canonical.is_empty() {
            canonical.push('/');
        }
        Ok(canonical)
    }

    fn mkdir(&self, path: &str) -> FsResult<()> {
        self.create_child(path, |parent, leaf| parent.create_dir(leaf))?;
        debug!(path, "directory created");
        Ok(())
    }
}
