//! Working-directory stack
//!
//! The chain of nodes from the root to the current directory. Index 0 is
//! the root, stored under an empty name; every later entry is one directory
//! below the previous one. Only root installation and a successful `chdir`
//! change it.

use tracing::trace;
use vfs_inode::InodeHandle;

/// A resolved node together with the path segment that named it
#[derive(Debug)]
pub struct NamedInode {
    /// Owned handle to the node
    pub inode: InodeHandle,
    /// Last path segment; empty for the root
    pub name: String,
}

impl NamedInode {
    /// Pairs a handle with its name
    pub fn new(inode: InodeHandle, name: impl Into<String>) -> Self {
        Self {
            inode,
            name: name.into(),
        }
    }

    /// Releases the node
    pub fn release(self) {
        self.inode.release()
    }
}

/// Root-to-current-directory chain
///
/// Entries are always released deepest first, root last.
#[derive(Debug, Default)]
pub struct CwdStack {
    entries: Vec<NamedInode>,
}

impl CwdStack {
    /// Creates an empty stack with no root installed
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// True once a root has been installed
    pub fn has_root(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Index of the current directory; 0 at the root
    pub fn depth(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    /// The root entry, if one is installed
    pub fn root(&self) -> Option<&NamedInode> {
        self.entries.first()
    }

    /// The current directory, if a root is installed
    pub fn current(&self) -> Option<&NamedInode> {
        self.entries.last()
    }

    /// The whole chain, root first
    pub fn entries(&self) -> &[NamedInode] {
        &self.entries
    }

    /// Replaces the whole chain with a new root at depth 0
    ///
    /// Every previously held entry is released, including the old root.
    pub fn install_root(&mut self, root: InodeHandle) {
        self.clear();
        self.entries.push(NamedInode::new(root, String::new()));
    }

    /// Commits a resolved chain as the new current directory
    ///
    /// Entries `0..=borrowed_depth` are kept; everything above them is
    /// released and replaced by `owned`, whose handles move into the stack.
    pub fn commit(&mut self, borrowed_depth: usize, owned: Vec<NamedInode>) {
        self.truncate(borrowed_depth + 1);
        self.entries.extend(owned);
    }

    /// Releases every entry, leaving no root installed
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    fn truncate(&mut self, len: usize) {
        while self.entries.len() > len {
            if let Some(entry) = self.entries.pop() {
                trace!(name = %entry.name, depth = self.entries.len(), "cwd entry released");
                entry.release();
            }
        }
    }
}

impl Drop for CwdStack {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use vfs_inode::Inode;
    use vfs_types::{FsResult, NodeId};

    type Log = Rc<RefCell<Vec<String>>>;

    struct Logged {
        id: NodeId,
        name: String,
        log: Log,
    }

    impl Inode for Logged {
        fn node_id(&self) -> NodeId {
            self.id
        }

        fn is_dir(&self) -> FsResult<bool> {
            Ok(true)
        }

        fn release(&mut self) {
            self.log.borrow_mut().push(self.name.clone());
        }
    }

    fn named(name: &str, log: &Log) -> NamedInode {
        NamedInode::new(handle(name, log), name)
    }

    fn handle(name: &str, log: &Log) -> InodeHandle {
        InodeHandle::new(Logged {
            id: NodeId::new(),
            name: name.to_string(),
            log: log.clone(),
        })
    }

    fn names(stack: &CwdStack) -> Vec<&str> {
        stack.entries().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_empty_stack() {
        let stack = CwdStack::new();
        assert!(!stack.has_root());
        assert_eq!(stack.depth(), 0);
        assert!(stack.root().is_none());
    }

    #[test]
    fn test_install_root() {
        let log = Log::default();
        let mut stack = CwdStack::new();
        stack.install_root(handle("root", &log));

        assert!(stack.has_root());
        assert_eq!(stack.depth(), 0);
        assert_eq!(names(&stack), vec![""]);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_commit_releases_replaced_entries_deepest_first() {
        let log = Log::default();
        let mut stack = CwdStack::new();
        stack.install_root(handle("root", &log));
        stack.commit(0, vec![named("a", &log), named("b", &log), named("c", &log)]);
        assert_eq!(stack.depth(), 3);

        stack.commit(1, vec![named("x", &log)]);
        assert_eq!(names(&stack), vec!["", "a", "x"]);
        assert_eq!(*log.borrow(), vec!["c", "b"]);
    }

    #[test]
    fn test_commit_without_new_entries() {
        let log = Log::default();
        let mut stack = CwdStack::new();
        stack.install_root(handle("root", &log));
        stack.commit(0, vec![named("a", &log), named("b", &log)]);

        stack.commit(2, Vec::new());
        assert_eq!(stack.depth(), 2);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_reinstall_root_releases_whole_chain() {
        let log = Log::default();
        let mut stack = CwdStack::new();
        stack.install_root(handle("old", &log));
        stack.commit(0, vec![named("a", &log), named("b", &log)]);

        stack.install_root(handle("new", &log));
        assert_eq!(*log.borrow(), vec!["b", "a", "old"]);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_drop_releases_root_last() {
        let log = Log::default();
        {
            let mut stack = CwdStack::new();
            stack.install_root(handle("root", &log));
            stack.commit(0, vec![named("a", &log)]);
        }
        assert_eq!(*log.borrow(), vec!["a", "root"]);
    }
}
