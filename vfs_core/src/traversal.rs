//! Path traversal engine
//!
//! A traversal walks a path one segment at a time, starting from either the
//! root or the current working directory. The chain it builds has two
//! parts:
//!
//! - a **borrowed** prefix: a slice of the working-directory stack. These
//!   entries belong to the stack and the traversal can never release them.
//! - an **owned** suffix: handles acquired by `lookup` during this walk.
//!   These are released when `..` steps back over them, when the walk fails,
//!   or when the finished traversal is dropped.
//!
//! Index 0 is always the starting root or the stack's root. The
//! borrowed prefix always keeps at least that entry.

use crate::cwd::{CwdStack, NamedInode};
use std::mem;
use tracing::{debug, trace};
use vfs_path::{is_absolute, Segment, Segments};
use vfs_types::{FsError, FsResult};

/// Who is responsible for releasing a slot of a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Held by the working-directory stack
    Borrowed,
    /// Acquired by this traversal
    Owned,
}

/// The chain of nodes produced by resolving a path
#[derive(Debug)]
pub struct Traversal<'a> {
    borrowed: &'a [NamedInode],
    owned: Vec<NamedInode>,
}

impl<'a> Traversal<'a> {
    fn start(borrowed: &'a [NamedInode]) -> FsResult<Self> {
        if borrowed.is_empty() {
            return Err(FsError::InternalError);
        }
        Ok(Self {
            borrowed,
            owned: Vec::new(),
        })
    }

    /// Highest index not owned by this traversal
    pub fn borrowed_depth(&self) -> usize {
        self.borrowed.len() - 1
    }

    /// Highest populated index
    pub fn resolved_depth(&self) -> usize {
        self.borrowed_depth() + self.owned.len()
    }

    /// The node the path resolved to
    pub fn terminal(&self) -> &NamedInode {
        match self.owned.last() {
            Some(entry) => entry,
            None => &self.borrowed[self.borrowed_depth()],
        }
    }

    /// Every slot from index 0 to the terminal, tagged with its owner
    pub fn entries(&self) -> impl Iterator<Item = (Ownership, &NamedInode)> + '_ {
        self.borrowed
            .iter()
            .map(|entry| (Ownership::Borrowed, entry))
            .chain(self.owned.iter().map(|entry| (Ownership::Owned, entry)))
    }

    /// Segment names from index 0 to the terminal; the root's name is empty
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries().map(|(_, entry)| entry.name.as_str())
    }

    /// Hands the owned suffix to the caller
    ///
    /// Returns the borrowed depth and the owned handles, deepest last.
    pub fn into_owned(mut self) -> (usize, Vec<NamedInode>) {
        let depth = self.borrowed_depth();
        (depth, mem::take(&mut self.owned))
    }

    fn step_up(&mut self) {
        if self.resolved_depth() == 0 {
            return;
        }
        match self.owned.pop() {
            Some(entry) => {
                trace!(name = %entry.name, "released on ..");
                entry.release();
            }
            None => {
                // Unwinding into the stack only narrows the borrowed window.
                self.borrowed = &self.borrowed[..self.borrowed.len() - 1];
            }
        }
    }

    fn step_into(&mut self, name: &str, max_recursion: usize) -> FsResult<()> {
        if self.resolved_depth() + 1 >= max_recursion {
            return Err(FsError::TooDeep);
        }

        let mut stored = String::new();
        stored
            .try_reserve_exact(name.len())
            .map_err(|_| FsError::OutOfMemory)?;
        stored.push_str(name);
        self.owned
            .try_reserve(1)
            .map_err(|_| FsError::OutOfMemory)?;

        let inode = self.terminal().inode.lookup(name)?;
        self.owned.push(NamedInode {
            inode,
            name: stored,
        });
        Ok(())
    }
}

impl Drop for Traversal<'_> {
    fn drop(&mut self) {
        while let Some(entry) = self.owned.pop() {
            entry.release();
        }
    }
}

/// Resolves `path` against the working-directory stack
///
/// Absolute paths start from the stack's root, relative ones from the whole
/// stack. When `max_len` is given, scanning stops after that many bytes of
/// `path`; this is how creation resolves only the parent of its target.
///
/// A named segment whose index would reach `max_recursion` fails with
/// `TooDeep`. On any failure the handles acquired so far are released
/// before the error is returned.
pub fn resolve<'a>(
    cwd: &'a CwdStack,
    path: &str,
    max_len: Option<usize>,
    max_recursion: usize,
) -> FsResult<Traversal<'a>> {
    let start = if is_absolute(path) {
        cwd.entries().get(..1).unwrap_or_default()
    } else {
        cwd.entries()
    };
    let mut traversal = Traversal::start(start)?;

    let segments = match max_len {
        Some(len) => Segments::bounded(path, len),
        None => Segments::new(path),
    };

    for segment in segments {
        match segment {
            Segment::CurDir => {}
            Segment::ParentDir => traversal.step_up(),
            Segment::Name(name) => {
                if let Err(err) = traversal.step_into(name, max_recursion) {
                    debug!(
                        path,
                        segment = name,
                        depth = traversal.resolved_depth(),
                        error = %err,
                        "traversal aborted"
                    );
                    return Err(err);
                }
            }
        }
    }

    trace!(
        path,
        borrowed = traversal.borrowed_depth(),
        resolved = traversal.resolved_depth(),
        "resolved"
    );
    Ok(traversal)
}
