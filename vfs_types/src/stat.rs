//! Node classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a filesystem node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// A directory that can be traversed
    Directory,
    /// A regular file
    File,
}

impl NodeKind {
    /// Classifies a node from the backend's `is_dir` answer
    pub fn from_is_dir(is_dir: bool) -> Self {
        if is_dir {
            NodeKind::Directory
        } else {
            NodeKind::File
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Directory => write!(f, "directory"),
            NodeKind::File => write!(f, "file"),
        }
    }
}

/// Result of `stat`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    /// True if the node is a directory
    pub is_directory: bool,
}

impl Stat {
    /// Returns the node kind
    pub fn kind(&self) -> NodeKind {
        NodeKind::from_is_dir(self.is_directory)
    }
}
