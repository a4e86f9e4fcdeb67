//! Open flags

use serde::{Deserialize, Serialize};
use std::ops::BitOr;

/// Flags controlling how a file is opened
///
/// Flags combine with `|`:
///
/// ```
/// use vfs_types::OpenFlags;
///
/// let flags = OpenFlags::WRITE | OpenFlags::CREATE;
/// assert!(flags.creates());
/// assert!(!flags.is_exclusive());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpenFlags(u32);

impl OpenFlags {
    /// Open for reading
    pub const READ: OpenFlags = OpenFlags(0x0001);
    /// Open for writing
    pub const WRITE: OpenFlags = OpenFlags(0x0002);
    /// Create the file if it does not exist
    pub const CREATE: OpenFlags = OpenFlags(0x0100);
    /// With `CREATE`, fail if the file already exists
    pub const EXCLUSIVE: OpenFlags = OpenFlags(0x0200);
    /// Truncate an existing file to zero length
    pub const TRUNCATE: OpenFlags = OpenFlags(0x0400);
    /// Position writes at the end of the file
    pub const APPEND: OpenFlags = OpenFlags(0x0800);

    /// No flags set
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Creates flags from raw bits
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw bits
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Returns true if every flag in `other` is set
    pub const fn contains(&self, other: OpenFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if the open may create the file
    pub fn creates(&self) -> bool {
        self.contains(Self::CREATE)
    }

    /// Returns true if creation must not find an existing file
    pub fn is_exclusive(&self) -> bool {
        self.contains(Self::CREATE | Self::EXCLUSIVE)
    }

    /// Returns true if the file is opened for writing
    pub fn is_writable(&self) -> bool {
        self.contains(Self::WRITE)
    }
}

impl BitOr for OpenFlags {
    type Output = OpenFlags;

    fn bitor(self, rhs: OpenFlags) -> OpenFlags {
        OpenFlags(self.0 | rhs.0)
    }
}
