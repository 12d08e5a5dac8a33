//! Type and visibility mask
//!
//! A `TypeMask` bundles independent display and filter switches into one
//! value. Any combination of bits is accepted. Where two bits compete for the
//! same output, disk-usage-only wins over minimal.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Bit flags controlling what a listing fetches and how rows are rendered.
///
/// | bit | flag |
/// | --- | --- |
/// | 0 | directories only |
/// | 1 | non-folders only |
/// | 2 | minimal output |
/// | 3 | shared only |
/// | 4 | show owners |
/// | 5 | show version |
/// | 6 | in trash |
/// | 7 | starred only |
/// | 8 | disk usage only |
/// | 9 | team drives |
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TypeMask(u32);

impl TypeMask {
    pub const NONE: TypeMask = TypeMask(0);
    pub const FOLDER: TypeMask = TypeMask(1 << 0);
    pub const NON_FOLDER: TypeMask = TypeMask(1 << 1);
    pub const MINIMAL: TypeMask = TypeMask(1 << 2);
    pub const SHARED: TypeMask = TypeMask(1 << 3);
    pub const OWNERS: TypeMask = TypeMask(1 << 4);
    pub const CURRENT_VERSION: TypeMask = TypeMask(1 << 5);
    pub const IN_TRASH: TypeMask = TypeMask(1 << 6);
    pub const STARRED: TypeMask = TypeMask(1 << 7);
    pub const DISK_USAGE_ONLY: TypeMask = TypeMask(1 << 8);
    pub const TEAM_DRIVES: TypeMask = TypeMask(1 << 9);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: TypeMask) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub fn insert(&mut self, other: TypeMask) {
        self.0 |= other.0;
    }

    pub fn set(&mut self, other: TypeMask, on: bool) {
        if on {
            self.0 |= other.0;
        } else {
            self.0 &= !other.0;
        }
    }

    pub fn directories_only(self) -> bool {
        self.contains(Self::FOLDER)
    }

    pub fn non_folders_only(self) -> bool {
        self.contains(Self::NON_FOLDER)
    }

    pub fn minimal(self) -> bool {
        self.contains(Self::MINIMAL)
    }

    pub fn shared(self) -> bool {
        self.contains(Self::SHARED)
    }

    pub fn owners(self) -> bool {
        self.contains(Self::OWNERS)
    }

    pub fn version(self) -> bool {
        self.contains(Self::CURRENT_VERSION)
    }

    pub fn in_trash(self) -> bool {
        self.contains(Self::IN_TRASH)
    }

    pub fn starred(self) -> bool {
        self.contains(Self::STARRED)
    }

    pub fn disk_usage_only(self) -> bool {
        self.contains(Self::DISK_USAGE_ONLY)
    }

    pub fn team_drives(self) -> bool {
        self.contains(Self::TEAM_DRIVES)
    }
}

impl BitOr for TypeMask {
    type Output = TypeMask;

    fn bitor(self, rhs: TypeMask) -> TypeMask {
        TypeMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for TypeMask {
    fn bitor_assign(&mut self, rhs: TypeMask) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for TypeMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(TypeMask, &str); 10] = [
            (TypeMask::FOLDER, "FOLDER"),
            (TypeMask::NON_FOLDER, "NON_FOLDER"),
            (TypeMask::MINIMAL, "MINIMAL"),
            (TypeMask::SHARED, "SHARED"),
            (TypeMask::OWNERS, "OWNERS"),
            (TypeMask::CURRENT_VERSION, "CURRENT_VERSION"),
            (TypeMask::IN_TRASH, "IN_TRASH"),
            (TypeMask::STARRED, "STARRED"),
            (TypeMask::DISK_USAGE_ONLY, "DISK_USAGE_ONLY"),
            (TypeMask::TEAM_DRIVES, "TEAM_DRIVES"),
        ];

        let set: Vec<&str> = NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();

        if set.is_empty() {
            write!(f, "TypeMask(NONE)")
        } else {
            write!(f, "TypeMask({})", set.join(" | "))
        }
    }
}
