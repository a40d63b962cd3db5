//! Instruction categories.
//!
//! Power ISA groups instructions into categories; a decode session enables a
//! set of them. `B` and `VLE` are always implied.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::error::BuildError;

bitflags! {
    /// Set of instruction categories.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Category: u32 {
        /// Base.
        const B = 1 << 0;
        /// Server.
        const S = 1 << 1;
        /// Embedded.
        const E = 1 << 2;
        /// Alternate time base.
        const ATB = 1 << 3;
        /// Cache specification.
        const CS = 1 << 4;
        /// Embedded cache debug.
        const E_CD = 1 << 5;
        /// Embedded cache initialization.
        const E_CI = 1 << 6;
        /// Embedded enhanced debug.
        const E_ED = 1 << 7;
        /// Embedded external PID.
        const E_PD = 1 << 8;
        /// Embedded little-endian.
        const E_LE = 1 << 9;
        /// Embedded MMU format.
        const E_MF = 1 << 10;
        /// Embedded performance monitor.
        const E_PM = 1 << 11;
        /// Embedded processor control.
        const E_PC = 1 << 12;
        /// Embedded cache locking.
        const ECL = 1 << 13;
        /// External control.
        const EXC = 1 << 14;
        /// External proxy.
        const EXP = 1 << 15;
        /// Floating point.
        const FP = 1 << 16;
        /// Floating point record.
        const FP_R = 1 << 17;
        /// Load/store multiple volatile.
        const LMV = 1 << 18;
        /// Load/store multiple alternate.
        const LMA = 1 << 19;
        /// Load/store quadword.
        const LSQ = 1 << 20;
        /// Memory coherence.
        const MMC = 1 << 21;
        /// Move assist.
        const MA = 1 << 22;
        /// Server performance monitor.
        const S_PM = 1 << 23;
        /// Signal processing engine / embedded floating point.
        const SP = 1 << 24;
        /// Stream.
        const STM = 1 << 25;
        /// Trace.
        const TRC = 1 << 26;
        /// Variable length encoding.
        const VLE = 1 << 27;
        /// Vector.
        const V = 1 << 28;
        /// Wait.
        const WT = 1 << 29;
        /// 64-bit effective addressing.
        const X64 = 1 << 30;
    }
}

impl Category {
    /// Categories every session has.
    pub const BASE: Self = Self::B.union(Self::VLE);

    /// Effective set for a session: `self` plus the base categories.
    #[must_use]
    pub const fn effective(self) -> Self {
        self.union(Self::BASE)
    }

    /// Check if this set selects 64-bit effective addressing.
    #[must_use]
    pub const fn is_64bit(self) -> bool {
        self.contains(Self::X64)
    }

    /// Name of a single category.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.iter_names()
            .find(|(_, flag)| *flag == self)
            .map_or("?", |(name, _)| name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, _)) in self.iter_names().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

impl FromStr for Category {
    type Err = BuildError;

    /// Parse a comma- or `|`-separated list such as `"E,SP,lmv"`.
    ///
    /// Names are case-insensitive; `.` may stand for `_` (`E.PM`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = Self::empty();
        for part in s.split([',', '|']).map(str::trim).filter(|p| !p.is_empty()) {
            let wanted = part.replace('.', "_").to_ascii_uppercase();
            let flag = Self::all()
                .iter_names()
                .find(|(name, _)| *name == wanted)
                .map(|(_, flag)| flag)
                .ok_or_else(|| BuildError::UnknownCategory(part.to_string()))?;
            set |= flag;
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_includes_base() {
        let set = Category::empty().effective();
        assert!(set.contains(Category::B));
        assert!(set.contains(Category::VLE));
        assert!(!set.contains(Category::SP));
    }

    #[test]
    fn test_set_algebra() {
        let a = Category::E | Category::SP;
        let b = Category::SP | Category::V;
        assert_eq!(a & b, Category::SP);
        assert_eq!((a | b).bits().count_ones(), 3);
        assert!(a.intersects(b));
    }

    #[test]
    fn test_parse_list() {
        let set: Category = "e, sp, E.PM".parse().unwrap();
        assert_eq!(set, Category::E | Category::SP | Category::E_PM);
        assert!("".parse::<Category>().unwrap().is_empty());
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!(
            "E,bogus".parse::<Category>(),
            Err(BuildError::UnknownCategory(name)) if name == "bogus"
        ));
    }

    #[test]
    fn test_display_and_name() {
        assert_eq!((Category::E | Category::SP).to_string(), "E|SP");
        assert_eq!(Category::E_PM.name(), "E_PM");
    }

    #[test]
    fn test_x64() {
        assert!((Category::X64 | Category::E).is_64bit());
        assert!(!Category::BASE.is_64bit());
    }
}
