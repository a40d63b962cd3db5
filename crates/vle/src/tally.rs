//! Per-mnemonic decode and lift statistics.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::debug;
use vle_isa::Session;

use crate::scan::Decoded;

/// Counts over a decoded range.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub decoded: usize,
    pub unknown: usize,
    pub translated: usize,
    /// Decoded mnemonic counts.
    pub by_mnemonic: FxHashMap<&'static str, usize>,
    /// Mnemonics the lifter had no translation for.
    pub untranslated: FxHashMap<&'static str, usize>,
}

impl Tally {
    /// Lift every decoded instruction in parallel and count the results.
    #[must_use]
    pub fn collect(session: &Session, decoded: &[Decoded]) -> Self {
        let tally = decoded
            .par_iter()
            .fold(Self::default, |mut tally, d| {
                tally.record(session, d);
                tally
            })
            .reduce(Self::default, Self::merge);
        debug!(
            decoded = tally.decoded,
            unknown = tally.unknown,
            translated = tally.translated,
            "tally complete"
        );
        tally
    }

    fn record(&mut self, session: &Session, d: &Decoded) {
        let Some(inst) = &d.inst else {
            self.unknown += 1;
            return;
        };
        self.decoded += 1;
        *self.by_mnemonic.entry(inst.mnemonic()).or_default() += 1;
        if session.lift_to_ir(inst).is_unimplemented() {
            *self.untranslated.entry(inst.mnemonic()).or_default() += 1;
        } else {
            self.translated += 1;
        }
    }

    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.decoded += other.decoded;
        self.unknown += other.unknown;
        self.translated += other.translated;
        for (name, n) in other.by_mnemonic {
            *self.by_mnemonic.entry(name).or_default() += n;
        }
        for (name, n) in other.untranslated {
            *self.untranslated.entry(name).or_default() += n;
        }
        self
    }

    /// Mnemonics by descending count, ties by name.
    #[must_use]
    pub fn ranked(&self) -> Vec<(&'static str, usize)> {
        let mut rows: Vec<_> = self.by_mnemonic.iter().map(|(k, v)| (*k, *v)).collect();
        rows.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        rows
    }

    /// Share of decoded instructions with a translation, in percent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn coverage(&self) -> f64 {
        if self.decoded == 0 {
            return 0.0;
        }
        self.translated as f64 * 100.0 / self.decoded as f64
    }
}

#[cfg(test)]
mod tests {
    use vle_isa::Category;

    use super::*;
    use crate::scan::scan;

    #[test]
    fn test_collect() {
        let session = Session::new(Category::empty()).unwrap();
        // se_mr, se_mr, tw, unknown word
        let bytes = [
            0x01, 0x10, 0x01, 0x32, 0x7C, 0x00, 0x00, 0x08, 0x7C, 0x00, 0x07, 0xFE,
        ];
        let tally = Tally::collect(&session, &scan(&session, &bytes, 0));
        assert_eq!(tally.decoded, 3);
        assert_eq!(tally.unknown, 1);
        assert_eq!(tally.translated, 2);
        assert_eq!(tally.untranslated.get("tw"), Some(&1));
        assert_eq!(tally.ranked(), [("se_mr", 2), ("tw", 1)]);
    }

    #[test]
    fn test_merge_and_coverage() {
        let a = Tally {
            decoded: 4,
            translated: 3,
            by_mnemonic: [("se_add", 4)].into_iter().collect(),
            ..Tally::default()
        };
        let b = Tally {
            decoded: 4,
            translated: 4,
            by_mnemonic: [("se_add", 1), ("se_b", 3)].into_iter().collect(),
            ..Tally::default()
        };
        let merged = a.merge(b);
        assert_eq!(merged.by_mnemonic["se_add"], 5);
        assert!((merged.coverage() - 87.5).abs() < f64::EPSILON);
        assert!(Tally::default().coverage().abs() < f64::EPSILON);
    }
}
