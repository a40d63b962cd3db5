//! Whole-encoding-space properties of the decoder.

use rayon::prelude::*;
use vle_isa::{AddrMode, Category, Decoder, Field, scaled_immediate};

/// Low halves paired with every high half when sweeping 32-bit words.
const LOW_HALVES: [u16; 4] = [0x0000, 0x0001, 0x8421, 0xFFFF];

fn sweep() -> impl ParallelIterator<Item = [u8; 4]> {
    (0..=u16::MAX).into_par_iter().flat_map_iter(|high| {
        LOW_HALVES.iter().map(move |low| {
            let [a, b] = high.to_be_bytes();
            let [c, d] = low.to_be_bytes();
            [a, b, c, d]
        })
    })
}

fn decoders() -> Vec<Decoder> {
    [
        Category::empty(),
        Category::E | Category::E_PM,
        Category::SP | Category::LMV,
        Category::all(),
    ]
    .into_iter()
    .map(|c| Decoder::new(c).unwrap())
    .collect()
}

#[test]
fn test_decode_is_deterministic() {
    let first = Decoder::new(Category::all()).unwrap();
    let second = Decoder::new(Category::all()).unwrap();
    let mismatches = sweep()
        .filter(|bytes| {
            let a = first.decode(bytes, 0x4000).map(|i| (i.mnemonic(), i.raw()));
            let b = second.decode(bytes, 0x4000).map(|i| (i.mnemonic(), i.raw()));
            let again = first.decode(bytes, 0x4000).map(|i| (i.mnemonic(), i.raw()));
            a != b || a != again
        })
        .count();
    assert_eq!(mismatches, 0);
}

#[test]
fn test_decoded_category_is_active() {
    for decoder in decoders() {
        let active = decoder.categories();
        let outside = sweep()
            .filter_map(|bytes| decoder.decode(&bytes, 0))
            .filter(|i| !active.contains(i.category()))
            .count();
        assert_eq!(outside, 0, "{active}");
    }
}

#[test]
fn test_length_matches_buffer_needs() {
    let decoder = Decoder::new(Category::all()).unwrap();
    sweep().for_each(|bytes| {
        let Some(inst) = decoder.decode(&bytes, 0) else {
            return;
        };
        assert!(matches!(inst.length(), 2 | 4), "{}", inst.mnemonic());
        assert_eq!(inst.length(), inst.descriptor().format.length);
        let short = decoder.decode(&bytes[..2], 0);
        if inst.length() == 2 {
            assert_eq!(short.map(|i| i.mnemonic()), Some(inst.mnemonic()));
        } else {
            assert!(short.is_none(), "{} decoded from two bytes", inst.mnemonic());
        }
    });
}

#[test]
fn test_branch_targets_translate_with_address() {
    let narrow = Decoder::new(Category::all().difference(Category::X64)).unwrap();
    let wide = Decoder::new(Category::all()).unwrap();
    let bases = [0x0u64, 0x1000, 0xFFFF_F000];
    let shift = 0x2_0000u64;
    sweep().for_each(|bytes| {
        for decoder in [&narrow, &wide] {
            for base in bases {
                let Some(here) = decoder.decode(&bytes, base) else {
                    continue;
                };
                let Some(target) = here.target_address() else {
                    continue;
                };
                let there = decoder.decode(&bytes, base + shift).unwrap();
                let moved = there.target_address().unwrap();
                assert_eq!(
                    moved,
                    here.addr_mode().mask(target.wrapping_add(shift)),
                    "{} at {base:#x}",
                    here.mnemonic()
                );
            }
        }
    });
}

#[test]
fn test_narrow_targets_wrap_at_four_gib() {
    let decoder = Decoder::new(Category::empty()).unwrap();
    // se_b +8 near the top of the address space
    let inst = decoder.decode(&[0xE8, 0x04], 0xFFFF_FFFC).unwrap();
    assert_eq!(inst.addr_mode(), AddrMode::Bits32);
    assert_eq!(inst.target_address(), Some(0x4));
}

#[test]
fn test_unrelated_extensions_leave_base_alone() {
    let base = Decoder::new(Category::empty()).unwrap();
    let extended = Decoder::new(Category::SP | Category::LMV | Category::WT).unwrap();
    let changed = sweep()
        .filter_map(|bytes| Some((base.decode(&bytes, 0)?, extended.decode(&bytes, 0)?)))
        .filter(|(a, b)| a.mnemonic() != b.mnemonic())
        .count();
    assert_eq!(changed, 0);
}

#[test]
fn test_sci8_unscaled_fill_is_exact() {
    for scl in 0..4 {
        for ui8 in 0..=0xFF {
            assert_eq!(
                scaled_immediate(0, scl, ui8, 32),
                u64::from(ui8) << (scl * 8),
                "scl={scl} ui8={ui8:#x}"
            );
        }
    }
}

#[test]
fn test_sci8_filled() {
    assert_eq!(scaled_immediate(1, 0, 0x80, 32), 0xFFFF_FF80);
    assert_eq!(scaled_immediate(1, 0, 0x7F, 32), 0x7F);
    assert_eq!(scaled_immediate(1, 1, 0x01, 32), 0x100);
    assert_eq!(scaled_immediate(1, 1, 0xFF, 32), 0xFFFF_FF00);
    assert_eq!(scaled_immediate(1, 3, 0xFF, 32), 0xFF00_0000);
    assert_eq!(scaled_immediate(1, 0, 0x80, 64), 0xFFFF_FFFF_FFFF_FF80);
}

#[test]
fn test_sci8_through_decoder() {
    let decoder = Decoder::new(Category::empty()).unwrap();
    // e_addi r3, r4, 0x1200: SCL=1, UI8=0x12
    let inst = decoder.decode(&[0x18, 0x64, 0x81, 0x12], 0).unwrap();
    assert_eq!(inst.mnemonic(), "e_addi");
    assert_eq!(inst.field(Field::SCIMM), Some(0x1200));
}
