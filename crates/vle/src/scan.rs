//! Sequential decoding and parallel lifting.

use rayon::prelude::*;
use tracing::{debug, trace_span};
use vle_ir::InstrIr;
use vle_isa::{Instruction, InstructionInfo, Session, Vle};

/// One decode position.
#[derive(Clone, Debug)]
pub struct Decoded {
    pub address: u64,
    /// Bytes consumed at this position.
    pub length: u8,
    pub inst: Option<Instruction>,
}

impl Decoded {
    /// Check if the bytes at this position decoded.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        self.inst.is_some()
    }
}

/// Decode `bytes` front to back, starting at `address`.
///
/// Each length determines the next position. Unknown encodings consume the
/// 4-byte placeholder length, or whatever remains.
#[must_use]
pub fn scan(session: &Session, bytes: &[u8], address: u64) -> Vec<Decoded> {
    let _span = trace_span!("scan", address, size = bytes.len()).entered();
    let mode = session.decoder().addr_mode();
    let mut out = Vec::new();
    let mut offset = 0usize;
    let mut address = mode.mask(address);
    while offset < bytes.len() {
        let rest = &bytes[offset..];
        let inst = session.decode(rest, address);
        let length = inst.as_ref().map_or_else(
            || {
                let placeholder = InstructionInfo::unknown().length;
                u8::try_from(rest.len()).map_or(placeholder, |n| n.min(placeholder))
            },
            Instruction::length,
        );
        out.push(Decoded {
            address,
            length,
            inst,
        });
        offset += usize::from(length);
        address = mode.mask(address.wrapping_add(u64::from(length)));
    }
    debug!(
        positions = out.len(),
        unknown = out.iter().filter(|d| !d.is_known()).count(),
        "scan complete"
    );
    out
}

/// Lift every decoded instruction, in parallel, preserving order.
#[must_use]
pub fn lift_all(session: &Session, decoded: &[Decoded]) -> Vec<(Instruction, InstrIr<Vle>)> {
    decoded
        .par_iter()
        .filter_map(|d| d.inst)
        .map(|inst| {
            let ir = session.lift_to_ir(&inst);
            (inst, ir)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use vle_isa::Category;

    use super::*;

    #[test]
    fn test_scan_mixed_lengths() {
        let session = Session::new(Category::empty()).unwrap();
        // se_mr r0, r1; e_add16i r1, r1, -16; se_blr
        let bytes = [0x01, 0x10, 0x1C, 0x21, 0xFF, 0xF0, 0x00, 0x04];
        let decoded = scan(&session, &bytes, 0x1000);
        let addresses: Vec<_> = decoded.iter().map(|d| d.address).collect();
        assert_eq!(addresses, [0x1000, 0x1002, 0x1006]);
        assert!(decoded.iter().all(Decoded::is_known));
    }

    #[test]
    fn test_scan_unknown_and_truncated() {
        let session = Session::new(Category::empty()).unwrap();
        // Unassigned opcode-31 word, then half of an e_add16i.
        let bytes = [0x7C, 0x00, 0x07, 0xFE, 0x1C, 0x21];
        let decoded = scan(&session, &bytes, 0);
        assert_eq!(decoded.len(), 2);
        assert!(!decoded[0].is_known());
        assert_eq!(decoded[0].length, 4);
        assert!(!decoded[1].is_known());
        assert_eq!(decoded[1].length, 2);
    }

    #[test]
    fn test_lift_all_keeps_order() {
        let session = Session::new(Category::empty()).unwrap();
        let bytes = [0x01, 0x10, 0x00, 0x04];
        let lifted = lift_all(&session, &scan(&session, &bytes, 0));
        let names: Vec<_> = lifted.iter().map(|(i, _)| i.mnemonic()).collect();
        assert_eq!(names, ["se_mr", "se_blr"]);
        assert!(lifted.iter().all(|(_, ir)| !ir.is_unimplemented()));
    }
}
