//! Decode session: one decoder and one lifter sharing a category set.

use vle_ir::{InstrIr, IrBuilder, IrRecorder};

use crate::category::Category;
use crate::decoder::Decoder;
use crate::error::Result;
use crate::info::InstructionInfo;
use crate::instruction::Instruction;
use crate::lift::Lifter;
use crate::regs::Vle;

/// Everything needed to decode, render, and lift under one category set.
///
/// Immutable once built; share it by reference across threads.
#[derive(Clone, Debug)]
pub struct Session {
    decoder: Decoder,
    lifter: Lifter,
}

impl Session {
    /// Build the trie and lift table for `categories`.
    pub fn new(categories: Category) -> Result<Self> {
        Self::with_decoder(Decoder::new(categories)?)
    }

    /// Session around a custom decoder, e.g. one with extra extensions.
    pub fn with_decoder(decoder: Decoder) -> Result<Self> {
        Ok(Self {
            decoder,
            lifter: Lifter::new()?,
        })
    }

    #[must_use]
    pub const fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    #[must_use]
    pub const fn lifter(&self) -> &Lifter {
        &self.lifter
    }

    /// Effective categories.
    #[must_use]
    pub const fn categories(&self) -> Category {
        self.decoder.categories()
    }

    #[must_use]
    pub fn decode(&self, bytes: &[u8], address: u64) -> Option<Instruction> {
        self.decoder.decode(bytes, address)
    }

    /// Length and control-flow edges at `address`. Unknown encodings report
    /// a 4-byte placeholder.
    #[must_use]
    pub fn info(&self, bytes: &[u8], address: u64) -> InstructionInfo {
        self.decode(bytes, address)
            .as_ref()
            .map_or_else(InstructionInfo::unknown, InstructionInfo::of)
    }

    /// Rendered text at `address`, if the bytes decode.
    #[must_use]
    pub fn text(&self, bytes: &[u8], address: u64) -> Option<String> {
        self.decode(bytes, address).map(|inst| inst.text())
    }

    /// Emit IR for `inst` into `il`. Returns `false` if untranslated.
    pub fn lift(&self, inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> bool {
        self.lifter.lift(inst, il)
    }

    /// Lift into a fresh recorder.
    #[must_use]
    pub fn lift_to_ir(&self, inst: &Instruction) -> InstrIr<Vle> {
        let mut il = IrRecorder::new(inst.address(), inst.length());
        self.lifter.lift(inst, &mut il);
        il.finish()
    }
}

#[cfg(test)]
mod tests {
    use vle_ir::Terminator;

    use super::*;
    use crate::info::BranchKind;

    #[test]
    fn test_unknown_bytes() {
        let session = Session::new(Category::empty()).unwrap();
        // Opcode 31 with an unassigned extended opcode.
        let bytes = [0x7C, 0x00, 0x07, 0xFE];
        assert!(session.decode(&bytes, 0).is_none());
        assert_eq!(session.info(&bytes, 0).length, 4);
        assert!(session.info(&bytes, 0).branches.is_empty());
        assert!(session.text(&bytes, 0).is_none());
    }

    #[test]
    fn test_decode_render_lift() {
        let session = Session::new(Category::all()).unwrap();
        let bytes = [0xE9, 0x04];
        assert_eq!(session.text(&bytes, 0x200).as_deref(), Some("se_bl 0x208"));
        assert_eq!(session.info(&bytes, 0x200).branches, vec![BranchKind::Call(0x208)]);
        let inst = session.decode(&bytes, 0x200).unwrap();
        let ir = session.lift_to_ir(&inst);
        assert_eq!(
            ir.terminator(),
            Terminator::Call {
                target: Some(0x208),
                next: 0x202
            }
        );
    }

    #[test]
    fn test_session_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Session>();
    }
}
