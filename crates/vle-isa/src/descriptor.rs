//! Instruction descriptors.

use crate::category::Category;
use crate::error::{BuildError, Result};
use crate::field::{Field, FieldSource};
use crate::format::Format;

/// Immutable metadata for one instruction definition.
///
/// Descriptors are plain values built in `const` context by the decode
/// tables; decoded instructions carry a copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Descriptor {
    pub mnemonic: &'static str,
    pub category: Category,
    /// Encoding length in bytes (2 or 4).
    pub length: u8,
    pub format: &'static Format,
    /// Operands in display order, including suffix fields (`LK`, `Rc`, `OE`).
    pub operands: &'static [Field],
    pub is_branch: bool,
    pub is_conditional_branch: bool,
}

impl Descriptor {
    /// Descriptor taking its length from `format`.
    #[must_use]
    pub const fn new(
        mnemonic: &'static str,
        category: Category,
        format: &'static Format,
        operands: &'static [Field],
    ) -> Self {
        Self {
            mnemonic,
            category,
            length: format.length,
            format,
            operands,
            is_branch: false,
            is_conditional_branch: false,
        }
    }

    /// Mark as an unconditional branch.
    #[must_use]
    pub const fn branch(mut self) -> Self {
        self.is_branch = true;
        self
    }

    /// Mark as a conditional branch.
    #[must_use]
    pub const fn conditional(mut self) -> Self {
        self.is_conditional_branch = true;
        self
    }

    /// Check if `field` is one of the declared operands.
    #[must_use]
    pub fn declares(&self, field: Field) -> bool {
        self.operands.contains(&field)
    }

    /// Check the descriptor against its format.
    ///
    /// Every operand must resolve, and computed operands may only read direct
    /// fields of the same format.
    pub fn validate(&self) -> Result<()> {
        if self.format.length != self.length {
            return Err(BuildError::LengthMismatch {
                mnemonic: self.mnemonic,
                format: self.format.name,
                format_length: self.format.length,
                length: self.length,
            });
        }
        for &field in self.operands {
            match self.format.source(field) {
                None => {
                    return Err(BuildError::UnresolvedOperand {
                        mnemonic: self.mnemonic,
                        field,
                        format: self.format.name,
                    });
                }
                Some(FieldSource::Computed(computed)) => {
                    if let Some(&input) = computed
                        .inputs()
                        .iter()
                        .find(|input| !self.format.is_direct(**input))
                    {
                        return Err(BuildError::IndirectInput {
                            mnemonic: self.mnemonic,
                            field,
                            input,
                        });
                    }
                }
                Some(FieldSource::Bits(_)) => {}
            }
        }
        Ok(())
    }
}
