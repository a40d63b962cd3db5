//! Disassembly listing.

use std::fmt::Write as _;

use console::style;
use vle::Result;

use crate::cli::InputArgs;
use crate::terminal;

/// Handle the `dis` command.
pub fn cmd_dis(input: &InputArgs, show_bytes: bool) -> Result<()> {
    let (_, decoded) = super::load(input)?;
    let mut unknown = 0usize;
    for d in &decoded {
        let mut line = format!("{}:", style(format!("{:08x}", d.address)).dim());
        if show_bytes {
            let _ = write!(line, "  {}", hex_bytes(d.inst.map(|i| i.raw()), d.length));
        }
        match &d.inst {
            Some(inst) => {
                let _ = write!(line, "  {inst}");
            }
            None => {
                unknown += 1;
                let _ = write!(line, "  {}", style("(bad)").red());
            }
        }
        println!("{line}");
    }
    if unknown > 0 {
        terminal::info(&format!("{unknown} undecodable positions"));
    }
    Ok(())
}

/// Encoding bytes of a right-aligned `raw` word, padded to the width of a
/// long instruction. Unknown positions show `??` per byte.
fn hex_bytes(raw: Option<u32>, length: u8) -> String {
    let length = usize::from(length).min(4);
    let text = match raw {
        Some(raw) => raw.to_be_bytes()[4 - length..]
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>(),
        None => vec!["??".to_string(); length],
    };
    format!("{:<11}", text.join(" "))
}

#[cfg(test)]
mod tests {
    use vle_isa::{Category, Decoder};

    use super::hex_bytes;

    fn decoded_bytes(bytes: &[u8]) -> String {
        let decoder = Decoder::new(Category::empty()).unwrap();
        let inst = decoder.decode(bytes, 0).unwrap();
        hex_bytes(Some(inst.raw()), inst.length())
    }

    #[test]
    fn test_hex_bytes() {
        // e_add16i r1, r1, -16
        assert_eq!(decoded_bytes(&[0x1C, 0x21, 0xFF, 0xF0]), "1c 21 ff f0");
        // se_mr r0, r1
        assert_eq!(decoded_bytes(&[0x01, 0x10]), "01 10      ");
        assert_eq!(hex_bytes(None, 4), "?? ?? ?? ??");
        assert_eq!(hex_bytes(None, 2), "?? ??      ");
    }
}
