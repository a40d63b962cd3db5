//! IR listing.

use console::style;
use vle::{Result, lift_all};

use crate::cli::InputArgs;
use crate::terminal;

/// Handle the `lift` command.
pub fn cmd_lift(input: &InputArgs, only_untranslated: bool) -> Result<()> {
    let (session, decoded) = super::load(input)?;
    let lifted = lift_all(&session, &decoded);
    let mut missing = 0usize;
    for (inst, ir) in &lifted {
        let untranslated = ir.is_unimplemented();
        missing += usize::from(untranslated);
        if only_untranslated && !untranslated {
            continue;
        }
        println!("{}: {inst}", style(format!("{:08x}", inst.address())).dim());
        for line in ir.to_string().lines() {
            println!("    {line}");
        }
    }
    terminal::info(&format!(
        "{} instructions lifted, {missing} without translation",
        lifted.len()
    ));
    Ok(())
}
