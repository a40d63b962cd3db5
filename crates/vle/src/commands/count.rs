//! Count command.

use vle::{Result, Tally};

use crate::cli::InputArgs;
use crate::terminal::{self, Alignment, Spinner, Table};

/// Handle the `count` command.
pub fn cmd_count(input: &InputArgs, top: usize) -> Result<()> {
    let (session, decoded) = super::load(input)?;

    let spinner = Spinner::new(format!("lifting {} positions", decoded.len()));
    let tally = Tally::collect(&session, &decoded);
    spinner.finish_with_success(&format!(
        "{} decoded, {} unknown, {:.1}% translated",
        tally.decoded,
        tally.unknown,
        tally.coverage()
    ));

    let mut table = Table::new(&["mnemonic", "count", "translated"]).with_alignments(vec![
        Alignment::Left,
        Alignment::Right,
        Alignment::Left,
    ]);
    for (name, n) in tally.ranked().into_iter().take(top) {
        let translated = if tally.untranslated.contains_key(name) {
            "no"
        } else {
            "yes"
        };
        table.add_row(vec![name.to_string(), n.to_string(), translated.to_string()]);
    }
    table.print();

    if !tally.untranslated.is_empty() {
        let mut missing: Vec<_> = tally.untranslated.keys().copied().collect();
        missing.sort_unstable();
        terminal::warning(&format!("no translation: {}", missing.join(", ")));
    }
    Ok(())
}
