//! Command implementations.
//!
//! Each submodule handles one CLI command.

mod count;
mod dis;
mod lift;

use tracing::{error, info};
use vle::{Decoded, Image, Result, scan};
use vle_isa::Session;

use crate::cli::{Cli, Commands, EXIT_FAILURE, EXIT_SUCCESS, InputArgs};

/// Dispatch CLI command to the appropriate handler.
pub fn run_command(cli: &Cli) -> i32 {
    let result = match &cli.command {
        Commands::Count { input, top } => count::cmd_count(input, *top),
        Commands::Dis { input, bytes } => dis::cmd_dis(input, *bytes),
        Commands::Lift {
            input,
            untranslated,
        } => lift::cmd_lift(input, *untranslated),
    };
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            EXIT_FAILURE
        }
    }
}

/// Build the session and decode the selected window of the image.
fn load(input: &InputArgs) -> Result<(Session, Vec<Decoded>)> {
    let session = Session::new(input.categories())?;
    let image = Image::open(&input.input, input.address)?;
    let window = image.window(input.start, input.length)?;
    let address = image.base().wrapping_add(input.start);
    info!(
        input = %input.input.display(),
        categories = %session.categories(),
        start = input.start,
        size = window.len(),
        "decoding"
    );
    let decoded = scan(&session, window, address);
    Ok((session, decoded))
}
