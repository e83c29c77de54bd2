//! # CLI Completions Command
//!
//! Shell completions generation for the orgtree CLI.

use std::io::Write;

use clap::Command;
use clap_complete::Shell;
use error::Result;

/// Writes completions for `shell` to `out`
pub fn completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) -> Result<()> {
    clap_complete::generate(shell, cmd, "orgtree", out);
    Ok(())
}
