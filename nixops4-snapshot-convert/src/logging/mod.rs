//! Diagnostics go to stderr through `tracing`. Stdout only carries the
//! per-file report, so it can be piped or diffed.

mod headless;

use anyhow::Result;
use clap::ColorChoice;
use std::io::IsTerminal as _;

pub(crate) struct Options {
    pub verbose: bool,
    pub color: bool,
}

impl Options {
    pub(crate) fn new(verbose: bool, color: ColorChoice) -> Self {
        let color = match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::stderr().is_terminal(),
        };
        Options { verbose, color }
    }
}

pub(crate) trait Frontend {
    fn set_up(&self, options: &Options) -> Result<()>;
}

pub(crate) fn set_up(options: &Options) -> Result<()> {
    headless::HeadlessLogger {}.set_up(options)
}
