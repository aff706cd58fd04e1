use owo_colors::OwoColorize;
use readable_core::{Notice, Progress};

use crate::i18n::Catalog;

/// Print a status line
pub fn print_status(message: &str) {
    eprintln!("{}", message.dimmed());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print a deprecation or usage note
pub fn print_note(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Routes pipeline notices to stderr unless `--quiet` was given.
pub struct EchoProgress {
    quiet: bool,
    catalog: &'static Catalog,
}

impl EchoProgress {
    pub fn new(quiet: bool, catalog: &'static Catalog) -> Self {
        Self { quiet, catalog }
    }
}

impl Progress for EchoProgress {
    fn notice(&self, notice: Notice) {
        if self.quiet {
            return;
        }

        match notice {
            Notice::ReadingStdin => print_status(self.catalog.reading),
            Notice::Retrieving => print_status(self.catalog.retrieving),
            Notice::Processing => print_status(self.catalog.processing),
            Notice::NotConfident => print_warning(self.catalog.not_confident),
            Notice::MissingBaseUrl => print_warning(self.catalog.missing_base),
        }
    }
}
