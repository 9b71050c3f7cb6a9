//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! ## Flow
//!
//! 1. Read the document and extract the ticket graph
//! 2. `--print`: list the cards and stop (no network)
//! 3. Otherwise: pick a board and list, create cards in extraction order,
//!    then create dependency checklists (unless `--ignore-deps`)
//!
//! ## Output Formats
//!
//! The `--format` flag switches between `text` (default, human-readable)
//! and `json` (machine-parseable). `--verbose` adds debug output on stderr.

mod app;
mod export;
mod output;

pub use app::{run, Cli};
pub use output::{Output, OutputFormat};
