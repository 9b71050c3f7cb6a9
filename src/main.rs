//! Scrawl - Excalidraw sketches to Trello tickets

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = scrawl::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
