//! Scrawl - Turn annotated Excalidraw sketches into Trello tickets
//!
//! Scrawl scans a diagram for text elements carrying YAML front matter,
//! builds a dependency graph of tickets from the arrows between them, and
//! exports the result as cards on a Trello board.

pub mod board;
pub mod cli;
pub mod config;
pub mod diagram;
pub mod domain;

pub use diagram::{extract_tickets, Document, ExtractError};
pub use domain::{Card, Ticket, TicketGraph};
