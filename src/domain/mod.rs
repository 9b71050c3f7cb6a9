//! Domain models for Scrawl
//!
//! Contains the ticket entity and the graph built from a diagram,
//! without any I/O concerns.

mod graph;
mod ticket;

pub use graph::TicketGraph;
pub use ticket::{Card, Ticket};
