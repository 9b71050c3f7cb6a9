//! # Diagram Layer
//!
//! Reads Excalidraw documents and turns annotated text elements into a
//! ticket graph.
//!
//! ## Conventions in the diagram
//!
//! | Element | Meaning |
//! |---------|---------|
//! | Text starting with `---\n` | Ticket metadata (YAML front matter) |
//! | Arrow from A to B | B depends on A |
//! | Anything else | Ignored |
//!
//! The entry point is [`extract_tickets`]; it validates the document format,
//! parses every ticket block, and links dependencies in one pass. Failures
//! are fatal and carry the offending element id in [`ExtractError`].

mod document;
mod extract;

pub use document::{ArrowElement, Binding, Document, Element, TextElement};
pub use document::{DOCUMENT_TYPE, DOCUMENT_VERSION};
pub use extract::{extract_tickets, ExtractError, FRONT_MATTER};
