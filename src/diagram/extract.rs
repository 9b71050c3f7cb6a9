//! Ticket extraction
//!
//! Scans a document for text elements carrying YAML front matter, parses
//! each into a [`Ticket`], then walks the arrows to reconstruct dependency
//! edges between the tickets they connect.
//!
//! Extraction is all-or-nothing: any parse or validation failure aborts the
//! whole run with no partial result. Arrows that do not connect two tickets
//! are not failures; diagrams are full of decorative connectors.

use serde_yaml::Value;
use thiserror::Error;

use super::document::{Document, Element};
use crate::domain::{Ticket, TicketGraph};

/// Marker a text element must start with to count as ticket metadata
pub const FRONT_MATTER: &str = "---\n";

/// A fatal extraction failure
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The document is not the supported Excalidraw format
    #[error(
        "not a supported document: expected type \"excalidraw\" version 2, \
         found type {kind:?} version {version}"
    )]
    UnrecognizedFormat {
        /// The document's `type` discriminator
        kind: String,
        /// The document's format version
        version: u64,
    },

    /// A ticket's metadata block failed to parse as YAML
    #[error("ticket {element_id}: invalid metadata: {source}")]
    Metadata {
        /// Id of the offending text element
        element_id: String,
        /// Underlying YAML error
        #[source]
        source: serde_yaml::Error,
    },

    /// A ticket's metadata parsed to something other than a string or mapping
    #[error("ticket {element_id}: metadata must be a title string or a mapping")]
    UnexpectedPayload {
        /// Id of the offending text element
        element_id: String,
    },

    /// A ticket's metadata mapping contains a key outside the schema
    #[error("ticket {element_id}: unknown field `{field}`")]
    UnknownField {
        /// Id of the offending text element
        element_id: String,
        /// The rejected key
        field: String,
    },

    /// A ticket's metadata mapping has no title
    #[error("ticket {element_id}: missing required field `title`")]
    MissingTitle {
        /// Id of the offending text element
        element_id: String,
    },

    /// The `ac` key is present but its value is not a sequence
    #[error("ticket {element_id}: acceptance criteria must be a sequence")]
    AcNotSequence {
        /// Id of the offending text element
        element_id: String,
    },
}

/// Extracts the ticket graph from a document
///
/// Tickets appear in the graph in document order of their text elements,
/// which downstream card creation treats as the required creation order.
pub fn extract_tickets(doc: &Document) -> Result<TicketGraph, ExtractError> {
    if !doc.is_supported() {
        return Err(ExtractError::UnrecognizedFormat {
            kind: doc.kind.clone(),
            version: doc.version,
        });
    }

    let mut graph = TicketGraph::new();

    for element in &doc.elements {
        if let Element::Text(text) = element {
            if text.text.starts_with(FRONT_MATTER) {
                graph.insert(parse_ticket(&text.id, &text.text)?);
            }
        }
    }

    link_dependencies(doc, &mut graph);

    Ok(graph)
}

/// Adds dependency edges for every arrow connecting two known tickets
///
/// Only the start binding gates inclusion; a missing or dangling end
/// binding simply fails to resolve and the arrow is skipped. An arrow
/// drawn from A to B means "B depends on A".
fn link_dependencies(doc: &Document, graph: &mut TicketGraph) {
    for element in &doc.elements {
        let Element::Arrow(arrow) = element else {
            continue;
        };
        let Some(prerequisite) = arrow.start_element_id() else {
            continue;
        };
        let Some(dependent) = arrow.end_element_id() else {
            continue;
        };

        // add_dependency refuses edges touching unknown ids, which is
        // exactly the silent skip wanted for non-ticket connectors.
        graph.add_dependency(dependent, prerequisite);
    }
}

/// Parses one front-matter text block into a ticket
///
/// The payload is either a bare string (the whole string becomes the title)
/// or a mapping with a whitelisted key set.
fn parse_ticket(element_id: &str, text: &str) -> Result<Ticket, ExtractError> {
    let payload: Value = serde_yaml::from_str(text).map_err(|source| ExtractError::Metadata {
        element_id: element_id.to_string(),
        source,
    })?;

    match payload {
        Value::String(title) => Ok(Ticket::new(element_id, title)),
        Value::Mapping(fields) => ticket_from_mapping(element_id, fields),
        _ => Err(ExtractError::UnexpectedPayload {
            element_id: element_id.to_string(),
        }),
    }
}

/// Builds a ticket from a metadata mapping, rejecting unknown keys
///
/// Recognized keys: `title`, `points`, `ac`, `desc`. An `id` key is accepted
/// and discarded; the element id always wins. Recognized keys with null
/// values read as unset; unknown keys are fatal even when null.
fn ticket_from_mapping(
    element_id: &str,
    fields: serde_yaml::Mapping,
) -> Result<Ticket, ExtractError> {
    let mut title = None;
    let mut points = None;
    let mut ac = None;
    let mut desc = None;

    for (key, value) in fields {
        let field = match key.as_str() {
            Some(name) => name.to_string(),
            None => {
                return Err(ExtractError::UnknownField {
                    element_id: element_id.to_string(),
                    field: format!("{key:?}"),
                })
            }
        };

        match field.as_str() {
            // A recognized key with a null value reads as unset.
            "title" | "points" | "desc" | "ac" if value.is_null() => {}
            "title" => title = Some(typed_field::<String>(element_id, value)?),
            "points" => points = Some(typed_field(element_id, value)?),
            "desc" => desc = Some(typed_field(element_id, value)?),
            "ac" => {
                if !value.is_sequence() {
                    return Err(ExtractError::AcNotSequence {
                        element_id: element_id.to_string(),
                    });
                }
                ac = Some(typed_field(element_id, value)?);
            }
            // The element id is authoritative; an id in the metadata is noise.
            "id" => {}
            _ => {
                return Err(ExtractError::UnknownField {
                    element_id: element_id.to_string(),
                    field,
                })
            }
        }
    }

    let title = title.ok_or_else(|| ExtractError::MissingTitle {
        element_id: element_id.to_string(),
    })?;

    let mut ticket = Ticket::new(element_id, title);
    ticket.points = points;
    ticket.ac = ac;
    ticket.desc = desc;
    Ok(ticket)
}

/// Deserializes one mapping value into its typed field
fn typed_field<T: serde::de::DeserializeOwned>(
    element_id: &str,
    value: Value,
) -> Result<T, ExtractError> {
    serde_yaml::from_value(value).map_err(|source| ExtractError::Metadata {
        element_id: element_id.to_string(),
        source,
    })
}
