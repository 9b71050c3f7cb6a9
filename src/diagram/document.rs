//! Excalidraw document model
//!
//! Deserializes the subset of the Excalidraw file format that matters for
//! ticket extraction. Documents carry a flat list of heterogeneous elements;
//! only text and arrow elements are modeled, everything else lands in a
//! catch-all variant and is ignored.

use serde::Deserialize;

/// Expected document `type` discriminator
pub const DOCUMENT_TYPE: &str = "excalidraw";

/// Expected document format version
pub const DOCUMENT_VERSION: u64 = 2;

/// A parsed Excalidraw document
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// Format discriminator, expected to be `"excalidraw"`
    #[serde(rename = "type")]
    pub kind: String,

    /// Format version, expected to be `2`
    pub version: u64,

    /// Flat list of diagram elements, in document order
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Document {
    /// Returns true if the type/version pair is the supported format
    pub fn is_supported(&self) -> bool {
        self.kind == DOCUMENT_TYPE && self.version == DOCUMENT_VERSION
    }
}

/// A single diagram element, discriminated by its `type` field
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    /// A text label, possibly carrying ticket metadata
    Text(TextElement),

    /// A connector between two elements
    Arrow(ArrowElement),

    /// Any other element kind (shapes, images, frames, ...)
    #[serde(other)]
    Other,
}

/// A text element
#[derive(Debug, Clone, Deserialize)]
pub struct TextElement {
    /// Element id, unique within the document
    pub id: String,

    /// Raw text content
    pub text: String,
}

/// An arrow element with optional endpoint bindings
///
/// Excalidraw only fills a binding when the arrow endpoint is attached to
/// another element, and the binding's `elementId` can itself be null.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowElement {
    /// Element id, unique within the document
    pub id: String,

    /// Binding at the arrow's tail
    #[serde(default)]
    pub start_binding: Option<Binding>,

    /// Binding at the arrow's head
    #[serde(default)]
    pub end_binding: Option<Binding>,
}

impl ArrowElement {
    /// Id of the element the arrow starts from, if bound
    pub fn start_element_id(&self) -> Option<&str> {
        self.start_binding.as_ref().and_then(|b| b.element_id.as_deref())
    }

    /// Id of the element the arrow points at, if bound
    pub fn end_element_id(&self) -> Option<&str> {
        self.end_binding.as_ref().and_then(|b| b.element_id.as_deref())
    }
}

/// An arrow endpoint binding
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    /// Id of the bound element; null when the endpoint is detached
    #[serde(default)]
    pub element_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_realistic_document() {
        let json = serde_json::json!({
            "type": "excalidraw",
            "version": 2,
            "source": "https://excalidraw.com",
            "elements": [
                {
                    "id": "t1",
                    "type": "text",
                    "x": 100, "y": 100,
                    "text": "---\nticket",
                    "originalText": "---\nticket"
                },
                {
                    "id": "r1",
                    "type": "rectangle",
                    "x": 80, "y": 80, "width": 200, "height": 80
                },
                {
                    "id": "a1",
                    "type": "arrow",
                    "startBinding": {"elementId": "t1", "focus": 0.1, "gap": 4},
                    "endBinding": null
                }
            ],
            "appState": {"viewBackgroundColor": "#ffffff", "gridSize": null},
            "files": {}
        });

        let doc: Document = serde_json::from_value(json).unwrap();
        assert!(doc.is_supported());
        assert_eq!(doc.elements.len(), 3);

        assert!(matches!(&doc.elements[0], Element::Text(t) if t.id == "t1"));
        assert!(matches!(&doc.elements[1], Element::Other));

        let Element::Arrow(arrow) = &doc.elements[2] else {
            panic!("expected an arrow");
        };
        assert_eq!(arrow.start_element_id(), Some("t1"));
        assert_eq!(arrow.end_element_id(), None);
    }

    #[test]
    fn null_element_id_reads_as_unbound() {
        let json = serde_json::json!({
            "id": "a1",
            "type": "arrow",
            "startBinding": {"elementId": null},
            "endBinding": {"elementId": null}
        });

        let element: Element = serde_json::from_value(json).unwrap();
        let Element::Arrow(arrow) = element else {
            panic!("expected an arrow");
        };
        assert_eq!(arrow.start_element_id(), None);
        assert_eq!(arrow.end_element_id(), None);
    }

    #[test]
    fn missing_elements_defaults_to_empty() {
        let json = serde_json::json!({"type": "excalidraw", "version": 2});

        let doc: Document = serde_json::from_value(json).unwrap();
        assert!(doc.elements.is_empty());
    }

    #[test]
    fn is_supported_rejects_other_formats() {
        let json = serde_json::json!({"type": "drawio", "version": 2, "elements": []});
        let doc: Document = serde_json::from_value(json).unwrap();
        assert!(!doc.is_supported());

        let json = serde_json::json!({"type": "excalidraw", "version": 1, "elements": []});
        let doc: Document = serde_json::from_value(json).unwrap();
        assert!(!doc.is_supported());
    }
}
