//! Ticket domain model
//!
//! Tickets are the work items found in a diagram. Each one comes from a
//! single annotated text element and can depend on other tickets through
//! the arrows drawn between them.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use serde::Serialize;

/// A work item extracted from a diagram
///
/// Identity is the owning text element's id: equality, ordering and hashing
/// look at `id` alone. Dependency sets and the board-assigned fields are
/// mutable bookkeeping and never participate in comparison.
#[derive(Debug, Clone, Serialize)]
pub struct Ticket {
    /// Unique identifier, taken from the diagram element that declared it
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// Optional story-point estimate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,

    /// Optional acceptance criteria, one entry per checklist item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ac: Option<Vec<String>>,

    /// Optional long-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    /// Board card id, set after the card has been created remotely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,

    /// Board card short URL, set after the card has been created remotely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_url: Option<String>,

    /// Ids of tickets that depend on this one
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub dependents: BTreeSet<String>,

    /// Ids of tickets this one depends on
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub depends_on: BTreeSet<String>,
}

impl Ticket {
    /// Creates a new ticket with the given id and title
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            points: None,
            ac: None,
            desc: None,
            card_id: None,
            short_url: None,
            dependents: BTreeSet::new(),
            depends_on: BTreeSet::new(),
        }
    }

    /// Records the remote card created for this ticket
    pub fn set_card(&mut self, card_id: impl Into<String>, short_url: impl Into<String>) {
        self.card_id = Some(card_id.into());
        self.short_url = Some(short_url.into());
    }

    /// Returns true if this ticket takes part in any dependency relation
    pub fn has_relations(&self) -> bool {
        !self.dependents.is_empty() || !self.depends_on.is_empty()
    }

    /// Projects this ticket into a card payload for the board
    ///
    /// The card name carries the estimate when one is set: `(3.5) foo bar`.
    /// Zero is a real estimate and is rendered; only an unset estimate is
    /// suppressed.
    pub fn to_card(&self, list_id: Option<&str>) -> Card {
        let name = match self.points {
            Some(points) => format!("({}) {}", points, self.title),
            None => self.title.clone(),
        };

        Card {
            id_list: list_id.unwrap_or_default().to_string(),
            name,
            desc: self.desc.clone().unwrap_or_default(),
        }
    }
}

impl PartialEq for Ticket {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Ticket {}

impl Hash for Ticket {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Ticket {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ticket {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

/// Card payload sent to the board when creating a ticket's card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    /// Target list id, empty when not yet chosen
    #[serde(rename = "idList")]
    pub id_list: String,

    /// Card title, including the estimate prefix when set
    pub name: String,

    /// Card description, empty when the ticket has none
    pub desc: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_name_includes_points() {
        let mut ticket = Ticket::new("el1", "foo bar");
        ticket.points = Some(3.5);

        let card = ticket.to_card(None);
        assert_eq!(card.name, "(3.5) foo bar");
    }

    #[test]
    fn card_name_without_points_is_title() {
        let ticket = Ticket::new("el1", "foo");

        let card = ticket.to_card(None);
        assert_eq!(card.name, "foo");
    }

    #[test]
    fn card_name_renders_zero_points() {
        let mut ticket = Ticket::new("el1", "foo");
        ticket.points = Some(0.0);

        let card = ticket.to_card(None);
        assert_eq!(card.name, "(0) foo");
    }

    #[test]
    fn card_name_renders_whole_points_without_fraction() {
        let mut ticket = Ticket::new("el1", "foo");
        ticket.points = Some(5.0);

        let card = ticket.to_card(None);
        assert_eq!(card.name, "(5) foo");
    }

    #[test]
    fn card_carries_list_id_and_desc() {
        let mut ticket = Ticket::new("el1", "foo");
        ticket.desc = Some("details".to_string());

        let card = ticket.to_card(Some("list-9"));
        assert_eq!(card.id_list, "list-9");
        assert_eq!(card.desc, "details");
    }

    #[test]
    fn card_defaults_to_empty_list_and_desc() {
        let ticket = Ticket::new("el1", "foo");

        let card = ticket.to_card(None);
        assert_eq!(card.id_list, "");
        assert_eq!(card.desc, "");
    }

    #[test]
    fn card_serializes_with_board_field_names() {
        let mut ticket = Ticket::new("el1", "foo");
        ticket.points = Some(2.0);

        let json = serde_json::to_value(ticket.to_card(Some("l1"))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"idList": "l1", "name": "(2) foo", "desc": ""})
        );
    }

    #[test]
    fn equality_is_by_id_only() {
        let mut a = Ticket::new("el1", "one title");
        let b = Ticket::new("el1", "another title");
        a.points = Some(8.0);
        a.depends_on.insert("el2".to_string());

        assert_eq!(a, b);
    }

    #[test]
    fn ordering_is_by_id_only() {
        let a = Ticket::new("a", "zzz");
        let b = Ticket::new("b", "aaa");

        assert!(a < b);
    }

    #[test]
    fn set_card_fills_both_slots() {
        let mut ticket = Ticket::new("el1", "foo");
        ticket.set_card("card-1", "https://trello.example/c/abc");

        assert_eq!(ticket.card_id.as_deref(), Some("card-1"));
        assert_eq!(
            ticket.short_url.as_deref(),
            Some("https://trello.example/c/abc")
        );
    }

    #[test]
    fn has_relations_reflects_either_side() {
        let mut ticket = Ticket::new("el1", "foo");
        assert!(!ticket.has_relations());

        ticket.dependents.insert("el2".to_string());
        assert!(ticket.has_relations());
    }
}
