//! Ticket graph
//!
//! An insertion-ordered arena of tickets keyed by element id. Dependency
//! edges are stored on the tickets themselves as id sets; the arena is the
//! lookup table that resolves ids back to tickets.

use std::collections::HashMap;

use super::ticket::Ticket;

/// The tickets extracted from one document, in discovery order
///
/// Insertion order is the contract with downstream consumers: cards must be
/// created in this order so that every ticket's `short_url` exists by the
/// time a dependency checklist references it.
#[derive(Debug, Clone, Default)]
pub struct TicketGraph {
    tickets: Vec<Ticket>,
    index: HashMap<String, usize>,
}

impl TicketGraph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a ticket, keyed by its id
    ///
    /// A ticket with an id already present replaces the existing entry in
    /// place, keeping the original position.
    pub fn insert(&mut self, ticket: Ticket) {
        match self.index.get(&ticket.id) {
            Some(&slot) => self.tickets[slot] = ticket,
            None => {
                self.index.insert(ticket.id.clone(), self.tickets.len());
                self.tickets.push(ticket);
            }
        }
    }

    /// Looks up a ticket by id
    pub fn get(&self, id: &str) -> Option<&Ticket> {
        self.index.get(id).map(|&slot| &self.tickets[slot])
    }

    /// Returns true if the graph contains the id
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Records that `dependent` depends on `prerequisite`
    ///
    /// Both edge halves are written together: the prerequisite joins the
    /// dependent's `depends_on` and the dependent joins the prerequisite's
    /// `dependents`. If either id is unknown nothing is written and `false`
    /// is returned. Self-edges and cycles are accepted; the diagram is the
    /// source of truth here, not a scheduler.
    pub fn add_dependency(&mut self, dependent: &str, prerequisite: &str) -> bool {
        let (Some(&dep_slot), Some(&pre_slot)) =
            (self.index.get(dependent), self.index.get(prerequisite))
        else {
            return false;
        };

        self.tickets[dep_slot]
            .depends_on
            .insert(prerequisite.to_string());
        self.tickets[pre_slot]
            .dependents
            .insert(dependent.to_string());
        true
    }

    /// Resolves a ticket's prerequisites to tickets, in id order
    pub fn prerequisites_of(&self, id: &str) -> Vec<&Ticket> {
        self.get(id)
            .map(|t| t.depends_on.iter().filter_map(|dep| self.get(dep)).collect())
            .unwrap_or_default()
    }

    /// Resolves a ticket's dependents to tickets, in id order
    pub fn dependents_of(&self, id: &str) -> Vec<&Ticket> {
        self.get(id)
            .map(|t| t.dependents.iter().filter_map(|dep| self.get(dep)).collect())
            .unwrap_or_default()
    }

    /// Iterates over tickets in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter()
    }

    /// Iterates mutably over tickets in insertion order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Ticket> {
        self.tickets.iter_mut()
    }

    /// Returns the number of tickets
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    /// Returns true if the graph holds no tickets
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

impl<'a> IntoIterator for &'a TicketGraph {
    type Item = &'a Ticket;
    type IntoIter = std::slice::Iter<'a, Ticket>;

    fn into_iter(self) -> Self::IntoIter {
        self.tickets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_of(ids: &[&str]) -> TicketGraph {
        let mut graph = TicketGraph::new();
        for id in ids {
            graph.insert(Ticket::new(*id, format!("ticket {}", id)));
        }
        graph
    }

    #[test]
    fn empty_graph() {
        let graph = TicketGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
    }

    #[test]
    fn preserves_insertion_order() {
        let graph = graph_of(&["c", "a", "b"]);

        let ids: Vec<_> = graph.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn insert_with_same_id_replaces_in_place() {
        let mut graph = graph_of(&["a", "b"]);
        graph.insert(Ticket::new("a", "updated"));

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.get("a").unwrap().title, "updated");
        let ids: Vec<_> = graph.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn add_dependency_writes_both_sides() {
        let mut graph = graph_of(&["t1", "t2"]);

        assert!(graph.add_dependency("t2", "t1"));

        assert!(graph.get("t2").unwrap().depends_on.contains("t1"));
        assert!(graph.get("t1").unwrap().dependents.contains("t2"));
    }

    #[test]
    fn add_dependency_with_unknown_id_writes_nothing() {
        let mut graph = graph_of(&["t1"]);

        assert!(!graph.add_dependency("t1", "ghost"));
        assert!(!graph.add_dependency("ghost", "t1"));

        let t1 = graph.get("t1").unwrap();
        assert!(t1.depends_on.is_empty());
        assert!(t1.dependents.is_empty());
    }

    #[test]
    fn self_dependency_is_accepted() {
        let mut graph = graph_of(&["t1"]);

        assert!(graph.add_dependency("t1", "t1"));

        let t1 = graph.get("t1").unwrap();
        assert!(t1.depends_on.contains("t1"));
        assert!(t1.dependents.contains("t1"));
    }

    #[test]
    fn cycles_are_accepted() {
        let mut graph = graph_of(&["t1", "t2"]);

        assert!(graph.add_dependency("t2", "t1"));
        assert!(graph.add_dependency("t1", "t2"));

        assert!(graph.get("t1").unwrap().depends_on.contains("t2"));
        assert!(graph.get("t2").unwrap().depends_on.contains("t1"));
    }

    #[test]
    fn duplicate_edges_collapse() {
        let mut graph = graph_of(&["t1", "t2"]);

        graph.add_dependency("t2", "t1");
        graph.add_dependency("t2", "t1");

        assert_eq!(graph.get("t2").unwrap().depends_on.len(), 1);
        assert_eq!(graph.get("t1").unwrap().dependents.len(), 1);
    }

    #[test]
    fn fan_in_and_fan_out() {
        let mut graph = graph_of(&["a", "b", "c"]);

        // c depends on both a and b; a has two dependents
        graph.add_dependency("c", "a");
        graph.add_dependency("c", "b");
        graph.add_dependency("b", "a");

        assert_eq!(graph.get("c").unwrap().depends_on.len(), 2);
        assert_eq!(graph.get("a").unwrap().dependents.len(), 2);
    }

    #[test]
    fn resolves_relations_to_tickets() {
        let mut graph = graph_of(&["t1", "t2", "t3"]);
        graph.add_dependency("t3", "t1");
        graph.add_dependency("t3", "t2");

        let prereqs = graph.prerequisites_of("t3");
        assert_eq!(prereqs.len(), 2);
        assert_eq!(prereqs[0].id, "t1");
        assert_eq!(prereqs[1].id, "t2");

        let dependents = graph.dependents_of("t1");
        assert_eq!(dependents.len(), 1);
        assert_eq!(dependents[0].id, "t3");
    }

    #[test]
    fn relations_of_unknown_id_are_empty() {
        let graph = graph_of(&["t1"]);
        assert!(graph.prerequisites_of("ghost").is_empty());
        assert!(graph.dependents_of("ghost").is_empty());
    }
}
