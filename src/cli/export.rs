//! Card and checklist creation against the board
//!
//! Cards are created in graph insertion order so every ticket's short URL
//! exists before any dependency checklist refers to it. Calls are throttled
//! to stay under the board API's rate limits.

use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};

use super::output::{shorten, Output};
use crate::board::BoardClient;
use crate::config::TrelloConfig;
use crate::domain::TicketGraph;

/// Width cards names are truncated to when echoed back
const NAME_WIDTH: usize = 60;

/// Pause between consecutive write calls
const WRITE_DELAY: Duration = Duration::from_millis(500);

/// Pause between tickets
const TICKET_DELAY: Duration = Duration::from_secs(1);

/// Creates one card per ticket, recording card id and short URL
///
/// Tickets with acceptance criteria also get an AC checklist with one item
/// per criterion.
pub fn create_cards(
    output: &Output,
    client: &BoardClient,
    list_id: &str,
    graph: &mut TicketGraph,
    settings: &TrelloConfig,
) -> Result<()> {
    let total = graph.len();

    for (index, ticket) in graph.iter_mut().enumerate() {
        let payload = ticket.to_card(Some(list_id));
        let created = client.create_card(&payload)?;
        output.success(&format!(
            "Created card '{}'",
            shorten(&created.name, NAME_WIDTH)
        ));
        ticket.set_card(created.id.clone(), created.short_url);

        if let Some(ac) = ticket.ac.as_deref().filter(|ac| !ac.is_empty()) {
            thread::sleep(WRITE_DELAY);
            let checklist = client.create_checklist(&created.id, &settings.ac_checklist_title)?;
            for item in ac {
                thread::sleep(WRITE_DELAY);
                client.create_checkitem(&checklist.id, item)?;
            }
        }

        if index + 1 != total {
            thread::sleep(TICKET_DELAY);
        }
    }

    Ok(())
}

/// Creates the prerequisite/dependent checklists for every related ticket
///
/// Each checklist item is the related ticket's short URL, which the board
/// renders as a card link. Requires `create_cards` to have run first.
pub fn create_dependencies(
    output: &Output,
    client: &BoardClient,
    graph: &TicketGraph,
    settings: &TrelloConfig,
) -> Result<()> {
    output.verbose("Creating dependency checklists");

    let total = graph.len();

    for (index, ticket) in graph.iter().enumerate() {
        if !ticket.has_relations() {
            continue;
        }

        let card_id = ticket
            .card_id
            .as_deref()
            .ok_or_else(|| anyhow!("ticket {} has no card yet", ticket.id))?;

        if !ticket.depends_on.is_empty() {
            let checklist =
                client.create_checklist(card_id, &settings.prerequisites_checklist_title)?;
            for related in graph.prerequisites_of(&ticket.id) {
                thread::sleep(WRITE_DELAY);
                let reference = related.short_url.as_deref().unwrap_or(&related.id);
                client.create_checkitem(&checklist.id, reference)?;
            }
        }

        if !ticket.dependents.is_empty() {
            let checklist =
                client.create_checklist(card_id, &settings.dependents_checklist_title)?;
            for related in graph.dependents_of(&ticket.id) {
                thread::sleep(WRITE_DELAY);
                let reference = related.short_url.as_deref().unwrap_or(&related.id);
                client.create_checkitem(&checklist.id, reference)?;
            }
        }

        if index + 1 != total {
            thread::sleep(TICKET_DELAY);
        }
    }

    output.success("Created dependencies");
    Ok(())
}
