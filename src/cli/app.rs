//! Main CLI application structure

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::Select;

use super::export;
use super::output::{shorten, Output, OutputFormat};
use crate::board::{Board, BoardClient, BoardList};
use crate::config::Config;
use crate::diagram::{extract_tickets, Document};
use crate::domain::TicketGraph;

#[derive(Parser)]
#[command(name = "scrawl")]
#[command(author, version, about = "Turn annotated Excalidraw sketches into Trello tickets")]
pub struct Cli {
    /// Path to the .excalidraw file
    pub path: PathBuf,

    /// Only print the extracted tickets, without touching the board
    #[arg(long)]
    pub print: bool,

    /// Skip creating dependency checklists
    #[arg(long)]
    pub ignore_deps: bool,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    let mut graph = load_tickets(&cli.path, &output)?;
    if graph.is_empty() {
        output.note("Couldn't find any tickets");
        return Ok(());
    }

    let count = graph.len();
    output.success(&format!(
        "Found {} ticket{}",
        count,
        if count > 1 { "s" } else { "" }
    ));

    if cli.print {
        print_tickets(&output, &graph);
        return Ok(());
    }

    let config = Config::load()?;
    let (api_key, token) = config.credentials()?;
    let client = BoardClient::new(api_key, token)?;

    let Some(board) = select_board(&client)? else {
        output.note("Aborted");
        return Ok(());
    };
    output.note(&board.name);

    let Some(list) = select_list(&client, &board.id)? else {
        output.note("Aborted");
        return Ok(());
    };
    output.note(&list.name);

    export::create_cards(&output, &client, &list.id, &mut graph, &config.trello)?;

    if !cli.ignore_deps {
        export::create_dependencies(&output, &client, &graph, &config.trello)?;
    }

    Ok(())
}

/// Reads and parses the document, then extracts the ticket graph
fn load_tickets(path: &Path, output: &Output) -> Result<TicketGraph> {
    output.verbose(&format!("Reading {}", path.display()));

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let document: Document = serde_json::from_str(&content)
        .with_context(|| format!("{} is not an Excalidraw document", path.display()))?;

    let graph = extract_tickets(&document)?;
    output.verbose(&format!("Extracted {} tickets", graph.len()));

    Ok(graph)
}

/// Prints the extracted tickets without creating anything
fn print_tickets(output: &Output, graph: &TicketGraph) {
    if output.is_json() {
        let cards: Vec<_> = graph.iter().map(|t| t.to_card(None)).collect();
        output.data(&cards);
        return;
    }

    println!();
    for ticket in graph {
        let name = ticket.to_card(None).name;
        println!("{}", shorten(&format!("- {}", name), 60));
    }
}

/// Asks the user to pick a board; None means they cancelled
fn select_board(client: &BoardClient) -> Result<Option<Board>> {
    let mut boards = client.boards()?;
    if boards.is_empty() {
        anyhow::bail!("No boards found for this account");
    }

    let names: Vec<_> = boards.iter().map(|b| b.name.clone()).collect();
    let picked = Select::new()
        .with_prompt("Boards")
        .items(&names)
        .default(0)
        .interact_opt()
        .context("Board selection failed")?;

    Ok(picked.map(|index| boards.swap_remove(index)))
}

/// Asks the user to pick a list on the board; None means they cancelled
fn select_list(client: &BoardClient, board_id: &str) -> Result<Option<BoardList>> {
    let mut lists = client.lists(board_id)?;
    if lists.is_empty() {
        anyhow::bail!("The selected board has no lists");
    }

    let names: Vec<_> = lists.iter().map(|l| l.name.clone()).collect();
    let picked = Select::new()
        .with_prompt("Lists")
        .items(&names)
        .default(0)
        .interact_opt()
        .context("List selection failed")?;

    Ok(picked.map(|index| lists.swap_remove(index)))
}
