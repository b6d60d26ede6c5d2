//! Job opening management: `hireboard openings`.

use anyhow::{Result, bail};
use console::style;
use dialoguer::Confirm;

use super::super::OpeningsCommands;
use hireboard::board_config::BoardConfig;
use hireboard::store::{Opening, OpeningDraft, Store, open_store};

pub async fn cmd_openings(config: &BoardConfig, command: Option<OpeningsCommands>) -> Result<()> {
    let store = open_store(config)?;

    match command {
        None | Some(OpeningsCommands::List) => {
            print_openings(&store.list_openings().await?);
        }
        Some(OpeningsCommands::Create(args)) => {
            let draft = OpeningDraft::from(args);
            if let Err(msg) = draft.validate() {
                bail!(msg);
            }
            let opening = store.create_opening(&draft).await?;
            println!(
                "{} opening {} \"{}\"",
                style("Created").green().bold(),
                opening.id,
                opening.title
            );
            println!();
            print_openings(&store.list_openings().await?);
        }
        Some(OpeningsCommands::Update { id, fields }) => {
            let draft = OpeningDraft::from(fields);
            if let Err(msg) = draft.validate() {
                bail!(msg);
            }
            let opening = store.update_opening(id, &draft).await?;
            println!(
                "{} opening {} \"{}\"",
                style("Updated").green().bold(),
                opening.id,
                opening.title
            );
            println!();
            print_openings(&store.list_openings().await?);
        }
        Some(OpeningsCommands::Delete { id }) => {
            delete_opening(store.as_ref(), id, config.yes).await?;
        }
    }

    Ok(())
}

async fn delete_opening(store: &dyn Store, id: i64, yes: bool) -> Result<()> {
    if !yes {
        let confirm = Confirm::new()
            .with_prompt(format!("Delete opening {}?", id))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirm {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    store.delete_opening(id).await?;
    println!("Deleted opening {}", id);
    Ok(())
}

fn print_openings(openings: &[Opening]) {
    if openings.is_empty() {
        println!("No openings found.");
        return;
    }

    println!(
        "{}",
        style(format!(
            "{:<5} {:<32} {:<10} {:>10}  {}",
            "ID", "Title", "Status", "Candidates", "Closes"
        ))
        .bold()
    );
    for opening in openings {
        let status = if opening.is_open() {
            style(opening.status_label()).green()
        } else {
            style(opening.status_label()).dim()
        };
        println!(
            "{:<5} {:<32} {:<10} {:>10}  {}",
            opening.id,
            opening.title,
            status,
            opening.candidate_count,
            opening.closes_at_display()
        );
    }
}
