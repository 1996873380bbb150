use anyhow::{Result, bail};
use colored::Colorize;

use carfinder_application::{SearchOutcome, SearchSession, TurnOutcome};

use crate::display;

pub async fn run(session: &SearchSession, text: &str) -> Result<()> {
    session.initialize().await;

    match session.submit_message(text).await {
        TurnOutcome::Skipped => bail!("Nothing to ask"),
        TurnOutcome::Failed(e) => {
            display::print_history(&session.history().await);
            eprintln!("{}", format!("Assistant request failed: {e}").red());
        }
        TurnOutcome::Answered {
            filters_applied,
            cars_found,
            search,
        } => {
            display::print_history(&session.history().await);
            if let Some(count) = cars_found {
                println!("{}", format!("Assistant reports {count} matching cars").bright_black());
            }
            if filters_applied {
                println!();
                display::print_filters(&session.filters().await);
            }
            if let Some(SearchOutcome::Failed(e)) = search {
                eprintln!("{}", format!("Search with the new filters failed: {e}").red());
                return Ok(());
            }
            println!();
            display::print_cars(&session.cars().await);
        }
    }

    Ok(())
}
