use anyhow::{Result, bail};

use carfinder_application::SearchSession;

use crate::display;

pub async fn run(session: &SearchSession) -> Result<()> {
    if !session.load_filter_options().await {
        bail!("Could not load filter options from the catalog");
    }
    display::print_options(&session.filter_options().await);
    Ok(())
}
