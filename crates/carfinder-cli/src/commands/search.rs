use anyhow::Result;
use clap::Args;

use carfinder_application::{SearchOutcome, SearchSession};
use carfinder_core::filter::Facet;

use crate::display;

/// Facet values for a one-shot search. Values are passed through as typed;
/// non-numeric bounds are dropped from the query.
#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    #[arg(long)]
    pub make: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub min_year: Option<String>,
    #[arg(long)]
    pub max_year: Option<String>,
    #[arg(long)]
    pub min_price: Option<String>,
    #[arg(long)]
    pub max_price: Option<String>,
    #[arg(long)]
    pub min_mileage: Option<String>,
    #[arg(long)]
    pub max_mileage: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long)]
    pub bodytype: Option<String>,
}

impl SearchArgs {
    /// The facets given on the command line.
    pub fn facets(&self) -> Vec<(Facet, &str)> {
        [
            (Facet::Make, &self.make),
            (Facet::Model, &self.model),
            (Facet::MinYear, &self.min_year),
            (Facet::MaxYear, &self.max_year),
            (Facet::MinPrice, &self.min_price),
            (Facet::MaxPrice, &self.max_price),
            (Facet::MinMileage, &self.min_mileage),
            (Facet::MaxMileage, &self.max_mileage),
            (Facet::Color, &self.color),
            (Facet::Bodytype, &self.bodytype),
        ]
        .into_iter()
        .filter_map(|(facet, value)| value.as_deref().map(|v| (facet, v)))
        .collect()
    }
}

pub async fn run(session: &SearchSession, args: &SearchArgs) -> Result<()> {
    for (facet, value) in args.facets() {
        session.set_facet(facet, value).await;
    }

    match session.apply_filters().await {
        SearchOutcome::Failed(e) => Err(e.into()),
        _ => {
            display::print_cars(&session.cars().await);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facets_lists_only_given_flags_in_facet_order() {
        let args = SearchArgs {
            bodytype: Some("SUV".to_string()),
            make: Some("Honda".to_string()),
            max_price: Some("20000".to_string()),
            ..Default::default()
        };
        assert_eq!(
            args.facets(),
            vec![
                (Facet::Make, "Honda"),
                (Facet::MaxPrice, "20000"),
                (Facet::Bodytype, "SUV"),
            ]
        );
    }

    #[test]
    fn test_no_flags_means_no_facets() {
        assert!(SearchArgs::default().facets().is_empty());
    }
}
