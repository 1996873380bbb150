//! Filter domain module.
//!
//! - `facet`: the fixed facet set and its UI/wire vocabulary
//! - `state`: canonical filter state (`FilterState`)
//! - `query`: translation of the state into the catalog wire query (`Query`)

mod facet;
mod query;
mod state;

pub use facet::{FACET_VOCABULARY, Facet};
pub use query::{ANY_SENTINEL, Query, parse_leading_int};
pub use state::FilterState;
