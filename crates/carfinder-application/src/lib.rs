//! Application layer for Carfinder.
//!
//! This crate coordinates the domain model with the catalog and assistant
//! clients: `SearchSession` owns the filter state, the result set and the chat
//! transcript, and `SessionFactory` builds sessions from configuration.

pub mod factory;
pub mod search_session;

pub use factory::SessionFactory;
pub use search_session::{SearchOutcome, SearchSession, TurnOutcome};
