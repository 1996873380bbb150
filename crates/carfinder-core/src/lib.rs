//! Domain layer for Carfinder.
//!
//! Holds the facet vocabulary, the canonical filter state and its query
//! translation, catalog and chat models, and the service traits implemented
//! by the infrastructure and interaction crates.

pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod filter;

// Re-export common error type
pub use error::CarfinderError;

pub use catalog::{Car, CatalogService, FilterOptions};
pub use chat::{
    ASSISTANT_APOLOGY, AssistantReply, AssistantService, ChatHistory, ChatMessage, ChatMode,
    MessageRole,
};
pub use config::{ClientConfig, ConfigFile};
pub use filter::{Facet, FilterState, Query};
