//! Interaction layer for Carfinder: the AI assistant client.

pub mod assistant_api_agent;

pub use assistant_api_agent::{AssistantApiAgent, filters_from_wire};
