//! Assistant service trait definition.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::filter::FilterState;

/// Transcript text appended when an assistant turn fails.
pub const ASSISTANT_APOLOGY: &str = "Sorry, I encountered an error processing your request. \
Please try again or use the manual filters.";

/// A successful assistant turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    /// Text shown to the user.
    pub message: String,
    /// Filter set derived from the request, already mapped to UI facets.
    ///
    /// `Some` replaces the whole filter state; facets the assistant omitted
    /// are empty here.
    pub filters: Option<FilterState>,
    /// Number of matching cars, when the assistant reports one.
    pub cars_found: Option<u64>,
}

/// Natural-language to filter-set interpretation performed by an external AI.
#[async_trait]
pub trait AssistantService: Send + Sync {
    /// Sends one free-text request and returns the assistant's reply.
    ///
    /// Transport errors and non-success responses are returned as `Err`.
    async fn ask(&self, message: &str) -> Result<AssistantReply>;
}
