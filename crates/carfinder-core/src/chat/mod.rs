//! Chat domain module.
//!
//! - `message`: transcript entries (`ChatMessage`, `MessageRole`)
//! - `history`: append-only transcript (`ChatHistory`)
//! - `mode`: single-flight submission state (`ChatMode`)
//! - `assistant`: the AI boundary (`AssistantService`, `AssistantReply`)

mod assistant;
mod history;
mod message;
mod mode;

pub use assistant::{ASSISTANT_APOLOGY, AssistantReply, AssistantService};
pub use history::ChatHistory;
pub use message::{ChatMessage, MessageRole};
pub use mode::ChatMode;
