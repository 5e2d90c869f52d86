//! Event handling and user interactions for helpdesk-bot.
//!
//! This module carries a chat message from the platform to a reply:
//! - Turning platform events into [`InboundMessage`](crate::base::types::InboundMessage)s and dropping bot traffic
//! - Deciding between opening a ticket and answering a support query
//! - Producing the reply text from the LLM or the ticket tracker

pub mod intake;
pub mod message;
pub mod responder;
pub mod route;
