//! Shared result aliases and message/ticket types.

use serde::{Deserialize, Serialize};

/// Error type used across the crate.
pub type Err = anyhow::Error;
/// Result with the crate error type.
pub type Res<T> = Result<T, Err>;
/// Result carrying no value.
pub type Void = Res<()>;

/// A chat message as seen by the bot, independent of the chat platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundMessage {
    /// The raw message text (empty when the event carried none).
    pub text: String,
    /// The platform user id of the sender (empty when unknown).
    pub sender_id: String,
    /// Whether the message was posted by a bot (including this one).
    pub sender_is_bot: bool,
}

/// What the bot should do with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Open a ticket in the tracker.
    Ticket,
    /// Answer with the generative backend.
    Support,
}

/// Project reference inside a [`TicketRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketProject {
    /// Tracker project id.
    pub id: i64,
}

/// Payload for the tracker's issue-creation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRequest {
    /// One-line ticket title.
    pub summary: String,
    /// Ticket body.
    pub description: String,
    /// Project that receives the ticket.
    pub project: TicketProject,
    /// Category name; must exist in the project.
    pub category: String,
}

/// A ticket the tracker accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTicket {
    /// Tracker-assigned ticket id.
    pub id: u64,
}
