//! Intent routing for inbound messages.

use crate::base::types::Intent;

/// Phrase that turns a message into a ticket request, matched case-insensitively.
pub const TICKET_TRIGGER: &str = "create ticket";

/// Decide what to do with a message.
///
/// This is a plain substring test. The ticket check runs first, so a message
/// asking for a ticket never reaches the LLM.
pub fn classify(text: &str) -> Intent {
    if text.to_lowercase().contains(TICKET_TRIGGER) { Intent::Ticket } else { Intent::Support }
}

// Tests.
