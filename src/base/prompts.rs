//! Prompt templates and canned replies.

/// Placeholder in a support directive that receives the user's message.
pub const USER_TEXT_PLACEHOLDER: &str = "{text}";

/// Default directive for the support assistant.
///
/// The user's message replaces [`USER_TEXT_PLACEHOLDER`] in [`build_support_prompt`].
pub const SUPPORT_DIRECTIVE: &str = r#####"You are a support assistant for washing machine issues.

User said: "{text}"

Give a helpful, clear response. Do NOT use any markdown like **bold**, *italic*, or bullet points. Just plain, readable text.

If the issue can’t be resolved easily, ask the user if they’d like to create a support ticket."#####;

/// Reply used when the generative backend fails.
pub const SUPPORT_FALLBACK_REPLY: &str = "Sorry, there was an issue generating a response. Please try again later.";

/// Reply used when the tracker does not confirm a ticket.
pub const TICKET_FALLBACK_REPLY: &str = "⚠️ Sorry, something went wrong while creating the ticket. Please try again later.";

/// Build the full support prompt for a user message.
///
/// The text goes where the directive has [`USER_TEXT_PLACEHOLDER`]. A directive
/// without the placeholder gets the text appended after it.
pub fn build_support_prompt(directive: &str, text: &str) -> String {
    if directive.contains(USER_TEXT_PLACEHOLDER) {
        directive.replacen(USER_TEXT_PLACEHOLDER, text, 1)
    } else {
        format!("{directive}\n\nUser said: \"{text}\"")
    }
}

/// Build the ticket description from the sender and their message.
pub fn build_ticket_description(sender_id: &str, text: &str) -> String {
    format!("User ID: {sender_id}\n\nIssue: {text}")
}

/// Build the confirmation reply for a created ticket.
pub fn ticket_created_reply(ticket_id: u64) -> String {
    format!("✅ A support ticket has been created in MantisBT! Ticket ID: {ticket_id}")
}

// Tests.
