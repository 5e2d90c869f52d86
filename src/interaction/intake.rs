//! Conversion of Slack events into platform-neutral messages.

use slack_morphism::{
    SlackBotId,
    events::{SlackMessageEvent, SlackMessageEventType},
};

use crate::base::types::InboundMessage;

/// Build an [`InboundMessage`] from a Slack message event.
///
/// Missing text or sender become empty strings. A message counts as bot
/// traffic when it, or the message nested in an edit notification, carries a
/// non-empty `bot_id`.
pub fn inbound_message(event: &SlackMessageEvent) -> InboundMessage {
    let text = event.content.as_ref().and_then(|c| c.text.clone()).unwrap_or_default();
    let sender_id = event.sender.user.as_ref().map(|u| u.0.clone()).unwrap_or_default();

    let nested_bot_id = event.message.as_ref().and_then(|m| m.sender.bot_id.as_ref());
    let sender_is_bot = is_bot_id(event.sender.bot_id.as_ref()) || is_bot_id(nested_bot_id);

    InboundMessage { text, sender_id, sender_is_bot }
}

/// Whether the event only reports an edit or deletion of an earlier message.
///
/// Slack emits these for link previews on the bot's own replies, so they never
/// get a reply.
pub fn is_message_update(event: &SlackMessageEvent) -> bool {
    matches!(event.subtype, Some(SlackMessageEventType::MessageChanged | SlackMessageEventType::MessageDeleted))
}

fn is_bot_id(bot_id: Option<&SlackBotId>) -> bool {
    bot_id.is_some_and(|b| !b.0.is_empty())
}

// Tests.
