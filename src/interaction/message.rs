use tokio::task::JoinHandle;
use tracing::{Instrument, debug, error, info, instrument};

use crate::{
    base::types::{InboundMessage, Void},
    interaction::responder::Responder,
    service::chat::ChatClient,
};

/// Handles an inbound chat message.
///
/// Bot messages (this bot's own echoes included) are dropped here: nothing is
/// spawned and nothing is sent. Every other message is answered on its own task,
/// whose handle is returned.
#[instrument(skip_all, fields(channel_id = %channel_id))]
pub fn handle_message(message: InboundMessage, channel_id: String, responder: Responder, chat: ChatClient) -> Option<JoinHandle<()>> {
    if message.sender_is_bot {
        debug!("Ignoring message from a bot.");
        return None;
    }

    info!("Received message from user {}: {}", message.sender_id, message.text);

    let handle = tokio::spawn(
        async move {
            // Process the event.
            let result = handle_message_internal(message, channel_id, &responder, &chat).await;

            // Log any errors.
            if let Err(err) = &result {
                error!("Error while handling: {}", err);
            }
        }
        .in_current_span(),
    );

    Some(handle)
}

#[instrument(skip_all)]
async fn handle_message_internal(message: InboundMessage, channel_id: String, responder: &Responder, chat: &ChatClient) -> Void {
    let reply = responder.respond(&message).await;

    chat.send_message(&channel_id, &reply).await
}
