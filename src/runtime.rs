//! Runtime services and shared state for the helpdesk-bot.

use tracing::{info, instrument};

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    interaction::responder::Responder,
    service::{chat::ChatClient, llm::LlmClient, tracker::TrackerClient},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the configuration and every client the bot talks through.
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The LLM client instance.
    pub llm: LlmClient,
    /// The ticket tracker client instance.
    pub tracker: TrackerClient,
    /// The responder that turns messages into replies.
    pub responder: Responder,
    /// The chat client instance.
    pub chat: ChatClient,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub async fn new(config: Config) -> Res<Self> {
        // Initialize the LLM client.
        let llm = LlmClient::gemini(&config)?;

        // Initialize the ticket tracker client.
        let tracker = TrackerClient::mantis(&config)?;

        // Initialize the responder.
        let responder = Responder::new(config.clone(), llm.clone(), tracker.clone());

        // Initialize the slack client.
        let chat = ChatClient::slack(&config, responder.clone()).await?;

        Ok(Self {
            config,
            llm,
            tracker,
            responder,
            chat,
        })
    }

    /// Listen for chat events until shutdown.
    pub async fn start(&self) -> Void {
        info!("Listening for messages as {} ...", self.chat.bot_user_id());

        self.chat.start().await
    }
}
