//! Reply production for routed messages.
//!
//! The responder owns both outbound integrations. Every failure is logged and
//! turned into a fixed apology, so callers always get text to post.

use tracing::{error, info, instrument};

use crate::{
    base::{
        config::Config,
        prompts::{self, SUPPORT_FALLBACK_REPLY, TICKET_FALLBACK_REPLY},
        types::{InboundMessage, Intent, TicketProject, TicketRequest},
    },
    interaction::route,
    service::{llm::LlmClient, tracker::TrackerClient},
};

/// Produces replies for user messages.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Responder {
    config: Config,
    llm: LlmClient,
    tracker: TrackerClient,
}

impl Responder {
    /// Create a responder over the given LLM and tracker clients.
    pub fn new(config: Config, llm: LlmClient, tracker: TrackerClient) -> Self {
        Self { config, llm, tracker }
    }

    /// Route the message and produce the reply to post.
    #[instrument(skip_all)]
    pub async fn respond(&self, message: &InboundMessage) -> String {
        match route::classify(&message.text) {
            Intent::Ticket => {
                info!("Routing message to ticket creation ...");
                self.open_ticket(message).await
            }
            Intent::Support => {
                info!("Routing message to the support assistant ...");
                self.answer_support_query(&message.text).await
            }
        }
    }

    /// Ask the LLM about the user's issue.
    #[instrument(skip_all)]
    pub async fn answer_support_query(&self, text: &str) -> String {
        let prompt = prompts::build_support_prompt(&self.config.support_directive, text);

        match self.llm.generate(&prompt).await {
            Ok(reply) => reply,
            Err(err) => {
                error!("LLM error: {:#}", err);
                SUPPORT_FALLBACK_REPLY.to_string()
            }
        }
    }

    /// Open a ticket for the message and report the outcome.
    #[instrument(skip_all)]
    pub async fn open_ticket(&self, message: &InboundMessage) -> String {
        let ticket = self.ticket_request(message);

        match self.tracker.create_ticket(&ticket).await {
            Ok(created) => prompts::ticket_created_reply(created.id),
            Err(err) => {
                error!("Ticket creation failed: {:#}", err);
                TICKET_FALLBACK_REPLY.to_string()
            }
        }
    }

    /// Build the tracker payload for a message.
    pub fn ticket_request(&self, message: &InboundMessage) -> TicketRequest {
        TicketRequest {
            summary: self.config.ticket_summary.clone(),
            description: prompts::build_ticket_description(&message.sender_id, &message.text),
            project: TicketProject { id: self.config.mantis_project_id },
            category: self.config.ticket_category.clone(),
        }
    }
}

// Tests.
