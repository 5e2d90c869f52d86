//! Library root for `helpdesk-bot`.
//!
//! Helpdesk-bot is a Slack assistant for a washing-machine support channel designed to:
//! - Answer support questions with Google Gemini
//! - Open a MantisBT ticket when a user asks to "create ticket"
//! - Ignore other bots, including its own replies
//!
//! The architecture is built around small traits for the chat platform, the
//! LLM, and the ticket tracker, so each can be swapped or mocked.

#[deny(missing_docs)]
pub mod base;
pub mod interaction;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use rustls::crypto;
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the helpdesk-bot runtime:
/// - Initializes the crypto provider
/// - Creates the runtime context with LLM, tracker, and chat clients
/// - Starts the main event loop for processing messages
pub async fn start(config: Config) -> Void {
    info!("Starting helpdesk-bot ...");

    // Start the crypto provider.
    crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install the rustls crypto provider."))?;

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config).await?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
