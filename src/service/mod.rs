//! Service integrations for external APIs and clients.
//!
//! This module contains implementations for the services used by the helpdesk-bot:
//! - Chat services (e.g., Slack)
//! - LLM services (e.g., Gemini)
//! - Ticket trackers (e.g., MantisBT)
//!
//! Each service module defines both a generic trait and a concrete implementation,
//! allowing for extensibility and easy testing.

pub mod chat;
pub mod llm;
pub mod tracker;
