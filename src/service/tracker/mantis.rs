//! MantisBT REST API implementation of the ticket tracker.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{
    StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::base::{
    config::Config,
    types::{CreatedTicket, Res, TicketRequest},
};

use super::{GenericTrackerClient, TrackerClient};

// Extra methods on `TrackerClient` applied by the mantis implementation.

impl TrackerClient {
    /// Creates a new MantisBT tracker client.
    pub fn mantis(config: &Config) -> Res<Self> {
        let client = MantisTrackerClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

/// Body of a successful `POST /issues/`.
#[derive(Debug, Deserialize)]
struct CreateIssueResponse {
    issue: CreatedTicket,
}

/// MantisBT tracker client implementation.
#[derive(Clone)]
pub struct MantisTrackerClient {
    client: reqwest::Client,
    api_token: String,
    issues_url: String,
}

impl MantisTrackerClient {
    /// Create a new MantisBT tracker client.
    #[instrument(name = "MantisTrackerClient::new", skip_all)]
    pub fn new(config: &Config) -> Res<Self> {
        let client = reqwest::Client::builder().timeout(Duration::from_secs(config.request_timeout_secs)).build()?;
        let issues_url = format!("{}/issues/", config.mantis_url.trim_end_matches('/'));

        Ok(Self {
            client,
            api_token: config.mantis_api_token.clone(),
            issues_url,
        })
    }
}

#[async_trait]
impl GenericTrackerClient for MantisTrackerClient {
    #[instrument(name = "MantisTrackerClient::create_ticket", skip_all)]
    async fn create_ticket(&self, ticket: &TicketRequest) -> Res<CreatedTicket> {
        info!("Creating Mantis ticket with summary: {}", ticket.summary);

        let response = self
            .client
            .post(&self.issues_url)
            .header(AUTHORIZATION, &self.api_token)
            .header(CONTENT_TYPE, "application/json")
            .json(ticket)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Mantis request failed: {e}"))?;

        let status = response.status();
        let raw = response.text().await.map_err(|e| anyhow::anyhow!("Failed to read Mantis response: {e}"))?;

        // Mantis answers `201 Created` for a new issue; anything else is a failure.
        if status != StatusCode::CREATED {
            return Err(anyhow::anyhow!("Failed to create ticket. Status: {status}, Response: {raw}"));
        }

        let parsed: CreateIssueResponse = serde_json::from_str(&raw).map_err(|e| anyhow::anyhow!("Unexpected Mantis response ({e}): {raw}"))?;

        info!("Ticket successfully created: {}", parsed.issue.id);

        Ok(parsed.issue)
    }
}

// Tests.
