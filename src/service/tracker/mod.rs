pub mod mantis;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{CreatedTicket, Res, TicketRequest};

// Traits.

/// Generic ticket tracker trait that clients must implement.
///
/// This trait defines the functionality the helpdesk-bot needs from an issue
/// tracker. Implementing this trait allows different trackers to be used.
#[async_trait]
pub trait GenericTrackerClient: Send + Sync + 'static {
    /// Submit a new ticket.
    ///
    /// The request is sent exactly once. There is no idempotency key, so
    /// submitting the same request twice opens two tickets. Anything short of
    /// a confirmed ticket id is an error.
    async fn create_ticket(&self, ticket: &TicketRequest) -> Res<CreatedTicket>;
}

// Structs.

/// Ticket tracker client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct TrackerClient {
    inner: Arc<dyn GenericTrackerClient>,
}

impl Deref for TrackerClient {
    type Target = dyn GenericTrackerClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl TrackerClient {
    pub fn new(inner: Arc<dyn GenericTrackerClient>) -> Self {
        Self { inner }
    }
}
