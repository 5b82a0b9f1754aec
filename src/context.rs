// src/context.rs
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::StateStore;

/// Who submitted the transaction, as reported by the hosting runtime.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientIdentity {
    pub msp_id: String,
    pub id: String,
}

impl ClientIdentity {
    pub fn new(msp_id: &str, id: &str) -> Self {
        Self {
            msp_id: msp_id.to_string(),
            id: id.to_string(),
        }
    }
}

/// Per-invocation handle to the state store. Every store call made while
/// serving one transaction goes through the same `Context`.
#[derive(Clone)]
pub struct Context {
    stub: Arc<dyn StateStore>,
    tx_id: String,
    channel_id: String,
    timestamp: DateTime<Utc>,
    client: ClientIdentity,
}

impl Context {
    /// Context with a fresh transaction id, for local hosting and tests.
    pub fn new(stub: Arc<dyn StateStore>) -> Self {
        Self {
            stub,
            tx_id: Uuid::now_v7().to_string(),
            channel_id: String::new(),
            timestamp: Utc::now(),
            client: ClientIdentity::default(),
        }
    }

    /// Context as handed over by a runtime that already assigned the ids.
    pub fn from_runtime(
        stub: Arc<dyn StateStore>,
        tx_id: String,
        channel_id: String,
        timestamp: DateTime<Utc>,
        client: ClientIdentity,
    ) -> Self {
        Self {
            stub,
            tx_id,
            channel_id,
            timestamp,
            client,
        }
    }

    pub fn with_client(mut self, client: ClientIdentity) -> Self {
        self.client = client;
        self
    }

    pub fn with_channel(mut self, channel_id: &str) -> Self {
        self.channel_id = channel_id.to_string();
        self
    }

    pub fn stub(&self) -> &dyn StateStore {
        self.stub.as_ref()
    }

    pub fn tx_id(&self) -> &str {
        &self.tx_id
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn client_identity(&self) -> &ClientIdentity {
        &self.client
    }
}
