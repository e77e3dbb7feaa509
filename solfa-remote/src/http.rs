//! HTTP implementation of the remote store.
//!
//! One REST resource per identity:
//! - `GET  {base}/progress/{identity}` — 200 with the document, or 404
//!   for a brand-new identity
//! - `PUT  {base}/progress/{identity}` — insert-or-replace with the
//!   full document as the JSON body (no partial-field patch)
//!
//! Server-managed columns (created/updated timestamps) never appear on
//! this side of the wire.

use crate::{RemoteConfig, RemoteError, RemoteResult, RemoteStore};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use solfa_types::{Identity, ProgressDocument};
use std::time::Duration;
use tracing::debug;

/// Remote store client over HTTP.
pub struct HttpRemoteStore {
    client: Client,
    base_url: String,
    access_token: String,
}

impl HttpRemoteStore {
    /// Creates a client for the configured endpoint.
    #[must_use]
    pub fn new(config: RemoteConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            base_url: config.endpoint_url.trim_end_matches('/').to_string(),
            access_token: config.access_token,
        }
    }

    fn record_url(&self, identity: &Identity) -> String {
        format!("{}/progress/{}", self.base_url, identity)
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn load(&self, identity: &Identity) -> RemoteResult<Option<ProgressDocument>> {
        let response = self
            .client
            .get(self.record_url(identity))
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!(%identity, "no remote progress record yet");
                Ok(None)
            }
            status if status.is_success() => {
                let body = response.bytes().await?;
                let document = serde_json::from_slice(&body)?;
                Ok(Some(document))
            }
            status => Err(RemoteError::Status {
                status: status.as_u16(),
            }),
        }
    }

    async fn upsert(&self, identity: &Identity, document: &ProgressDocument) -> RemoteResult<()> {
        let response = self
            .client
            .put(self.record_url(identity))
            .bearer_auth(&self.access_token)
            .json(document)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(%identity, "remote progress record upserted");
            Ok(())
        } else {
            Err(RemoteError::Status {
                status: status.as_u16(),
            })
        }
    }
}
