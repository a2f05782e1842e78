//! Secondary channel — opaque best-effort request.
//!
//! Carries the same field encoding as the form post over a second,
//! independently configured transport: redirects are never followed
//! (the sink answers form posts with a redirect; this channel does
//! not chase it) and the whole request is capped by a short timeout
//! so a stalled sink cannot hold a task open. The outcome is treated
//! as opaque — the body and status are never read — and whatever this
//! channel reports, the dispatcher suppresses it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::redirect;

use crate::channels::DeliveryChannel;
use crate::error::DeliveryError;

/// Cap on the whole request; the finalize flow does not wait on it.
const BEACON_TIMEOUT: Duration = Duration::from_secs(5);

/// Fire-and-forget duplicate of the form post.
pub struct BeaconChannel {
    endpoint: String,
    client: reqwest::Client,
}

impl BeaconChannel {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(BEACON_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }
}

#[async_trait]
impl DeliveryChannel for BeaconChannel {
    fn name(&self) -> &str {
        "beacon"
    }

    async fn deliver(&self, fields: &[(String, String)]) -> Result<(), DeliveryError> {
        match self.client.post(&self.endpoint).form(fields).send().await {
            Ok(_) => Ok(()),
            Err(e) if e.is_timeout() => Err(DeliveryError::Timeout {
                name: self.name().to_string(),
                timeout: BEACON_TIMEOUT,
            }),
            Err(e) => Err(DeliveryError::SendFailed {
                name: self.name().to_string(),
                reason: e.to_string(),
            }),
        }
    }
}
