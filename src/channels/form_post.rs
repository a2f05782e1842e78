//! Primary channel — urlencoded form post to the sink.

use async_trait::async_trait;

use crate::channels::DeliveryChannel;
use crate::error::DeliveryError;

/// Posts `application/x-www-form-urlencoded` bodies to the sink
/// endpoint. The response is never consumed: the sink does not return
/// anything a client could act on, so only transport-level send
/// failures are reported.
pub struct FormPostChannel {
    endpoint: String,
    client: reqwest::Client,
}

impl FormPostChannel {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl DeliveryChannel for FormPostChannel {
    fn name(&self) -> &str {
        "form-post"
    }

    async fn deliver(&self, fields: &[(String, String)]) -> Result<(), DeliveryError> {
        self.client
            .post(&self.endpoint)
            .form(fields)
            .send()
            .await
            .map_err(|e| DeliveryError::SendFailed {
                name: self.name().to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }
}
