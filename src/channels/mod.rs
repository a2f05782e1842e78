//! Delivery channels — independent paths to the form sink.
//!
//! The sink never returns a usable acknowledgment, so the dispatcher
//! compensates with redundancy: every channel carries the same field
//! encoding and is fired independently.

pub mod beacon;
pub mod form_post;

pub use beacon::BeaconChannel;
pub use form_post::FormPostChannel;

use async_trait::async_trait;

use crate::error::DeliveryError;

/// One best-effort path to the form sink.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// Channel name for logging.
    fn name(&self) -> &str;

    /// Deliver the encoded fields. Errors are reported so the
    /// dispatcher can log them; they are never surfaced further.
    async fn deliver(&self, fields: &[(String, String)]) -> Result<(), DeliveryError>;
}
