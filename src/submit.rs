//! Submission dispatcher — dual-channel, best-effort finalize.
//!
//! The sink gives no reliable acknowledgment, so delivery cannot be
//! confirmed. The dispatcher compensates with redundancy (two
//! independent channels) rather than confirmation, and reports
//! success after a fixed pacing window regardless of outcome. The
//! manual fallback link and the local CSV export are the user-facing
//! recovery paths.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::catalog::{FINALIZE_ENTRY, entry_fields};
use crate::channels::{BeaconChannel, DeliveryChannel, FormPostChannel};
use crate::error::DeliveryError;
use crate::store::{Answer, ResponseStore};

/// Placeholder posted for slots the participant left unanswered.
const NO_RESPONSE: &str = "No response";

/// Delimiter flattening multi-select answers on the wire. Distinct
/// from the CSV export delimiter.
const WIRE_MULTI_DELIMITER: &str = ", ";

/// Wire value for the finalize slot, derived from the consent flag.
const CONSENT_GIVEN: &str = "Consent Provided";
const CONSENT_WITHHELD: &str = "No Consent";

/// Coarse status of one finalize attempt. Transitions only run
/// forward; a new session requires an explicit `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Linking,
    Transmitting,
    Complete,
}

impl SubmissionState {
    /// Check if this state allows transitioning to another state.
    pub fn can_transition_to(&self, target: SubmissionState) -> bool {
        use SubmissionState::*;

        matches!(
            (self, target),
            (Idle, Linking) | (Linking, Transmitting) | (Transmitting, Complete)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Linking => "linking",
            Self::Transmitting => "transmitting",
            Self::Complete => "complete",
        };
        write!(f, "{s}")
    }
}

/// Pacing of the finalize flow. The delays are cosmetic progress
/// signaling plus headroom for the fire-and-forget channels to be
/// dispatched by the network layer.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionPacing {
    /// Linking → transmitting.
    pub linking_delay: Duration,
    /// Transmitting → complete.
    pub settle_delay: Duration,
}

impl Default for SubmissionPacing {
    fn default() -> Self {
        Self {
            linking_delay: Duration::from_millis(800),
            settle_delay: Duration::from_millis(1700),
        }
    }
}

/// Encode the store into (field name, value) pairs for every slot
/// 1..=46, in slot order.
///
/// Multi-select answers flatten with `", "`; unanswered slots carry
/// the literal "No response" placeholder. The finalize slot is always
/// the consent confirmation string, never a stored answer.
pub fn encode_fields(store: &ResponseStore) -> Vec<(String, String)> {
    entry_fields()
        .map(|(entry, field)| {
            let value = if entry == FINALIZE_ENTRY {
                let confirmation = if store.consent() { CONSENT_GIVEN } else { CONSENT_WITHHELD };
                confirmation.to_string()
            } else {
                match store.answer(entry) {
                    Some(Answer::Single(s)) => s.clone(),
                    Some(Answer::Multi(items)) => items.join(WIRE_MULTI_DELIMITER),
                    None => NO_RESPONSE.to_string(),
                }
            };
            (field.to_string(), value)
        })
        .collect()
}

/// Pushes one session's responses through every delivery channel and
/// tracks the coarse submission status.
pub struct SubmissionDispatcher {
    channels: Vec<Arc<dyn DeliveryChannel>>,
    pacing: SubmissionPacing,
    state: RwLock<SubmissionState>,
    in_progress: AtomicBool,
}

impl SubmissionDispatcher {
    pub fn new(channels: Vec<Arc<dyn DeliveryChannel>>, pacing: SubmissionPacing) -> Self {
        Self {
            channels,
            pacing,
            state: RwLock::new(SubmissionState::Idle),
            in_progress: AtomicBool::new(false),
        }
    }

    /// The standard two-channel setup against one sink endpoint.
    pub fn for_endpoint(endpoint: &str, pacing: SubmissionPacing) -> Self {
        let channels: Vec<Arc<dyn DeliveryChannel>> = vec![
            Arc::new(FormPostChannel::new(endpoint)),
            Arc::new(BeaconChannel::new(endpoint)),
        ];
        Self::new(channels, pacing)
    }

    pub async fn state(&self) -> SubmissionState {
        *self.state.read().await
    }

    pub fn in_progress(&self) -> bool {
        self.in_progress.load(Ordering::SeqCst)
    }

    /// Finalize the session: fire every channel, then walk the state
    /// machine to `Complete` on the fixed pacing schedule.
    ///
    /// Channel outcomes never affect the result; their failures are
    /// logged and discarded. The only error is `AlreadyInProgress`,
    /// returned without any state change.
    pub async fn finalize(&self, store: &ResponseStore) -> Result<(), DeliveryError> {
        if self.in_progress.swap(true, Ordering::SeqCst) {
            return Err(DeliveryError::AlreadyInProgress);
        }

        self.set_state(SubmissionState::Linking).await;

        let fields = Arc::new(encode_fields(store));
        for channel in &self.channels {
            let channel = Arc::clone(channel);
            let fields = Arc::clone(&fields);
            tokio::spawn(async move {
                match channel.deliver(&fields).await {
                    Ok(()) => info!(channel = channel.name(), "delivery dispatched"),
                    Err(e) => {
                        warn!(channel = channel.name(), error = %e, "delivery channel failed")
                    }
                }
            });
        }

        tokio::time::sleep(self.pacing.linking_delay).await;
        self.set_state(SubmissionState::Transmitting).await;

        tokio::time::sleep(self.pacing.settle_delay).await;
        self.set_state(SubmissionState::Complete).await;

        self.in_progress.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// Rearm for a new session. Only meaningful once the previous
    /// attempt reached `Complete` (or never started).
    pub async fn reset(&self) {
        if self.in_progress() {
            return;
        }
        let mut state = self.state.write().await;
        *state = SubmissionState::Idle;
    }

    async fn set_state(&self, target: SubmissionState) {
        let mut state = self.state.write().await;
        if state.can_transition_to(target) {
            info!(from = %*state, to = %target, "submission state change");
            *state = target;
        } else {
            warn!(from = %*state, to = %target, "refusing backward submission transition");
        }
    }
}
