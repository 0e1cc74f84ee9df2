//! Reward flow with its single recovery path: when the backend does not
//! know the customer, offer to create them and retry the reward once.

use crate::api::ApiError;

const FALLBACK_REWARD: &str = "Failed to reward points";
const FALLBACK_ADD: &str = "Failed to add customer";

/// States the flow moves through. `ConfirmingRecovery` carries the
/// backend message that triggered the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewardState {
    Idle,
    Validating,
    Fetching,
    Error(String),
    ConfirmingRecovery(String),
    Retrying,
    Done,
}

/// Drives one reward attempt plus the optional add-then-retry recovery.
///
/// The flow itself performs no I/O; the caller supplies the two backend
/// operations and the user's answer to the recovery prompt.
pub struct RewardFlow {
    name: String,
    points: u32,
    state: RewardState,
}

impl RewardFlow {
    pub fn new(name: impl Into<String>, points: u32) -> Self {
        Self {
            name: name.into(),
            points,
            state: RewardState::Idle,
        }
    }

    pub fn state(&self) -> &RewardState {
        &self.state
    }

    /// First attempt. Validation failures never reach the network.
    pub fn submit<F>(&mut self, mut reward: F) -> &RewardState
    where
        F: FnMut(&str, u32) -> Result<(), ApiError>,
    {
        self.state = RewardState::Validating;
        if self.name.trim().is_empty() || self.points == 0 {
            self.state =
                RewardState::Error("Please provide both customer name and points.".to_string());
            return &self.state;
        }

        self.state = RewardState::Fetching;
        self.state = match reward(&self.name, self.points) {
            Ok(()) => RewardState::Done,
            Err(e) if indicates_missing_customer(&e) => {
                RewardState::ConfirmingRecovery(e.user_message(FALLBACK_REWARD))
            }
            Err(e) => RewardState::Error(e.user_message(FALLBACK_REWARD)),
        };
        &self.state
    }

    /// Resolution of the recovery prompt. Declining is terminal with the
    /// original failure message. Accepting runs create then one reward
    /// retry; a failing retry is terminal, there is no second recovery.
    pub fn resolve<C, F>(&mut self, accepted: bool, mut create: C, mut reward: F) -> &RewardState
    where
        C: FnMut(&str) -> Result<(), ApiError>,
        F: FnMut(&str, u32) -> Result<(), ApiError>,
    {
        let message = match &self.state {
            RewardState::ConfirmingRecovery(message) => message.clone(),
            // resolve only means something while a prompt is pending
            _ => return &self.state,
        };

        if !accepted {
            self.state = RewardState::Error(message);
            return &self.state;
        }

        self.state = RewardState::Retrying;
        if let Err(e) = create(&self.name) {
            self.state = RewardState::Error(e.user_message(FALLBACK_ADD));
            return &self.state;
        }

        self.state = match reward(&self.name, self.points) {
            Ok(()) => RewardState::Done,
            Err(e) => RewardState::Error(e.user_message(FALLBACK_REWARD)),
        };
        &self.state
    }
}

/// Whether a failure means the customer record does not exist yet. The
/// backend phrases this as "Customer not found"; match case-insensitively
/// on the payload text.
fn indicates_missing_customer(error: &ApiError) -> bool {
    match error {
        ApiError::Backend(message) => message.to_lowercase().contains("customer not found"),
        _ => false,
    }
}
