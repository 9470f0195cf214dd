//! Two-step gate for destructive operations.
//!
//! A view never removes a record directly: it parks a
//! [`ConfirmationRequest`] carrying whatever the follow-up needs (usually
//! the record id) and shows the message to the operator. Confirming hands
//! the payload back so the caller can run the removal; cancelling just
//! drops the request.

pub struct ConfirmationRequest<T> {
    message: String,
    payload: T,
}

impl<T> ConfirmationRequest<T> {
    pub fn new(message: impl Into<String>, payload: T) -> Self {
        Self {
            message: message.into(),
            payload,
        }
    }

    /// Prompt text shown to the operator.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Resolve the gate, releasing the payload for execution.
    pub fn confirm(self) -> T {
        self.payload
    }

    /// Drop the request without acting on it.
    pub fn cancel(self) {}
}
