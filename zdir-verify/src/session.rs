//! The verification session state machine.
//!
//! A session walks an owner through proving control of their address:
//!
//! ```text
//! DraftEditing -> AwaitingBroadcast -> AwaitingCode -> CodeSubmitted
//!      ^                                                   |
//!      +------------------- (auto reset) ------------------+
//! ```
//!
//! with an explicit edge back to `DraftEditing` from every state. The
//! pending edit set survives all transitions: leaving the verification
//! flow never costs the owner their draft.
//!
//! While a session is in the verification flow, its memo and payment
//! request are always a fresh function of the current pending edits,
//! never a snapshot frozen at entry, so edits made with the wallet window
//! already open still land in the payload.
//!
//! Observers subscribe to a watch channel of [`SessionSnapshot`]s instead
//! of listening for ambient broadcast events; every transition and edit
//! publishes a new snapshot.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info};

use zdir_chain::{
    memo::Identity,
    payment::{MemoBudget, PaymentRequest, MIN_VERIFY_AMOUNT},
};

use crate::edits::PendingEditSet;


/// How long a submitted code is shown as submitted before the session
/// returns to draft editing on its own.
pub const CODE_SUBMITTED_RESET: Duration = Duration::from_millis(1500);

/// Where a session is in the verification flow.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// The owner is editing their draft; nothing is in flight.
    #[default]
    DraftEditing,

    /// The payment request is built and waiting for the owner to send
    /// the transaction from their wallet.
    AwaitingBroadcast,

    /// The owner says the transaction was sent; waiting for them to type
    /// the one-time code delivered back over the memo channel.
    AwaitingCode,

    /// A code was handed to the verification service.
    CodeSubmitted,
}

/// The identity a session is editing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TargetIdentity {
    /// The directory identity, claimed or not-yet-claimed.
    pub id: Identity,

    /// The profile's current payment address, for display.
    pub address: String,
}

/// What observers see of a session: the state, and the live payload when
/// the session is in the verification flow.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// The session state.
    pub state: SessionState,

    /// The memo payload, present in verification-flow states.
    pub memo: Option<String>,

    /// The wallet URI for the verification payment.
    pub uri: Option<String>,

    /// How much of the memo byte budget the payload uses.
    pub budget: Option<MemoBudget>,
}

/// A single owner's verification session.
///
/// Exactly one writer exists per session (the interactive owner), so the
/// session is plain mutable state; the watch channel is the only
/// concurrency surface, and it carries immutable snapshots.
#[derive(Debug)]
pub struct VerificationSession {
    target: TargetIdentity,
    pending: PendingEditSet,
    state: SessionState,
    code: Option<String>,
    sender: watch::Sender<SessionSnapshot>,
}

impl VerificationSession {
    /// Opens a session for `target`, starting in draft editing.
    pub fn new(target: TargetIdentity) -> VerificationSession {
        let (sender, _) = watch::channel(SessionSnapshot::default());
        let session = VerificationSession {
            target,
            pending: PendingEditSet::new(),
            state: SessionState::DraftEditing,
            code: None,
            sender,
        };
        session.publish();
        session
    }

    /// The current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The identity being edited.
    pub fn target(&self) -> &TargetIdentity {
        &self.target
    }

    /// The pending edit set.
    pub fn pending(&self) -> &PendingEditSet {
        &self.pending
    }

    /// Subscribes an observer to session snapshots.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.sender.subscribe()
    }

    /// Replaces the pending edit set.
    ///
    /// In the verification flow this re-encodes the memo immediately:
    /// the published payload is always current, not frozen at
    /// [`switch_to_verify`](Self::switch_to_verify).
    pub fn apply_edits(&mut self, pending: PendingEditSet) {
        self.pending = pending;
        self.publish();
    }

    /// The memo payload for the current pending edits.
    pub fn current_memo(&self) -> String {
        self.pending.to_memo(self.target.id).encode()
    }

    /// The verification payment request for the current pending edits.
    pub fn payment_request(&self) -> PaymentRequest {
        PaymentRequest::verification(self.current_memo(), MIN_VERIFY_AMOUNT)
            .expect("the protocol minimum meets the protocol minimum")
    }

    /// Enters the verification flow, building the payment request.
    pub fn switch_to_verify(&mut self) -> Result<PaymentRequest, SessionError> {
        if self.state != SessionState::DraftEditing {
            return Err(SessionError::AlreadyVerifying);
        }

        self.state = SessionState::AwaitingBroadcast;
        let request = self.payment_request();
        info!(memo = %self.current_memo(), "entering verification flow");
        self.publish();
        Ok(request)
    }

    /// The owner asserts the transaction was sent.
    ///
    /// No ledger confirmation happens here; a broadcast transaction can't
    /// be cancelled, and a wrong assertion only means the code never
    /// arrives.
    pub fn mark_sent(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::AwaitingBroadcast {
            return Err(SessionError::NotAwaitingBroadcast);
        }

        self.state = SessionState::AwaitingCode;
        info!("verification payment reported sent");
        self.publish();
        Ok(())
    }

    /// Hands a one-time code to the verification service.
    ///
    /// Whether the code is right is the service's call; this machine only
    /// refuses blank input and records the submission.
    pub fn submit_code(&mut self, code: &str) -> Result<(), SessionError> {
        if self.state != SessionState::AwaitingCode {
            return Err(SessionError::NotAwaitingCode);
        }
        if code.trim().is_empty() {
            return Err(SessionError::EmptyCode);
        }

        self.code = Some(code.trim().to_string());
        self.state = SessionState::CodeSubmitted;
        info!("one-time code submitted");
        self.publish();
        Ok(())
    }

    /// Drives the auto-reset after a code submission.
    ///
    /// Waits out [`CODE_SUBMITTED_RESET`], then returns the session to
    /// draft editing with the pending edit set intact. Call right after a
    /// successful [`submit_code`](Self::submit_code); if something else
    /// moved the session meanwhile, this does nothing.
    pub async fn await_auto_reset(&mut self) {
        tokio::time::sleep(CODE_SUBMITTED_RESET).await;

        if self.state == SessionState::CodeSubmitted {
            debug!("code submission settled, returning to draft");
            self.code = None;
            self.state = SessionState::DraftEditing;
            self.publish();
        }
    }

    /// The verification service rejected the submitted code.
    ///
    /// The session stays in the code-entry step; a wrong code is
    /// retryable, never terminal.
    pub fn code_rejected(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::CodeSubmitted {
            return Err(SessionError::NoCodeSubmitted);
        }

        self.code = None;
        self.state = SessionState::AwaitingCode;
        info!("one-time code rejected, awaiting retry");
        self.publish();
        Ok(())
    }

    /// Returns to draft editing from any state.
    ///
    /// Discards in-progress code entry and any unsent payment request,
    /// but preserves the pending edit set.
    pub fn switch_to_draft(&mut self) {
        self.code = None;
        self.state = SessionState::DraftEditing;
        debug!("returned to draft editing");
        self.publish();
    }

    fn snapshot(&self) -> SessionSnapshot {
        match self.state {
            SessionState::DraftEditing => SessionSnapshot {
                state: self.state,
                memo: None,
                uri: None,
                budget: None,
            },
            _ => {
                let memo = self.current_memo();
                SessionSnapshot {
                    state: self.state,
                    budget: Some(MemoBudget::for_text(&memo)),
                    uri: Some(self.payment_request().to_uri()),
                    memo: Some(memo),
                }
            }
        }
    }

    fn publish(&self) {
        self.sender.send_replace(self.snapshot());
    }
}

/// Session state machine errors. All of these are retryable; none of
/// them end the session.
#[derive(Error, Copy, Clone, Debug, Eq, PartialEq)]
pub enum SessionError {
    /// `submit_code` was called with blank input.
    #[error("a one-time code is required")]
    EmptyCode,

    /// `switch_to_verify` was called mid-flow.
    #[error("the session is already in the verification flow")]
    AlreadyVerifying,

    /// `mark_sent` was called with no payment request outstanding.
    #[error("no verification payment is awaiting broadcast")]
    NotAwaitingBroadcast,

    /// `submit_code` was called before the transaction was reported sent.
    #[error("the session is not waiting for a one-time code")]
    NotAwaitingCode,

    /// `code_rejected` was called with no submission outstanding.
    #[error("no one-time code has been submitted")]
    NoCodeSubmitted,
}
