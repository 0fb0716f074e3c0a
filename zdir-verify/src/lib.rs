//! Profile edit reconciliation and verification sessions for the Zdir
//! identity directory.
//!
//! Profile owners edit their entry in a draft form, then prove ownership
//! by sending a transaction whose memo carries the edit payload. This
//! crate holds the directory-side logic of that flow:
//!
//! - [`link`]: the in-memory link rows behind the editable link list,
//! - [`reconcile`]: the diff that turns an edited link collection into a
//!   minimal token list, recomputed in full on every edit,
//! - [`edits`]: the pending edit set a session accumulates,
//! - [`session`]: the state machine that sequences draft editing, the
//!   verification payment, and one-time-code entry.
//!
//! Storage reads/writes, transaction broadcast, and code matching belong
//! to collaborating services; nothing in this crate does I/O.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod edits;
pub mod link;
pub mod reconcile;
pub mod session;

pub use edits::{PendingEditSet, ProfileRecord};
pub use link::{LinkEntry, RowKey};
pub use reconcile::{recompute, Reconciler};
pub use session::{SessionError, SessionSnapshot, SessionState, TargetIdentity, VerificationSession};
