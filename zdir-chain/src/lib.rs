//! Ledger-facing primitives for the Zdir identity directory.
//!
//! The directory binds a claimed identity to a Zcash payment address and
//! lets the claim owner edit social metadata by sending a transaction whose
//! memo field carries a compact edit payload. This crate holds everything
//! that touches the ledger's encodings:
//!
//! - [`address`]: classification of address strings across the transparent,
//!   Sapling, unified, and TEX encoding families,
//! - [`amount`]: fixed-point ZEC amounts and their wallet-facing rendering,
//! - [`memo`]: the compact edit-payload grammar and its link diff tokens,
//! - [`payment`]: memo byte budgeting and `zcash:` payment requests.
//!
//! Everything here is a pure, synchronous transformation: no I/O, no shared
//! state, and no panics on untrusted input.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod address;
pub mod amount;
pub mod memo;
pub mod parameters;
pub mod payment;

pub use address::{classify, AddressKind, Classification};
pub use amount::Zec;
pub use memo::{EditMemo, Identity, LinkId, LinkRef, LinkToken, ProfileField};
pub use parameters::NetworkKind;
pub use payment::{MemoBudget, PaymentRequest};
