//! Memo byte budgeting and wallet-facing payment requests.
//!
//! The final artifact of an edit flow is a `zcash:` URI the owner opens in
//! their own wallet. Its field names and scheme are a compatibility
//! contract with the wallet ecosystem and must not change independently of
//! it:
//!
//! ```text
//! zcash:?address=<addr>&amount=<decimal>&memo=<base64url>
//! ```
//!
//! The ledger caps memos at 512 bytes, measured *after* base64 expansion.
//! [`MemoBudget`] reports how much of that budget a payload uses; going
//! over is reported as data, never as an error, because whether to block
//! submission is the caller's decision.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{address::classify, amount::Zec, parameters::DIRECTORY_ADDRESS};

/// The ledger's memo size limit, in bytes after base64 expansion.
pub const MAX_ENCODED_MEMO_BYTES: usize = 512;

/// The smallest amount a verification payment may carry.
///
/// Dust-sized payments below this are ignored by the verification
/// service, so requests built by [`PaymentRequest::verification`] refuse
/// them up front.
pub const MIN_VERIFY_AMOUNT: Zec = Zec::new(100_000);

/// The suggested verification amount: twice the minimum, so a wallet
/// rounding down still clears the bar.
pub const DEFAULT_VERIFY_AMOUNT: Zec = Zec::new(200_000);

/// The URI scheme wallets register handlers for.
pub const URI_SCHEME: &str = "zcash";

/// Encodes memo text as base64url: the standard alphabet with `+` → `-`,
/// `/` → `_`, and no trailing padding.
pub fn to_base64url(text: &str) -> String {
    URL_SAFE_NO_PAD.encode(text.as_bytes())
}

/// How much of the ledger's memo budget a payload uses.
///
/// Advisory only: the budget reports the overrun, it does not truncate
/// the memo or fail.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MemoBudget {
    /// The memo's size in raw (UTF-8) bytes.
    pub raw_bytes: usize,

    /// The memo's size after base64 expansion, padded to a 4-byte group.
    pub encoded_bytes: usize,

    /// Budget left before the 512-byte cap; negative when over.
    pub remaining: i64,
}

impl MemoBudget {
    /// Computes the budget for `memo`.
    pub fn for_text(memo: &str) -> MemoBudget {
        let raw_bytes = memo.len();
        let encoded_bytes = raw_bytes.div_ceil(3) * 4;
        let remaining = MAX_ENCODED_MEMO_BYTES as i64 - encoded_bytes as i64;

        MemoBudget {
            raw_bytes,
            encoded_bytes,
            remaining,
        }
    }

    /// Whether the memo exceeds the ledger's cap.
    pub fn is_over_budget(&self) -> bool {
        self.remaining < 0
    }
}

/// A wallet-facing payment request: address, optional amount, optional
/// memo.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    address: String,
    amount: Option<Zec>,
    memo: Option<String>,
}

impl PaymentRequest {
    /// Builds a free-form draft request to an arbitrary directory member.
    ///
    /// The recipient address must be a well-formed payment address;
    /// amount and memo are both optional in draft mode.
    pub fn draft(
        address: &str,
        amount: Option<Zec>,
        memo: Option<String>,
    ) -> Result<PaymentRequest, EnvelopeError> {
        let classification = classify(address);
        if !classification.is_well_formed {
            return Err(EnvelopeError::InvalidAddress);
        }

        Ok(PaymentRequest {
            address: address.trim().to_string(),
            amount,
            memo,
        })
    }

    /// Builds a verification request carrying `memo` to the directory's
    /// own address.
    ///
    /// The amount must clear [`MIN_VERIFY_AMOUNT`].
    pub fn verification(memo: String, amount: Zec) -> Result<PaymentRequest, EnvelopeError> {
        if amount < MIN_VERIFY_AMOUNT {
            return Err(EnvelopeError::BelowMinimum { amount });
        }

        Ok(PaymentRequest {
            address: DIRECTORY_ADDRESS.to_string(),
            amount: Some(amount),
            memo: Some(memo),
        })
    }

    /// The recipient address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The requested amount, if any.
    pub fn amount(&self) -> Option<Zec> {
        self.amount
    }

    /// The memo text, if any.
    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
    }

    /// The budget the memo uses, when there is a memo.
    pub fn memo_budget(&self) -> Option<MemoBudget> {
        self.memo.as_deref().map(MemoBudget::for_text)
    }

    /// Renders the `zcash:` URI for this request.
    ///
    /// The memo parameter is dropped for recipients that cannot receive
    /// one (transparent and TEX addresses reject shielded memos). All
    /// parameter values are URL-safe by construction: addresses and
    /// base64url memos are alphanumeric plus `-_`, and amounts are plain
    /// decimals, so no percent-escaping is needed.
    pub fn to_uri(&self) -> String {
        let mut uri = format!("{URI_SCHEME}:?address={}", self.address);

        if let Some(amount) = self.amount {
            uri.push_str(&format!("&amount={amount}"));
        }

        let recipient_takes_memo = classify(&self.address).is_shielded_capable;
        if let Some(memo) = self.memo.as_deref() {
            if recipient_takes_memo && !memo.trim().is_empty() {
                uri.push_str(&format!("&memo={}", to_base64url(memo.trim())));
            }
        }

        uri
    }
}

/// Errors from building a payment request.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum EnvelopeError {
    /// The recipient is not a well-formed payment address.
    #[error("invalid or missing Zcash address")]
    InvalidAddress,

    /// The verification amount does not clear the protocol minimum.
    #[error("verification requires sending at least {MIN_VERIFY_AMOUNT} ZEC, got {amount}")]
    BelowMinimum {
        /// The rejected amount.
        amount: Zec,
    },
}
