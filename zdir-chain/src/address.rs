//! Classification of Zcash address strings.
//!
//! Directory members type or paste an address once, when claiming an
//! identity, and everything downstream (memo routing, verification
//! payments) depends on what kind of address it was. [`classify`] sorts an
//! arbitrary string into exactly one encoding family without ever failing:
//! malformed input is itself a classification, not an error.
//!
//! Two validity axes are reported separately:
//!
//! - `is_well_formed`: the string is a correct encoding (prefix, charset,
//!   checksum, payload length) of *some* address family;
//! - `is_shielded_capable`: the address can receive funds from the shielded
//!   pool, which is what the directory's memo channel requires.
//!
//! Transparent and TEX addresses are well-formed but not shielded-capable:
//! a t-address leaks sender, receiver, and amount publicly, and a TEX
//! address (ZIP 320) can only receive from transparent sources. Both are
//! reported with a reason so the UI can explain rather than reject.

use bech32::primitives::decode::CheckedHrpstring;
use bech32::{Bech32, Bech32m};
use serde::{Deserialize, Serialize};

use crate::parameters::{constants, NetworkKind};

#[cfg(test)]
mod tests;

/// The encoding family of a classified address string.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    /// Base58Check transparent address (`t1`, `t3`, `tm`, `t2`).
    Transparent,

    /// Bech32 Sapling payment address (`zs1`, `ztestsapling1`).
    Sapling,

    /// Bech32m unified address (`u1`, `utest1`, ZIP 316).
    Unified,

    /// Bech32m transparent-source-only address (`tex1`, `textest1`, ZIP 320).
    Tex,

    /// A viewing key, which reveals incoming payments but cannot receive.
    ViewingKey,

    /// None of the known encodings.
    Unknown,
}

/// Why a classification is not a usable shielded payment address.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    /// The input was empty or all whitespace.
    Empty,

    /// The input is a viewing key, not a payment address.
    ViewingKey,

    /// TEX addresses cannot receive funds from the shielded pool.
    TexDisallowed,

    /// Transparent addresses are refused as directory addresses for
    /// privacy reasons.
    TransparentDisallowed,

    /// The input matched no known encoding.
    FormatMismatch,
}

/// The result of classifying an address string.
///
/// Produced by [`classify`]; pure data, cheap to copy around UI state.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// The encoding family the input belongs to.
    pub kind: AddressKind,

    /// The network implied by the encoding prefix, when there is one.
    pub network: Option<NetworkKind>,

    /// Whether the input is a correct encoding of its family.
    pub is_well_formed: bool,

    /// Whether the address can receive a memo-carrying shielded payment.
    pub is_shielded_capable: bool,

    /// Why the input is not a usable shielded address, if it isn't.
    pub reason: Option<Reason>,
}

impl Classification {
    /// A one-line, user-facing hint for this classification, suitable for
    /// display next to an address input field.
    pub fn hint(&self) -> &'static str {
        match (self.kind, self.reason) {
            (_, Some(Reason::Empty)) => "Enter your Zcash address (t1…, zs1…, or u1…).",
            (AddressKind::ViewingKey, _) => {
                "That looks like a viewing key, not a payment address."
            }
            (AddressKind::Tex, _) => {
                "TEX addresses (tex1…) can only receive funds from transparent addresses, \
                 not from shielded ones. Try using a z- or u-address instead."
            }
            (AddressKind::Transparent, _) => {
                "Transparent t-addresses leak sender, receiver, and amount publicly. \
                 Use a z- or u-address instead."
            }
            (AddressKind::Sapling, _) => "Looks good — valid Sapling address.",
            (AddressKind::Unified, _) => "Looks good — valid Unified address.",
            (AddressKind::Unknown, _) => {
                "Invalid address. Must be transparent (t1…), Sapling (zs1…), or Unified (u1…)."
            }
        }
    }
}

/// Classifies `address` into exactly one [`AddressKind`].
///
/// Total and deterministic: every input string maps to one classification,
/// and no decoder failure escapes this function. Decoders run in a fixed
/// priority order; a checksum or payload failure in one family falls
/// through to the next rather than producing a partial answer.
///
/// Case handling: the Bech32 families accept uniformly-lowercase and
/// uniformly-uppercase input (the uppercase form is folded before
/// decoding, as the encoding specs allow), and reject mixed-case input.
/// Base58Check is fully case-sensitive.
pub fn classify(address: &str) -> Classification {
    let a = address.trim();

    if a.is_empty() {
        return Classification {
            kind: AddressKind::Unknown,
            network: None,
            is_well_formed: false,
            is_shielded_capable: false,
            reason: Some(Reason::Empty),
        };
    }

    if is_viewing_key(a) {
        return Classification {
            kind: AddressKind::ViewingKey,
            network: None,
            is_well_formed: false,
            is_shielded_capable: false,
            reason: Some(Reason::ViewingKey),
        };
    }

    decode_transparent(a)
        .or_else(|| decode_sapling(a))
        .or_else(|| decode_unified(a))
        .or_else(|| decode_tex(a))
        .unwrap_or(Classification {
            kind: AddressKind::Unknown,
            network: None,
            is_well_formed: false,
            is_shielded_capable: false,
            reason: Some(Reason::FormatMismatch),
        })
}

/// Does the string carry a known viewing-key prefix?
///
/// Matched case-insensitively before any decoder runs: viewing keys are
/// valid Bech32 strings, so letting them reach the address decoders would
/// misreport "almost an address" instead of "wrong kind of key".
fn is_viewing_key(address: &str) -> bool {
    let lowered = address.to_ascii_lowercase();
    constants::VIEWING_KEY_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
}

/// Folds a Bech32-family candidate to lowercase.
///
/// Returns `None` for mixed-case input, which both BIP-173 and BIP-350
/// define as invalid. Uniformly-uppercase input is the QR-friendly
/// alternate form and is folded to lowercase before decoding.
fn fold_case(address: &str) -> Option<String> {
    let has_upper = address.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = address.chars().any(|c| c.is_ascii_lowercase());
    if has_upper && has_lower {
        return None;
    }
    Some(address.to_ascii_lowercase())
}

/// Base58Check transparent decode, gated by an address-class prefix test.
fn decode_transparent(address: &str) -> Option<Classification> {
    if !constants::TRANSPARENT_ADDRESS_PREFIXES
        .iter()
        .any(|prefix| address.starts_with(prefix))
    {
        return None;
    }

    // Checksum failure falls through to the other decoders.
    let payload = bs58::decode(address).with_check(None).into_vec().ok()?;

    // Two version bytes and a 20-byte hash.
    if payload.len() != 22 {
        return None;
    }

    let version: [u8; 2] = [payload[0], payload[1]];
    let network = match version {
        constants::MAINNET_P2PKH | constants::MAINNET_P2SH => NetworkKind::Mainnet,
        constants::TESTNET_P2PKH | constants::TESTNET_P2SH => NetworkKind::Testnet,
        _ => return None,
    };

    Some(Classification {
        kind: AddressKind::Transparent,
        network: Some(network),
        is_well_formed: true,
        is_shielded_capable: false,
        reason: Some(Reason::TransparentDisallowed),
    })
}

/// Bech32 (single checksum) decode for the Sapling family.
fn decode_sapling(address: &str) -> Option<Classification> {
    let folded = fold_case(address)?;
    if !(folded.starts_with("zs1") || folded.starts_with("ztestsapling1")) {
        return None;
    }

    let checked = CheckedHrpstring::new::<Bech32>(&folded).ok()?;
    let network = match checked.hrp().as_str() {
        constants::HRP_SAPLING_MAINNET => NetworkKind::Mainnet,
        constants::HRP_SAPLING_TESTNET => NetworkKind::Testnet,
        _ => return None,
    };

    if checked.byte_iter().count() != constants::SAPLING_ADDRESS_BYTES {
        return None;
    }

    Some(Classification {
        kind: AddressKind::Sapling,
        network: Some(network),
        is_well_formed: true,
        is_shielded_capable: true,
        reason: None,
    })
}

/// Bech32m (double checksum) decode for the unified family.
///
/// Unified address payloads are F4Jumbled before encoding, so this decoder
/// checks the outer encoding only; it never inspects receivers.
fn decode_unified(address: &str) -> Option<Classification> {
    let folded = fold_case(address)?;
    if !(folded.starts_with("u1") || folded.starts_with("utest1")) {
        return None;
    }

    let checked = CheckedHrpstring::new::<Bech32m>(&folded).ok()?;
    let network = match checked.hrp().as_str() {
        constants::HRP_UNIFIED_MAINNET => NetworkKind::Mainnet,
        constants::HRP_UNIFIED_TESTNET => NetworkKind::Testnet,
        _ => return None,
    };

    Some(Classification {
        kind: AddressKind::Unified,
        network: Some(network),
        is_well_formed: true,
        is_shielded_capable: true,
        reason: None,
    })
}

/// Bech32m decode for the TEX family, constrained to an exact 20-byte
/// payload (ZIP 320).
fn decode_tex(address: &str) -> Option<Classification> {
    let folded = fold_case(address)?;
    if !(folded.starts_with("tex1") || folded.starts_with("textest1")) {
        return None;
    }

    let checked = CheckedHrpstring::new::<Bech32m>(&folded).ok()?;
    let network = match checked.hrp().as_str() {
        constants::HRP_TEX_MAINNET => NetworkKind::Mainnet,
        constants::HRP_TEX_TESTNET => NetworkKind::Testnet,
        _ => return None,
    };

    if checked.byte_iter().count() != constants::TEX_ADDRESS_BYTES {
        return None;
    }

    Some(Classification {
        kind: AddressKind::Tex,
        network: Some(network),
        is_well_formed: true,
        is_shielded_capable: false,
        reason: Some(Reason::TexDisallowed),
    })
}
