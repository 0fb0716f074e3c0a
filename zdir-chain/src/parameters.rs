//! Network parameters and directory-wide protocol constants.

use serde::{Deserialize, Serialize};

/// The Zcash network an address belongs to.
///
/// The directory itself runs against the production network, but address
/// classification reports test-network encodings so callers can explain
/// them instead of rejecting them as garbage.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum NetworkKind {
    /// The production mainnet.
    #[default]
    Mainnet,

    /// The public test network.
    Testnet,
}

impl NetworkKind {
    /// Returns true for test-network encodings.
    pub fn is_a_test_network(&self) -> bool {
        *self == NetworkKind::Testnet
    }
}

/// Constants for the address encodings the directory understands.
///
/// Transparent version bytes are from
/// <https://zips.z.cash/protocol/protocol.pdf#transparentaddrencoding>,
/// Bech32 human-readable parts from the Sapling and ZIP-316/ZIP-320
/// encoding specs.
pub mod constants {
    /// Base58Check version bytes for a mainnet P2PKH address ("t1...").
    pub const MAINNET_P2PKH: [u8; 2] = [0x1c, 0xb8];

    /// Base58Check version bytes for a mainnet P2SH address ("t3...").
    pub const MAINNET_P2SH: [u8; 2] = [0x1c, 0xbd];

    /// Base58Check version bytes for a testnet P2PKH address ("tm...").
    pub const TESTNET_P2PKH: [u8; 2] = [0x1d, 0x25];

    /// Base58Check version bytes for a testnet P2SH address ("t2...").
    pub const TESTNET_P2SH: [u8; 2] = [0x1c, 0xba];

    /// The first two characters of the Base58Check transparent address
    /// classes we decode. The two version bytes fix these prefixes, so a
    /// cheap prefix test can gate the expensive checksum decode.
    pub const TRANSPARENT_ADDRESS_PREFIXES: [&str; 4] = ["t1", "t3", "tm", "t2"];

    /// Bech32 human-readable part for mainnet Sapling payment addresses.
    pub const HRP_SAPLING_MAINNET: &str = "zs";

    /// Bech32 human-readable part for testnet Sapling payment addresses.
    pub const HRP_SAPLING_TESTNET: &str = "ztestsapling";

    /// Bech32m human-readable part for mainnet unified addresses (ZIP 316).
    pub const HRP_UNIFIED_MAINNET: &str = "u";

    /// Bech32m human-readable part for testnet unified addresses.
    pub const HRP_UNIFIED_TESTNET: &str = "utest";

    /// Bech32m human-readable part for mainnet TEX addresses (ZIP 320).
    pub const HRP_TEX_MAINNET: &str = "tex";

    /// Bech32m human-readable part for testnet TEX addresses.
    pub const HRP_TEX_TESTNET: &str = "textest";

    /// The decoded byte length of a Sapling payment address:
    /// an 11-byte diversifier followed by a 32-byte transmission key.
    pub const SAPLING_ADDRESS_BYTES: usize = 43;

    /// The decoded byte length of a TEX address payload (ZIP 320).
    pub const TEX_ADDRESS_BYTES: usize = 20;

    /// Textual prefixes that mark a string as a viewing key rather than a
    /// payment address. Matched case-insensitively before any decoder runs.
    pub const VIEWING_KEY_PREFIXES: [&str; 6] = [
        "uview1",
        "utestview1",
        "zsview1",
        "ztestsaplingview1",
        "zxviews1",
        "zxviewtestsapling1",
    ];
}

/// The unified address that verification payments are sent to.
///
/// One-time codes are delivered back through the memo channel from this
/// address, so changing it invalidates every in-flight verification.
pub const DIRECTORY_ADDRESS: &str = "u1qzt502u9fwh67s7an0e202c35mm0h534jaa648t4p2r6mhf30guxjjqwlkmvthahnz5myz2ev7neff5pmveh54xszv9njcmu5g2eent82ucpd3lwyzkmyrn6rytwsqefk475hl5tl4tu8yehc0z8w9fcf4zg6r03sq7lldx0uxph7c0lclnlc4qjwhu2v52dkvuntxr8tmpug3jntvm";
