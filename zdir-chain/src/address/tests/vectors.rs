//! Fixed test vectors for address classification.

use zdir_test::prelude::*;

use crate::{
    address::{classify, AddressKind, Reason},
    parameters::{constants, NetworkKind, DIRECTORY_ADDRESS},
};

/// A mainnet P2PKH transparent address.
const T1_MAINNET: &str = "t1ekRwsd4LaSsd6NXgsx66q2HxQWTLCF44y";

/// A mainnet P2SH transparent address.
const T3_MAINNET: &str = "t3M5FDmPfWNRG3HRLddbicsuSCvKuk9hxzZ";

/// A testnet P2PKH transparent address.
const TM_TESTNET: &str = "tmWbBGi7TjExNmLZyMcFpxVh3ZPbGrpbX3H";

/// A testnet P2SH transparent address.
const T2_TESTNET: &str = "t294SGSVoNq2daz15ZNbmAW65KQZ5e3nN5G";

/// A mainnet Sapling payment address.
const ZS_MAINNET: &str = "zs1mrhc9y7jdh5r9ece8u5khgvj9kg0zgkxzdduyv0whkg7lkcrkx5xqem3e48avjq9wn2rukydkwn";

/// A mainnet unified address.
const U1_MAINNET: &str = "u1cymdny2u2vllkx7t5jnelp0kde0dgnwu0jzmggzguxvxj6fe7gpuqehywejndlrjwgk9snr6g69azs8jfet78s9zy60uepx6tltk7ee57jlax49dezkhkgvjy2puuue6dvaevt53nah7t2cc2k4p0h0jxmlu9sx58m2xdm5f9sy2n89jdf8llflvtml2ll43e334avu2fwytuna404a";

/// Encodes a TEX-style Bech32m string over `payload` for tests.
fn encode_tex(hrp: &str, payload: &[u8]) -> String {
    let hrp = bech32::Hrp::parse(hrp).expect("test HRP is valid");
    bech32::encode::<bech32::Bech32m>(hrp, payload).expect("test payload is encodable")
}

#[test]
fn transparent_addresses_are_well_formed_but_not_shielded() -> Result<()> {
    let _init_guard = zdir_test::init();

    for (addr, network) in [
        (T1_MAINNET, NetworkKind::Mainnet),
        (T3_MAINNET, NetworkKind::Mainnet),
        (TM_TESTNET, NetworkKind::Testnet),
        (T2_TESTNET, NetworkKind::Testnet),
    ] {
        let c = classify(addr);
        assert_eq!(c.kind, AddressKind::Transparent, "{addr}");
        assert_eq!(c.network, Some(network), "{addr}");
        assert!(c.is_well_formed, "{addr}");
        assert!(!c.is_shielded_capable, "{addr}");
        assert_eq!(c.reason, Some(Reason::TransparentDisallowed), "{addr}");
    }

    Ok(())
}

#[test]
fn sapling_address_is_shielded_capable() {
    let _init_guard = zdir_test::init();

    let c = classify(ZS_MAINNET);
    assert_eq!(c.kind, AddressKind::Sapling);
    assert_eq!(c.network, Some(NetworkKind::Mainnet));
    assert!(c.is_well_formed);
    assert!(c.is_shielded_capable);
    assert_eq!(c.reason, None);
}

#[test]
fn unified_addresses_are_shielded_capable() {
    let _init_guard = zdir_test::init();

    for addr in [U1_MAINNET, DIRECTORY_ADDRESS] {
        let c = classify(addr);
        assert_eq!(c.kind, AddressKind::Unified, "{addr}");
        assert_eq!(c.network, Some(NetworkKind::Mainnet), "{addr}");
        assert!(c.is_well_formed, "{addr}");
        assert!(c.is_shielded_capable, "{addr}");
        assert_eq!(c.reason, None, "{addr}");
    }
}

#[test]
fn tex_addresses_are_well_formed_but_restricted() {
    let _init_guard = zdir_test::init();

    let mainnet = encode_tex(constants::HRP_TEX_MAINNET, &[0x7e; 20]);
    let c = classify(&mainnet);
    assert_eq!(c.kind, AddressKind::Tex);
    assert_eq!(c.network, Some(NetworkKind::Mainnet));
    assert!(c.is_well_formed);
    assert!(!c.is_shielded_capable);
    assert_eq!(c.reason, Some(Reason::TexDisallowed));

    let testnet = encode_tex(constants::HRP_TEX_TESTNET, &[0x7e; 20]);
    let c = classify(&testnet);
    assert_eq!(c.kind, AddressKind::Tex);
    assert_eq!(c.network, Some(NetworkKind::Testnet));
}

#[test]
fn tex_payload_must_be_exactly_twenty_bytes() {
    let _init_guard = zdir_test::init();

    for payload_len in [19, 21, 32] {
        let addr = encode_tex(constants::HRP_TEX_MAINNET, &vec![0x55; payload_len]);
        let c = classify(&addr);
        assert_eq!(c.kind, AddressKind::Unknown, "payload_len {payload_len}");
        assert!(!c.is_well_formed);
        assert_eq!(c.reason, Some(Reason::FormatMismatch));
    }
}

#[test]
fn viewing_keys_are_rejected_as_payment_addresses() {
    let _init_guard = zdir_test::init();

    for key in [
        "uview1qwerty",
        "utestview1qwerty",
        "zsview1qwerty",
        "ztestsaplingview1qwerty",
        "zxviews1qwerty",
        "UVIEW1QWERTY",
    ] {
        let c = classify(key);
        assert_eq!(c.kind, AddressKind::ViewingKey, "{key}");
        assert!(!c.is_well_formed);
        assert!(!c.is_shielded_capable);
        assert_eq!(c.reason, Some(Reason::ViewingKey));
    }
}

#[test]
fn empty_and_whitespace_input() {
    let _init_guard = zdir_test::init();

    for input in ["", "   ", "\t\n"] {
        let c = classify(input);
        assert_eq!(c.kind, AddressKind::Unknown);
        assert_eq!(c.reason, Some(Reason::Empty));
    }
}

#[test]
fn garbage_is_a_format_mismatch() {
    let _init_guard = zdir_test::init();

    for input in ["hello", "zs2notanaddress", "u2qqqq", "t9zzzzzz", "0x1234abcd"] {
        let c = classify(input);
        assert_eq!(c.kind, AddressKind::Unknown, "{input}");
        assert!(!c.is_well_formed);
        assert_eq!(c.reason, Some(Reason::FormatMismatch));
    }
}

#[test]
fn hints_match_the_classification() {
    let _init_guard = zdir_test::init();

    assert!(classify("").hint().starts_with("Enter your Zcash address"));
    assert!(classify("uview1abc").hint().contains("viewing key"));
    assert!(classify(T1_MAINNET).hint().contains("leak sender, receiver, and amount"));
    assert!(classify(ZS_MAINNET).hint().contains("valid Sapling address"));
    assert!(classify(DIRECTORY_ADDRESS).hint().contains("valid Unified address"));
    assert!(classify("garbage").hint().starts_with("Invalid address"));

    let tex = encode_tex(constants::HRP_TEX_MAINNET, &[0x7e; 20]);
    assert!(classify(&tex).hint().contains("transparent addresses"));
}

#[test]
fn surrounding_whitespace_is_ignored() {
    let _init_guard = zdir_test::init();

    let padded = format!("  {ZS_MAINNET}\n");
    assert_eq!(classify(&padded), classify(ZS_MAINNET));
}

/// Flipping one character breaks the checksum of every family, and the
/// broken string is never silently promoted to a different family.
#[test]
fn single_character_flip_breaks_every_family() {
    let _init_guard = zdir_test::init();

    let tex = encode_tex(constants::HRP_TEX_MAINNET, &[0x7e; 20]);
    for addr in [T1_MAINNET, ZS_MAINNET, U1_MAINNET, tex.as_str()] {
        let flipped = flip_last_data_char(addr);
        assert_ne!(flipped, addr);

        let c = classify(&flipped);
        assert_eq!(c.kind, AddressKind::Unknown, "{flipped}");
        assert!(!c.is_well_formed, "{flipped}");
    }
}

#[test]
fn uppercase_bech32_input_is_accepted_and_mixed_case_is_rejected() {
    let _init_guard = zdir_test::init();

    let upper = ZS_MAINNET.to_ascii_uppercase();
    let c = classify(&upper);
    assert_eq!(c.kind, AddressKind::Sapling);
    assert!(c.is_well_formed);

    // Uppercase exactly one character to make the input mixed-case.
    let mut mixed: Vec<char> = ZS_MAINNET.chars().collect();
    let last = mixed.len() - 1;
    mixed[last] = mixed[last].to_ascii_uppercase();
    let mixed: String = mixed.into_iter().collect();
    assert_ne!(mixed, ZS_MAINNET);

    let c = classify(&mixed);
    assert_eq!(c.kind, AddressKind::Unknown);
    assert!(!c.is_well_formed);
}

/// Replaces the last character of `addr` with a different charset character.
fn flip_last_data_char(addr: &str) -> String {
    let mut chars: Vec<char> = addr.chars().collect();
    let last = chars.len() - 1;
    // 'q' and '0' are both in the Bech32 charset; '2' and '3' are both in
    // the Base58 alphabet. Picking from each pair always changes the char.
    chars[last] = match chars[last] {
        'q' => '0',
        '2' => '3',
        _ => {
            if addr.starts_with('t') && !addr.starts_with("tex") {
                '2'
            } else {
                'q'
            }
        }
    };
    chars.into_iter().collect()
}
