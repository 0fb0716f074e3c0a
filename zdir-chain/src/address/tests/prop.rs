//! Property tests for address classification.

use proptest::prelude::*;

use crate::{
    address::{classify, AddressKind},
    parameters::constants,
};

proptest! {
    /// Classification is total: no input panics, and the two validity
    /// axes are always consistent with the reported kind.
    #[test]
    fn classify_is_total(input in "\\PC*") {
        let _init_guard = zdir_test::init();

        let c = classify(&input);

        if c.is_shielded_capable {
            prop_assert!(c.is_well_formed);
            prop_assert!(matches!(c.kind, AddressKind::Sapling | AddressKind::Unified));
            prop_assert_eq!(c.reason, None);
        } else {
            prop_assert!(c.reason.is_some());
        }
    }

    /// Classification is a pure function of the trimmed input.
    #[test]
    fn classify_is_deterministic_and_trim_invariant(input in "\\PC*") {
        let _init_guard = zdir_test::init();

        let c = classify(&input);
        prop_assert_eq!(&c, &classify(&input));
        prop_assert_eq!(&c, &classify(&format!("  {input}\t")));
    }

    /// Every Bech32m encoding of a 20-byte payload under the TEX HRP
    /// classifies as a TEX address, in lowercase or uppercase form.
    #[test]
    fn twenty_byte_tex_payloads_always_classify(payload in prop::array::uniform20(any::<u8>())) {
        let _init_guard = zdir_test::init();

        let hrp = bech32::Hrp::parse(constants::HRP_TEX_MAINNET).expect("valid HRP");
        let addr = bech32::encode::<bech32::Bech32m>(hrp, &payload)
            .expect("20-byte payloads are encodable");

        let c = classify(&addr);
        prop_assert_eq!(c.kind, AddressKind::Tex);
        prop_assert!(c.is_well_formed);
        prop_assert!(!c.is_shielded_capable);

        let upper = classify(&addr.to_ascii_uppercase());
        prop_assert_eq!(c, upper);
    }

    /// Payload lengths other than 20 bytes never classify as TEX.
    #[test]
    fn non_twenty_byte_tex_payloads_never_classify(
        payload in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let _init_guard = zdir_test::init();

        prop_assume!(payload.len() != constants::TEX_ADDRESS_BYTES);

        let hrp = bech32::Hrp::parse(constants::HRP_TEX_MAINNET).expect("valid HRP");
        let addr = bech32::encode::<bech32::Bech32m>(hrp, &payload)
            .expect("small payloads are encodable");

        prop_assert_eq!(classify(&addr).kind, AddressKind::Unknown);
    }
}
