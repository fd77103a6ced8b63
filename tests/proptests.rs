//! Property-based tests.

use paeonia::{EncodeOptions, Encoding, LineEnding, RsaKeyPair};
use proptest::prelude::*;
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

prop_compose! {
    // WARNING: do *NOT* copy and paste this code. It's insecure and optimized for test speed.
    fn key_pair()(seed in any::<[u8; 32]>()) -> RsaKeyPair {
        let mut rng = ChaCha8Rng::from_seed(seed);
        let mut key_pair = RsaKeyPair::new(512).unwrap();
        key_pair.generate_key_pair_sync_with_rng(&mut rng).unwrap();
        key_pair
    }
}

fn encoding() -> impl Strategy<Value = Encoding> {
    prop_oneof![Just(Encoding::Der), Just(Encoding::Pem)]
}

fn line_ending() -> impl Strategy<Value = LineEnding> {
    prop_oneof![Just(LineEnding::LF), Just(LineEnding::CRLF)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn encode_is_deterministic(
        key_pair in key_pair(),
        encoding in encoding(),
        line_ending in line_ending(),
        with_private in any::<bool>(),
    ) {
        let mut options = EncodeOptions::default()
            .with_encoding(encoding)
            .with_line_ending(line_ending);
        if with_private {
            options = options.with_password("");
        }

        let first = key_pair.encode(&options).unwrap();
        let second = key_pair.encode(&options).unwrap();
        prop_assert!(!first.is_empty());
        prop_assert_eq!(&first[..], &second[..]);
    }

    #[test]
    fn pem_labels_match_options(key_pair in key_pair(), with_private in any::<bool>()) {
        let pem = key_pair.encode_pem(with_private.then_some("")).unwrap();
        prop_assert!(pem.contains("-----BEGIN PUBLIC KEY-----"));
        prop_assert_eq!(pem.contains("PRIVATE"), with_private);
    }

    #[test]
    fn encoding_names_parse_case_insensitively(name in "(?i)(pem|der|ber)") {
        let encoding: Encoding = name.parse().unwrap();
        let expected = if name.eq_ignore_ascii_case("pem") { Encoding::Pem } else { Encoding::Der };
        prop_assert_eq!(encoding, expected);
    }
}
