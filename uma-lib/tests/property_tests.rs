//! Property-based tests for uma-lib
//!
//! These tests use proptest to verify invariants across a wide range of inputs.

mod version_properties {
    use proptest::prelude::*;
    use uma_lib::version::{
        is_version_supported, parse_version, select_lower_version, ParsedVersion, MAJOR_VERSION,
    };

    proptest! {
        /// Rendering and parsing are inverse
        #[test]
        fn render_parse_round_trip(major in 0u32..10_000, minor in 0u32..10_000) {
            let version = ParsedVersion::new(major, minor);
            prop_assert_eq!(parse_version(&version.to_string()).unwrap(), version);
        }

        /// Ordering matches (major, minor) tuple ordering
        #[test]
        fn ordering_is_lexicographic(a in (0u32..50, 0u32..50), b in (0u32..50, 0u32..50)) {
            let va = ParsedVersion::new(a.0, a.1);
            let vb = ParsedVersion::new(b.0, b.1);
            prop_assert_eq!(va.cmp(&vb), a.cmp(&b));
        }

        /// select_lower returns the minimum, first argument on ties
        #[test]
        fn select_lower_is_min(a in (0u32..20, 0u32..20), b in (0u32..20, 0u32..20)) {
            let v1 = format!("{}.{}", a.0, a.1);
            let v2 = format!("{}.{}", b.0, b.1);
            let lower = select_lower_version(&v1, &v2).unwrap();
            let expected = if b < a { &v2 } else { &v1 };
            prop_assert_eq!(&lower, expected);
        }

        /// Support depends on the major component only
        #[test]
        fn support_follows_major(major in 0u32..100, minor in 0u32..100) {
            let version = format!("{}.{}", major, minor);
            prop_assert_eq!(is_version_supported(&version), major == MAJOR_VERSION);
        }
    }
}

mod codec_properties {
    use chrono::DateTime;
    use proptest::prelude::*;
    use uma_lib::protocol::{
        CompliancePayerData, KycStatus, LnurlpRequest, PayRequest, PayerData,
    };
    use uma_lib::uri::{decode_lnurlp_request, encode_lnurlp_request};
    use uma_lib::{parse_pay_request, MAJOR_VERSION};

    fn host() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z0-9]{1,12}\\.(com|org|io)",
            (1024u16..65535).prop_map(|port| format!("localhost:{}", port)),
        ]
    }

    fn kyc_status() -> impl Strategy<Value = KycStatus> {
        prop_oneof![
            Just(KycStatus::Unknown),
            Just(KycStatus::NotVerified),
            Just(KycStatus::Pending),
            Just(KycStatus::Verified),
            "[A-Z_]{1,12}".prop_map(KycStatus::from),
        ]
    }

    /// UMA user parts, including `+`, `-` and stray or escape-like `%` sequences.
    fn identifier() -> impl Strategy<Value = String> {
        prop_oneof![
            "\\$?[a-zA-Z0-9_.+\\-]{1,20}",
            "\\$?[a-z0-9+%\\-]{1,20}",
            ("[a-z]{1,8}", "%[0-9A-F]{2}", "[a-z+]{0,8}")
                .prop_map(|(head, escape, tail)| format!("${}{}{}", head, escape, tail)),
        ]
    }

    prop_compose! {
        fn lnurlp_request()(
            identifier in identifier(),
            host in host(),
            nonce in any::<u32>(),
            signature in "[0-9a-f]{2,144}",
            is_subject_to_travel_rule in any::<bool>(),
            vasp_domain in "[a-z][ -~]{0,29}",
            seconds in 0i64..4_000_000_000,
            minor in 0u32..100,
        ) -> LnurlpRequest {
            LnurlpRequest {
                receiver_address: format!("{}@{}", identifier, host),
                nonce: nonce.to_string(),
                signature,
                is_subject_to_travel_rule,
                vasp_domain,
                timestamp: DateTime::from_timestamp(seconds, 0).unwrap(),
                uma_version: format!("{}.{}", MAJOR_VERSION, minor),
            }
        }
    }

    prop_compose! {
        fn compliance()(
            kyc_status in kyc_status(),
            utxos in prop::collection::vec("[0-9a-f]{8}:[0-9]", 0..4),
            node_pubkey in prop::option::of("02[0-9a-f]{64}"),
            encrypted_travel_rule_info in prop::option::of("[0-9a-f]{0,64}"),
            signature in "[0-9a-f]{2,144}",
            nonce in any::<u32>(),
            signature_timestamp in 0i64..4_000_000_000,
            utxo_callback in "https://[a-z]{1,10}\\.com/[a-z/]{0,20}",
        ) -> CompliancePayerData {
            CompliancePayerData {
                kyc_status,
                utxos,
                node_pubkey,
                encrypted_travel_rule_info,
                signature,
                signature_nonce: nonce.to_string(),
                signature_timestamp,
                utxo_callback,
            }
        }
    }

    prop_compose! {
        fn pay_request()(
            currency_code in "[A-Z]{3}",
            amount in any::<u64>(),
            identifier in "\\$[a-z]{1,10}@[a-z]{1,10}\\.com",
            name in prop::option::of("[A-Za-z ]{1,20}"),
            email in prop::option::of("[a-z]{1,10}@[a-z]{1,10}\\.com"),
            compliance in prop::option::of(compliance()),
        ) -> PayRequest {
            PayRequest {
                currency_code,
                amount,
                payer_data: PayerData { identifier, name, email, compliance },
            }
        }
    }

    proptest! {
        /// Discovery requests survive URL encoding
        #[test]
        fn lnurlp_request_url_round_trip(request in lnurlp_request()) {
            let url = encode_lnurlp_request(&request).unwrap();
            prop_assert_eq!(decode_lnurlp_request(&url).unwrap(), request);
        }

        /// Pay requests survive JSON encoding, with or without compliance data
        #[test]
        fn pay_request_json_round_trip(request in pay_request()) {
            let json = request.to_json().unwrap();
            prop_assert_eq!(parse_pay_request(&json).unwrap(), request);
        }
    }
}

mod crypto_properties {
    use proptest::prelude::*;
    use uma_lib::encryption::{decrypt_travel_rule_info, encrypt_travel_rule_info};
    use uma_lib::keys::UmaKeyPair;
    use uma_lib::signing::{sign_payload, verify_payload};
    use uma_lib::UmaError;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Signatures verify, and flipping any byte breaks them
        #[test]
        fn signature_detects_tampering(
            payload in prop::collection::vec(any::<u8>(), 0..256),
            flip in any::<prop::sample::Index>(),
        ) {
            let keys = UmaKeyPair::generate().unwrap();
            let signature = sign_payload(&payload, &keys.private_key).unwrap();
            prop_assert!(verify_payload(&payload, &signature, &keys.public_key).is_ok());

            let mut bytes = hex::decode(&signature).unwrap();
            let index = flip.index(bytes.len());
            bytes[index] ^= 0x01;
            prop_assert_eq!(
                verify_payload(&payload, &hex::encode(bytes), &keys.public_key),
                Err(UmaError::InvalidSignature)
            );
        }

        /// Decryption recovers the exact travel-rule text
        #[test]
        fn travel_rule_round_trip(info in "\\PC{1,200}") {
            let keys = UmaKeyPair::generate().unwrap();
            let encrypted = encrypt_travel_rule_info(&info, &keys.public_key).unwrap();
            prop_assert_eq!(decrypt_travel_rule_info(&encrypted, &keys.private_key).unwrap(), info);
        }
    }
}
