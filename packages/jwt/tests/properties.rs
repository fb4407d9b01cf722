//! Property tests for the codec and the issue/validate round trip

mod common;

use chrono::Duration;
use common::issue_time;
use proptest::prelude::*;
use tokenstamp_jwt::{SigningScheme, ValidationOptions, codec, create_token_at, validate_at};

proptest! {
    #[test]
    fn codec_decode_inverts_encode(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let encoded = codec::encode(&bytes);

        prop_assert!(encoded
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'));
        prop_assert_eq!(codec::decode(&encoded).unwrap(), bytes);
    }

    #[test]
    fn symmetric_round_trip_preserves_fields(
        subject in ".*",
        claims in ".*",
        secret in proptest::collection::vec(any::<u8>(), 0..64),
        lifetime in 1i64..1_000_000,
        elapsed_percent in 0i64..=100,
    ) {
        let elapsed = lifetime * elapsed_percent / 100;
        let scheme = SigningScheme::symmetric(&secret);

        let token = create_token_at(
            &subject,
            &claims,
            &scheme,
            Some(Duration::seconds(lifetime)),
            issue_time(),
        )
        .unwrap();
        let result = validate_at(
            token.as_str(),
            &scheme,
            issue_time() + Duration::seconds(elapsed),
            &ValidationOptions::strict(),
        );

        prop_assert!(result.valid);
        prop_assert_eq!(result.subject, Some(subject));
        prop_assert_eq!(result.claims, Some(claims));
        prop_assert_eq!(result.expires_at, Some(issue_time().timestamp() + lifetime));
    }

    #[test]
    fn arbitrary_input_never_panics(token in ".{0,256}") {
        let scheme = SigningScheme::symmetric(b"s3cr3t");
        let result = validate_at(&token, &scheme, issue_time(), &ValidationOptions::strict());

        prop_assert!(!result.valid);
        prop_assert!(result.failure_reason.is_some());
    }
}
