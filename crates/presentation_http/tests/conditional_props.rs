//! Property tests for entity tag comparison

use presentation_http::conditional::{etag_for, etag_matches};
use proptest::prelude::*;

proptest! {
    #[test]
    fn own_tag_always_matches(content in proptest::collection::vec(any::<u8>(), 0..256)) {
        let etag = etag_for(&content);
        prop_assert!(etag_matches(&etag, &etag));
        let strong = etag.trim_start_matches("W/");
        prop_assert!(etag_matches(strong, &etag));
        let listed = format!("\"other\" , {etag}");
        prop_assert!(etag_matches(&listed, &etag));
    }

    #[test]
    fn different_content_never_matches(
        a in proptest::collection::vec(any::<u8>(), 0..64),
        b in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        prop_assume!(a != b);
        prop_assert!(!etag_matches(&etag_for(&a), &etag_for(&b)));
    }

    #[test]
    fn arbitrary_headers_never_panic(header in ".{0,80}") {
        let _ = etag_matches(&header, "\"abc\"");
    }
}
