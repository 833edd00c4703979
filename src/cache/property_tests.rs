//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify the key namespace, expiry resolution, and
//! entry codec invariants over generated inputs.

use proptest::prelude::*;

use crate::cache::entry::{CacheEntry, Expiry};
use crate::cache::keys::{resolve_key, split_key};

// == Strategies ==
/// Generates prefixes without colons, as they are normally configured.
fn prefix_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,16}"
}

/// Generates entry names, optionally carrying wildcards and inner colons.
fn name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_/:*-]{0,24}"
}

fn body_strategy() -> impl Strategy<Value = String> {
    "[ -~]{0,256}"
}

fn expiry_strategy() -> impl Strategy<Value = Expiry> {
    prop_oneof![
        Just(Expiry::Never),
        (1u64..=86_400).prop_map(Expiry::After),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // A resolved key carries exactly one colon between the trimmed
    // prefix and the name, regardless of trailing colons in the
    // configured prefix.
    #[test]
    fn prop_resolve_key_single_separator(prefix in prefix_strategy(), name in name_strategy()) {
        let plain = resolve_key(&prefix, &name);
        let trailing = resolve_key(&format!("{prefix}:"), &name);

        prop_assert_eq!(&plain, &trailing, "trailing colon must not change the key");
        prop_assert_eq!(&plain, &format!("{prefix}:{name}"));
    }

    // split_key inverts resolve_key for colon-free prefixes, even when
    // the name itself contains colons.
    #[test]
    fn prop_split_key_inverts_resolve(prefix in prefix_strategy(), name in name_strategy()) {
        let key = resolve_key(&prefix, &name);
        let (split_prefix, split_name) = split_key(&key);

        prop_assert_eq!(split_prefix, prefix);
        prop_assert_eq!(split_name, name);
    }

    // Expiry resolution: the sentinel always wins, positive requests are
    // honored, and everything else falls back to the default.
    #[test]
    fn prop_expiry_resolution(requested in proptest::option::of(-1000i64..=1000), default in expiry_strategy()) {
        let resolved = Expiry::resolve(requested, default);

        match requested {
            Some(-1) => prop_assert_eq!(resolved, Expiry::Never),
            Some(seconds) if seconds > 0 => prop_assert_eq!(resolved, Expiry::After(seconds as u64)),
            _ => prop_assert_eq!(resolved, default),
        }
    }

    // An encoded entry decodes back to itself under the key it was
    // written to, with name and prefix reattached from the key.
    #[test]
    fn prop_entry_codec_roundtrip(
        prefix in prefix_strategy(),
        name in name_strategy(),
        body in body_strategy(),
        status in 100u16..=599,
        expire in expiry_strategy(),
    ) {
        let entry = CacheEntry::new(&prefix, &name, body, "text/html".to_string(), status, expire);
        let key = resolve_key(&prefix, &name);

        let decoded = CacheEntry::from_fields(&key, &entry.to_fields());
        prop_assert_eq!(decoded, Some(entry));
    }
}
