//! Property-based tests for the round-trip guarantees of the codec.
//!
//! Generated inputs cover the scalar kinds, strings over the full escape
//! alphabet, exact floats and nested tables.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_ace::escape::{escape, escape_str, needs_escape, unescape, unescape_str};
use serde_ace::{deserialize, from_str, serialize, to_string, AceTable, AceValue};

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_string(value) {
        Ok(serialized) => match from_str::<T>(&serialized) {
            Ok(deserialized) => *value == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

fn ace_value() -> impl Strategy<Value = AceValue> {
    let leaf = prop_oneof![
        Just(AceValue::Nil),
        any::<bool>().prop_map(AceValue::Bool),
        any::<i64>().prop_map(AceValue::from),
        any::<f64>()
            .prop_filter("NaN never equals itself through f64", |f| !f.is_nan())
            .prop_map(AceValue::from),
        ".*".prop_map(AceValue::from),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(AceValue::from),
            prop::collection::vec(("[a-z]{1,8}", inner), 0..6)
                .prop_map(|entries| AceValue::Table(entries.into_iter().collect::<AceTable>())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_i64(n in any::<i64>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_u32(n in any::<u32>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        prop_assert!(roundtrip(&b));
    }

    #[test]
    fn prop_f64_bits(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        let text = to_string(&f).unwrap();
        let back: f64 = from_str(&text).unwrap();
        prop_assert_eq!(back.to_bits(), f.to_bits(), "{}", text);
    }

    #[test]
    fn prop_string(s in ".*") {
        prop_assert!(roundtrip(&s));
    }

    #[test]
    fn prop_string_payload_is_clean(s in ".*") {
        let text = to_string(&s).unwrap();
        let payload = &text[4..text.len() - 2];
        prop_assert!(!payload.contains('^'));
        prop_assert!(payload.bytes().all(|b| b > 0x20 && b != 0x7f));
    }

    #[test]
    fn prop_escape_byte(b in any::<u8>()) {
        if needs_escape(b) {
            prop_assert_eq!(unescape(escape(b).unwrap()).unwrap(), b);
        } else {
            prop_assert!(escape(b).is_err());
        }
    }

    #[test]
    fn prop_escape_str(s in ".*") {
        let escaped = escape_str(&s);
        prop_assert_eq!(unescape_str(&escaped).unwrap(), s);
    }

    #[test]
    fn prop_vec_option_i32(v in prop::collection::vec(proptest::option::weighted(0.8, any::<i32>()), 0..20)
        .prop_filter("holes must not end or dominate the sequence", |v| {
            v.last().map_or(true, Option::is_some)
                && v.iter().filter(|x| x.is_some()).count() * 2 >= v.len()
        }))
    {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_tuple_string_i32_bool(t in (".*", any::<i32>(), any::<bool>())) {
        prop_assert!(roundtrip(&t));
    }

    #[test]
    fn prop_values(values in prop::collection::vec(ace_value(), 0..4)) {
        let text = serialize(&values).unwrap();
        prop_assert_eq!(deserialize(&text).unwrap(), values);
    }
}
