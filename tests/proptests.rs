// Property-based tests for canonical bencode round-trips.

use std::collections::BTreeMap;

use bytes::Bytes;
use proptest::prelude::*;

use rbencode::{decode, decode_all, decode_prefix, encode, Value};

fn arb_key() -> impl Strategy<Value = Bytes> {
    proptest::collection::vec(any::<u8>(), 0..16).prop_map(Bytes::from)
}

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Integer),
        proptest::collection::vec(any::<u8>(), 0..64).prop_map(Value::from),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(4, 256, 10, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..10).prop_map(Value::List),
            proptest::collection::btree_map(arb_key(), inner, 0..10).prop_map(Value::Dictionary),
        ]
    })
}

proptest! {
    #[test]
    fn roundtrip(v in arb_value()) {
        let bytes = encode(&v);
        prop_assert_eq!(bytes.len(), v.encoded_len());

        let decoded = decode_all(&bytes).unwrap();
        prop_assert_eq!(&decoded, &v);
        prop_assert_eq!(encode(&decoded), bytes);
    }

    #[test]
    fn reencoding_unsorted_dict_is_canonical(
        entries in proptest::collection::vec((arb_key(), arb_leaf()), 0..10)
    ) {
        // Emit entries in generation order, possibly unsorted and repeated.
        let mut raw = vec![b'd'];
        for (key, value) in &entries {
            raw.extend_from_slice(&encode(&Value::ByteString(key.clone())));
            raw.extend_from_slice(&encode(value));
        }
        raw.push(b'e');

        let expected: BTreeMap<Bytes, Value> = entries.into_iter().collect();
        let decoded = decode(&raw).unwrap();
        prop_assert_eq!(&decoded, &Value::Dictionary(expected));

        let canonical = encode(&decoded);
        prop_assert_eq!(encode(&decode(&canonical).unwrap()), canonical);
    }

    #[test]
    fn prefix_ignores_trailing_bytes(
        v in arb_value(),
        tail in proptest::collection::vec(any::<u8>(), 0..16),
    ) {
        let mut bytes = encode(&v);
        let len = bytes.len();
        bytes.extend_from_slice(&tail);

        let (decoded, used) = decode_prefix(&bytes).unwrap();
        prop_assert_eq!(used, len);
        prop_assert_eq!(decoded, v);
    }

    #[test]
    fn arbitrary_input_never_panics(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode(&data);
    }
}
