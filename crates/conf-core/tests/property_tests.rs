use conf_core::{ConfigResolver, Lookup, UriSpec, codec, parse_uri_spec, split_comma_list};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn single(key: &str, value: Value) -> ConfigResolver {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    ConfigResolver::new(map)
}

proptest! {
    #[test]
    fn uri_parts_round_trip(user in "[^:@]*", password in "[^:@]*", host in "[^@]*") {
        let raw = format!("{user}:{password}@{host}");
        let spec = parse_uri_spec(&raw).unwrap();
        prop_assert_eq!(spec, UriSpec::new(user, password, host));
    }

    #[test]
    fn comma_list_parts_are_trimmed_and_non_empty(raw in "[a-z ,]*") {
        let parts = split_comma_list(&raw);
        for part in &parts {
            prop_assert!(!part.is_empty());
            prop_assert_eq!(part.trim(), part.as_str());
            prop_assert!(!part.contains(','));
        }
    }

    #[test]
    fn int_string_and_native_agree(n in any::<i64>()) {
        let mut from_string = single("N", Value::String(n.to_string()));
        let mut from_native = single("N", Value::from(n));
        prop_assert_eq!(from_string.get_int("N", Lookup::new()).unwrap(), Some(n));
        prop_assert_eq!(from_native.get_int("N", Lookup::new()).unwrap(), Some(n));
    }

    #[test]
    fn decode_undoes_repeated_encode(text in "\\PC*", passes in 0u32..4) {
        let mut encoded = text.clone();
        for _ in 0..passes {
            encoded = codec::encode(&encoded);
        }
        prop_assert_eq!(codec::decode(&encoded, passes).unwrap(), text);
    }

    #[test]
    fn secret_keys_are_always_requested(keys in proptest::collection::vec("[A-Z]{1,4}", 1..8)) {
        let mut map = Map::new();
        for key in &keys {
            map.insert(key.clone(), Value::String("v".to_string()));
        }
        let mut config = ConfigResolver::new(map);
        for (i, key) in keys.iter().enumerate() {
            let lookup = if i % 2 == 0 { Lookup::new().secret() } else { Lookup::new().local() };
            config.get_string(key, lookup).unwrap();
        }
        prop_assert!(config.secret_keys().is_subset(config.requested_keys()));
        prop_assert!(config.local_keys().is_subset(config.requested_keys()));
    }
}
