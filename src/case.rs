//! Key casing conversion between the backend (snake_case) and callers (camelCase)
//!
//! Only object keys are rewritten. Values keep their JSON type, arrays are
//! converted element by element and nested objects field by field.
//!
//! Rules for keys outside the plain camelCase / snake_case shapes:
//! - `to_snake` lowercases a leading uppercase letter without adding `_`
//! - `to_camel` leaves keys that already contain an uppercase letter alone
//! - leading underscores are kept verbatim by `to_camel`
//! - digits and non-ASCII characters are copied as-is in both directions

use serde_json::{Map, Value};

/// Convert a camelCase key to snake_case (`htmlPath` -> `html_path`)
pub fn to_snake(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);

    for (idx, ch) in key.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if idx > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }

    out
}

/// Convert a snake_case key to camelCase (`html_path` -> `htmlPath`)
pub fn to_camel(key: &str) -> String {
    if key.chars().any(|c| c.is_ascii_uppercase()) {
        return key.to_string();
    }

    let body = key.trim_start_matches('_');
    let mut out = String::with_capacity(key.len());
    out.push_str(&key[..key.len() - body.len()]);

    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        match (ch, chars.peek()) {
            ('_', Some(next)) if next.is_ascii_lowercase() => {
                let upper = next.to_ascii_uppercase();
                chars.next();
                out.push(upper);
            }
            _ => out.push(ch),
        }
    }

    out
}

/// Recursively snake_case every object key in a JSON tree
pub fn keys_to_snake(value: Value) -> Value {
    convert_keys(value, &to_snake)
}

/// Recursively camelCase every object key in a JSON tree
pub fn keys_to_camel(value: Value) -> Value {
    convert_keys(value, &to_camel)
}

/// Snake-case the keys of a parameter map (the map itself is the root object)
pub fn params_to_snake(params: Map<String, Value>) -> Map<String, Value> {
    convert_map(params, &to_snake)
}

fn convert_keys(value: Value, convert: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(convert_map(map, convert)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| convert_keys(item, convert))
                .collect(),
        ),
        other => other,
    }
}

fn convert_map(map: Map<String, Value>, convert: &dyn Fn(&str) -> String) -> Map<String, Value> {
    map.into_iter()
        .map(|(key, value)| (convert(&key), convert_keys(value, convert)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CAMEL_KEYS: &[&str] = &[
        "htmlPath",
        "contentType",
        "token",
        "a",
        "pageID",
        "page2Id",
        "restrictionId",
        "x1y2Z3",
        "componentProps",
    ];

    const SNAKE_KEYS: &[&str] = &[
        "html_path",
        "content_type",
        "token",
        "a",
        "foo_1",
        "foo__bar",
        "_private",
        "__dunder_key",
        "trailing_",
        "1_leading_digit",
        "a_1b",
        "component_props",
    ];

    #[test]
    fn test_to_snake_basic() {
        assert_eq!(to_snake("htmlPath"), "html_path");
        assert_eq!(to_snake("contentType"), "content_type");
        assert_eq!(to_snake("password"), "password");
    }

    #[test]
    fn test_to_snake_consecutive_capitals() {
        assert_eq!(to_snake("pageID"), "page_i_d");
    }

    #[test]
    fn test_to_snake_leading_capital() {
        assert_eq!(to_snake("FooBar"), "foo_bar");
    }

    #[test]
    fn test_to_camel_basic() {
        assert_eq!(to_camel("html_path"), "htmlPath");
        assert_eq!(to_camel("component_name"), "componentName");
        assert_eq!(to_camel("token"), "token");
    }

    #[test]
    fn test_to_camel_keeps_digit_separators() {
        assert_eq!(to_camel("foo_1"), "foo_1");
        assert_eq!(to_camel("a_1b"), "a_1b");
    }

    #[test]
    fn test_to_camel_keeps_leading_underscores() {
        assert_eq!(to_camel("_private"), "_private");
        assert_eq!(to_camel("__dunder_key"), "__dunderKey");
    }

    #[test]
    fn test_to_camel_leaves_mixed_case_alone() {
        assert_eq!(to_camel("Foo_bar"), "Foo_bar");
        assert_eq!(to_camel("alreadyCamel"), "alreadyCamel");
    }

    #[test]
    fn test_non_ascii_passes_through() {
        assert_eq!(to_camel("café_au_lait"), "caféAuLait");
        assert_eq!(to_snake("caféAuLait"), "café_au_lait");
    }

    #[test]
    fn test_camel_keys_round_trip() {
        for key in CAMEL_KEYS {
            assert_eq!(to_camel(&to_snake(key)), *key, "round trip of {key}");
        }
    }

    #[test]
    fn test_snake_keys_round_trip() {
        for key in SNAKE_KEYS {
            assert_eq!(to_snake(&to_camel(key)), *key, "round trip of {key}");
        }
    }

    #[test]
    fn test_keys_to_camel_nested() {
        let body = json!({"foo_bar": 1, "nested": {"baz_qux": 2}});
        assert_eq!(
            keys_to_camel(body),
            json!({"fooBar": 1, "nested": {"bazQux": 2}})
        );
    }

    #[test]
    fn test_keys_to_camel_inside_arrays() {
        let body = json!({"items": [{"relative_url": "/"}, {"relative_url": "/about/"}], "total_count": 2});
        assert_eq!(
            keys_to_camel(body),
            json!({"items": [{"relativeUrl": "/"}, {"relativeUrl": "/about/"}], "totalCount": 2})
        );
    }

    #[test]
    fn test_values_are_not_converted() {
        let body = json!({"component_name": "home_page", "flags": [true, null, 1.5, "snake_value"]});
        assert_eq!(
            keys_to_camel(body),
            json!({"componentName": "home_page", "flags": [true, null, 1.5, "snake_value"]})
        );
    }

    #[test]
    fn test_tree_round_trip() {
        let params = json!({
            "htmlPath": "/about",
            "contentType": "blogpage",
            "nestedValue": {"innerKey": [{"deepKey": 1}, 2, "three"]},
        });
        assert_eq!(keys_to_camel(keys_to_snake(params.clone())), params);

        let wire = json!({
            "html_path": "/about",
            "list_of_things": [{"deep_key": {"deeper_key": false}}],
        });
        assert_eq!(keys_to_snake(keys_to_camel(wire.clone())), wire);
    }

    #[test]
    fn test_scalar_root_is_untouched() {
        assert_eq!(keys_to_camel(json!("some_string")), json!("some_string"));
        assert_eq!(keys_to_snake(Value::Null), Value::Null);
    }

    #[test]
    fn test_params_to_snake() {
        let mut params = Map::new();
        params.insert("htmlPath".to_string(), json!("/"));
        params.insert("extraFilter".to_string(), json!({"innerKey": 1}));

        let snake = params_to_snake(params);
        assert_eq!(snake.get("html_path"), Some(&json!("/")));
        assert_eq!(snake.get("extra_filter"), Some(&json!({"inner_key": 1})));
    }
}
