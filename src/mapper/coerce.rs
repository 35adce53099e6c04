//! Scalar coercion
//!
//! Coercion is permissive: every function here produces a value of the
//! target kind for any input and never fails. A numeric string declared
//! as `int` silently becomes an integer.

use serde_json::{Map, Value};

use super::types::ScalarKind;
use super::value::MappedValue;

/// Coerces a raw value to the given scalar kind
pub fn coerce(kind: ScalarKind, value: &Value) -> MappedValue {
    match kind {
        ScalarKind::String => MappedValue::String(to_string(value)),
        ScalarKind::Int => MappedValue::Int(to_int(value)),
        ScalarKind::Float => MappedValue::Float(to_float(value)),
        ScalarKind::Bool => MappedValue::Bool(to_bool(value)),
        ScalarKind::Array => match value {
            Value::Object(map) => MappedValue::Map(map.clone()),
            other => MappedValue::Array(to_list(other)),
        },
    }
}

pub fn to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(u)) => u.to_string(),
            _ => n.as_f64().map(float_to_string).unwrap_or_default(),
        },
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

pub fn to_int(value: &Value) -> i64 {
    match value {
        Value::Null => 0,
        Value::Bool(b) => i64::from(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else if n.is_u64() {
                i64::MAX
            } else {
                // `as` truncates toward zero, saturates, and maps NaN to 0
                n.as_f64().map(|f| f as i64).unwrap_or(0)
            }
        }
        Value::String(s) => parse_int_prefix(s),
        Value::Array(items) => i64::from(!items.is_empty()),
        Value::Object(map) => i64::from(!map.is_empty()),
    }
}

pub fn to_float(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => numeric_prefix(s).parse::<f64>().unwrap_or(0.0),
        Value::Array(items) => f64::from(u8::from(!items.is_empty())),
        Value::Object(map) => f64::from(u8::from(!map.is_empty())),
    }
}

pub fn to_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => match n.as_f64() {
            Some(f) => f != 0.0,
            None => true,
        },
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Spreads a value into list elements: a list as-is, the values of a map
/// in order, nothing for null, and any scalar as a single element.
pub fn to_list(value: &Value) -> Vec<Value> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.clone(),
        Value::Object(map) => map.values().cloned().collect(),
        scalar => vec![scalar.clone()],
    }
}

/// Views a value as a generic map: a map as-is, nothing for null, a list
/// keyed by its decimal indices, and a scalar under key `"0"`.
pub fn to_map(value: &Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map.clone(),
        Value::Null => Map::new(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| (i.to_string(), item.clone()))
            .collect(),
        scalar => {
            let mut map = Map::new();
            map.insert("0".to_string(), scalar.clone());
            map
        }
    }
}

/// Formats a float with its shortest round-trip digits.
///
/// Decimal exponents below -4 or from 15 up switch to exponent form with a
/// mandatory fraction and signed exponent: `1e21` is `"1.0E+21"`, `1.5e-7`
/// is `"1.5E-7"`. Integral values drop the fraction: `1.0` is `"1"`.
fn float_to_string(f: f64) -> String {
    let scientific = format!("{:e}", f);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return f.to_string();
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..15).contains(&exponent) {
        return f.to_string();
    }

    let fraction = if mantissa.contains('.') { "" } else { ".0" };
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}{}E{}{}", mantissa, fraction, sign, exponent.abs())
}

fn parse_int_prefix(s: &str) -> i64 {
    let prefix = numeric_prefix(s);
    if prefix.is_empty() {
        return 0;
    }
    if prefix.contains(['.', 'e', 'E']) {
        return prefix.parse::<f64>().map(|f| f as i64).unwrap_or(0);
    }
    prefix
        .parse::<i64>()
        .or_else(|_| prefix.parse::<f64>().map(|f| f as i64))
        .unwrap_or(0)
}

/// Returns the leading numeric part of a string, after leading whitespace.
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// optional exponent. Returns an empty string when no digit leads.
fn numeric_prefix(s: &str) -> &str {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut at: usize| {
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        let frac_digits = frac_end - end - 1;
        if mantissa_digits + frac_digits > 0 {
            mantissa_digits += frac_digits;
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_coercion() {
        assert_eq!(to_string(&Value::Null), "");
        assert_eq!(to_string(&json!(true)), "1");
        assert_eq!(to_string(&json!(false)), "");
        assert_eq!(to_string(&json!(24)), "24");
        assert_eq!(to_string(&json!(1.0)), "1");
        assert_eq!(to_string(&json!(0.035)), "0.035");
        assert_eq!(to_string(&json!("John")), "John");
    }

    #[test]
    fn test_string_coercion_exponent_form() {
        assert_eq!(to_string(&json!(1e21)), "1.0E+21");
        assert_eq!(to_string(&json!(1e-7)), "1.0E-7");
        assert_eq!(to_string(&json!(-2.5e-9)), "-2.5E-9");
        assert_eq!(to_string(&json!(1e15)), "1.0E+15");
        assert_eq!(to_string(&json!(1e14)), "100000000000000");
        assert_eq!(to_string(&json!(0.0001)), "0.0001");
        assert_eq!(to_string(&json!(0.0)), "0");
    }

    #[test]
    fn test_string_coercion_keeps_map_order() {
        assert_eq!(to_string(&json!({"z": 1, "a": 2})), r#"{"z":1,"a":2}"#);
    }

    #[test]
    fn test_int_coercion() {
        assert_eq!(to_int(&Value::Null), 0);
        assert_eq!(to_int(&json!(true)), 1);
        assert_eq!(to_int(&json!(24)), 24);
        assert_eq!(to_int(&json!(-3.9)), -3);
        assert_eq!(to_int(&json!("31")), 31);
        assert_eq!(to_int(&json!("  12abc")), 12);
        assert_eq!(to_int(&json!("1e3")), 1000);
        assert_eq!(to_int(&json!("abc")), 0);
        assert_eq!(to_int(&json!(u64::MAX)), i64::MAX);
        assert_eq!(to_int(&json!([])), 0);
        assert_eq!(to_int(&json!([0])), 1);
    }

    #[test]
    fn test_float_coercion() {
        assert_eq!(to_float(&json!("0.035")), 0.035);
        assert_eq!(to_float(&json!(".5")), 0.5);
        assert_eq!(to_float(&json!("-2.5kg")), -2.5);
        assert_eq!(to_float(&json!("x1")), 0.0);
        assert_eq!(to_float(&json!(7)), 7.0);
        assert_eq!(to_float(&Value::Null), 0.0);
    }

    #[test]
    fn test_bool_coercion() {
        assert!(!to_bool(&Value::Null));
        assert!(!to_bool(&json!("")));
        assert!(!to_bool(&json!("0")));
        assert!(to_bool(&json!("false")));
        assert!(!to_bool(&json!(0.0)));
        assert!(to_bool(&json!(2)));
        assert!(!to_bool(&json!({})));
        assert!(to_bool(&json!([null])));
    }

    #[test]
    fn test_array_coercion() {
        match coerce(ScalarKind::Array, &json!("tag")) {
            MappedValue::Array(items) => assert_eq!(items, vec![json!("tag")]),
            other => panic!("expected array, got {:?}", other),
        }
        match coerce(ScalarKind::Array, &Value::Null) {
            MappedValue::Array(items) => assert!(items.is_empty()),
            other => panic!("expected array, got {:?}", other),
        }
        match coerce(ScalarKind::Array, &json!({"a": 1})) {
            MappedValue::Map(map) => assert_eq!(map.get("a"), Some(&json!(1))),
            other => panic!("expected map, got {:?}", other),
        }
        match coerce(ScalarKind::Array, &json!({"z": 1, "a": 2})) {
            MappedValue::Map(map) => {
                let keys: Vec<_> = map.keys().map(String::as_str).collect();
                assert_eq!(keys, ["z", "a"]);
            }
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn test_to_list_spreads_map_values_in_order() {
        let list = to_list(&json!({"user": [1, 2]}));
        assert_eq!(list, vec![json!([1, 2])]);
        let list = to_list(&json!({"z": "last", "a": "first", "m": "mid"}));
        assert_eq!(list, vec![json!("last"), json!("first"), json!("mid")]);
        assert_eq!(to_list(&json!(5)), vec![json!(5)]);
    }

    #[test]
    fn test_to_map() {
        assert!(to_map(&Value::Null).is_empty());
        let map = to_map(&json!(["a", "b"]));
        assert_eq!(map.get("1"), Some(&json!("b")));
        let map = to_map(&json!(3));
        assert_eq!(map.get("0"), Some(&json!(3)));
    }

    #[test]
    fn test_numeric_prefix() {
        assert_eq!(numeric_prefix("42px"), "42");
        assert_eq!(numeric_prefix("+1.5e-2x"), "+1.5e-2");
        assert_eq!(numeric_prefix("3e"), "3");
        assert_eq!(numeric_prefix("."), "");
        assert_eq!(numeric_prefix("-"), "");
    }
}
