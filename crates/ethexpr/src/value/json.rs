//! Conversions between Value and serde_json

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde_json::{Map, Number};

use super::*;

/// JSON numbers that fit `i64` become `Int`, larger unsigned ones become
/// `BigInt`. Fractional numbers have no counterpart and are kept as their
/// textual form.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Undefined,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::BigInt(BigInt::from(u))
                } else {
                    Value::string(n.to_string())
                }
            }
            serde_json::Value::String(s) => Value::string(s),
            serde_json::Value::Array(items) => {
                Value::array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                let obj = map
                    .into_iter()
                    .fold(ObjectValue::new("object"), |obj, (k, v)| {
                        obj.with_field(k, Value::from(v))
                    });
                Value::object(obj)
            }
        }
    }
}

impl Value {
    /// Convert to JSON.
    ///
    /// Big integers outside the `i64` range are rendered as decimal strings;
    /// callables and opaque host objects are rendered by name.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Undefined => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::Number(Number::from(*n)),
            Value::BigInt(n) => match n.to_i64() {
                Some(i) => serde_json::Value::Number(Number::from(i)),
                None => serde_json::Value::String(n.to_string()),
            },
            Value::String(s) => serde_json::Value::String(s.to_string()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Object(o) => {
                let map: Map<String, serde_json::Value> = o
                    .fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect();
                serde_json::Value::Object(map)
            }
            other => serde_json::Value::String(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_nested() {
        let value = Value::from(json!({"d": [9, [3]], "b": "text", "flag": true}));
        let Value::Object(obj) = value else {
            panic!("Expected object");
        };
        assert_eq!(obj.get("b"), Some(&Value::string("text")));
        assert_eq!(obj.get("flag"), Some(&Value::Bool(true)));
        assert_eq!(
            obj.get("d"),
            Some(&Value::array(vec![
                Value::Int(9),
                Value::array(vec![Value::Int(3)])
            ]))
        );
    }

    #[test]
    fn test_from_json_large_unsigned() {
        let value = Value::from(json!(u64::MAX));
        assert_eq!(value, Value::BigInt(BigInt::from(u64::MAX)));
    }

    #[test]
    fn test_to_json_big_values_become_strings() {
        let big = Value::BigInt(BigInt::from(10).pow(30));
        assert_eq!(big.to_json(), json!("1000000000000000000000000000000"));
        assert_eq!(Value::bigint(42).to_json(), json!(42));
        assert_eq!(Value::Undefined.to_json(), serde_json::Value::Null);
    }
}
