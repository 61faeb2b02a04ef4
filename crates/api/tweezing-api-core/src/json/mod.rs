use serde_json::{json, Map, Number, Value as JsonValue};

use crate::Value;

/// Tags accepted in canonical `{ "type": ..., "data": ... }` JSON.
const KIND_TAGS: [&str; 9] = [
    "float", "bool", "vec2", "vec3", "vec4", "colorrgba", "text", "array", "record",
];

fn is_canonical(obj: &Map<String, JsonValue>) -> bool {
    obj.len() == 2
        && obj.contains_key("data")
        && obj
            .get("type")
            .and_then(JsonValue::as_str)
            .is_some_and(|tag| KIND_TAGS.contains(&tag))
}

/// Normalize shorthand `Value` JSON into the canonical `{ "type": ..., "data": ... }`
/// representation understood by the serde derives on [`Value`]. Accepts primitive
/// aliases like `1.0`, `[0, 1]` or `{ "a": 0 }` as well as leaf shorthands such as
/// `{ "vec3": [1, 2, 3] }` and `{ "color": [1, 0, 0, 1] }`.
///
/// Plain arrays always become `array` (each element animated on its own); use the
/// `vec*` aliases for a vector animated as one leaf. An object is taken as canonical
/// only when `type` names a known kind; `{ "type": 0, "data": 1 }` is a record.
pub fn normalize_value_json(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Number(n) => json!({ "type": "float", "data": n }),
        JsonValue::Bool(b) => json!({ "type": "bool", "data": b }),
        JsonValue::String(s) => json!({ "type": "text", "data": s }),
        JsonValue::Array(arr) => {
            let data: Vec<JsonValue> = arr.into_iter().map(normalize_value_json).collect();
            json!({ "type": "array", "data": data })
        }
        JsonValue::Object(obj) => {
            if is_canonical(&obj) {
                return JsonValue::Object(obj);
            }
            if obj.len() == 1 {
                if let Some(arr) = obj.get("vec2").and_then(|x| x.as_array()) {
                    return json!({ "type": "vec2", "data": arr });
                }
                if let Some(arr) = obj.get("vec3").and_then(|x| x.as_array()) {
                    return json!({ "type": "vec3", "data": arr });
                }
                if let Some(arr) = obj.get("vec4").and_then(|x| x.as_array()) {
                    return json!({ "type": "vec4", "data": arr });
                }
                if let Some(arr) = obj.get("color").and_then(|x| x.as_array()) {
                    return json!({ "type": "colorrgba", "data": arr });
                }
            }
            let mut data = Map::new();
            for (key, val) in obj {
                data.insert(key, normalize_value_json(val));
            }
            json!({ "type": "record", "data": JsonValue::Object(data) })
        }
        other => other,
    }
}

/// Normalize then deserialize into the strongly typed [`Value`].
pub fn parse_value(value: JsonValue) -> Result<Value, serde_json::Error> {
    serde_json::from_value(normalize_value_json(value))
}

fn number(v: f32) -> JsonValue {
    // Integral floats render without a fractional part so `0.0` prints as `0`.
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15 {
        return JsonValue::from(v as i64);
    }
    Number::from_f64(v as f64)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}

fn numbers(vs: &[f32]) -> JsonValue {
    JsonValue::Array(vs.iter().copied().map(number).collect())
}

/// Render a [`Value`] as shorthand JSON, the form a binding layer displays.
pub fn to_plain_json(value: &Value) -> JsonValue {
    match value {
        Value::Float(v) => number(*v),
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Vec2(v) => numbers(v),
        Value::Vec3(v) => numbers(v),
        Value::Vec4(v) => numbers(v),
        Value::ColorRgba(v) => numbers(v),
        Value::Text(s) => JsonValue::String(s.clone()),
        Value::Array(items) => JsonValue::Array(items.iter().map(to_plain_json).collect()),
        Value::Record(fields) => {
            let mut map = Map::new();
            for (k, v) in fields {
                map.insert(k.clone(), to_plain_json(v));
            }
            JsonValue::Object(map)
        }
    }
}
