use crate::runner::ds::value::{JsNumberType, JsValue};

pub const TYPE_STR_UNDEFINED: &str = "undefined";
pub const TYPE_STR_NULL: &str = "null";
pub const TYPE_STR_BOOLEAN: &str = "boolean";
pub const TYPE_STR_STRING: &str = "string";
pub const TYPE_STR_NUMBER: &str = "number";
pub const TYPE_STR_OBJECT: &str = "object";

pub fn get_type(a: &JsValue) -> &'static str {
    match a {
        JsValue::Undefined => TYPE_STR_UNDEFINED,
        JsValue::Null => TYPE_STR_NULL,
        JsValue::Boolean(_) => TYPE_STR_BOOLEAN,
        JsValue::Char(_) | JsValue::String(_) => TYPE_STR_STRING,
        JsValue::Number(_) => TYPE_STR_NUMBER,
        JsValue::List(_)
        | JsValue::Map(_)
        | JsValue::Iterable(_)
        | JsValue::Class(_)
        | JsValue::Pair(_)
        | JsValue::Object(_) => TYPE_STR_OBJECT,
    }
}

/// Generic string coercion, the default `as_string` strategy.
pub fn to_string(v: &JsValue) -> String {
    v.to_string()
}

/// Generic numeric coercion, the default `as_number` strategy.
pub fn to_number(v: &JsValue) -> JsNumberType {
    number_of(v, &mut Vec::new())
}

/// A list nested inside itself counts as empty.
fn number_of(v: &JsValue, seen: &mut Vec<usize>) -> JsNumberType {
    match v {
        JsValue::Undefined => JsNumberType::NaN,
        JsValue::Null => JsNumberType::Integer(0),
        JsValue::Boolean(b) => JsNumberType::Integer(if *b { 1 } else { 0 }),
        JsValue::Number(n) => n.clone(),
        JsValue::Char(c) => string_to_number(&c.to_string()),
        JsValue::String(s) => string_to_number(s),
        JsValue::List(l) => {
            if seen.contains(&l.addr()) {
                return JsNumberType::Integer(0);
            }
            let items = l.snapshot();
            match items.len() {
                0 => JsNumberType::Integer(0),
                1 => {
                    seen.push(l.addr());
                    let n = number_of(&items[0], seen);
                    seen.pop();
                    n
                }
                _ => JsNumberType::NaN,
            }
        }
        _ => JsNumberType::NaN,
    }
}

/// Generic truthiness, the default `as_boolean` strategy.
pub fn to_boolean(v: &JsValue) -> bool {
    match v {
        JsValue::Undefined | JsValue::Null => false,
        JsValue::Boolean(b) => *b,
        JsValue::Char(_) => true,
        JsValue::String(s) => !s.is_empty(),
        JsValue::Number(n) => match n {
            JsNumberType::Integer(i) => *i != 0,
            JsNumberType::Float(f) => *f != 0.0,
            JsNumberType::NaN => false,
            JsNumberType::PositiveInfinity | JsNumberType::NegativeInfinity => true,
        },
        _ => true,
    }
}

/// Parses the string form of a number. Surrounding whitespace is ignored,
/// the empty string is zero and anything unparsable is NaN.
pub fn string_to_number(s: &str) -> JsNumberType {
    let s = s.trim();
    if s.is_empty() {
        return JsNumberType::Integer(0);
    }
    match s {
        "Infinity" | "+Infinity" => return JsNumberType::PositiveInfinity,
        "-Infinity" => return JsNumberType::NegativeInfinity,
        _ => {}
    }
    if let Ok(i) = s.parse::<i64>() {
        return JsNumberType::Integer(i);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() => JsNumberType::from_f64(f),
        _ => JsNumberType::NaN,
    }
}
