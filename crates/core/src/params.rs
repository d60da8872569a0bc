//! Lenient extraction of typed parameters from a `serde_json::Value` object.
//!
//! Missing keys and wrong types fall back to the supplied default, so a
//! partially specified parameter object always yields a usable configuration.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a count from `params[name]`.
///
/// Accepts integers and finite floats; floats are rounded and negative values
/// become 0. Callers clamp the result into their own valid range.
pub fn param_count(params: &Value, name: &str, default: usize) -> usize {
    let Some(value) = params.get(name) else {
        return default;
    };
    if let Some(v) = value.as_u64() {
        return v as usize;
    }
    match value.as_f64() {
        Some(v) if v.is_finite() => v.round().max(0.0) as usize,
        _ => default,
    }
}

/// Extracts a `u64` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_u64(params: &Value, name: &str, default: u64) -> u64 {
    params.get(name).and_then(Value::as_u64).unwrap_or(default)
}

/// Extracts a `bool` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}
