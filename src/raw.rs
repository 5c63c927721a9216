//! Read-only access to untyped backend records.
//!
//! Backend payloads are arbitrary JSON. [`RawRecord`] wraps an optional object
//! and exposes the two defaulting policies the normalizers rely on:
//! falsy-coalesce for ordinary fields and not-exactly-false for visibility
//! flags.

use serde_json::{Map, Value};

/// JavaScript-style truthiness: `null`, `false`, `0`, `NaN` and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Falsy-coalesce: keep `value` only when it is truthy.
///
/// Empty strings, zero and `false` count as absent, so callers substitute
/// their default for them exactly as they would for a missing key.
pub fn coalesce_falsy(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| is_truthy(v))
}

/// Render a scalar as display text. Arrays and objects have no text form.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Numeric reading of a scalar: JSON numbers and numeric strings.
fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Borrowed view over a backend record. A missing, `null` or non-object value
/// is an absent record on which every lookup misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawRecord<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> From<&'a Value> for RawRecord<'a> {
    fn from(value: &'a Value) -> Self {
        Self { fields: value.as_object() }
    }
}

impl<'a> From<Option<&'a Value>> for RawRecord<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        value.map(Self::from).unwrap_or_default()
    }
}

impl<'a> From<&'a Map<String, Value>> for RawRecord<'a> {
    fn from(fields: &'a Map<String, Value>) -> Self {
        Self { fields: Some(fields) }
    }
}

impl<'a> RawRecord<'a> {
    /// The record that stands in for a `null` payload.
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn is_absent(&self) -> bool {
        self.fields.is_none()
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.and_then(|f| f.get(key))
    }

    /// Truthy scalar at `key`, rendered as text.
    pub fn text(&self, key: &str) -> Option<String> {
        coalesce_falsy(self.get(key)).and_then(as_text)
    }

    /// First truthy text among `keys`, in order.
    pub fn text_any(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|k| self.text(k))
    }

    pub fn text_or(&self, key: &str, default: &str) -> String {
        self.text(key).unwrap_or_else(|| default.to_string())
    }

    /// Truthy numeric value at `key`; `0` falls back like any other falsy value.
    pub fn number_or(&self, key: &str, default: f64) -> f64 {
        coalesce_falsy(self.get(key))
            .and_then(as_number)
            .filter(|n| *n != 0.0)
            .unwrap_or(default)
    }

    /// Falsy-coalesced flag: any truthy value reads as `true`, anything else
    /// yields `default`.
    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        if coalesce_falsy(self.get(key)).is_some() {
            true
        } else {
            default
        }
    }

    /// Visibility flag: only an explicit `false` turns it off.
    pub fn flag_not_false(&self, key: &str) -> bool {
        !matches!(self.get(key), Some(Value::Bool(false)))
    }

    /// Sort key from `order`. Numbers and numeric strings are honored,
    /// everything else sorts as 0.
    pub fn order(&self) -> f64 {
        self.get("order").and_then(as_number).unwrap_or(0.0)
    }

    /// Nested object at `key`; absent when missing or not an object.
    pub fn nested(&self, key: &str) -> RawRecord<'a> {
        RawRecord::from(self.get(key))
    }

    /// List of display strings. Arrays keep their truthy scalar items, a
    /// single string is split on commas.
    pub fn strings(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter(|v| is_truthy(v))
                .filter_map(as_text)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Some(Value::String(s)) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness_follows_js_rules() {
        for v in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&v), "{v} should be falsy");
        }
        for v in [json!(true), json!(1), json!(-2.5), json!("0"), json!([]), json!({})] {
            assert!(is_truthy(&v), "{v} should be truthy");
        }
    }

    #[test]
    fn text_treats_falsy_values_as_missing() {
        let value = json!({ "title": "", "count": 0, "flag": false, "name": "Denim", "id": 42 });
        let raw = RawRecord::from(&value);
        assert_eq!(raw.text("title"), None);
        assert_eq!(raw.text("count"), None);
        assert_eq!(raw.text("flag"), None);
        assert_eq!(raw.text("name").as_deref(), Some("Denim"));
        assert_eq!(raw.text("id").as_deref(), Some("42"));
        assert_eq!(raw.text_or("title", "Untitled"), "Untitled");
        assert_eq!(raw.text_any(&["title", "name"]).as_deref(), Some("Denim"));
    }

    #[test]
    fn objects_have_no_text_form() {
        let value = json!({ "title": { "en": "x" } });
        assert_eq!(RawRecord::from(&value).text_or("title", "fallback"), "fallback");
    }

    #[test]
    fn active_flag_only_turns_off_on_explicit_false() {
        let value = json!({ "a": false, "b": true, "c": null, "d": 0 });
        let raw = RawRecord::from(&value);
        assert!(!raw.flag_not_false("a"));
        assert!(raw.flag_not_false("b"));
        assert!(raw.flag_not_false("c"));
        assert!(raw.flag_not_false("d"));
        assert!(raw.flag_not_false("missing"));
        assert!(RawRecord::absent().flag_not_false("isActive"));
    }

    #[test]
    fn bool_or_coalesces_falsy_values_to_default() {
        let value = json!({ "on": true, "off": false, "yes": "yes" });
        let raw = RawRecord::from(&value);
        assert!(raw.bool_or("on", false));
        assert!(raw.bool_or("off", true));
        assert!(!raw.bool_or("off", false));
        assert!(raw.bool_or("yes", false));
    }

    #[test]
    fn order_coerces_numeric_strings_and_defaults_the_rest() {
        let cases = [
            (json!({ "order": 3 }), 3.0),
            (json!({ "order": "2" }), 2.0),
            (json!({ "order": " 1.5 " }), 1.5),
            (json!({ "order": "abc" }), 0.0),
            (json!({ "order": true }), 0.0),
            (json!({ "order": null }), 0.0),
            (json!({}), 0.0),
        ];
        for (value, expected) in cases {
            assert_eq!(RawRecord::from(&value).order(), expected, "{value}");
        }
    }

    #[test]
    fn number_or_keeps_falsy_coalesce_for_zero() {
        let value = json!({ "interval": 0, "delay": "250", "bad": "soon" });
        let raw = RawRecord::from(&value);
        assert_eq!(raw.number_or("interval", 5000.0), 5000.0);
        assert_eq!(raw.number_or("delay", 0.0), 250.0);
        assert_eq!(raw.number_or("bad", 7.0), 7.0);
    }

    #[test]
    fn non_objects_are_absent_records() {
        let value = json!("x");
        let raw = RawRecord::from(&value);
        assert!(raw.is_absent());
        assert_eq!(raw.get("anything"), None);
        assert!(RawRecord::from(None::<&Value>).is_absent());
    }

    #[test]
    fn strings_accepts_arrays_and_comma_lists() {
        let value = json!({ "tags": ["denim", "", null, " raw "], "keywords": "a, b,,c", "bad": 3 });
        let raw = RawRecord::from(&value);
        assert_eq!(raw.strings("tags"), vec!["denim", "raw"]);
        assert_eq!(raw.strings("keywords"), vec!["a", "b", "c"]);
        assert!(raw.strings("bad").is_empty());
        assert!(raw.strings("missing").is_empty());
    }
}
