use serde_json::{Map, Value};

/// JSON object exactly as it was received from the API.
pub type RawRecord = Map<String, Value>;

/// Converts raw JSON objects into typed records. The conversion never fails: absent or
/// wrong-typed fields turn into the zero value of the field, and the raw object is kept on the
/// record.
pub trait FromRawRecord: Sized {
    fn from_raw(raw: RawRecord) -> Self;
}

/// Converts every raw object of the list, preserving the order.
pub fn from_raw_records<T: FromRawRecord>(raw_records: Vec<RawRecord>) -> Vec<T> {
    raw_records.into_iter().map(T::from_raw).collect()
}

/// Reads an integer field. Numbers encoded as floating point literals (`1.0`) are truncated to
/// integers.
pub fn read_integer(raw: &RawRecord, key: &str) -> Option<i64> {
    match raw.get(key)? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|number| number as i64)),
        _ => None,
    }
}

/// Reads a string field.
pub fn read_string(raw: &RawRecord, key: &str) -> Option<String> {
    raw.get(key)?.as_str().map(str::to_string)
}

/// Reads a boolean field.
pub fn read_bool(raw: &RawRecord, key: &str) -> Option<bool> {
    raw.get(key)?.as_bool()
}

#[cfg(test)]
pub mod tests {
    use super::{RawRecord, read_bool, read_integer, read_string};
    use serde_json::{Value, json};

    pub fn raw_record(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("Expected JSON object, got {value}"),
        }
    }

    #[test]
    fn reads_integers() {
        let raw = raw_record(json!({
            "int": 16,
            "float": 16.0,
            "fraction": 16.7,
            "negative": -3,
            "string": "16",
            "null": null
        }));

        assert_eq!(read_integer(&raw, "int"), Some(16));
        assert_eq!(read_integer(&raw, "float"), Some(16));
        assert_eq!(read_integer(&raw, "fraction"), Some(16));
        assert_eq!(read_integer(&raw, "negative"), Some(-3));
        assert_eq!(read_integer(&raw, "string"), None);
        assert_eq!(read_integer(&raw, "null"), None);
        assert_eq!(read_integer(&raw, "missing"), None);
    }

    #[test]
    fn reads_strings_and_booleans() {
        let raw = raw_record(json!({
            "name": "Alice",
            "empty": "",
            "number": 1,
            "enabled": false,
            "enabled_string": "true"
        }));

        assert_eq!(read_string(&raw, "name").as_deref(), Some("Alice"));
        assert_eq!(read_string(&raw, "empty").as_deref(), Some(""));
        assert_eq!(read_string(&raw, "number"), None);
        assert_eq!(read_string(&raw, "missing"), None);

        assert_eq!(read_bool(&raw, "enabled"), Some(false));
        assert_eq!(read_bool(&raw, "enabled_string"), None);
        assert_eq!(read_bool(&raw, "missing"), None);
    }
}
