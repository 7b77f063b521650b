use std::collections::BTreeMap;

use mathcheck_core::errors::{ErrorInfo, MathcheckError};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

fn serde_error(code: &str, err: impl ToString) -> MathcheckError {
    MathcheckError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let ordered: BTreeMap<String, Value> = map
                .into_iter()
                .map(|(key, value)| (key, sort_keys(value)))
                .collect();
            Value::Object(ordered.into_iter().collect::<Map<_, _>>())
        }
        Value::Array(values) => Value::Array(values.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Serializes a value into JSON bytes with every object's keys sorted.
///
/// Non-finite floats have no JSON representation and are written as `null`.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, MathcheckError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json_serialize", err))?;
    serde_json::to_vec(&sort_keys(value)).map_err(|err| serde_error("json_write", err))
}

/// Pretty-printed variant of [`to_canonical_json_bytes`] for terminal output.
pub fn to_canonical_json_pretty<T: Serialize>(value: &T) -> Result<String, MathcheckError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json_serialize", err))?;
    serde_json::to_string_pretty(&sort_keys(value)).map_err(|err| serde_error("json_write", err))
}

/// Deserializes a value from JSON bytes.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, MathcheckError> {
    serde_json::from_slice(data).map_err(|err| serde_error("json_deserialize", err))
}

/// Serializes a value into YAML.
pub fn to_yaml_string<T: Serialize>(value: &T) -> Result<String, MathcheckError> {
    serde_yaml::to_string(value).map_err(|err| serde_error("yaml_serialize", err))
}

/// Deserializes a YAML payload; blank input yields the type's default.
pub fn from_yaml_slice<T: DeserializeOwned + Default>(data: &[u8]) -> Result<T, MathcheckError> {
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_yaml::from_slice(data).map_err(|err| serde_error("yaml_deserialize", err))
}
