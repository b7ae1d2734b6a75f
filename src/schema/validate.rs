//! Additional-data schema validation

use serde_json::Value;

use super::ColumnType;
use crate::error::{Result, TabwatchError};

/// Validate a user-supplied additional-data schema against a features
/// mapping.
///
/// Succeeds as a no-op when `additional_data` is absent. Fails when
/// `additional_data` is not a JSON object, when it shares keys with
/// `features`, or when any value in either mapping is not one of the
/// recognized type tags.
pub fn validate_additional_data_schema(
    additional_data: Option<&Value>,
    features: &serde_json::Map<String, Value>,
) -> Result<()> {
    let additional_data = match additional_data {
        Some(value) => value,
        None => return Ok(()),
    };

    let additional_data = additional_data.as_object().ok_or_else(|| {
        TabwatchError::Validation("additional_data_schema must be a mapping".to_string())
    })?;

    let mut shared: Vec<String> = additional_data
        .keys()
        .filter(|key| features.contains_key(*key))
        .cloned()
        .collect();
    if !shared.is_empty() {
        shared.sort();
        return Err(TabwatchError::Conflict { keys: shared });
    }

    for (key, value) in features.iter().chain(additional_data.iter()) {
        check_type_tag(key, value)?;
    }

    Ok(())
}

fn check_type_tag(key: &str, value: &Value) -> Result<()> {
    let tag = value.as_str().ok_or_else(|| {
        TabwatchError::Schema(format!(
            "value for column '{}' must be a string, one of {:?}",
            key,
            ColumnType::values()
        ))
    })?;
    if !ColumnType::values().iter().any(|legal| *legal == tag) {
        return Err(TabwatchError::Schema(format!(
            "value for column '{}' must be one of {:?} but got '{}'",
            key,
            ColumnType::values(),
            tag
        )));
    }
    Ok(())
}
