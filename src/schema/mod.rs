//! Data schema module
//!
//! Provides the semantic column-type vocabulary and schema derivation:
//! - Column type inference from a data sample
//! - Feature / additional-data partitioning with caller hints
//! - Validation of user-supplied additional-data schemas

mod classify;
mod config;
mod describe;
mod validate;

pub use classify::infer_column_type;
pub use config::InferenceConfig;
pub use describe::{describe_dataset, describe_dataset_with_config, ColumnNote, DatasetDescription, TabularDataset};
pub use validate::validate_additional_data_schema;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TabwatchError;

/// Semantic type of a column's values, independent of storage representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Numeric,
    Integer,
    Bigint,
    Categorical,
    Boolean,
    Text,
    ArrayFloat,
    #[serde(rename = "array_float_2d")]
    ArrayFloat2d,
    Datetime,
}

impl ColumnType {
    /// Wire tag for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Integer => "integer",
            ColumnType::Bigint => "bigint",
            ColumnType::Categorical => "categorical",
            ColumnType::Boolean => "boolean",
            ColumnType::Text => "text",
            ColumnType::ArrayFloat => "array_float",
            ColumnType::ArrayFloat2d => "array_float_2d",
            ColumnType::Datetime => "datetime",
        }
    }

    /// All recognized wire tags
    pub fn values() -> &'static [&'static str] {
        &[
            "numeric",
            "integer",
            "bigint",
            "categorical",
            "boolean",
            "text",
            "array_float",
            "array_float_2d",
            "datetime",
        ]
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = TabwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "numeric" => Ok(ColumnType::Numeric),
            "integer" => Ok(ColumnType::Integer),
            "bigint" => Ok(ColumnType::Bigint),
            "categorical" => Ok(ColumnType::Categorical),
            "boolean" => Ok(ColumnType::Boolean),
            "text" => Ok(ColumnType::Text),
            "array_float" => Ok(ColumnType::ArrayFloat),
            "array_float_2d" => Ok(ColumnType::ArrayFloat2d),
            "datetime" => Ok(ColumnType::Datetime),
            other => Err(TabwatchError::Schema(format!(
                "unknown column type '{}', must be one of {:?}",
                other,
                ColumnType::values()
            ))),
        }
    }
}

/// Internal column names reserved by the monitoring service.
///
/// These never appear in a derived schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedColumn {
    SampleId,
    Timestamp,
    Label,
    PredictionProbabilities,
    Prediction,
}

impl ReservedColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservedColumn::SampleId => "_tw_sample_id",
            ReservedColumn::Timestamp => "_tw_time",
            ReservedColumn::Label => "_tw_label",
            ReservedColumn::PredictionProbabilities => "_tw_prediction_probabilities",
            ReservedColumn::Prediction => "_tw_prediction",
        }
    }
}

/// Supported model task types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Regression,
    Multiclass,
    Binary,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Regression => "regression",
            TaskType::Multiclass => "multiclass",
            TaskType::Binary => "binary",
        }
    }

    pub fn values() -> &'static [&'static str] {
        &["regression", "multiclass", "binary"]
    }
}

impl FromStr for TaskType {
    type Err = TabwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regression" => Ok(TaskType::Regression),
            "multiclass" => Ok(TaskType::Multiclass),
            "binary" => Ok(TaskType::Binary),
            other => Err(TabwatchError::Validation(format!(
                "unknown task type '{}', possible values are {:?}",
                other,
                TaskType::values()
            ))),
        }
    }
}

/// Derived data schema: column name to semantic type, partitioned into
/// model features and additional (non-feature) data.
///
/// `None` marks a column that could not be classified automatically; the
/// caller is expected to set its type manually. Key sets of the two
/// mappings are disjoint by construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSchema {
    pub features: BTreeMap<String, Option<ColumnType>>,
    pub additional_data: BTreeMap<String, Option<ColumnType>>,
}

impl DataSchema {
    /// True when any column could not be classified
    pub fn has_unknown_columns(&self) -> bool {
        self.features
            .values()
            .chain(self.additional_data.values())
            .any(|t| t.is_none())
    }

    /// Names of columns that could not be classified, in key order
    pub fn unknown_columns(&self) -> Vec<&str> {
        self.features
            .iter()
            .chain(self.additional_data.iter())
            .filter(|(_, t)| t.is_none())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_type_wire_tags() {
        assert_eq!(
            serde_json::to_string(&ColumnType::Numeric).unwrap(),
            "\"numeric\""
        );
        assert_eq!(
            serde_json::to_string(&ColumnType::ArrayFloat2d).unwrap(),
            "\"array_float_2d\""
        );
        assert_eq!(
            serde_json::from_str::<ColumnType>("\"bigint\"").unwrap(),
            ColumnType::Bigint
        );
    }

    #[test]
    fn test_column_type_round_trip_all() {
        for tag in ColumnType::values() {
            let parsed: ColumnType = tag.parse().unwrap();
            assert_eq!(parsed.as_str(), *tag);
        }
    }

    #[test]
    fn test_column_type_unknown_tag() {
        let err = "not_a_type".parse::<ColumnType>().unwrap_err();
        assert!(err.to_string().contains("numeric"));
    }

    #[test]
    fn test_task_type_conversion() {
        assert_eq!("binary".parse::<TaskType>().unwrap(), TaskType::Binary);
        assert!("clustering".parse::<TaskType>().is_err());
    }

    #[test]
    fn test_reserved_column_names() {
        assert_eq!(ReservedColumn::SampleId.as_str(), "_tw_sample_id");
        assert_eq!(ReservedColumn::Timestamp.as_str(), "_tw_time");
    }

    #[test]
    fn test_data_schema_json_round_trip() {
        let mut schema = DataSchema::default();
        schema
            .features
            .insert("age".to_string(), Some(ColumnType::Integer));
        schema.features.insert("blob".to_string(), None);
        schema
            .additional_data
            .insert("city".to_string(), Some(ColumnType::Categorical));

        let json = serde_json::to_string(&schema).unwrap();
        let decoded: DataSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, schema);
        assert!(decoded.has_unknown_columns());
        assert_eq!(decoded.unknown_columns(), vec!["blob"]);
    }
}
