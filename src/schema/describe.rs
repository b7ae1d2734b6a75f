//! Dataset schema derivation
//!
//! Walks a dataset's columns in order, partitions them into model features
//! and additional data, and infers a semantic type for each. Caller-declared
//! roles are authoritative; the classifier is only consulted for columns
//! whose role leaves the type open.

use std::collections::BTreeMap;

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::classify::infer_column_type;
use super::config::InferenceConfig;
use super::{ColumnType, DataSchema};
use crate::error::Result;

/// A tabular data sample with role metadata.
///
/// Wraps a [`DataFrame`] together with the caller's declarations of which
/// columns are the index, the timestamp, the label, and the model features.
/// The data is consumed read-only.
#[derive(Debug, Clone)]
pub struct TabularDataset {
    data: DataFrame,
    index_name: Option<String>,
    datetime_name: Option<String>,
    label_name: Option<String>,
    features: Vec<String>,
    categorical_features: Vec<String>,
    numerical_features: Vec<String>,
}

impl TabularDataset {
    /// Create a dataset view with no declared roles
    pub fn new(data: DataFrame) -> Self {
        Self {
            data,
            index_name: None,
            datetime_name: None,
            label_name: None,
            features: Vec::new(),
            categorical_features: Vec::new(),
            numerical_features: Vec::new(),
        }
    }

    /// Builder method to declare the index column
    pub fn with_index_name(mut self, name: impl Into<String>) -> Self {
        self.index_name = Some(name.into());
        self
    }

    /// Builder method to declare the datetime column
    pub fn with_datetime_name(mut self, name: impl Into<String>) -> Self {
        self.datetime_name = Some(name.into());
        self
    }

    /// Builder method to declare the label column
    pub fn with_label_name(mut self, name: impl Into<String>) -> Self {
        self.label_name = Some(name.into());
        self
    }

    /// Builder method to declare the model feature columns
    pub fn with_features(mut self, names: Vec<String>) -> Self {
        self.features = names;
        self
    }

    /// Builder method to declare which features are categorical
    pub fn with_categorical_features(mut self, names: Vec<String>) -> Self {
        self.categorical_features = names;
        self
    }

    /// Builder method to declare which features are numerical
    pub fn with_numerical_features(mut self, names: Vec<String>) -> Self {
        self.numerical_features = names;
        self
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn label_name(&self) -> Option<&str> {
        self.label_name.as_deref()
    }

    pub fn has_label(&self) -> bool {
        self.label_name.is_some()
    }

    /// Index and datetime columns are reserved and never appear in a schema
    fn is_reserved(&self, column: &str) -> bool {
        self.index_name.as_deref() == Some(column)
            || self.datetime_name.as_deref() == Some(column)
    }

    fn is_feature(&self, column: &str) -> bool {
        self.features.iter().any(|f| f == column)
    }

    fn is_categorical_feature(&self, column: &str) -> bool {
        self.categorical_features.iter().any(|f| f == column)
    }

    fn is_numerical_feature(&self, column: &str) -> bool {
        self.numerical_features.iter().any(|f| f == column)
    }
}

/// A diagnostic note produced during schema derivation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNote {
    /// Column the note refers to, or `None` for a dataset-wide note
    pub column: Option<String>,
    pub message: String,
}

/// Result of [`describe_dataset`]: the derived schema plus the ordered
/// diagnostics collected along the way
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetDescription {
    pub schema: DataSchema,
    pub notes: Vec<ColumnNote>,
}

/// Derive a schema for a dataset using default inference thresholds
pub fn describe_dataset(dataset: &TabularDataset) -> Result<DatasetDescription> {
    describe_dataset_with_config(dataset, &InferenceConfig::default())
}

/// Derive a schema for a dataset.
///
/// Columns are visited in dataset order. Index, datetime, and label columns
/// are skipped. Declared categorical features map to boolean or categorical,
/// declared numerical features to integer or numeric, both from the stored
/// dtype. Features without a role hint go through the classifier, with a
/// categorical verdict downgraded to text: a feature is never treated as
/// categorical unless the caller said so. Every remaining column lands in
/// additional data with the classifier's verdict unchanged.
///
/// Columns that cannot be classified are kept with no type and reported
/// through the returned notes; derivation never aborts over them.
pub fn describe_dataset_with_config(
    dataset: &TabularDataset,
    config: &InferenceConfig,
) -> Result<DatasetDescription> {
    let mut features: BTreeMap<String, Option<ColumnType>> = BTreeMap::new();
    let mut additional_data: BTreeMap<String, Option<ColumnType>> = BTreeMap::new();
    let mut notes = Vec::new();

    for column in dataset.data().get_columns() {
        let name = column.name().as_str();
        if dataset.is_reserved(name) {
            continue;
        }
        if dataset.has_label() && dataset.label_name() == Some(name) {
            continue;
        }

        let series = column.as_materialized_series();

        if dataset.is_feature(name) {
            let column_type = if dataset.is_categorical_feature(name) {
                if matches!(series.dtype(), DataType::Boolean) {
                    Some(ColumnType::Boolean)
                } else {
                    Some(ColumnType::Categorical)
                }
            } else if dataset.is_numerical_feature(name) {
                if series.dtype().is_integer() {
                    Some(ColumnType::Integer)
                } else {
                    Some(ColumnType::Numeric)
                }
            } else {
                match infer_column_type(series, config) {
                    // An undeclared feature is never silently categorical
                    Some(ColumnType::Categorical) => Some(ColumnType::Text),
                    other => other,
                }
            };
            if column_type.is_none() {
                notes.push(unsupported_note(name, series.dtype()));
            }
            features.insert(name.to_string(), column_type);
        } else {
            let column_type = infer_column_type(series, config);
            if column_type.is_none() {
                notes.push(unsupported_note(name, series.dtype()));
            }
            additional_data.insert(name.to_string(), column_type);
        }
    }

    let schema = DataSchema {
        features,
        additional_data,
    };

    // One consolidated warning for the whole pass, not one per column
    if schema.has_unknown_columns() {
        let message = format!(
            "Supported types for auto inference are {:?}. \
             Set the type manually in the schema for the unclassified columns. \
             DateTime columns are supported in iso format only.",
            ColumnType::values()
        );
        warn!(
            columns = ?schema.unknown_columns(),
            "some columns could not be classified automatically"
        );
        notes.push(ColumnNote {
            column: None,
            message,
        });
    }

    Ok(DatasetDescription { schema, notes })
}

fn unsupported_note(name: &str, dtype: &DataType) -> ColumnNote {
    ColumnNote {
        column: Some(name.to_string()),
        message: format!("Column {} is of unsupported dtype - {}", name, dtype),
    }
}
