//! Tabwatch - schema inference for tabular ML monitoring
//!
//! Derives a `{column_name -> semantic_type}` schema from a tabular data
//! sample and validates user-supplied schemas against it, for upload to a
//! model monitoring service.
//!
//! # Modules
//!
//! - [`schema`] - Semantic type vocabulary, column classifier, dataset
//!   schema builder, and schema validation
//! - [`filters`] - Data filter predicates for querying monitored samples
//! - [`format`] - Timestamp, label, and frequency normalization
//! - [`transport`] - HTTP response checking and wire-value encoding
//! - [`error`] - Crate error types

pub mod error;
pub mod filters;
pub mod format;
pub mod schema;
pub mod transport;

pub use error::{Result, TabwatchError};
pub use filters::{DataFilter, Operator};
pub use format::{
    format_label, normalize_frequency, parse_timestamp, Frequency, FrequencyValue, Label,
    TimestampValue,
};
pub use schema::{
    describe_dataset, describe_dataset_with_config, infer_column_type,
    validate_additional_data_schema, ColumnNote, ColumnType, DataSchema, DatasetDescription,
    InferenceConfig, ReservedColumn, TabularDataset, TaskType,
};
pub use transport::{encode_value, ensure_status, ExpectedStatus, ResponseParts};
