//! Column type inference
//!
//! Classifies a single column of sample data into a semantic type using an
//! ordered rule list. The rules are applied against the column's concrete
//! value kind after missing entries are dropped, so a column stored behind
//! an opaque dtype still classifies by what its values actually are.

use polars::prelude::*;

use super::config::InferenceConfig;
use super::ColumnType;

/// Infer the semantic type of a column from its values.
///
/// Returns `None` when no rule matches; the caller records the column as
/// unclassified and leaves the choice to the user. Rule order matters:
/// boolean, integer (categorical / bigint / integer), numeric, categorical
/// encoding, string (categorical / text), datetime.
pub fn infer_column_type(series: &Series, config: &InferenceConfig) -> Option<ColumnType> {
    // Re-derive the concrete value kind with missing entries removed, so an
    // all-null column or a nullable column is judged by its actual values.
    let values = series.drop_nulls();
    if values.is_empty() {
        return None;
    }

    match values.dtype() {
        DataType::Boolean => Some(ColumnType::Boolean),
        dt if is_integer_dtype(dt) => {
            if is_low_cardinality(&values, config) {
                Some(ColumnType::Categorical)
            } else if exceeds_magnitude(&values, config.bigint_threshold) {
                Some(ColumnType::Bigint)
            } else {
                Some(ColumnType::Integer)
            }
        }
        DataType::Float32 | DataType::Float64 => Some(ColumnType::Numeric),
        DataType::Categorical(_, _) | DataType::Enum(_, _) => Some(ColumnType::Categorical),
        DataType::String => {
            if is_low_cardinality(&values, config) {
                Some(ColumnType::Categorical)
            } else {
                Some(ColumnType::Text)
            }
        }
        DataType::Date | DataType::Datetime(_, _) => Some(ColumnType::Datetime),
        _ => None,
    }
}

fn is_integer_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Distinct-value count is small relative to the non-missing row count
fn is_low_cardinality(values: &Series, config: &InferenceConfig) -> bool {
    let total = values.len();
    if total == 0 {
        return false;
    }
    let unique = match values.n_unique() {
        Ok(unique) => unique,
        Err(_) => return false,
    };
    unique <= config.max_unique_categories
        && (unique as f64) / (total as f64) < config.max_category_ratio
}

/// Any value with absolute magnitude at or above the threshold
fn exceeds_magnitude(values: &Series, threshold: u64) -> bool {
    match values.dtype() {
        DataType::UInt64 => values
            .u64()
            .map(|ca| ca.into_no_null_iter().any(|v| v >= threshold))
            .unwrap_or(false),
        _ => match values.cast(&DataType::Int64) {
            Ok(casted) => casted
                .i64()
                .map(|ca| ca.into_no_null_iter().any(|v| v.unsigned_abs() >= threshold))
                .unwrap_or(false),
            Err(_) => false,
        },
    }
}
