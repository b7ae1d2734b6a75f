//! Data filters for querying monitored samples

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison and containment operators for numeric and categorical filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    GreaterThanEquals,
    GreaterThan,
    LessThanEquals,
    LessThan,
    Contains,
    Equals,
    NotEquals,
}

/// A single predicate over a named column.
///
/// The column can be a feature or an additional-data column. Constructed
/// transiently by query builders and serialized as
/// `{column, operator, value}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFilter {
    pub column: String,
    pub operator: Operator,
    pub value: Value,
}

impl DataFilter {
    pub fn new(column: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            operator,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operator_wire_tags() {
        assert_eq!(
            serde_json::to_string(&Operator::GreaterThanEquals).unwrap(),
            "\"greater_than_equals\""
        );
        assert_eq!(
            serde_json::to_string(&Operator::NotEquals).unwrap(),
            "\"not_equals\""
        );
        assert_eq!(
            serde_json::from_str::<Operator>("\"contains\"").unwrap(),
            Operator::Contains
        );
    }

    #[test]
    fn test_filter_round_trip() {
        let filter = DataFilter::new("feature1", Operator::GreaterThanEquals, 5);
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(
            json,
            json!({"column": "feature1", "operator": "greater_than_equals", "value": 5})
        );
        let decoded: DataFilter = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, filter);
    }
}
