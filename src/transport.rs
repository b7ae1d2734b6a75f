//! HTTP response checking and wire-value encoding
//!
//! The crate does not own an HTTP client; callers hand in the pieces of a
//! response they already have and get back a structured error when the
//! status is not what they expected.

use polars::prelude::AnyValue;
use serde_json::Value;

use crate::error::{Result, TabwatchError};

/// Expected HTTP status for [`ensure_status`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedStatus {
    Exact(u16),
    /// Inclusive range
    Range(u16, u16),
}

impl Default for ExpectedStatus {
    fn default() -> Self {
        ExpectedStatus::Range(200, 299)
    }
}

impl ExpectedStatus {
    fn matches(&self, status: u16) -> bool {
        match *self {
            ExpectedStatus::Exact(expected) => status == expected,
            ExpectedStatus::Range(low, high) => (low..=high).contains(&status),
        }
    }
}

/// Borrowed view of an HTTP response
#[derive(Debug, Clone)]
pub struct ResponseParts<'a> {
    pub status: u16,
    pub url: &'a str,
    pub body: &'a [u8],
}

/// Verify a response status, failing with a diagnostic error on mismatch.
///
/// The error message is selected by status class: 4xx is reported as a
/// client error, 5xx as a server internal error with a support notice, and
/// anything else generically. When the body parses as JSON it is included
/// pretty-printed. A caller-supplied message may use the `{status}`,
/// `{url}`, `{body}`, and `{error}` placeholders.
pub fn ensure_status(
    response: &ResponseParts<'_>,
    expected: ExpectedStatus,
    msg: Option<&str>,
) -> Result<()> {
    if expected.matches(response.status) {
        return Ok(());
    }

    let status = response.status;
    let url = response.url;
    let body = pretty_json_body(response.body).unwrap_or_default();

    let error = match status {
        400..=499 => format!("{status} Client Error: for url: {url}.\nBody:\n{body}"),
        500..=599 => format!(
            "{status} Server Internal Error: for url: {url}.\n\
             Please reach the support team for more information about this problem.\n\
             Body:\n{body}"
        ),
        _ => format!("Error: {status} url {url}.\nBody:\n{body}"),
    };

    let message = match msg {
        Some(template) => template
            .replace("{status}", &status.to_string())
            .replace("{url}", url)
            .replace("{body}", &body)
            .replace("{error}", &error),
        None => error,
    };

    Err(TabwatchError::Transport(message))
}

fn pretty_json_body(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    serde_json::to_string_pretty(&value).ok()
}

/// Encode a single sample value for the wire payload.
///
/// Nulls and non-finite floats become JSON null, lists recurse, and any
/// value without a native JSON form falls back to its display string.
pub fn encode_value(value: &AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(v) => Value::Bool(*v),
        AnyValue::String(v) => Value::String((*v).to_string()),
        AnyValue::StringOwned(v) => Value::String(v.to_string()),
        AnyValue::Int8(v) => Value::from(*v),
        AnyValue::Int16(v) => Value::from(*v),
        AnyValue::Int32(v) => Value::from(*v),
        AnyValue::Int64(v) => Value::from(*v),
        AnyValue::UInt8(v) => Value::from(*v),
        AnyValue::UInt16(v) => Value::from(*v),
        AnyValue::UInt32(v) => Value::from(*v),
        AnyValue::UInt64(v) => Value::from(*v),
        AnyValue::Float32(v) => encode_float(f64::from(*v)),
        AnyValue::Float64(v) => encode_float(*v),
        AnyValue::List(series) => {
            Value::Array(series.iter().map(|item| encode_value(&item)).collect())
        }
        other => Value::String(other.to_string()),
    }
}

fn encode_float(value: f64) -> Value {
    if value.is_finite() {
        Value::from(value)
    } else {
        Value::Null
    }
}
