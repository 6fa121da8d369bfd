// Series response model and typed decoding into a chart-ready signal series
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Column holding the timestamp of each row
pub const TIME_COLUMN: usize = 0;
/// Column holding the observed signal level of each row
pub const VALUE_COLUMN: usize = 4;

/// One node of the series response: `{ name, columns, values }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesNode {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("response contains no series")]
    EmptyPayload,

    #[error("series '{name}' has {found} columns, no value column at index 4")]
    MissingValueColumn { name: String, found: usize },

    #[error("row {row} has {len} entries, expected at least 5")]
    ShortRow { row: usize, len: usize },

    #[error("row {row} holds a non-numeric value: {value}")]
    NonNumericValue { row: usize, value: Value },
}

/// Decoded signal series. A `None` value is a gap in the line.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSeries {
    pub title: String,
    pub series_name: String,
    pub categories: Vec<Value>,
    pub values: Vec<Option<f64>>,
}

impl SignalSeries {
    /// Decode the first node of a series response.
    pub fn decode(nodes: &[SeriesNode]) -> Result<Self, DecodeError> {
        let node = nodes.first().ok_or(DecodeError::EmptyPayload)?;

        let series_name = node
            .columns
            .get(VALUE_COLUMN)
            .cloned()
            .ok_or_else(|| DecodeError::MissingValueColumn {
                name: node.name.clone(),
                found: node.columns.len(),
            })?;

        let mut categories = Vec::with_capacity(node.values.len());
        let mut values = Vec::with_capacity(node.values.len());

        for (row, entries) in node.values.iter().enumerate() {
            if entries.len() <= VALUE_COLUMN {
                return Err(DecodeError::ShortRow {
                    row,
                    len: entries.len(),
                });
            }

            let value = match &entries[VALUE_COLUMN] {
                Value::Null => None,
                v => Some(v.as_f64().ok_or_else(|| DecodeError::NonNumericValue {
                    row,
                    value: v.clone(),
                })?),
            };

            categories.push(entries[TIME_COLUMN].clone());
            values.push(value);
        }

        Ok(Self {
            title: node.name.clone(),
            series_name,
            categories,
            values,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
