// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Point data structures. A point is a segment of zero length.

use super::EntityKey;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Caller-supplied description of a point to create.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PointSpec {
    pub id: Option<String>,
    pub timestamp: f64,
    pub editable: Option<bool>,
    pub color: Option<String>,
}

impl PointSpec {
    pub fn new(timestamp: f64) -> Self {
        Self {
            timestamp,
            ..Default::default()
        }
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = Some(editable);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub(crate) fn validate_time(&self) -> Result<(), ValidationError> {
        validate_timestamp(self.timestamp)
    }
}

pub(crate) fn validate_timestamp(timestamp: f64) -> Result<(), ValidationError> {
    if timestamp >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidTimestamp(timestamp))
    }
}

/// A single instant annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    #[serde(skip)]
    pub(crate) key: EntityKey,
    pub id: String,
    pub timestamp: f64,
    pub editable: bool,
    pub color: String,
}

impl Point {
    pub fn key(&self) -> EntityKey {
        self.key
    }

    pub fn to_spec(&self) -> PointSpec {
        PointSpec {
            id: Some(self.id.clone()),
            timestamp: self.timestamp,
            editable: Some(self.editable),
            color: Some(self.color.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_and_nan_timestamps_rejected() {
        assert_eq!(
            PointSpec::new(-1.0).validate_time(),
            Err(ValidationError::InvalidTimestamp(-1.0))
        );
        assert!(PointSpec::new(f64::NAN).validate_time().is_err());
        assert!(PointSpec::new(0.0).validate_time().is_ok());
    }
}
