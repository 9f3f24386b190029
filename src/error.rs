// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Validation errors raised when creating or updating annotations.

use std::fmt;
use thiserror::Error;

/// Which time field of a segment failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Start,
    End,
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeField::Start => f.write_str("startTime"),
            TimeField::End => f.write_str("endTime"),
        }
    }
}

/// A rejected create or update. The store is left untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Point timestamp is negative or not a number.
    #[error("timestamp should be a >=0 value, got {0}")]
    InvalidTimestamp(f64),

    /// Segment start is negative, or end is not strictly positive.
    #[error("{field} should be a positive value, got {value}")]
    NonPositiveTime { field: TimeField, value: f64 },

    /// Segment end does not come after its start.
    #[error("endTime ({end}) should be higher than startTime ({start})")]
    EndNotAfterStart { start: f64, end: f64 },

    /// Another entity in the same store already uses this id.
    #[error("id '{0}' is already in use")]
    DuplicateId(String),

    /// Declared bounds do not enclose the segment.
    #[error("segment [{start}, {end}] lies outside its bounds [{left:?}, {right:?}]")]
    OutOfBounds {
        start: f64,
        end: f64,
        left: Option<f64>,
        right: Option<f64>,
    },
}

impl ValidationError {
    pub(crate) fn non_positive(field: TimeField, value: f64) -> Self {
        Self::NonPositiveTime { field, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_field() {
        let err = ValidationError::non_positive(TimeField::End, 0.0);
        assert_eq!(err.to_string(), "endTime should be a positive value, got 0");

        let err = ValidationError::DuplicateId("segment0".to_string());
        assert_eq!(err.to_string(), "id 'segment0' is already in use");
    }
}
