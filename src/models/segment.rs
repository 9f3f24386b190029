// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Segment data structures.
//!
//! A segment marks a time interval of the audio. Callers describe a new
//! segment with a [`SegmentSpec`]; the store validates it and hands back the
//! finalized [`Segment`].

use super::EntityKey;
use crate::error::{TimeField, ValidationError};
use serde::{Deserialize, Serialize};

/// Caller-supplied description of a segment to create.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SegmentSpec {
    pub id: Option<String>,
    pub start_time: f64,
    pub end_time: f64,
    pub editable: Option<bool>,
    pub color: Option<String>,
    pub label_text: Option<String>,
    pub left_bound: Option<f64>,
    pub right_bound: Option<f64>,
}

impl SegmentSpec {
    /// A spec spanning `start_time..end_time` with everything else defaulted.
    pub fn new(start_time: f64, end_time: f64) -> Self {
        Self {
            start_time,
            end_time,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = Some(editable);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label_text = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_bounds(mut self, left: Option<f64>, right: Option<f64>) -> Self {
        self.left_bound = left;
        self.right_bound = right;
        self
    }

    /// Check the time constraints, independent of any store state.
    ///
    /// Comparisons are written so that NaN fails every check.
    pub(crate) fn validate_times(&self) -> Result<(), ValidationError> {
        validate_span(self.start_time, self.end_time)?;
        validate_bounds(self.start_time, self.end_time, self.left_bound, self.right_bound)
    }
}

pub(crate) fn validate_span(start: f64, end: f64) -> Result<(), ValidationError> {
    if !(start >= 0.0) {
        return Err(ValidationError::non_positive(TimeField::Start, start));
    }
    if !(end > 0.0) {
        return Err(ValidationError::non_positive(TimeField::End, end));
    }
    if !(end > start) {
        return Err(ValidationError::EndNotAfterStart { start, end });
    }
    Ok(())
}

pub(crate) fn validate_bounds(
    start: f64,
    end: f64,
    left: Option<f64>,
    right: Option<f64>,
) -> Result<(), ValidationError> {
    let left_ok = left.map_or(true, |l| start >= l);
    let right_ok = right.map_or(true, |r| end <= r);
    if left_ok && right_ok {
        Ok(())
    } else {
        Err(ValidationError::OutOfBounds {
            start,
            end,
            left,
            right,
        })
    }
}

/// A time interval annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    #[serde(skip)]
    pub(crate) key: EntityKey,
    pub id: String,
    pub start_time: f64,
    pub end_time: f64,
    pub editable: bool,
    pub color: String,
    pub label_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_bound: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_bound: Option<f64>,
}

impl Segment {
    /// Identity of this segment inside its store.
    pub fn key(&self) -> EntityKey {
        self.key
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Spec that recreates this segment, id included.
    pub fn to_spec(&self) -> SegmentSpec {
        SegmentSpec {
            id: Some(self.id.clone()),
            start_time: self.start_time,
            end_time: self.end_time,
            editable: Some(self.editable),
            color: Some(self.color.clone()),
            label_text: Some(self.label_text.clone()),
            left_bound: self.left_bound,
            right_bound: self.right_bound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_span_distinguishes_failures() {
        assert_eq!(
            SegmentSpec::new(-1.0, 4.0).validate_times(),
            Err(ValidationError::non_positive(TimeField::Start, -1.0))
        );
        assert_eq!(
            SegmentSpec::new(0.0, 0.0).validate_times(),
            Err(ValidationError::non_positive(TimeField::End, 0.0))
        );
        assert_eq!(
            SegmentSpec::new(9.0, 8.0).validate_times(),
            Err(ValidationError::EndNotAfterStart { start: 9.0, end: 8.0 })
        );
        assert!(SegmentSpec::new(0.0, 0.5).validate_times().is_ok());
    }

    #[test]
    fn test_nan_start_is_rejected() {
        let result = SegmentSpec::new(f64::NAN, 3.0).validate_times();
        assert!(matches!(
            result,
            Err(ValidationError::NonPositiveTime {
                field: TimeField::Start,
                ..
            })
        ));
    }

    #[test]
    fn test_bounds_must_enclose_segment() {
        let spec = SegmentSpec::new(2.0, 6.0).with_bounds(Some(3.0), None);
        assert!(matches!(
            spec.validate_times(),
            Err(ValidationError::OutOfBounds { .. })
        ));

        let spec = SegmentSpec::new(2.0, 6.0).with_bounds(Some(1.0), Some(6.0));
        assert!(spec.validate_times().is_ok());
    }

    #[test]
    fn test_spec_deserializes_camel_case_with_defaults() {
        let spec: SegmentSpec =
            serde_json::from_str(r#"{"startTime": 1.5, "endTime": 2.5, "labelText": "intro"}"#)
                .unwrap();
        assert_eq!(spec.start_time, 1.5);
        assert_eq!(spec.end_time, 2.5);
        assert_eq!(spec.label_text.as_deref(), Some("intro"));
        assert_eq!(spec.editable, None);
    }
}
