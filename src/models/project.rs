// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Persisted annotation state.
//!
//! This is the save/load shape of an editing session: the plain segment and
//! point records, without any of their view proxies.

use super::{point::Point, segment::Segment};
use serde::{Deserialize, Serialize};

/// Complete annotation data for serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_file: Option<String>,
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub points: Vec<Point>,
}

impl AnnotationSet {
    pub fn new(audio_file: Option<String>) -> Self {
        Self {
            audio_file,
            segments: Vec::new(),
            points: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.points.is_empty()
    }
}
