// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation records: segments, points and the persisted annotation set.

pub mod point;
pub mod project;
pub mod segment;

pub use point::{Point, PointSpec};
pub use project::AnnotationSet;
pub use segment::{Segment, SegmentSpec};

/// Opaque identity of a stored entity.
///
/// Keys are unique within a store and never reused, so two entities with the
/// same caller-visible `id` are still told apart. Keys are not persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityKey(u64);

impl EntityKey {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}
