// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Segment and point stores with their view proxies.
//!
//! Each store owns its entities and a [`Binder`](binder::Binder) mapping
//! every entity to one proxy per view. Projection keeps proxy geometry in
//! step with entity times and view state; the drag engine turns handle
//! movement back into times.

pub mod binder;
pub mod drag;
pub mod points;
pub mod projection;
pub mod render;
pub mod segments;

pub use binder::{Binder, ProxyPair, ViewProxy};
pub use drag::DragEngine;
pub use points::PointStore;
pub use segments::SegmentStore;

use crate::graphics::HandleRole;
use crate::models::EntityKey;
use crate::waveform::ViewKind;

/// Lifecycle and interaction notifications, queued on the stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerEvent {
    SegmentsReady,
    PointsReady,
    SegmentDblClick { id: String },
    SegmentDragEnd { id: String },
    PointDblClick { id: String },
    PointDragEnd { id: String },
}

/// Addresses one boundary handle: which entity, in which view, which edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleRef {
    pub key: EntityKey,
    pub view: ViewKind,
    pub role: HandleRole,
}

impl HandleRef {
    pub fn new(key: EntityKey, view: ViewKind, role: HandleRole) -> Self {
        Self { key, view, role }
    }

    /// Whether the handle belongs to a point rather than a segment.
    pub fn is_point(&self) -> bool {
        self.role == HandleRole::Point
    }
}

/// First `{prefix}{n}` id with `n >= from` that `taken` rejects, with the
/// counter value that follows it.
fn next_free_id(prefix: &str, from: usize, taken: impl Fn(&str) -> bool) -> (String, usize) {
    let mut index = from;
    loop {
        let id = format!("{}{}", prefix, index);
        if !taken(&id) {
            return (id, index + 1);
        }
        index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_free_id_skips_taken_ids() {
        let taken = ["point0", "point1", "point3"];
        let is_taken = |id: &str| taken.contains(&id);
        assert_eq!(next_free_id("point", 0, is_taken), ("point2".to_string(), 3));
        assert_eq!(next_free_id("point", 3, is_taken), ("point4".to_string(), 5));
        assert_eq!(next_free_id("segment", 0, is_taken), ("segment0".to_string(), 1));
    }
}
