// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Boundary drag engine.
//!
//! Dragging is horizontal only. The pointer's total movement since the drag
//! started gives a proposed handle position, a bound function clamps it so
//! that the handles never cross, and the clamped position is converted back
//! into a time.
//!
//! Time conversion always uses the grip's edge that sits on the boundary:
//! the right edge for start and point handles, the left edge for end
//! handles. An edge outside the view leaves the time unchanged.

use super::HandleRef;
use crate::graphics::Handle;
use crate::waveform::View;

/// Pointer tracking for one horizontal drag.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    /// Pointer x when the drag started.
    pub start_x: Option<f64>,
}

impl DragState {
    pub fn start(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Movement since the drag started.
    pub fn total_offset(&self, x: f64) -> Option<f64> {
        self.start_x.map(|start| x - start)
    }

    pub fn end(&mut self) {
        self.start_x = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.start_x.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveDrag {
    target: HandleRef,
    /// Handle x when the drag started.
    origin_x: f64,
    state: DragState,
}

/// At most one handle is dragged at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragEngine {
    active: Option<ActiveDrag>,
}

impl DragEngine {
    /// Start dragging `target`, whose grip currently sits at `handle_x`.
    pub fn begin(&mut self, target: HandleRef, pointer_x: f64, handle_x: f64) {
        let mut state = DragState::default();
        state.start(pointer_x);
        self.active = Some(ActiveDrag {
            target,
            origin_x: handle_x,
            state,
        });
    }

    /// The unclamped handle position for a pointer at `pointer_x`.
    pub fn proposed_x(&self, pointer_x: f64) -> Option<(HandleRef, f64)> {
        let active = self.active.as_ref()?;
        let offset = active.state.total_offset(pointer_x)?;
        Some((active.target, active.origin_x + offset))
    }

    /// Stop dragging, returning the handle that was dragged.
    pub fn end(&mut self) -> Option<HandleRef> {
        self.active.take().map(|active| active.target)
    }

    pub fn target(&self) -> Option<HandleRef> {
        self.active.map(|active| active.target)
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }
}

/// A start handle may not pass its end handle's line.
pub fn bound_start(proposed: f64, start: &Handle, end: &Handle) -> f64 {
    proposed.min(end.x - start.width)
}

/// An end handle may not pass its start handle's line.
pub fn bound_end(proposed: f64, start: &Handle, _end: &Handle) -> f64 {
    proposed.max(start.x + start.width)
}

/// A point handle stays inside the view.
pub fn bound_point(proposed: f64, view_width: f64) -> f64 {
    proposed.clamp(0.0, view_width.max(0.0))
}

/// Time at the right edge of the grip, if the grip is not off the left of
/// the view.
pub fn leading_edge_time(view: &View, handle: &Handle) -> Option<f64> {
    (handle.x >= 0.0)
        .then(|| view.offset_to_time(view.frame_offset() as f64 + handle.x + handle.width))
}

/// Time at the left edge of the grip, if the grip is not off the right of
/// the view.
pub fn trailing_edge_time(view: &View, handle: &Handle) -> Option<f64> {
    (handle.x <= view.width() as f64)
        .then(|| view.offset_to_time(view.frame_offset() as f64 + handle.x))
}

/// Clamp a dragged start time so that it stays non-negative, inside the left
/// bound and at least `resolution` before `end`.
pub fn clamp_start(candidate: f64, end: f64, left_bound: Option<f64>, resolution: f64) -> f64 {
    let start = candidate.min(end - resolution).max(0.0);
    match left_bound {
        Some(left) => start.max(left),
        None => start,
    }
}

/// Clamp a dragged end time so that it stays inside the right bound and at
/// least `resolution` after `start`.
pub fn clamp_end(candidate: f64, start: f64, right_bound: Option<f64>, resolution: f64) -> f64 {
    let end = candidate.max(start + resolution);
    match right_bound {
        Some(right) => end.min(right),
        None => end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::shapes::tests::handle;
    use crate::graphics::HandleRole;
    use crate::models::EntityKey;
    use crate::waveform::view::tests::test_stage;
    use crate::waveform::ViewKind;

    fn target() -> HandleRef {
        HandleRef::new(EntityKey::new(3), ViewKind::Zoom, HandleRole::In)
    }

    #[test]
    fn test_drag_state_tracks_total_movement() {
        let mut drag = DragState::default();
        assert_eq!(drag.total_offset(5.0), None);

        drag.start(10.0);
        assert!(drag.is_dragging());
        assert_eq!(drag.total_offset(15.0), Some(5.0));
        assert_eq!(drag.total_offset(12.0), Some(2.0));

        drag.end();
        assert_eq!(drag.total_offset(12.0), None);
    }

    #[test]
    fn test_engine_offsets_from_handle_origin() {
        let mut engine = DragEngine::default();
        assert_eq!(engine.proposed_x(10.0), None);

        engine.begin(target(), 100.0, 40.0);
        assert_eq!(engine.proposed_x(130.0), Some((target(), 70.0)));
        assert_eq!(engine.proposed_x(90.0), Some((target(), 30.0)));
        assert_eq!(engine.end(), Some(target()));
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_handles_cannot_cross() {
        let start = handle(HandleRole::In, 38.0);
        let end = handle(HandleRole::Out, 100.0);
        assert_eq!(bound_start(150.0, &start, &end), 88.0);
        assert_eq!(bound_start(20.0, &start, &end), 20.0);
        assert_eq!(bound_end(10.0, &start, &end), 50.0);
        assert_eq!(bound_point(-4.0, 500.0), 0.0);
        assert_eq!(bound_point(640.0, 500.0), 500.0);
    }

    #[test]
    fn test_edge_times_skip_offscreen_grips() {
        let mut stage = test_stage();
        stage.view_mut(ViewKind::Zoom).set_frame_offset(100);
        let zoom = stage.zoom();

        let start = handle(HandleRole::In, 38.0);
        assert_eq!(leading_edge_time(zoom, &start), Some(1.5));
        assert_eq!(leading_edge_time(zoom, &handle(HandleRole::In, -1.0)), None);

        let end = handle(HandleRole::Out, 200.0);
        assert_eq!(trailing_edge_time(zoom, &end), Some(3.0));
        assert_eq!(trailing_edge_time(zoom, &handle(HandleRole::Out, 501.0)), None);
    }

    #[test]
    fn test_clamped_times_stay_ordered() {
        assert_eq!(clamp_start(12.0, 10.0, None, 0.5), 9.5);
        assert_eq!(clamp_start(-3.0, 10.0, None, 0.5), 0.0);
        assert_eq!(clamp_start(1.0, 10.0, Some(2.0), 0.5), 2.0);

        assert_eq!(clamp_end(4.0, 5.0, None, 0.5), 5.5);
        assert_eq!(clamp_end(30.0, 5.0, Some(20.0), 0.5), 20.0);
    }
}
