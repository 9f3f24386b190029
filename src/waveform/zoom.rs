// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Zoom transition strategies.
//!
//! When the zoom level changes, an adapter decides how the zoom view's frame
//! offset moves. Annotations are re-projected by the caller afterwards.

use super::view::{View, ViewKind};

/// Pluggable behaviour for repositioning the zoom view after a scale change.
pub trait ZoomAdapter {
    /// Reposition `view` so that `current_time` stays in sight.
    fn apply(&self, view: &mut View, current_time: f64);
}

/// Jump straight to the new position with no animation.
///
/// The current time is centred when possible; near the end of the file the
/// view is pinned to the last frame, near the start to the first.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticZoom;

impl ZoomAdapter for StaticZoom {
    fn apply(&self, view: &mut View, current_time: f64) {
        if view.kind() != ViewKind::Zoom {
            return;
        }

        let last_frame = view.data().offset_length();
        let target_frame = view.time_to_offset(current_time);
        let half_width = view.width() as f64 / 2.0;

        let left = target_frame - half_width;
        let right = target_frame + half_width;

        let frame_offset = if left >= 0.0 && right <= last_frame {
            left.trunc() as i64
        } else if right > last_frame {
            // frame offsets are zero-based
            (last_frame - 1.0 - view.width() as f64) as i64
        } else {
            0
        };

        log::debug!(
            "Static zoom to {:.2}s: target frame {}, frame offset {}",
            current_time,
            target_frame,
            frame_offset
        );
        view.set_frame_offset(frame_offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waveform::view::tests::test_stage;

    #[test]
    fn test_centres_current_time() {
        let mut stage = test_stage();
        let zoom = stage.view_mut(ViewKind::Zoom);
        StaticZoom.apply(zoom, 20.0);
        // 20 s at 100 px/s = 2000; half of the 500 px width is 250
        assert_eq!(zoom.frame_offset(), 1750);
    }

    #[test]
    fn test_pins_to_start_and_end() {
        let mut stage = test_stage();
        let zoom = stage.view_mut(ViewKind::Zoom);

        StaticZoom.apply(zoom, 1.0);
        assert_eq!(zoom.frame_offset(), 0);

        StaticZoom.apply(zoom, 99.0);
        assert_eq!(zoom.frame_offset(), 10_000 - 1 - 500);
    }
}
