// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Time to pixel projection of entities onto their proxies.
//!
//! Projection binds the entity's offsets into each view's data provider,
//! then places the handles, label text and mark. The overview always shows
//! every proxy. The zoom view hides proxies its data provider reports as
//! outside the frame window and clips the rest to the window.

use super::binder::ProxyPair;
use crate::graphics::{Group, HandleRole};
use crate::models::{Point, Segment};
use crate::util::nice_time;
use crate::waveform::{Stage, ViewKind};

/// Keep a point handle's line inside a view `width` pixels wide.
///
/// Offsets left of pixel 1 snap to 1; offsets within two pixels of the
/// right edge move one pixel left.
pub fn edge_clamp(offset: f64, width: f64) -> f64 {
    if offset < 1.0 {
        1.0
    } else if offset >= width - 2.0 {
        offset - 1.0
    } else {
        offset
    }
}

/// Clip `[start, end]` to the frame window `[frame_start, frame_end]`.
pub fn clip_to_window(start: f64, end: f64, frame_start: f64, frame_end: f64) -> (f64, f64) {
    (start.max(frame_start), end.min(frame_end))
}

fn place_segment(group: &mut Group, start: f64, end: f64, start_text: &str, end_text: &str) {
    if let Some(handle) = group.handles.get_mut(HandleRole::In) {
        handle.visible = true;
        handle.x = start - handle.width;
        handle.label.text = start_text.to_string();
    }
    if let Some(handle) = group.handles.get_mut(HandleRole::Out) {
        handle.visible = true;
        handle.x = end;
        handle.label.text = end_text.to_string();
    }
    if let Some(mark) = &mut group.mark {
        mark.x = start;
        mark.width = (end - start).max(0.0);
    }
}

fn place_point(group: &mut Group, offset: f64, view_width: f64, text: &str) {
    if let Some(handle) = group.handles.get_mut(HandleRole::Point) {
        handle.visible = true;
        handle.x = edge_clamp(offset, view_width) - handle.width;
        handle.label.text = text.to_string();
    }
}

/// Project `segment` into both of its proxies.
pub fn project_segment(segment: &Segment, pair: &mut ProxyPair, stage: &mut Stage, compact: bool) {
    for kind in ViewKind::ALL {
        let view = stage.view_mut(kind);
        let start = view.time_to_offset(segment.start_time);
        let end = view.time_to_offset(segment.end_time);
        view.data_mut().set_segment(&segment.id, start, end);
    }

    let start_text = nice_time(segment.start_time, compact);
    let end_text = nice_time(segment.end_time, compact);

    let overview = stage.overview();
    pair.overview.group.visible = true;
    place_segment(
        &mut pair.overview.group,
        overview.time_to_offset(segment.start_time),
        overview.time_to_offset(segment.end_time),
        &start_text,
        &end_text,
    );

    let zoom = stage.zoom();
    let group = &mut pair.zoom.group;
    if !zoom.data().segment_visible(&segment.id) {
        group.visible = false;
        return;
    }
    let (frame_start, frame_end) = zoom.visible_range();
    let (start, end) = clip_to_window(
        zoom.time_to_offset(segment.start_time),
        zoom.time_to_offset(segment.end_time),
        frame_start,
        frame_end,
    );
    group.visible = true;
    place_segment(
        group,
        start - frame_start,
        end - frame_start,
        &start_text,
        &end_text,
    );
}

/// Project `point` into both of its proxies.
pub fn project_point(point: &Point, pair: &mut ProxyPair, stage: &mut Stage, compact: bool) {
    for kind in ViewKind::ALL {
        let view = stage.view_mut(kind);
        let offset = view.time_to_offset(point.timestamp);
        view.data_mut().set_point(&point.id, offset);
    }

    let text = nice_time(point.timestamp, compact);

    let overview = stage.overview();
    pair.overview.group.visible = true;
    place_point(
        &mut pair.overview.group,
        overview.time_to_offset(point.timestamp),
        overview.width() as f64,
        &text,
    );

    let zoom = stage.zoom();
    let group = &mut pair.zoom.group;
    if !zoom.data().point_visible(&point.id) {
        group.visible = false;
        return;
    }
    let (frame_start, _) = zoom.visible_range();
    group.visible = true;
    place_point(
        group,
        zoom.time_to_offset(point.timestamp) - frame_start,
        zoom.width() as f64,
        &text,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarkerConfig;
    use crate::markers::binder::{build_point_pair, build_segment_pair};
    use crate::models::EntityKey;
    use crate::waveform::view::tests::test_stage;

    fn segment(start_time: f64, end_time: f64) -> Segment {
        Segment {
            key: EntityKey::new(0),
            id: "segment0".to_string(),
            start_time,
            end_time,
            editable: true,
            color: "#00ff00".to_string(),
            label_text: String::new(),
            left_bound: None,
            right_bound: None,
        }
    }

    fn point(timestamp: f64) -> Point {
        Point {
            key: EntityKey::new(0),
            id: "point0".to_string(),
            timestamp,
            editable: true,
            color: "#ff0000".to_string(),
        }
    }

    #[test]
    fn test_edge_clamp() {
        assert_eq!(edge_clamp(0.0, 500.0), 1.0);
        assert_eq!(edge_clamp(0.5, 500.0), 1.0);
        assert_eq!(edge_clamp(250.0, 500.0), 250.0);
        assert_eq!(edge_clamp(498.0, 500.0), 497.0);
    }

    #[test]
    fn test_clip_to_window() {
        assert_eq!(clip_to_window(50.0, 700.0, 100.0, 600.0), (100.0, 600.0));
        assert_eq!(clip_to_window(150.0, 200.0, 100.0, 600.0), (150.0, 200.0));
    }

    #[test]
    fn test_overview_segment_geometry() {
        let config = MarkerConfig::default();
        let mut stage = test_stage();
        let seg = segment(5.0, 10.0);
        let mut pair = build_segment_pair(&config, &seg, &stage);
        project_segment(&seg, &mut pair, &mut stage, false);

        let group = &pair.overview.group;
        let start = group.handles.get(HandleRole::In).unwrap();
        let end = group.handles.get(HandleRole::Out).unwrap();
        assert_eq!(start.x, 50.0 - start.width);
        assert_eq!(start.line_x(), 50.0);
        assert_eq!(end.x, 100.0);
        assert_eq!(start.label.text, "00:05.00");
        assert_eq!(end.label.text, "00:10.00");

        let mark = group.mark.as_ref().unwrap();
        assert_eq!((mark.x, mark.width), (50.0, 50.0));
    }

    #[test]
    fn test_zoom_segment_is_clipped_to_frame() {
        let config = MarkerConfig::default();
        let mut stage = test_stage();
        stage.view_mut(ViewKind::Zoom).set_frame_offset(600);
        let seg = segment(5.0, 10.0);
        let mut pair = build_segment_pair(&config, &seg, &stage);
        project_segment(&seg, &mut pair, &mut stage, false);

        let group = &pair.zoom.group;
        assert!(group.visible);
        let start = group.handles.get(HandleRole::In).unwrap();
        let end = group.handles.get(HandleRole::Out).unwrap();
        assert_eq!(start.line_x(), 0.0);
        assert_eq!(end.x, 400.0);
    }

    #[test]
    fn test_zoom_hides_segment_outside_window() {
        let config = MarkerConfig::default();
        let mut stage = test_stage();
        let zoom = stage.view_mut(ViewKind::Zoom);
        zoom.resize(50, 200);
        zoom.set_frame_offset(100);
        assert_eq!(zoom.visible_range(), (100.0, 150.0));

        let seg = segment(5.0, 10.0);
        let mut pair = build_segment_pair(&config, &seg, &stage);
        project_segment(&seg, &mut pair, &mut stage, false);

        assert!(!pair.zoom.group.visible);
        assert!(pair.overview.group.visible);
    }

    #[test]
    fn test_point_clamped_at_view_edges() {
        let config = MarkerConfig::default();
        let mut stage = test_stage();
        let p = point(0.0);
        let mut pair = build_point_pair(&config, &p, &stage);
        project_point(&p, &mut pair, &mut stage, true);

        let handle = pair.overview.group.handles.get(HandleRole::Point).unwrap();
        assert_eq!(handle.line_x(), 1.0);
        assert_eq!(handle.label.text, "00:00");

        let handle = pair.zoom.group.handles.get(HandleRole::Point).unwrap();
        assert_eq!(handle.line_x(), 1.0);
    }

    #[test]
    fn test_point_outside_zoom_window_is_hidden() {
        let config = MarkerConfig::default();
        let mut stage = test_stage();
        let p = point(20.0);
        let mut pair = build_point_pair(&config, &p, &stage);
        project_point(&p, &mut pair, &mut stage, false);
        assert!(!pair.zoom.group.visible);

        stage.view_mut(ViewKind::Zoom).set_frame_offset(1800);
        project_point(&p, &mut pair, &mut stage, false);
        assert!(pair.zoom.group.visible);
        let handle = pair.zoom.group.handles.get(HandleRole::Point).unwrap();
        assert_eq!(handle.line_x(), 200.0);
    }
}
