// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Segment store.

use super::binder::{build_segment_pair, Binder, ProxyPair};
use super::drag::{self, DragEngine};
use super::{next_free_id, projection, render, HandleRef, MarkerEvent};
use crate::config::MarkerConfig;
use crate::error::ValidationError;
use crate::graphics::{HandleRole, Handles, LayerKind};
use crate::models::segment::{validate_bounds, validate_span};
use crate::models::{EntityKey, Segment, SegmentSpec};
use crate::waveform::{Stage, ViewKind};
use std::rc::Rc;

/// Owns every segment and its view proxies.
///
/// Creating, removing and updating segments never draws; call
/// [`render`](Self::render) once after a batch. Dragging a handle redraws
/// on every step.
#[derive(Debug)]
pub struct SegmentStore {
    config: Rc<MarkerConfig>,
    segments: Vec<Segment>,
    binder: Binder,
    drag: DragEngine,
    /// Next candidate for automatic `segmentN` ids.
    next_index: usize,
    next_key: u64,
    ready: bool,
}

impl SegmentStore {
    /// Create an empty store and register its layer with both views.
    pub fn new(config: Rc<MarkerConfig>, stage: &mut Stage) -> Self {
        let binder = Binder::new(LayerKind::Segments);
        for view in ViewKind::ALL {
            stage.view_mut(view).layer_mut(binder.layer());
        }
        Self {
            config,
            segments: Vec::new(),
            binder,
            drag: DragEngine::default(),
            next_index: 0,
            next_key: 0,
            ready: false,
        }
    }

    /// Announce that the store is ready. Only the first call emits.
    pub fn init(&mut self, stage: &mut Stage) {
        if !self.ready {
            self.ready = true;
            stage.emit(MarkerEvent::SegmentsReady);
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn get(&self, key: EntityKey) -> Option<&Segment> {
        self.segments.iter().find(|s| s.key == key)
    }

    pub fn find(&self, id: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }

    pub fn proxies(&self, key: EntityKey) -> Option<&ProxyPair> {
        self.binder.get(key)
    }

    fn index_of(&self, key: EntityKey) -> Option<usize> {
        self.segments.iter().position(|s| s.key == key)
    }

    /// Validate `spec`, then add the segment with proxies in both views.
    ///
    /// Nothing changes when validation fails.
    pub fn create(&mut self, stage: &mut Stage, spec: SegmentSpec) -> Result<&Segment, ValidationError> {
        spec.validate_times()?;
        let (id, next_index) = match spec.id {
            Some(id) if self.find(&id).is_some() => return Err(ValidationError::DuplicateId(id)),
            Some(id) => (id, self.next_index),
            None => next_free_id("segment", self.next_index, |id| self.find(id).is_some()),
        };

        let key = EntityKey::new(self.next_key);
        self.next_key += 1;
        self.next_index = next_index;

        let segment = Segment {
            key,
            id,
            start_time: spec.start_time,
            end_time: spec.end_time,
            editable: spec.editable.unwrap_or(self.config.editable_default),
            color: spec.color.unwrap_or_else(|| self.config.segment_color.pick()),
            label_text: spec.label_text.unwrap_or_default(),
            left_bound: spec.left_bound,
            right_bound: spec.right_bound,
        };

        let mut pair = build_segment_pair(&self.config, &segment, stage);
        projection::project_segment(&segment, &mut pair, stage, self.config.compact_time_labels);
        self.binder.attach(stage, key, pair);

        log::info!(
            "Added segment {} [{:.2}s, {:.2}s], total: {}",
            segment.id,
            segment.start_time,
            segment.end_time,
            self.segments.len() + 1
        );
        self.segments.push(segment);
        Ok(&self.segments[self.segments.len() - 1])
    }

    /// Remove one segment, returning the index it held.
    pub fn remove(&mut self, stage: &mut Stage, key: EntityKey) -> Option<usize> {
        let index = self.index_of(key)?;
        let segment = self.segments.remove(index);
        self.binder.destroy(stage, key);
        for view in ViewKind::ALL {
            stage.view_mut(view).data_mut().remove_segment(&segment.id);
        }
        if self.drag.target().is_some_and(|t| t.key == key) {
            self.drag.end();
        }
        log::info!("Removed segment {}, total: {}", segment.id, self.segments.len());
        Some(index)
    }

    /// Remove every segment and draw once.
    pub fn remove_all(&mut self, stage: &mut Stage) {
        self.binder.clear(stage);
        for view in ViewKind::ALL {
            stage.view_mut(view).data_mut().clear_segments();
        }
        self.drag.end();
        let removed = self.segments.len();
        self.segments.clear();
        log::info!("Removed all {} segments", removed);
        self.render(stage);
    }

    /// Re-project every segment against the current view state, then draw
    /// once.
    pub fn update_all(&mut self, stage: &mut Stage) {
        let compact = self.config.compact_time_labels;
        for segment in &self.segments {
            if let Some(pair) = self.binder.get_mut(segment.key) {
                projection::project_segment(segment, pair, stage, compact);
            }
        }
        self.render(stage);
    }

    /// Move a segment programmatically. Returns `Ok(false)` when `key` is
    /// unknown.
    pub fn set_times(
        &mut self,
        stage: &mut Stage,
        key: EntityKey,
        start_time: f64,
        end_time: f64,
    ) -> Result<bool, ValidationError> {
        let Some(index) = self.index_of(key) else {
            return Ok(false);
        };
        let segment = &mut self.segments[index];
        validate_span(start_time, end_time)?;
        validate_bounds(start_time, end_time, segment.left_bound, segment.right_bound)?;
        segment.start_time = start_time;
        segment.end_time = end_time;

        if let Some(pair) = self.binder.get_mut(key) {
            projection::project_segment(segment, pair, stage, self.config.compact_time_labels);
        }
        Ok(true)
    }

    pub fn render(&self, stage: &mut Stage) {
        render::flush(stage, &self.binder);
    }

    /// Topmost draggable handle under `(x, y)` in `view`.
    pub fn handle_at(&self, view: ViewKind, x: f64, y: f64) -> Option<HandleRef> {
        self.segments.iter().rev().find_map(|segment| {
            let role = self.binder.group(segment.key, view)?.handle_at(x, y)?;
            Some(HandleRef::new(segment.key, view, role))
        })
    }

    /// Topmost visible segment whose mark covers `x` in `view`.
    pub fn mark_at(&self, view: ViewKind, x: f64) -> Option<EntityKey> {
        self.segments.iter().rev().map(|s| s.key).find(|&key| {
            self.binder
                .group(key, view)
                .filter(|group| group.visible)
                .and_then(|group| group.mark.as_ref())
                .is_some_and(|mark| mark.hit(x))
        })
    }

    /// Start dragging `target` from pointer position `pointer_x`.
    pub fn begin_drag(&mut self, stage: &mut Stage, target: HandleRef, pointer_x: f64) -> bool {
        if target.is_point() || !self.binder.grab(&mut self.drag, target, pointer_x) {
            return false;
        }
        self.render(stage);
        true
    }

    /// Move the dragged handle to follow the pointer and update the dragged
    /// side's time.
    pub fn drag_to(&mut self, stage: &mut Stage, pointer_x: f64) -> bool {
        let Some((target, proposed)) = self.drag.proposed_x(pointer_x) else {
            return false;
        };
        let Some(index) = self.index_of(target.key) else {
            return false;
        };
        let Some(pair) = self.binder.get_mut(target.key) else {
            return false;
        };
        let Handles::Boundaries { start, end } = &mut pair.get_mut(target.view).group.handles else {
            return false;
        };

        let view = stage.view(target.view);
        let view_width = view.width() as f64;
        let resolution = view.pixel_duration();
        let segment = &mut self.segments[index];

        match target.role {
            HandleRole::In => {
                let x = drag::bound_start(proposed, start, end);
                start.x = x;
                start.place_label(view_width);
                if let Some(time) = drag::leading_edge_time(view, start) {
                    segment.start_time =
                        drag::clamp_start(time, segment.end_time, segment.left_bound, resolution);
                }
            }
            HandleRole::Out => {
                let x = drag::bound_end(proposed, start, end);
                end.x = x;
                end.place_label(view_width);
                if let Some(time) = drag::trailing_edge_time(view, end) {
                    segment.end_time =
                        drag::clamp_end(time, segment.start_time, segment.right_bound, resolution);
                }
            }
            HandleRole::Point => return false,
        }
        log::debug!(
            "Dragging segment {} to [{:.3}s, {:.3}s]",
            segment.id,
            segment.start_time,
            segment.end_time
        );

        projection::project_segment(segment, pair, stage, self.config.compact_time_labels);
        self.render(stage);
        true
    }

    /// Finish the current drag, emitting a drag-end notification when the
    /// handle forwards them.
    pub fn end_drag(&mut self, stage: &mut Stage) -> Option<EntityKey> {
        let (target, notify) = self.binder.release(&mut self.drag)?;
        if notify {
            if let Some(segment) = self.get(target.key) {
                let id = segment.id.clone();
                stage.emit(MarkerEvent::SegmentDragEnd { id });
            }
        }
        self.render(stage);
        Some(target.key)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// The handle being dragged, if any.
    pub fn drag_target(&self) -> Option<HandleRef> {
        self.drag.target()
    }

    /// Forward a double click on `target`. Returns whether a notification
    /// was emitted.
    pub fn double_click(&mut self, stage: &mut Stage, target: HandleRef) -> bool {
        let notify = self.binder.forwards_dbl_click(target);
        let Some(segment) = self.get(target.key).filter(|_| notify) else {
            return false;
        };
        let id = segment.id.clone();
        stage.emit(MarkerEvent::SegmentDblClick { id });
        true
    }

    /// Show or hide a handle's time label as the pointer enters or leaves.
    pub fn set_handle_hover(&mut self, stage: &mut Stage, target: HandleRef, hovered: bool) {
        let view_width = stage.view(target.view).width() as f64;
        if self.binder.set_hover(target, hovered, view_width) {
            self.render(stage);
        }
    }

    /// Show or hide a segment's text label as the pointer enters or leaves
    /// its mark.
    pub fn set_mark_hover(&mut self, stage: &mut Stage, key: EntityKey, view: ViewKind, hovered: bool) {
        let Some(group) = self.binder.group_mut(key, view) else {
            return;
        };
        let Some(mark) = group.mark.as_mut().filter(|mark| mark.hovered != hovered) else {
            return;
        };
        mark.hovered = hovered;
        if let Some(label) = &mut group.label {
            label.visible = hovered;
        }
        self.render(stage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarkerOptions;
    use crate::error::TimeField;
    use crate::markers::render::draw_count;
    use crate::waveform::view::tests::test_stage;

    fn store(stage: &mut Stage) -> SegmentStore {
        SegmentStore::new(Rc::new(MarkerConfig::default()), stage)
    }

    fn in_handle(key: EntityKey, view: ViewKind) -> HandleRef {
        HandleRef::new(key, view, HandleRole::In)
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut stage = test_stage();
        let mut segments = store(&mut stage);

        let first = segments
            .create(&mut stage, SegmentSpec::new(5.0, 10.0).editable(true))
            .unwrap();
        assert_eq!(first.id, "segment0");
        assert!(first.editable);

        let second = segments.create(&mut stage, SegmentSpec::new(1.0, 2.0)).unwrap();
        assert_eq!(second.id, "segment1");
        assert!(!second.editable);
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_invalid_create_leaves_store_unchanged() {
        let mut stage = test_stage();
        let mut segments = store(&mut stage);
        segments.create(&mut stage, SegmentSpec::new(5.0, 10.0)).unwrap();

        let err = segments.create(&mut stage, SegmentSpec::new(9.0, 8.0)).unwrap_err();
        assert_eq!(err, ValidationError::EndNotAfterStart { start: 9.0, end: 8.0 });
        assert_eq!(
            segments.create(&mut stage, SegmentSpec::new(-1.0, 8.0)).unwrap_err(),
            ValidationError::non_positive(TimeField::Start, -1.0)
        );
        assert_eq!(segments.len(), 1);
        assert_eq!(stage.zoom().layer(LayerKind::Segments).unwrap().len(), 1);

        let next = segments.create(&mut stage, SegmentSpec::new(1.0, 2.0)).unwrap();
        assert_eq!(next.id, "segment1");
    }

    #[test]
    fn test_duplicate_and_skipped_ids() {
        let mut stage = test_stage();
        let mut segments = store(&mut stage);
        segments
            .create(&mut stage, SegmentSpec::new(1.0, 2.0).with_id("segment0"))
            .unwrap();

        let err = segments
            .create(&mut stage, SegmentSpec::new(3.0, 4.0).with_id("segment0"))
            .unwrap_err();
        assert_eq!(err, ValidationError::DuplicateId("segment0".to_string()));

        let auto = segments.create(&mut stage, SegmentSpec::new(3.0, 4.0)).unwrap();
        assert_eq!(auto.id, "segment1");
    }

    #[test]
    fn test_create_does_not_draw() {
        let mut stage = test_stage();
        let mut segments = store(&mut stage);
        segments.create(&mut stage, SegmentSpec::new(1.0, 2.0)).unwrap();
        assert_eq!(draw_count(&stage, &segments.binder), 0);

        segments.render(&mut stage);
        assert_eq!(draw_count(&stage, &segments.binder), 2);
    }

    #[test]
    fn test_remove_returns_index() {
        let mut stage = test_stage();
        let mut segments = store(&mut stage);
        let keys: Vec<EntityKey> = (0..3)
            .map(|i| {
                let start = i as f64;
                segments
                    .create(&mut stage, SegmentSpec::new(start, start + 0.5))
                    .unwrap()
                    .key()
            })
            .collect();

        assert_eq!(segments.remove(&mut stage, keys[1]), Some(1));
        assert_eq!(segments.remove(&mut stage, keys[1]), None);
        let ids: Vec<&str> = segments.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["segment0", "segment2"]);
        assert!(segments.proxies(keys[1]).is_none());
        assert!(!stage.overview().data().segment_visible("segment1"));
    }

    #[test]
    fn test_remove_all_draws_once_per_view() {
        let mut stage = test_stage();
        let mut segments = store(&mut stage);
        for i in 0..3 {
            let start = i as f64 * 2.0;
            segments
                .create(&mut stage, SegmentSpec::new(start, start + 1.0))
                .unwrap();
        }

        segments.remove_all(&mut stage);

        assert!(segments.is_empty());
        for view in ViewKind::ALL {
            let layer = stage.view(view).layer(LayerKind::Segments).unwrap();
            assert!(layer.is_empty());
            assert_eq!(layer.draw_calls(), 1);
            assert!(layer.display_list().is_empty());
        }
    }

    #[test]
    fn test_update_all_is_idempotent() {
        let mut stage = test_stage();
        let mut segments = store(&mut stage);
        let key = segments
            .create(&mut stage, SegmentSpec::new(5.0, 10.0).editable(true))
            .unwrap()
            .key();

        segments.update_all(&mut stage);
        let first = segments.proxies(key).unwrap().clone();
        let display = stage.zoom().layer(LayerKind::Segments).unwrap().display_list().to_vec();

        segments.update_all(&mut stage);
        assert_eq!(segments.proxies(key).unwrap(), &first);
        assert_eq!(
            stage.zoom().layer(LayerKind::Segments).unwrap().display_list(),
            display.as_slice()
        );
    }

    #[test]
    fn test_scrolled_zoom_hides_segment() {
        let mut stage = test_stage();
        let mut segments = store(&mut stage);
        let key = segments
            .create(&mut stage, SegmentSpec::new(1.0, 2.0).editable(true))
            .unwrap()
            .key();
        assert!(segments.proxies(key).unwrap().zoom.group.visible);

        stage.view_mut(ViewKind::Zoom).set_frame_offset(1000);
        segments.update_all(&mut stage);
        assert!(!segments.proxies(key).unwrap().zoom.group.visible);
        assert!(segments.proxies(key).unwrap().overview.group.visible);
    }

    #[test]
    fn test_set_times_validates_against_bounds() {
        let mut stage = test_stage();
        let mut segments = store(&mut stage);
        let key = segments
            .create(
                &mut stage,
                SegmentSpec::new(2.0, 3.0).with_bounds(Some(1.0), Some(4.0)),
            )
            .unwrap()
            .key();

        assert!(segments.set_times(&mut stage, key, 1.5, 3.5).unwrap());
        assert!(segments.set_times(&mut stage, key, 0.5, 3.5).is_err());
        assert_eq!(segments.get(key).unwrap().start_time, 1.5);

        let mark = segments.proxies(key).unwrap().overview.group.mark.clone().unwrap();
        assert_eq!((mark.x, mark.width), (15.0, 20.0));
    }

    #[test]
    fn test_dragging_start_past_end_keeps_order() {
        let mut stage = test_stage();
        let mut segments = store(&mut stage);
        let key = segments
            .create(&mut stage, SegmentSpec::new(1.0, 2.0).editable(true))
            .unwrap()
            .key();
        let target = in_handle(key, ViewKind::Zoom);

        // Start line at 100 px, grip spans 88..100.
        assert_eq!(segments.handle_at(ViewKind::Zoom, 94.0, 100.0), Some(target));
        assert!(segments.begin_drag(&mut stage, target, 94.0));
        assert!(segments.drag_to(&mut stage, 400.0));
        assert!(segments.end_drag(&mut stage).is_some());

        let segment = segments.get(key).unwrap();
        assert!(segment.start_time < segment.end_time);
        assert_eq!(segment.end_time, 2.0);
        assert_eq!(
            stage.drain_events().last(),
            Some(&MarkerEvent::SegmentDragEnd {
                id: "segment0".to_string()
            })
        );
    }

    #[test]
    fn test_dragging_end_updates_only_end() {
        let mut stage = test_stage();
        let mut segments = store(&mut stage);
        let key = segments
            .create(&mut stage, SegmentSpec::new(1.0, 2.0).editable(true))
            .unwrap()
            .key();
        let target = HandleRef::new(key, ViewKind::Zoom, HandleRole::Out);

        assert!(segments.begin_drag(&mut stage, target, 205.0));
        assert!(segments.drag_to(&mut stage, 305.0));
        let segment = segments.get(key).unwrap();
        assert_eq!(segment.start_time, 1.0);
        assert_eq!(segment.end_time, 3.0);

        // Dragging left past the start stops one pixel after it.
        assert!(segments.drag_to(&mut stage, 0.0));
        let segment = segments.get(key).unwrap();
        assert!(segment.end_time > segment.start_time);
        assert_eq!(segment.start_time, 1.0);
    }

    #[test]
    fn test_overview_drag_uses_overview_resolution() {
        let mut stage = test_stage();
        let mut segments = store(&mut stage);
        let key = segments
            .create(&mut stage, SegmentSpec::new(5.0, 10.0).editable(true))
            .unwrap()
            .key();
        let target = in_handle(key, ViewKind::Overview);

        // Overview is 10 px/s: start line at 50 px, grip 38..50.
        assert!(segments.begin_drag(&mut stage, target, 44.0));
        assert!(segments.drag_to(&mut stage, 64.0));
        assert_eq!(segments.get(key).unwrap().start_time, 7.0);

        // Past the end handle the start stops one overview pixel short.
        assert!(segments.drag_to(&mut stage, 400.0));
        let resolution = stage.overview().pixel_duration();
        assert_eq!(resolution, 0.1);
        let segment = segments.get(key).unwrap();
        assert_eq!(segment.start_time, 10.0 - resolution);
        assert_eq!(segment.end_time, 10.0);
        assert_eq!(segments.end_drag(&mut stage), Some(key));
    }

    #[test]
    fn test_drag_in_scrolled_zoom_view() {
        let mut stage = test_stage();
        stage.view_mut(ViewKind::Zoom).set_frame_offset(100);
        let mut segments = store(&mut stage);
        let key = segments
            .create(&mut stage, SegmentSpec::new(2.0, 3.0).editable(true))
            .unwrap()
            .key();
        let target = HandleRef::new(key, ViewKind::Zoom, HandleRole::Out);
        assert_eq!(segments.binder.handle(target).unwrap().x, 200.0);

        assert!(segments.begin_drag(&mut stage, target, 205.0));
        assert!(segments.drag_to(&mut stage, 255.0));

        let segment = segments.get(key).unwrap();
        assert_eq!(segment.start_time, 2.0);
        assert_eq!(segment.end_time, 3.5);
        assert_eq!(segments.binder.handle(target).unwrap().x, 250.0);
    }

    #[test]
    fn test_drag_respects_right_bound() {
        let mut stage = test_stage();
        let mut segments = store(&mut stage);
        let key = segments
            .create(
                &mut stage,
                SegmentSpec::new(1.0, 2.0).editable(true).with_bounds(None, Some(2.5)),
            )
            .unwrap()
            .key();
        let target = HandleRef::new(key, ViewKind::Zoom, HandleRole::Out);

        assert!(segments.begin_drag(&mut stage, target, 200.0));
        assert!(segments.drag_to(&mut stage, 450.0));
        assert_eq!(segments.get(key).unwrap().end_time, 2.5);
    }

    #[test]
    fn test_uneditable_segments_cannot_be_dragged() {
        let mut stage = test_stage();
        let mut segments = store(&mut stage);
        let key = segments
            .create(&mut stage, SegmentSpec::new(5.0, 10.0))
            .unwrap()
            .key();

        // Overview lines are drawn but not draggable; the zoom view has none.
        let proxies = segments.proxies(key).unwrap();
        assert!(!proxies.overview.group.handles.is_empty());
        assert!(proxies.zoom.group.handles.is_empty());
        assert_eq!(segments.handle_at(ViewKind::Overview, 50.0, 50.0), None);

        let target = HandleRef::new(key, ViewKind::Overview, HandleRole::In);
        assert!(!segments.begin_drag(&mut stage, target, 50.0));
        assert!(!segments.drag_to(&mut stage, 80.0));
    }

    #[test]
    fn test_double_click_and_hover() {
        let mut stage = test_stage();
        let options = MarkerOptions {
            notify_dbl_click: true,
            ..Default::default()
        };
        let mut segments = SegmentStore::new(Rc::new(options.into()), &mut stage);
        segments.init(&mut stage);
        segments.init(&mut stage);
        let key = segments
            .create(&mut stage, SegmentSpec::new(1.0, 2.0).editable(true).with_label("intro"))
            .unwrap()
            .key();
        let target = in_handle(key, ViewKind::Zoom);

        assert!(segments.double_click(&mut stage, target));
        assert_eq!(
            stage.drain_events(),
            vec![
                MarkerEvent::SegmentsReady,
                MarkerEvent::SegmentDblClick {
                    id: "segment0".to_string()
                }
            ]
        );

        segments.set_handle_hover(&mut stage, target, true);
        let handle = segments.binder.handle(target).unwrap();
        assert!(handle.label.visible);

        assert_eq!(segments.mark_at(ViewKind::Zoom, 150.0), Some(key));
        segments.set_mark_hover(&mut stage, key, ViewKind::Zoom, true);
        let group = &segments.proxies(key).unwrap().zoom.group;
        assert!(group.label.as_ref().unwrap().visible);
    }
}
