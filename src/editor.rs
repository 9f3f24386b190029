// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor facade over the stage and both annotation stores.
//!
//! The editor routes pointer input to the right store, keeps annotations in
//! step with scrolling and zooming, and converts between the live stores and
//! a persisted [`AnnotationSet`].

use crate::config::MarkerConfig;
use crate::error::ValidationError;
use crate::markers::{HandleRef, MarkerEvent, PointStore, SegmentStore};
use crate::models::{AnnotationSet, EntityKey, Point, PointSpec, Segment, SegmentSpec};
use crate::waveform::{Stage, StaticZoom, View, ViewKind, ZoomAdapter};
use std::rc::Rc;

/// What the pointer is currently over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hover {
    Handle(HandleRef),
    Mark(EntityKey, ViewKind),
}

pub struct Editor {
    stage: Stage,
    segments: SegmentStore,
    points: PointStore,
    zoom_adapter: Box<dyn ZoomAdapter>,
    current_time: f64,
    hover: Option<Hover>,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("stage", &self.stage)
            .field("segments", &self.segments.len())
            .field("points", &self.points.len())
            .field("current_time", &self.current_time)
            .finish_non_exhaustive()
    }
}

/// Borrowed access to the segment store together with the stage it draws
/// into.
pub struct Segments<'a> {
    store: &'a mut SegmentStore,
    stage: &'a mut Stage,
}

impl Segments<'_> {
    pub fn create(&mut self, spec: SegmentSpec) -> Result<EntityKey, ValidationError> {
        self.store.create(self.stage, spec).map(Segment::key)
    }

    pub fn remove(&mut self, key: EntityKey) -> Option<usize> {
        self.store.remove(self.stage, key)
    }

    pub fn remove_all(&mut self) {
        self.store.remove_all(self.stage);
    }

    pub fn update_all(&mut self) {
        self.store.update_all(self.stage);
    }

    pub fn set_times(&mut self, key: EntityKey, start: f64, end: f64) -> Result<bool, ValidationError> {
        self.store.set_times(self.stage, key, start, end)
    }

    pub fn render(&mut self) {
        self.store.render(self.stage);
    }
}

/// Borrowed access to the point store together with the stage it draws
/// into.
pub struct Points<'a> {
    store: &'a mut PointStore,
    stage: &'a mut Stage,
}

impl Points<'_> {
    pub fn create(&mut self, spec: PointSpec) -> Result<EntityKey, ValidationError> {
        self.store.create(self.stage, spec).map(Point::key)
    }

    pub fn remove(&mut self, key: EntityKey) -> Option<usize> {
        self.store.remove(self.stage, key)
    }

    pub fn remove_all(&mut self) {
        self.store.remove_all(self.stage);
    }

    pub fn update_all(&mut self) {
        self.store.update_all(self.stage);
    }

    pub fn set_timestamp(&mut self, key: EntityKey, timestamp: f64) -> Result<bool, ValidationError> {
        self.store.set_timestamp(self.stage, key, timestamp)
    }

    pub fn render(&mut self) {
        self.store.render(self.stage);
    }
}

impl Editor {
    /// Build an editor over the two views. Both stores announce readiness
    /// immediately.
    pub fn new(config: MarkerConfig, overview: View, zoom: View) -> Self {
        let config = Rc::new(config);
        let mut stage = Stage::new(overview, zoom);
        let mut segments = SegmentStore::new(Rc::clone(&config), &mut stage);
        let mut points = PointStore::new(config, &mut stage);
        segments.init(&mut stage);
        points.init(&mut stage);

        Self {
            stage,
            segments,
            points,
            zoom_adapter: Box::new(StaticZoom),
            current_time: 0.0,
            hover: None,
        }
    }

    pub fn with_zoom_adapter(mut self, adapter: Box<dyn ZoomAdapter>) -> Self {
        self.zoom_adapter = adapter;
        self
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn segment_store(&self) -> &SegmentStore {
        &self.segments
    }

    pub fn point_store(&self) -> &PointStore {
        &self.points
    }

    pub fn segments(&mut self) -> Segments<'_> {
        Segments {
            store: &mut self.segments,
            stage: &mut self.stage,
        }
    }

    pub fn points(&mut self) -> Points<'_> {
        Points {
            store: &mut self.points,
            stage: &mut self.stage,
        }
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Set the playhead time used to anchor zoom changes.
    pub fn set_current_time(&mut self, seconds: f64) {
        self.current_time = seconds.max(0.0);
    }

    /// Time under view-local pixel `x`.
    pub fn time_at(&self, view: ViewKind, x: f64) -> f64 {
        let view = self.stage.view(view);
        view.offset_to_time(view.frame_offset() as f64 + x).max(0.0)
    }

    /// Redraw both layers in both views.
    pub fn render(&mut self) {
        self.segments.render(&mut self.stage);
        self.points.render(&mut self.stage);
    }

    fn update_all(&mut self) {
        self.segments.update_all(&mut self.stage);
        self.points.update_all(&mut self.stage);
    }

    /// Scroll the zoom view so that `frame_offset` is its leftmost pixel.
    pub fn scroll_to(&mut self, frame_offset: i64) {
        self.stage.view_mut(ViewKind::Zoom).set_frame_offset(frame_offset);
        self.update_all();
    }

    pub fn scroll_by(&mut self, pixels: i64) {
        let offset = self.stage.zoom().frame_offset();
        self.scroll_to(offset + pixels);
    }

    /// Change the zoom view's scale and let the zoom adapter reposition it.
    pub fn zoom_to(&mut self, samples_per_pixel: u32) {
        let zoom = self.stage.view_mut(ViewKind::Zoom);
        zoom.set_scale(samples_per_pixel);
        self.zoom_adapter.apply(zoom, self.current_time);
        log::debug!(
            "Zoomed to {} samples/px, frame offset {}",
            samples_per_pixel,
            self.stage.zoom().frame_offset()
        );
        self.update_all();
    }

    pub fn resize(&mut self, view: ViewKind, width: u32, height: u32) {
        let target = self.stage.view_mut(view);
        if target.width() == width.max(1) && target.height() == height {
            return;
        }
        target.resize(width, height);
        self.update_all();
    }

    fn handle_at(&self, view: ViewKind, x: f64, y: f64) -> Option<HandleRef> {
        self.points
            .handle_at(view, x, y)
            .or_else(|| self.segments.handle_at(view, x, y))
    }

    /// Press at `(x, y)`. Starts a drag when a draggable handle is hit.
    pub fn pointer_down(&mut self, view: ViewKind, x: f64, y: f64) -> Option<HandleRef> {
        let target = self.handle_at(view, x, y)?;
        let started = if target.is_point() {
            self.points.begin_drag(&mut self.stage, target, x)
        } else {
            self.segments.begin_drag(&mut self.stage, target, x)
        };
        started.then_some(target)
    }

    /// Pointer motion: drags the active handle, otherwise tracks hover.
    ///
    /// While dragging, motion reported by the other view is ignored.
    pub fn pointer_move(&mut self, view: ViewKind, x: f64, y: f64) {
        let dragged = self
            .points
            .drag_target()
            .or_else(|| self.segments.drag_target());
        match dragged {
            Some(target) if target.view != view => {}
            Some(target) if target.is_point() => {
                self.points.drag_to(&mut self.stage, x);
            }
            Some(_) => {
                self.segments.drag_to(&mut self.stage, x);
            }
            None => self.hover(view, x, y),
        }
    }

    /// Release the pointer, ending any drag.
    pub fn pointer_up(&mut self) -> Option<EntityKey> {
        self.points
            .end_drag(&mut self.stage)
            .or_else(|| self.segments.end_drag(&mut self.stage))
    }

    pub fn is_dragging(&self) -> bool {
        self.points.is_dragging() || self.segments.is_dragging()
    }

    pub fn double_click(&mut self, view: ViewKind, x: f64, y: f64) -> bool {
        match self.handle_at(view, x, y) {
            Some(target) if target.is_point() => self.points.double_click(&mut self.stage, target),
            Some(target) => self.segments.double_click(&mut self.stage, target),
            None => false,
        }
    }

    /// Track which handle or segment mark the pointer is over.
    pub fn hover(&mut self, view: ViewKind, x: f64, y: f64) {
        let next = self
            .handle_at(view, x, y)
            .map(Hover::Handle)
            .or_else(|| self.segments.mark_at(view, x).map(|key| Hover::Mark(key, view)));
        if next == self.hover {
            return;
        }
        if let Some(previous) = self.hover.take() {
            self.set_hover(previous, false);
        }
        if let Some(next) = next {
            self.set_hover(next, true);
        }
        self.hover = next;
    }

    /// Clear hover state when the pointer leaves a view.
    pub fn pointer_leave(&mut self) {
        if let Some(previous) = self.hover.take() {
            self.set_hover(previous, false);
        }
    }

    fn set_hover(&mut self, hover: Hover, hovered: bool) {
        match hover {
            Hover::Handle(target) if target.is_point() => {
                self.points.set_handle_hover(&mut self.stage, target, hovered)
            }
            Hover::Handle(target) => self.segments.set_handle_hover(&mut self.stage, target, hovered),
            Hover::Mark(key, view) => self.segments.set_mark_hover(&mut self.stage, key, view, hovered),
        }
    }

    pub fn drain_events(&mut self) -> Vec<MarkerEvent> {
        self.stage.drain_events()
    }

    /// Snapshot every annotation.
    pub fn export(&self, audio_file: Option<String>) -> AnnotationSet {
        AnnotationSet {
            audio_file,
            segments: self.segments.iter().cloned().collect(),
            points: self.points.iter().cloned().collect(),
        }
    }

    /// Replace every annotation with `set`.
    ///
    /// On a validation failure the previous annotations are restored and
    /// the error is returned.
    pub fn load(&mut self, set: &AnnotationSet) -> Result<(), ValidationError> {
        let previous = self.export(None);
        if let Err(err) = self.replace_all(set) {
            log::warn!("Rejected annotation set: {}", err);
            if let Err(restore) = self.replace_all(&previous) {
                log::error!("Failed to restore annotations: {}", restore);
            }
            return Err(err);
        }
        log::info!(
            "Loaded {} segments and {} points",
            self.segments.len(),
            self.points.len()
        );
        Ok(())
    }

    fn replace_all(&mut self, set: &AnnotationSet) -> Result<(), ValidationError> {
        self.hover = None;
        self.segments.remove_all(&mut self.stage);
        self.points.remove_all(&mut self.stage);
        for segment in &set.segments {
            self.segments.create(&mut self.stage, segment.to_spec())?;
        }
        for point in &set.points {
            self.points.create(&mut self.stage, point.to_spec())?;
        }
        self.render();
        Ok(())
    }
}
