// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Point store.

use super::binder::{build_point_pair, Binder, ProxyPair};
use super::drag::{self, DragEngine};
use super::{next_free_id, projection, render, HandleRef, MarkerEvent};
use crate::config::MarkerConfig;
use crate::error::ValidationError;
use crate::graphics::{HandleRole, LayerKind};
use crate::models::point::validate_timestamp;
use crate::models::{EntityKey, Point, PointSpec};
use crate::waveform::{Stage, ViewKind};
use std::rc::Rc;

/// Owns every point and its view proxies.
#[derive(Debug)]
pub struct PointStore {
    config: Rc<MarkerConfig>,
    points: Vec<Point>,
    binder: Binder,
    drag: DragEngine,
    next_index: usize,
    next_key: u64,
    ready: bool,
}

impl PointStore {
    pub fn new(config: Rc<MarkerConfig>, stage: &mut Stage) -> Self {
        let binder = Binder::new(LayerKind::Points);
        for view in ViewKind::ALL {
            stage.view_mut(view).layer_mut(binder.layer());
        }
        Self {
            config,
            points: Vec::new(),
            binder,
            drag: DragEngine::default(),
            next_index: 0,
            next_key: 0,
            ready: false,
        }
    }

    pub fn init(&mut self, stage: &mut Stage) {
        if !self.ready {
            self.ready = true;
            stage.emit(MarkerEvent::PointsReady);
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    pub fn get(&self, key: EntityKey) -> Option<&Point> {
        self.points.iter().find(|p| p.key == key)
    }

    pub fn find(&self, id: &str) -> Option<&Point> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn proxies(&self, key: EntityKey) -> Option<&ProxyPair> {
        self.binder.get(key)
    }

    fn index_of(&self, key: EntityKey) -> Option<usize> {
        self.points.iter().position(|p| p.key == key)
    }

    /// Validate `spec`, then add the point with proxies in both views.
    pub fn create(&mut self, stage: &mut Stage, spec: PointSpec) -> Result<&Point, ValidationError> {
        spec.validate_time()?;
        let (id, next_index) = match spec.id {
            Some(id) if self.find(&id).is_some() => return Err(ValidationError::DuplicateId(id)),
            Some(id) => (id, self.next_index),
            None => next_free_id("point", self.next_index, |id| self.find(id).is_some()),
        };

        let key = EntityKey::new(self.next_key);
        self.next_key += 1;
        self.next_index = next_index;

        let point = Point {
            key,
            id,
            timestamp: spec.timestamp,
            editable: spec.editable.unwrap_or(self.config.editable_default),
            color: spec.color.unwrap_or_else(|| self.config.point_color.pick()),
        };

        let mut pair = build_point_pair(&self.config, &point, stage);
        projection::project_point(&point, &mut pair, stage, self.config.compact_time_labels);
        self.binder.attach(stage, key, pair);

        log::info!(
            "Added point {} at {:.2}s, total: {}",
            point.id,
            point.timestamp,
            self.points.len() + 1
        );
        self.points.push(point);
        Ok(&self.points[self.points.len() - 1])
    }

    pub fn remove(&mut self, stage: &mut Stage, key: EntityKey) -> Option<usize> {
        let index = self.index_of(key)?;
        let point = self.points.remove(index);
        self.binder.destroy(stage, key);
        for view in ViewKind::ALL {
            stage.view_mut(view).data_mut().remove_point(&point.id);
        }
        if self.drag.target().is_some_and(|t| t.key == key) {
            self.drag.end();
        }
        log::info!("Removed point {}, total: {}", point.id, self.points.len());
        Some(index)
    }

    pub fn remove_all(&mut self, stage: &mut Stage) {
        self.binder.clear(stage);
        for view in ViewKind::ALL {
            stage.view_mut(view).data_mut().clear_points();
        }
        self.drag.end();
        let removed = self.points.len();
        self.points.clear();
        log::info!("Removed all {} points", removed);
        self.render(stage);
    }

    pub fn update_all(&mut self, stage: &mut Stage) {
        let compact = self.config.compact_time_labels;
        for point in &self.points {
            if let Some(pair) = self.binder.get_mut(point.key) {
                projection::project_point(point, pair, stage, compact);
            }
        }
        self.render(stage);
    }

    /// Move a point programmatically. Returns `Ok(false)` when `key` is
    /// unknown.
    pub fn set_timestamp(
        &mut self,
        stage: &mut Stage,
        key: EntityKey,
        timestamp: f64,
    ) -> Result<bool, ValidationError> {
        validate_timestamp(timestamp)?;
        let Some(index) = self.index_of(key) else {
            return Ok(false);
        };
        let point = &mut self.points[index];
        point.timestamp = timestamp;
        if let Some(pair) = self.binder.get_mut(key) {
            projection::project_point(point, pair, stage, self.config.compact_time_labels);
        }
        Ok(true)
    }

    pub fn render(&self, stage: &mut Stage) {
        render::flush(stage, &self.binder);
    }

    pub fn handle_at(&self, view: ViewKind, x: f64, y: f64) -> Option<HandleRef> {
        self.points.iter().rev().find_map(|point| {
            let role = self.binder.group(point.key, view)?.handle_at(x, y)?;
            Some(HandleRef::new(point.key, view, role))
        })
    }

    pub fn begin_drag(&mut self, stage: &mut Stage, target: HandleRef, pointer_x: f64) -> bool {
        if !target.is_point() || !self.binder.grab(&mut self.drag, target, pointer_x) {
            return false;
        }
        self.render(stage);
        true
    }

    /// Move the dragged point handle, keeping it inside the view.
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
        let Some(handle) = pair.get_mut(target.view).group.handles.get_mut(HandleRole::Point) else {
            return false;
        };

        let view = stage.view(target.view);
        let view_width = view.width() as f64;
        handle.x = drag::bound_point(proposed, view_width);
        handle.place_label(view_width);

        let point = &mut self.points[index];
        if let Some(time) = drag::leading_edge_time(view, handle) {
            point.timestamp = time.max(0.0);
        }
        log::debug!("Dragging point {} to {:.3}s", point.id, point.timestamp);

        projection::project_point(point, pair, stage, self.config.compact_time_labels);
        self.render(stage);
        true
    }

    pub fn end_drag(&mut self, stage: &mut Stage) -> Option<EntityKey> {
        let (target, notify) = self.binder.release(&mut self.drag)?;
        if notify {
            if let Some(point) = self.get(target.key) {
                let id = point.id.clone();
                stage.emit(MarkerEvent::PointDragEnd { id });
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

    pub fn double_click(&mut self, stage: &mut Stage, target: HandleRef) -> bool {
        let notify = self.binder.forwards_dbl_click(target);
        let Some(point) = self.get(target.key).filter(|_| notify) else {
            return false;
        };
        let id = point.id.clone();
        stage.emit(MarkerEvent::PointDblClick { id });
        true
    }

    pub fn set_handle_hover(&mut self, stage: &mut Stage, target: HandleRef, hovered: bool) {
        let view_width = stage.view(target.view).width() as f64;
        if self.binder.set_hover(target, hovered, view_width) {
            self.render(stage);
        }
    }
}
