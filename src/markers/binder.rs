// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! View proxy construction and ownership.
//!
//! Entities hold no graphics state. The binder owns the map from entity key
//! to the pair of proxies (zoom and overview), and keeps each view's layer
//! membership in step with that map.

use super::{DragEngine, HandleRef};
use crate::config::MarkerConfig;
use crate::graphics::{
    Group, Handle, HandleHooks, HandleRole, HandleSpec, Handles, LayerKind, WaveformMark,
};
use crate::models::{EntityKey, Point, Segment};
use crate::waveform::{Stage, View, ViewKind};
use indexmap::IndexMap;

/// An entity's shapes in one view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewProxy {
    pub view: ViewKind,
    pub group: Group,
}

/// The two proxies of one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyPair {
    pub zoom: ViewProxy,
    pub overview: ViewProxy,
}

impl ProxyPair {
    pub fn get(&self, view: ViewKind) -> &ViewProxy {
        match view {
            ViewKind::Zoom => &self.zoom,
            ViewKind::Overview => &self.overview,
        }
    }

    pub fn get_mut(&mut self, view: ViewKind) -> &mut ViewProxy {
        match view {
            ViewKind::Zoom => &mut self.zoom,
            ViewKind::Overview => &mut self.overview,
        }
    }
}

#[derive(Debug)]
pub struct Binder {
    layer: LayerKind,
    proxies: IndexMap<EntityKey, ProxyPair>,
}

impl Binder {
    pub fn new(layer: LayerKind) -> Self {
        Self {
            layer,
            proxies: IndexMap::new(),
        }
    }

    pub fn layer(&self) -> LayerKind {
        self.layer
    }

    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    pub fn get(&self, key: EntityKey) -> Option<&ProxyPair> {
        self.proxies.get(&key)
    }

    pub fn get_mut(&mut self, key: EntityKey) -> Option<&mut ProxyPair> {
        self.proxies.get_mut(&key)
    }

    pub fn group(&self, key: EntityKey, view: ViewKind) -> Option<&Group> {
        self.proxies.get(&key).map(|pair| &pair.get(view).group)
    }

    pub fn group_mut(&mut self, key: EntityKey, view: ViewKind) -> Option<&mut Group> {
        self.proxies.get_mut(&key).map(|pair| &mut pair.get_mut(view).group)
    }

    pub fn handle(&self, target: HandleRef) -> Option<&Handle> {
        self.group(target.key, target.view)?.handles.get(target.role)
    }

    pub fn handle_mut(&mut self, target: HandleRef) -> Option<&mut Handle> {
        self.group_mut(target.key, target.view)?
            .handles
            .get_mut(target.role)
    }

    /// Start dragging `target` if it exists and is draggable.
    pub fn grab(&mut self, drag: &mut DragEngine, target: HandleRef, pointer_x: f64) -> bool {
        let Some(handle) = self.handle_mut(target) else {
            return false;
        };
        if !handle.draggable {
            return false;
        }
        handle.dragging = true;
        handle.refresh_label();
        drag.begin(target, pointer_x, handle.x);
        true
    }

    /// Finish the current drag. Also reports whether the handle forwards
    /// drag-end notifications.
    pub fn release(&mut self, drag: &mut DragEngine) -> Option<(HandleRef, bool)> {
        let target = drag.end()?;
        let notify = match self.handle_mut(target) {
            Some(handle) => {
                handle.dragging = false;
                handle.refresh_label();
                handle.hooks.drag_end
            }
            None => false,
        };
        Some((target, notify))
    }

    pub fn forwards_dbl_click(&self, target: HandleRef) -> bool {
        self.handle(target).is_some_and(|handle| handle.hooks.dbl_click)
    }

    /// Toggle a draggable handle's hover state. Returns whether it changed.
    pub fn set_hover(&mut self, target: HandleRef, hovered: bool, view_width: f64) -> bool {
        let Some(handle) = self.handle_mut(target) else {
            return false;
        };
        if !handle.draggable || handle.hovered == hovered {
            return false;
        }
        handle.hovered = hovered;
        if hovered {
            handle.place_label(view_width);
        }
        handle.refresh_label();
        true
    }

    /// Take ownership of `pair` and attach both proxies to their views.
    pub fn attach(&mut self, stage: &mut Stage, key: EntityKey, pair: ProxyPair) {
        for view in ViewKind::ALL {
            stage.view_mut(view).layer_mut(self.layer).add(key);
        }
        self.proxies.insert(key, pair);
    }

    /// Detach and drop both proxies of `key`.
    pub fn destroy(&mut self, stage: &mut Stage, key: EntityKey) -> Option<ProxyPair> {
        for view in ViewKind::ALL {
            stage.view_mut(view).layer_mut(self.layer).remove(key);
        }
        self.proxies.shift_remove(&key)
    }

    /// Drop every proxy, clearing each view's layer in one step.
    pub fn clear(&mut self, stage: &mut Stage) {
        for view in ViewKind::ALL {
            stage.view_mut(view).layer_mut(self.layer).remove_children();
        }
        self.proxies.clear();
    }
}

/// Handles are built only for editable entities, or where the view is
/// configured to show lines for non-editable ones.
fn wants_handles(config: &MarkerConfig, editable: bool, view: ViewKind) -> bool {
    editable || config.shows_lines_in(view)
}

fn handle_spec<'a>(
    config: &MarkerConfig,
    key: EntityKey,
    editable: bool,
    color: &'a str,
    view: &View,
) -> HandleSpec<'a> {
    HandleSpec {
        draggable: editable,
        owner: key,
        view: view.kind(),
        view_height: view.height() as f64,
        color,
        hooks: if editable {
            config.hooks
        } else {
            HandleHooks::default()
        },
    }
}

fn segment_proxy(config: &MarkerConfig, segment: &Segment, view: &View) -> ViewProxy {
    let handles = if wants_handles(config, segment.editable, view.kind()) {
        let spec = handle_spec(config, segment.key, segment.editable, &segment.color, view);
        Handles::Boundaries {
            start: config.marker_factory.segment_handle(HandleRole::In, &spec),
            end: config.marker_factory.segment_handle(HandleRole::Out, &spec),
        }
    } else {
        Handles::Empty
    };
    let label = config.label_factory.segment_label(segment, view.kind());
    ViewProxy {
        view: view.kind(),
        group: Group::new(
            handles,
            Some(label),
            Some(WaveformMark::new(segment.color.clone())),
        ),
    }
}

fn point_proxy(config: &MarkerConfig, point: &Point, view: &View) -> ViewProxy {
    let handles = if wants_handles(config, point.editable, view.kind()) {
        let spec = handle_spec(config, point.key, point.editable, &point.color, view);
        Handles::Marker(config.marker_factory.point_handle(&spec))
    } else {
        Handles::Empty
    };
    ViewProxy {
        view: view.kind(),
        group: Group::new(handles, None, None),
    }
}

pub(crate) fn build_segment_pair(config: &MarkerConfig, segment: &Segment, stage: &Stage) -> ProxyPair {
    ProxyPair {
        zoom: segment_proxy(config, segment, stage.zoom()),
        overview: segment_proxy(config, segment, stage.overview()),
    }
}

pub(crate) fn build_point_pair(config: &MarkerConfig, point: &Point, stage: &Stage) -> ProxyPair {
    ProxyPair {
        zoom: point_proxy(config, point, stage.zoom()),
        overview: point_proxy(config, point, stage.overview()),
    }
}
