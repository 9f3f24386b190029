// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Factories for boundary handles and segment labels.
//!
//! The stores never build handle shapes themselves. They describe the handle
//! they need with a [`HandleSpec`] and let the configured [`MarkerFactory`]
//! decide its geometry and colors.

use super::shapes::{Handle, HandleHooks, HandleRole, TextLabel};
use crate::models::{EntityKey, Segment};
use crate::waveform::ViewKind;

/// Everything a factory needs to know to build one handle.
#[derive(Debug, Clone, Copy)]
pub struct HandleSpec<'a> {
    pub draggable: bool,
    /// Owning proxy: the entity and the view its group lives in.
    pub owner: EntityKey,
    pub view: ViewKind,
    pub view_height: f64,
    /// Color of the owning entity.
    pub color: &'a str,
    pub hooks: HandleHooks,
}

pub trait MarkerFactory {
    /// Build a segment start (`In`) or end (`Out`) handle.
    fn segment_handle(&self, role: HandleRole, spec: &HandleSpec<'_>) -> Handle;

    fn point_handle(&self, spec: &HandleSpec<'_>) -> Handle;
}

pub trait LabelFactory {
    fn segment_label(&self, segment: &Segment, view: ViewKind) -> TextLabel;
}

const HANDLE_WIDTH: f64 = 12.0;
const HANDLE_HEIGHT: f64 = 20.0;
const HANDLE_FONT_SIZE: f32 = 10.0;

/// Grip-and-line handles. Colors fall back to the entity's color.
#[derive(Debug, Clone, Default)]
pub struct DefaultMarkers {
    pub in_color: Option<String>,
    pub out_color: Option<String>,
    pub point_color: Option<String>,
}

impl DefaultMarkers {
    fn build(&self, role: HandleRole, color: &str, label_gap: f64, spec: &HandleSpec<'_>) -> Handle {
        let label = TextLabel::new(
            "",
            label_gap,
            spec.view_height / 2.0 - 5.0,
            HANDLE_FONT_SIZE,
        );
        Handle {
            role,
            x: 0.0,
            width: HANDLE_WIDTH,
            grip_height: HANDLE_HEIGHT,
            line_height: spec.view_height,
            color: color.to_string(),
            draggable: spec.draggable,
            visible: true,
            hooks: spec.hooks,
            label,
            label_gap,
            hovered: false,
            dragging: false,
        }
    }
}

impl MarkerFactory for DefaultMarkers {
    fn segment_handle(&self, role: HandleRole, spec: &HandleSpec<'_>) -> Handle {
        let color = match role {
            HandleRole::Out => self.out_color.as_deref(),
            _ => self.in_color.as_deref(),
        }
        .unwrap_or(spec.color);
        self.build(role, color, 16.0, spec)
    }

    fn point_handle(&self, spec: &HandleSpec<'_>) -> Handle {
        let color = self.point_color.as_deref().unwrap_or(spec.color);
        self.build(HandleRole::Point, color, HANDLE_WIDTH, spec)
    }
}

/// Label text drawn near the top-left of the segment's mark.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLabels;

impl LabelFactory for DefaultLabels {
    fn segment_label(&self, segment: &Segment, _view: ViewKind) -> TextLabel {
        TextLabel::new(segment.label_text.clone(), 12.0, 12.0, 12.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(color: &str) -> HandleSpec<'_> {
        HandleSpec {
            draggable: true,
            owner: EntityKey::new(0),
            view: ViewKind::Zoom,
            view_height: 200.0,
            color,
            hooks: HandleHooks::default(),
        }
    }

    #[test]
    fn test_colors_fall_back_to_entity() {
        let markers = DefaultMarkers {
            out_color: Some("#ff0000".to_string()),
            ..Default::default()
        };
        let start = markers.segment_handle(HandleRole::In, &spec("#00ff00"));
        let end = markers.segment_handle(HandleRole::Out, &spec("#00ff00"));
        assert_eq!(start.color, "#00ff00");
        assert_eq!(end.color, "#ff0000");
        assert_eq!(start.line_height, 200.0);
        assert!(!start.label.visible);
    }

    #[test]
    fn test_point_handle_geometry() {
        let handle = DefaultMarkers::default().point_handle(&spec("#123456"));
        assert_eq!(handle.role, HandleRole::Point);
        assert_eq!(handle.width, 12.0);
        assert_eq!(handle.label.y, 95.0);
    }
}
