// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Handle, label and mark shapes that make up a view proxy.
//!
//! All x coordinates are local to the view: pixel 0 is the left edge of the
//! visible window.

use super::layer::Primitive;

/// Which boundary a handle controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleRole {
    /// Segment start.
    In,
    /// Segment end.
    Out,
    /// Point position.
    Point,
}

/// Notifications a handle forwards besides dragging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandleHooks {
    pub dbl_click: bool,
    pub drag_end: bool,
}

/// A text node.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f32,
    pub visible: bool,
}

impl TextLabel {
    pub fn new(text: impl Into<String>, x: f64, y: f64, font_size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size,
            visible: false,
        }
    }

    /// Rough rendered width; good enough to flip the label to the other
    /// side of a handle.
    pub fn approx_width(&self) -> f64 {
        self.text.chars().count() as f64 * self.font_size as f64 * 0.6
    }
}

/// A boundary handle: a vertical line across the view plus, when draggable,
/// a grip rectangle.
///
/// `x` is the left edge of the grip. The grip sits outside the boundary it
/// marks, so the line runs along its right edge for start and point handles
/// and along its left edge for end handles.
#[derive(Debug, Clone, PartialEq)]
pub struct Handle {
    pub role: HandleRole,
    pub x: f64,
    pub width: f64,
    pub grip_height: f64,
    pub line_height: f64,
    pub color: String,
    pub draggable: bool,
    pub visible: bool,
    pub hooks: HandleHooks,
    pub label: TextLabel,
    /// Horizontal distance between the line and the time label.
    pub label_gap: f64,
    pub hovered: bool,
    pub dragging: bool,
}

impl Handle {
    pub fn line_x(&self) -> f64 {
        match self.role {
            HandleRole::Out => self.x,
            HandleRole::In | HandleRole::Point => self.x + self.width,
        }
    }

    pub fn grip_top(&self) -> f64 {
        self.line_height / 2.0 - self.grip_height / 2.0 - 0.5
    }

    /// Whether `(x, y)` grabs this handle. The line is given a few pixels
    /// of slack so thin handles can still be picked.
    pub fn hit(&self, x: f64, y: f64) -> bool {
        if !self.visible || !self.draggable {
            return false;
        }
        let top = self.grip_top();
        let on_grip = x >= self.x
            && x <= self.x + self.width
            && y >= top
            && y <= top + self.grip_height;
        let on_line = (x - self.line_x()).abs() <= 3.0 && y >= 0.0 && y <= self.line_height;
        on_grip || on_line
    }

    /// Put the time label on the side of the handle facing the middle of
    /// the view.
    pub fn place_label(&mut self, view_width: f64) {
        if self.x > view_width / 2.0 {
            self.label.x = -self.label_gap - self.label.approx_width();
        } else {
            self.label.x = self.label_gap;
        }
    }

    /// The time label shows only while hovered or dragged.
    pub(crate) fn refresh_label(&mut self) {
        self.label.visible = self.hovered || self.dragging;
    }

    fn paint(&self, out: &mut Vec<Primitive>) {
        if !self.visible {
            return;
        }
        let line_x = self.line_x();
        out.push(Primitive::Line {
            x: line_x,
            height: self.line_height,
            color: self.color.clone(),
            stroke_width: 1.0,
        });
        if self.draggable {
            let top = self.grip_top();
            out.push(Primitive::Rect {
                x: self.x,
                y: top,
                width: self.width,
                height: self.grip_height,
                fill: self.color.clone(),
                opacity: 1.0,
            });
            out.push(Primitive::Rect {
                x: self.x,
                y: top,
                width: self.width,
                height: self.grip_height,
                fill: "#000000".to_string(),
                opacity: 0.3,
            });
        }
        if self.label.visible {
            out.push(Primitive::Text {
                x: line_x + self.label.x,
                y: self.label.y,
                text: self.label.text.clone(),
                font_size: self.label.font_size,
                color: "#000000".to_string(),
            });
        }
    }
}

/// Highlight over the waveform between a segment's boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformMark {
    pub x: f64,
    pub width: f64,
    pub color: String,
    pub hovered: bool,
}

impl WaveformMark {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            x: 0.0,
            width: 0.0,
            color: color.into(),
            hovered: false,
        }
    }

    pub fn hit(&self, x: f64) -> bool {
        x >= self.x && x <= self.x + self.width
    }
}

/// The boundary handles of a proxy, if any were built.
#[derive(Debug, Clone, PartialEq)]
pub enum Handles {
    /// Non-editable entity in a view that hides lines.
    Empty,
    Boundaries { start: Handle, end: Handle },
    Marker(Handle),
}

impl Handles {
    pub fn get(&self, role: HandleRole) -> Option<&Handle> {
        match (self, role) {
            (Handles::Boundaries { start, .. }, HandleRole::In) => Some(start),
            (Handles::Boundaries { end, .. }, HandleRole::Out) => Some(end),
            (Handles::Marker(handle), HandleRole::Point) => Some(handle),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, role: HandleRole) -> Option<&mut Handle> {
        match (self, role) {
            (Handles::Boundaries { start, .. }, HandleRole::In) => Some(start),
            (Handles::Boundaries { end, .. }, HandleRole::Out) => Some(end),
            (Handles::Marker(handle), HandleRole::Point) => Some(handle),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Handle> {
        let (a, b) = match self {
            Handles::Empty => (None, None),
            Handles::Boundaries { start, end } => (Some(start), Some(end)),
            Handles::Marker(handle) => (Some(handle), None),
        };
        a.into_iter().chain(b)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Handles::Empty)
    }
}

/// All shapes of one proxy in one view.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub visible: bool,
    pub handles: Handles,
    pub label: Option<TextLabel>,
    pub mark: Option<WaveformMark>,
}

impl Group {
    pub fn new(handles: Handles, label: Option<TextLabel>, mark: Option<WaveformMark>) -> Self {
        Self {
            visible: true,
            handles,
            label,
            mark,
        }
    }

    /// Topmost draggable handle under `(x, y)`.
    pub fn handle_at(&self, x: f64, y: f64) -> Option<HandleRole> {
        if !self.visible {
            return None;
        }
        self.handles.iter().filter(|h| h.hit(x, y)).last().map(|h| h.role)
    }

    /// Append this group's primitives, back to front.
    pub fn paint(&self, out: &mut Vec<Primitive>) {
        if !self.visible {
            return;
        }
        if let Some(mark) = &self.mark {
            out.push(Primitive::Band {
                x: mark.x,
                width: mark.width,
                color: mark.color.clone(),
                opacity: if mark.hovered { 0.45 } else { 0.3 },
            });
            if let Some(label) = self.label.as_ref().filter(|l| l.visible) {
                out.push(Primitive::Text {
                    x: mark.x + label.x,
                    y: label.y,
                    text: label.text.clone(),
                    font_size: label.font_size,
                    color: "#000000".to_string(),
                });
            }
        }
        for handle in self.handles.iter() {
            handle.paint(out);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn handle(role: HandleRole, x: f64) -> Handle {
        Handle {
            role,
            x,
            width: 12.0,
            grip_height: 20.0,
            line_height: 100.0,
            color: "#aabbcc".to_string(),
            draggable: true,
            visible: true,
            hooks: HandleHooks::default(),
            label: TextLabel::new("00:01.00", 16.0, 45.0, 10.0),
            label_gap: 16.0,
            hovered: false,
            dragging: false,
        }
    }

    #[test]
    fn test_line_sits_on_the_boundary_side() {
        assert_eq!(handle(HandleRole::In, 40.0).line_x(), 52.0);
        assert_eq!(handle(HandleRole::Out, 40.0).line_x(), 40.0);
        assert_eq!(handle(HandleRole::Point, 40.0).line_x(), 52.0);
    }

    #[test]
    fn test_label_flips_past_midpoint() {
        let mut h = handle(HandleRole::Out, 100.0);
        h.place_label(500.0);
        assert_eq!(h.label.x, 16.0);

        h.x = 300.0;
        h.place_label(500.0);
        assert!(h.label.x < -16.0);
    }

    #[test]
    fn test_hit_requires_draggable_visible_handle() {
        let mut h = handle(HandleRole::In, 40.0);
        assert!(h.hit(45.0, 50.0));
        assert!(h.hit(52.0, 5.0));
        assert!(!h.hit(80.0, 50.0));

        h.draggable = false;
        assert!(!h.hit(45.0, 50.0));
    }

    #[test]
    fn test_hidden_group_paints_nothing() {
        let mut group = Group::new(
            Handles::Marker(handle(HandleRole::Point, 10.0)),
            None,
            None,
        );
        let mut out = Vec::new();
        group.paint(&mut out);
        assert_eq!(out.len(), 3);

        group.visible = false;
        out.clear();
        group.paint(&mut out);
        assert!(out.is_empty());
    }
}
