// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Waveform view canvases.
//!
//! Each canvas paints one view's layer display lists and reports pointer
//! input in view-local pixels. The canvas never mutates the editor; the app
//! applies the returned actions.

use wavemarks::graphics::Primitive;
use wavemarks::util::color::parse_rgba;
use wavemarks::util::nice_time;
use wavemarks::{Editor, ViewKind};

/// Result of canvas interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasAction {
    Resize { view: ViewKind, width: u32 },
    PointerDown { view: ViewKind, x: f64, y: f64 },
    PointerMove { view: ViewKind, x: f64, y: f64 },
    PointerUp,
    DoubleClick { view: ViewKind, x: f64, y: f64 },
    /// Click on the view that did not start a drag.
    Click { view: ViewKind, x: f64 },
    /// Scroll wheel over the zoom view, in pixels.
    Scroll { pixels: i64 },
}

const BACKGROUND: egui::Color32 = egui::Color32::from_gray(30);
const AXIS: egui::Color32 = egui::Color32::from_gray(90);

/// Display one view and collect the pointer actions for this frame.
pub fn show(ui: &mut egui::Ui, editor: &Editor, view: ViewKind) -> Vec<CanvasAction> {
    let mut actions = Vec::new();
    let state = editor.stage().view(view);

    let width = ui.available_width().max(1.0);
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(width, state.height() as f32),
        egui::Sense::click_and_drag(),
    );
    if width.round() as u32 != state.width() {
        actions.push(CanvasAction::Resize {
            view,
            width: width.round() as u32,
        });
    }

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, BACKGROUND);
    painter.line_segment(
        [rect.left_center(), rect.right_center()],
        egui::Stroke::new(1.0, AXIS),
    );
    draw_time_axis(&painter, rect, editor, view);

    if view == ViewKind::Overview {
        draw_zoom_window(&painter, rect, editor);
    }

    for layer in state.layers().iter() {
        for primitive in layer.display_list() {
            draw_primitive(&painter, rect, primitive);
        }
    }

    let local = |pos: egui::Pos2| ((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64);

    if response.drag_started() {
        let origin = ui.input(|i| i.pointer.press_origin());
        if let Some((x, y)) = origin.or(response.interact_pointer_pos()).map(local) {
            actions.push(CanvasAction::PointerDown { view, x, y });
        }
    }
    if response.dragged() {
        if let Some((x, y)) = response.interact_pointer_pos().map(local) {
            actions.push(CanvasAction::PointerMove { view, x, y });
        }
    } else if let Some((x, y)) = response.hover_pos().map(local) {
        actions.push(CanvasAction::PointerMove { view, x, y });
    }
    if response.drag_stopped() {
        actions.push(CanvasAction::PointerUp);
    }
    if response.double_clicked() {
        if let Some((x, y)) = response.interact_pointer_pos().map(local) {
            actions.push(CanvasAction::DoubleClick { view, x, y });
        }
    } else if response.clicked() {
        if let Some((x, _)) = response.interact_pointer_pos().map(local) {
            actions.push(CanvasAction::Click { view, x });
        }
    }

    if view == ViewKind::Zoom && response.hovered() {
        let scroll = ui.input(|i| i.smooth_scroll_delta);
        let delta = if scroll.x != 0.0 { scroll.x } else { scroll.y };
        if delta != 0.0 {
            actions.push(CanvasAction::Scroll {
                pixels: -delta.round() as i64,
            });
        }
    }

    actions
}

fn color(spec: &str, opacity: f32) -> egui::Color32 {
    let [r, g, b, a] = parse_rgba(spec).unwrap_or([128, 128, 128, 255]);
    let alpha = (a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
    egui::Color32::from_rgba_unmultiplied(r, g, b, alpha)
}

/// Paint one display-list primitive, offset into `rect`.
fn draw_primitive(painter: &egui::Painter, rect: egui::Rect, primitive: &Primitive) {
    let at = |x: f64, y: f64| rect.min + egui::vec2(x as f32, y as f32);
    match primitive {
        Primitive::Band {
            x,
            width,
            color: fill,
            opacity,
        } => {
            let band = egui::Rect::from_min_size(at(*x, 0.0), egui::vec2(*width as f32, rect.height()));
            painter.rect_filled(band, 0.0, color(fill, *opacity));
        }
        Primitive::Line {
            x,
            height,
            color: stroke,
            stroke_width,
        } => {
            painter.line_segment(
                [at(*x, 0.0), at(*x, *height)],
                egui::Stroke::new(*stroke_width, color(stroke, 1.0)),
            );
        }
        Primitive::Rect {
            x,
            y,
            width,
            height,
            fill,
            opacity,
        } => {
            let grip = egui::Rect::from_min_size(at(*x, *y), egui::vec2(*width as f32, *height as f32));
            painter.rect_filled(grip, 0.0, color(fill, *opacity));
        }
        Primitive::Text {
            x,
            y,
            text,
            font_size,
            color: fill,
        } => {
            painter.text(
                at(*x, *y),
                egui::Align2::LEFT_TOP,
                text,
                egui::FontId::proportional(*font_size),
                // Labels are drawn on a dark background.
                if fill == "#000000" {
                    egui::Color32::from_gray(230)
                } else {
                    color(fill, 1.0)
                },
            );
        }
    }
}

/// Tick marks with time labels along the bottom edge.
fn draw_time_axis(painter: &egui::Painter, rect: egui::Rect, editor: &Editor, view: ViewKind) {
    let state = editor.stage().view(view);
    let pixel = state.pixel_duration();
    if pixel <= 0.0 {
        return;
    }
    let visible = state.width() as f64 * pixel;
    let step = [0.5, 1.0, 2.0, 5.0, 10.0, 15.0, 30.0, 60.0, 120.0, 300.0, 600.0]
        .into_iter()
        .find(|step| visible / step <= 12.0)
        .unwrap_or(1200.0);

    let start_time = editor.time_at(view, 0.0);
    let mut tick = (start_time / step).ceil() * step;
    let end_time = start_time + visible;
    while tick <= end_time {
        let x = (state.time_to_offset(tick) - state.frame_offset() as f64) as f32;
        let top = egui::pos2(rect.min.x + x, rect.max.y - 6.0);
        painter.line_segment([top, top + egui::vec2(0.0, 6.0)], egui::Stroke::new(1.0, AXIS));
        painter.text(
            top + egui::vec2(3.0, -2.0),
            egui::Align2::LEFT_BOTTOM,
            nice_time(tick, true),
            egui::FontId::monospace(9.0),
            AXIS,
        );
        tick += step;
    }
}

/// Outline of the zoom view's window over the overview.
fn draw_zoom_window(painter: &egui::Painter, rect: egui::Rect, editor: &Editor) {
    let stage = editor.stage();
    let zoom = stage.zoom();
    let overview = stage.overview();
    let (start, end) = zoom.visible_range();
    let left = overview.time_to_offset(zoom.offset_to_time(start)) as f32;
    let right = overview.time_to_offset(zoom.offset_to_time(end)) as f32;
    let window = egui::Rect::from_min_max(
        egui::pos2(rect.min.x + left, rect.min.y),
        egui::pos2(rect.min.x + right.max(left + 1.0), rect.max.y),
    );
    painter.rect_filled(window, 0.0, egui::Color32::from_white_alpha(12));
    painter.rect_stroke(window, 0.0, egui::Stroke::new(1.0, egui::Color32::from_gray(120)));
}
