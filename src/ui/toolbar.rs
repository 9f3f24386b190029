// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar and tool selection UI.
//!
//! This module provides the toolbar interface for selecting the
//! annotation tool and the zoom view's scale.

use crate::app::Tool;

/// Requested toolbar change other than tool selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    ZoomIn,
    ZoomOut,
}

/// Display the toolbar with tool selection buttons.
pub fn show(ui: &mut egui::Ui, current_tool: &mut Tool, samples_per_pixel: u32) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Tools:");

        ui.separator();

        if ui.selectable_label(*current_tool == Tool::Select, "⬆ Select").clicked() {
            *current_tool = Tool::Select;
        }

        if ui.selectable_label(*current_tool == Tool::Segment, "▭ Segment").clicked() {
            *current_tool = Tool::Segment;
        }

        if ui.selectable_label(*current_tool == Tool::Point, "│ Point").clicked() {
            *current_tool = Tool::Point;
        }

        ui.separator();

        if ui.button("−").on_hover_text("Zoom out").clicked() {
            action = ToolbarAction::ZoomOut;
        }
        ui.label(format!("{} samples/px", samples_per_pixel));
        if ui.button("+").on_hover_text("Zoom in").clicked() {
            action = ToolbarAction::ZoomIn;
        }

        ui.separator();

        let tool_text = match current_tool {
            Tool::Select => "Drag handles to move boundaries, double-click a handle to select",
            Tool::Segment => "Click a view to add a two-second segment",
            Tool::Point => "Click a view to add a point",
        };

        ui.label(egui::RichText::new(tool_text).italics().weak());
    });

    action
}
