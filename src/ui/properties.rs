// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation list panel.
//!
//! Lists every segment and point with its times, and lets the user select
//! or delete them.

use crate::app::Selection;
use wavemarks::util::nice_time;
use wavemarks::Editor;

/// Result of properties panel interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertiesAction {
    None,
    Select(Selection),
    Delete(Selection),
}

/// Display the annotation list.
pub fn show(ui: &mut egui::Ui, editor: &Editor, selected: Option<Selection>) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    ui.heading("Annotations");
    ui.separator();

    egui::ScrollArea::vertical().show(ui, |ui| {
        let segments = editor.segment_store();
        ui.label(egui::RichText::new(format!("Segments ({})", segments.len())).strong());
        for segment in segments.iter() {
            let item = Selection::Segment(segment.key());
            ui.horizontal(|ui| {
                let text = format!(
                    "{}  {} – {}",
                    segment.id,
                    nice_time(segment.start_time, false),
                    nice_time(segment.end_time, false)
                );
                if ui.selectable_label(selected == Some(item), text).clicked() {
                    action = PropertiesAction::Select(item);
                }
                if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                    action = PropertiesAction::Delete(item);
                }
            });
            if !segment.label_text.is_empty() {
                ui.label(egui::RichText::new(&segment.label_text).weak());
            }
        }

        ui.add_space(8.0);

        let points = editor.point_store();
        ui.label(egui::RichText::new(format!("Points ({})", points.len())).strong());
        for point in points.iter() {
            let item = Selection::Point(point.key());
            ui.horizontal(|ui| {
                let text = format!("{}  {}", point.id, nice_time(point.timestamp, false));
                if ui.selectable_label(selected == Some(item), text).clicked() {
                    action = PropertiesAction::Select(item);
                }
                if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                    action = PropertiesAction::Delete(item);
                }
            });
        }
    });

    action
}
