// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the [`Editor`], applies canvas and panel
//! actions to it, and keeps an undo history of annotation snapshots.

use crate::ui::{canvas, properties, toolbar};
use std::path::PathBuf;
use wavemarks::{
    AnnotationSet, Editor, EntityKey, MarkerConfig, MarkerEvent, PointSpec, ResampledWaveform,
    SegmentSpec, View, ViewKind,
};

/// Zoom view scales the toolbar steps through, in samples per pixel.
const ZOOM_LEVELS: [u32; 6] = [128, 256, 512, 1024, 2048, 4096];
const DEFAULT_ZOOM: usize = 2;

const SAMPLE_RATE: u32 = 44_100;
const TIMELINE_SECONDS: f64 = 300.0;
const NEW_SEGMENT_SECONDS: f64 = 2.0;

/// History system for undo/redo functionality.
struct History {
    /// Undo stack (past states)
    undo_stack: Vec<AnnotationSet>,
    /// Redo stack (future states after undo)
    redo_stack: Vec<AnnotationSet>,
    /// Maximum history size
    max_size: usize,
}

impl History {
    fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size: 50,
        }
    }

    /// Save current state before making a change
    fn push(&mut self, snapshot: AnnotationSet) {
        self.undo_stack.push(snapshot);
        if self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    fn undo(&mut self, current: AnnotationSet) -> Option<AnnotationSet> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    fn redo(&mut self, current: AnnotationSet) -> Option<AnnotationSet> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

/// Current annotation tool selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Select,
    Segment,
    Point,
}

/// Selected annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Segment(EntityKey),
    Point(EntityKey),
}

/// Main application state.
pub struct WavemarksApp {
    editor: Editor,

    /// Currently selected annotation tool
    current_tool: Tool,

    /// Currently selected annotation
    selected: Option<Selection>,

    /// Audio file recorded in exported annotation sets
    audio_file: Option<String>,

    /// Index into [`ZOOM_LEVELS`]
    zoom_index: usize,

    /// History for undo/redo
    history: History,

    /// Last status line message
    status: Option<String>,
}

impl WavemarksApp {
    /// Create the application over an empty timeline.
    pub fn new(config: MarkerConfig) -> Self {
        let overview = View::new(
            ViewKind::Overview,
            1000,
            80,
            Box::new(ResampledWaveform::fit_to_width(SAMPLE_RATE, TIMELINE_SECONDS, 1000)),
        );
        let total_samples = (TIMELINE_SECONDS * SAMPLE_RATE as f64) as u64;
        let zoom = View::new(
            ViewKind::Zoom,
            1000,
            200,
            Box::new(ResampledWaveform::new(
                SAMPLE_RATE,
                total_samples,
                ZOOM_LEVELS[DEFAULT_ZOOM],
            )),
        );

        let mut editor = Editor::new(config, overview, zoom);
        for event in editor.drain_events() {
            log::debug!("Startup event: {:?}", event);
        }

        Self {
            editor,
            current_tool: Tool::Select,
            selected: None,
            audio_file: None,
            zoom_index: DEFAULT_ZOOM,
            history: History::new(),
            status: None,
        }
    }

    fn snapshot(&self) -> AnnotationSet {
        self.editor.export(self.audio_file.clone())
    }

    /// Save annotations to history before making a change
    fn save_to_history(&mut self) {
        let snapshot = self.snapshot();
        self.history.push(snapshot);
    }

    fn undo(&mut self) {
        let current = self.snapshot();
        if let Some(previous) = self.history.undo(current) {
            self.restore(&previous);
            log::info!("Undo");
        }
    }

    fn redo(&mut self) {
        let current = self.snapshot();
        if let Some(next) = self.history.redo(current) {
            self.restore(&next);
            log::info!("Redo");
        }
    }

    fn restore(&mut self, set: &AnnotationSet) {
        if let Err(e) = self.editor.load(set) {
            log::error!("Failed to restore annotations: {}", e);
        }
        self.selected = None;
    }

    fn add_at(&mut self, view: ViewKind, x: f64) {
        let time = self.editor.time_at(view, x);
        self.editor.set_current_time(time);
        let snapshot = self.snapshot();

        let created = match self.current_tool {
            Tool::Select => return,
            Tool::Segment => self
                .editor
                .segments()
                .create(SegmentSpec::new(time, time + NEW_SEGMENT_SECONDS).editable(true))
                .map(Selection::Segment),
            Tool::Point => self
                .editor
                .points()
                .create(PointSpec::new(time).editable(true))
                .map(Selection::Point),
        };

        match created {
            Ok(selection) => {
                self.history.push(snapshot);
                self.selected = Some(selection);
                self.editor.render();
            }
            Err(e) => {
                log::warn!("Could not add annotation: {}", e);
                self.status = Some(e.to_string());
            }
        }
    }

    fn delete(&mut self, selection: Selection) {
        self.save_to_history();
        let removed = match selection {
            Selection::Segment(key) => self.editor.segments().remove(key),
            Selection::Point(key) => self.editor.points().remove(key),
        };
        if removed.is_some() {
            self.editor.render();
        }
        if self.selected == Some(selection) {
            self.selected = None;
        }
    }

    fn remove_all(&mut self) {
        self.save_to_history();
        self.editor.segments().remove_all();
        self.editor.points().remove_all();
        self.selected = None;
    }

    fn set_zoom(&mut self, index: usize) {
        self.zoom_index = index.min(ZOOM_LEVELS.len() - 1);
        self.editor.zoom_to(ZOOM_LEVELS[self.zoom_index]);
    }

    /// Export annotations to a file.
    fn export_annotations(&mut self, path: PathBuf) {
        let data = self.snapshot();
        match wavemarks::io::export(&data, &path) {
            Ok(()) => self.status = Some(format!("Exported to {}", path.display())),
            Err(e) => {
                log::error!("Failed to export annotations: {:#}", e);
                self.status = Some(format!("Export failed: {}", e));
            }
        }
    }

    /// Import annotations from a file, replacing the current ones.
    fn import_annotations(&mut self, path: PathBuf) {
        let data = match wavemarks::io::import(&path) {
            Ok(data) => data,
            Err(e) => {
                log::error!("Failed to import annotations: {:#}", e);
                self.status = Some(format!("Import failed: {}", e));
                return;
            }
        };
        let previous = self.snapshot();
        match self.editor.load(&data) {
            Ok(()) => {
                self.history.push(previous);
                self.audio_file = data.audio_file.clone();
                self.selected = None;
                self.status = Some(format!("Loaded {}", path.display()));
            }
            Err(e) => {
                log::error!("Rejected annotations in {}: {}", path.display(), e);
                self.status = Some(format!("Invalid annotations: {}", e));
            }
        }
    }

    fn handle_events(&mut self) {
        for event in self.editor.drain_events() {
            log::info!("Marker event: {:?}", event);
            match &event {
                MarkerEvent::SegmentDblClick { id } => {
                    self.selected = self
                        .editor
                        .segment_store()
                        .find(id)
                        .map(|s| Selection::Segment(s.key()));
                }
                MarkerEvent::PointDblClick { id } => {
                    self.selected = self
                        .editor
                        .point_store()
                        .find(id)
                        .map(|p| Selection::Point(p.key()));
                }
                MarkerEvent::SegmentDragEnd { id } | MarkerEvent::PointDragEnd { id } => {
                    self.status = Some(format!("Moved {}", id));
                }
                MarkerEvent::SegmentsReady | MarkerEvent::PointsReady => {}
            }
        }
    }

    fn apply_canvas_action(&mut self, action: canvas::CanvasAction) {
        match action {
            canvas::CanvasAction::Resize { view, width } => {
                let height = self.editor.stage().view(view).height();
                self.editor.resize(view, width, height);
            }
            canvas::CanvasAction::PointerDown { view, x, y } => {
                if self.current_tool != Tool::Select {
                    return;
                }
                let snapshot = self.snapshot();
                if let Some(target) = self.editor.pointer_down(view, x, y) {
                    self.history.push(snapshot);
                    self.selected = Some(if target.is_point() {
                        Selection::Point(target.key)
                    } else {
                        Selection::Segment(target.key)
                    });
                }
            }
            canvas::CanvasAction::PointerMove { view, x, y } => {
                self.editor.pointer_move(view, x, y);
            }
            canvas::CanvasAction::PointerUp => {
                self.editor.pointer_up();
            }
            canvas::CanvasAction::DoubleClick { view, x, y } => {
                self.editor.double_click(view, x, y);
            }
            canvas::CanvasAction::Click { view, x } => {
                if self.current_tool == Tool::Select {
                    self.editor.set_current_time(self.editor.time_at(view, x));
                } else {
                    self.add_at(view, x);
                }
            }
            canvas::CanvasAction::Scroll { pixels } => {
                self.editor.scroll_by(pixels);
            }
        }
    }
}

impl eframe::App for WavemarksApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_events();

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Load Annotations...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Annotations", &["yaml", "yml", "json"])
                            .pick_file()
                        {
                            self.import_annotations(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    ui.menu_button("Export Annotations", |ui| {
                        if ui.button("Export as YAML...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("YAML", &["yaml", "yml"])
                                .set_file_name("annotations.yaml")
                                .save_file()
                            {
                                self.export_annotations(path);
                            }
                            ui.close_menu();
                        }
                        if ui.button("Export as JSON...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("JSON", &["json"])
                                .set_file_name("annotations.json")
                                .save_file()
                            {
                                self.export_annotations(path);
                            }
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    if ui
                        .add_enabled(self.history.can_undo(), egui::Button::new("Undo (Ctrl+Z)"))
                        .clicked()
                    {
                        self.undo();
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(self.history.can_redo(), egui::Button::new("Redo (Ctrl+Shift+Z)"))
                        .clicked()
                    {
                        self.redo();
                        ui.close_menu();
                    }

                    ui.separator();

                    if ui
                        .add_enabled(self.selected.is_some(), egui::Button::new("Delete Selected"))
                        .clicked()
                    {
                        if let Some(selection) = self.selected {
                            self.delete(selection);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Remove All").clicked() {
                        self.remove_all();
                        ui.close_menu();
                    }
                    if ui.button("Clear History").clicked() {
                        self.history.clear();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.button("Zoom In").clicked() {
                        self.set_zoom(self.zoom_index.saturating_sub(1));
                        ui.close_menu();
                    }
                    if ui.button("Zoom Out").clicked() {
                        self.set_zoom(self.zoom_index + 1);
                        ui.close_menu();
                    }
                    if ui.button("Reset Zoom").clicked() {
                        self.set_zoom(DEFAULT_ZOOM);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Scroll to Start").clicked() {
                        self.editor.scroll_to(0);
                        ui.close_menu();
                    }
                });
            });
        });

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(ui, &mut self.current_tool, ZOOM_LEVELS[self.zoom_index])
            })
            .inner;
        match toolbar_action {
            toolbar::ToolbarAction::ZoomIn => self.set_zoom(self.zoom_index.saturating_sub(1)),
            toolbar::ToolbarAction::ZoomOut => self.set_zoom(self.zoom_index + 1),
            toolbar::ToolbarAction::None => {}
        }

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Current tool: {:?}", self.current_tool));
                ui.separator();
                ui.label(format!(
                    "{} segments, {} points",
                    self.editor.segment_store().len(),
                    self.editor.point_store().len()
                ));
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.label(status);
                }
            });
        });

        // Properties panel (right side)
        let properties_action = egui::SidePanel::right("properties")
            .default_width(250.0)
            .show(ctx, |ui| properties::show(ui, &self.editor, self.selected))
            .inner;
        match properties_action {
            properties::PropertiesAction::Select(selection) => self.selected = Some(selection),
            properties::PropertiesAction::Delete(selection) => self.delete(selection),
            properties::PropertiesAction::None => {}
        }

        // Keyboard shortcuts, skipped while a text field has focus
        if !ctx.wants_keyboard_input() {
            if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
                self.selected = None;
            }
            if ctx.input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace)) {
                if let Some(selection) = self.selected {
                    self.delete(selection);
                }
            }
            if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift)
                && self.history.can_undo()
            {
                self.undo();
            }
            if ctx.input(|i| {
                (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
                    || (i.modifiers.command && i.key_pressed(egui::Key::Y))
            }) && self.history.can_redo()
            {
                self.redo();
            }
            if ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft)) {
                self.editor.scroll_by(-100);
            }
            if ctx.input(|i| i.key_pressed(egui::Key::ArrowRight)) {
                self.editor.scroll_by(100);
            }
        }

        // Overview and zoom views (center)
        let canvas_actions = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let mut actions = canvas::show(ui, &self.editor, ViewKind::Overview);
                ui.add_space(8.0);
                actions.extend(canvas::show(ui, &self.editor, ViewKind::Zoom));
                actions
            })
            .inner;

        let pointer_over_view = canvas_actions
            .iter()
            .any(|action| matches!(action, canvas::CanvasAction::PointerMove { .. }));
        for action in canvas_actions {
            self.apply_canvas_action(action);
        }
        if !pointer_over_view && !self.editor.is_dragging() {
            self.editor.pointer_leave();
        }
    }
}
