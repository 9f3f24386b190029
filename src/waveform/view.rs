// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Overview and zoom views, and the stage holding both.

use super::data::WaveformData;
use crate::graphics::layer::{Layer, LayerKind, LayerStack};
use crate::markers::MarkerEvent;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Which of the two synchronized views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ViewKind {
    #[serde(rename = "zoomview")]
    Zoom,
    #[serde(rename = "overview")]
    Overview,
}

impl ViewKind {
    /// Both views, zoom first.
    pub const ALL: [ViewKind; 2] = [ViewKind::Zoom, ViewKind::Overview];
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Zoom => f.write_str("zoomview"),
            ViewKind::Overview => f.write_str("overview"),
        }
    }
}

/// One waveform view: its size, scroll position, data provider and layers.
pub struct View {
    kind: ViewKind,
    width: u32,
    height: u32,
    /// Leftmost visible pixel column. Always 0 for the overview.
    frame_offset: i64,
    data: Box<dyn WaveformData>,
    layers: LayerStack,
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("kind", &self.kind)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("frame_offset", &self.frame_offset)
            .field("scale", &self.data.scale())
            .field("layers", &self.layers)
            .finish()
    }
}

impl View {
    pub fn new(kind: ViewKind, width: u32, height: u32, data: Box<dyn WaveformData>) -> Self {
        let mut view = Self {
            kind,
            width,
            height,
            frame_offset: 0,
            data,
            layers: LayerStack::default(),
        };
        view.sync_window();
        view
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn frame_offset(&self) -> i64 {
        self.frame_offset
    }

    pub fn data(&self) -> &dyn WaveformData {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> &mut dyn WaveformData {
        self.data.as_mut()
    }

    /// Absolute pixel offset of `seconds`.
    pub fn time_to_offset(&self, seconds: f64) -> f64 {
        self.data.at_time(seconds)
    }

    /// Time of absolute pixel offset `offset`.
    pub fn offset_to_time(&self, offset: f64) -> f64 {
        self.data.time(offset)
    }

    /// Duration covered by a single pixel column.
    pub fn pixel_duration(&self) -> f64 {
        self.data.time(1.0) - self.data.time(0.0)
    }

    /// Visible window in absolute offsets.
    ///
    /// The overview always shows the whole timeline.
    pub fn visible_range(&self) -> (f64, f64) {
        match self.kind {
            ViewKind::Overview => (0.0, self.data.offset_length()),
            ViewKind::Zoom => {
                let start = self.frame_offset as f64;
                (start, start + self.width as f64)
            }
        }
    }

    /// Scroll the zoom view. Ignored for the overview.
    ///
    /// Callers must re-project annotations afterwards.
    pub fn set_frame_offset(&mut self, offset: i64) {
        if self.kind == ViewKind::Overview {
            log::warn!("Ignoring frame offset {} for the overview", offset);
            return;
        }
        let last = (self.data.offset_length() as i64 - self.width as i64).max(0);
        self.frame_offset = offset.clamp(0, last);
        self.sync_window();
    }

    /// Change the zoom view's resolution, keeping the frame offset in range.
    pub fn set_scale(&mut self, samples_per_pixel: u32) {
        self.data.resample(samples_per_pixel);
        self.set_frame_offset(self.frame_offset);
    }

    /// Resize the view. The overview is resampled to keep the whole file in
    /// view.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width.max(1);
        self.height = height;
        if self.kind == ViewKind::Overview {
            let total_samples = self.data.total_samples() as f64;
            let scale = (total_samples / self.width as f64).ceil().max(1.0) as u32;
            self.data.resample(scale);
        }
        self.sync_window();
    }

    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.get(kind)
    }

    /// The layer of `kind`, created on top of the stack if missing.
    pub fn layer_mut(&mut self, kind: LayerKind) -> &mut Layer {
        self.layers.ensure(kind)
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    fn sync_window(&mut self) {
        let (start, end) = self.visible_range();
        self.data.set_window(start, end);
    }
}

/// The overview and zoom views plus the queue of marker notifications.
#[derive(Debug)]
pub struct Stage {
    overview: View,
    zoom: View,
    events: VecDeque<MarkerEvent>,
}

impl Stage {
    pub fn new(overview: View, zoom: View) -> Self {
        debug_assert_eq!(overview.kind(), ViewKind::Overview);
        debug_assert_eq!(zoom.kind(), ViewKind::Zoom);
        Self {
            overview,
            zoom,
            events: VecDeque::new(),
        }
    }

    pub fn view(&self, kind: ViewKind) -> &View {
        match kind {
            ViewKind::Overview => &self.overview,
            ViewKind::Zoom => &self.zoom,
        }
    }

    pub fn view_mut(&mut self, kind: ViewKind) -> &mut View {
        match kind {
            ViewKind::Overview => &mut self.overview,
            ViewKind::Zoom => &mut self.zoom,
        }
    }

    pub fn overview(&self) -> &View {
        &self.overview
    }

    pub fn zoom(&self) -> &View {
        &self.zoom
    }

    pub(crate) fn emit(&mut self, event: MarkerEvent) {
        log::debug!("Marker event: {:?}", event);
        self.events.push_back(event);
    }

    /// Take all queued notifications, oldest first.
    pub fn drain_events(&mut self) -> Vec<MarkerEvent> {
        self.events.drain(..).collect()
    }
}
