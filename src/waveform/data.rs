// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Waveform data providers.
//!
//! The provider knows the resolution of a view (samples per pixel column),
//! converts between seconds and pixel offsets, and keeps track of which
//! annotations overlap the currently visible window.

use std::collections::HashMap;

/// Time/pixel mapping and visibility bookkeeping for one view.
///
/// Offsets are absolute pixel columns from the start of the audio, not
/// positions within the visible window.
pub trait WaveformData {
    /// Pixel column containing `seconds`.
    fn at_time(&self, seconds: f64) -> f64;

    /// Start time in seconds of pixel column `offset`.
    fn time(&self, offset: f64) -> f64;

    /// Total number of pixel columns at the current scale.
    fn offset_length(&self) -> f64;

    /// Samples per pixel column.
    fn scale(&self) -> u32;

    /// Length of the audio in samples, independent of the scale.
    fn total_samples(&self) -> u64;

    /// Change the resolution. Bound annotation offsets become stale until
    /// they are bound again.
    fn resample(&mut self, samples_per_pixel: u32);

    /// Set the visible window `[start, end]` in absolute offsets.
    fn set_window(&mut self, start: f64, end: f64);

    fn window(&self) -> (f64, f64);

    fn set_segment(&mut self, id: &str, start: f64, end: f64);

    fn set_point(&mut self, id: &str, offset: f64);

    fn remove_segment(&mut self, id: &str);

    fn remove_point(&mut self, id: &str);

    fn clear_segments(&mut self);

    fn clear_points(&mut self);

    /// Whether a bound segment overlaps the visible window.
    fn segment_visible(&self, id: &str) -> bool;

    /// Whether a bound point lies inside the visible window.
    fn point_visible(&self, id: &str) -> bool;
}

/// Waveform data resampled to a fixed number of samples per pixel.
#[derive(Debug, Clone)]
pub struct ResampledWaveform {
    sample_rate: u32,
    total_samples: u64,
    scale: u32,
    window: (f64, f64),
    segments: HashMap<String, (f64, f64)>,
    points: HashMap<String, f64>,
}

impl ResampledWaveform {
    /// Data for `total_samples` of audio at `sample_rate`, with the whole
    /// file as the initial window.
    pub fn new(sample_rate: u32, total_samples: u64, samples_per_pixel: u32) -> Self {
        let mut data = Self {
            sample_rate: sample_rate.max(1),
            total_samples,
            scale: samples_per_pixel.max(1),
            window: (0.0, 0.0),
            segments: HashMap::new(),
            points: HashMap::new(),
        };
        data.window = (0.0, data.offset_length());
        data
    }

    /// Data whose scale fits `duration` seconds into `width` pixel columns.
    pub fn fit_to_width(sample_rate: u32, duration: f64, width: u32) -> Self {
        let total_samples = (duration.max(0.0) * sample_rate as f64).ceil() as u64;
        let scale = (total_samples as f64 / width.max(1) as f64).ceil() as u32;
        Self::new(sample_rate, total_samples, scale)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration(&self) -> f64 {
        self.total_samples as f64 / self.sample_rate as f64
    }
}

impl WaveformData for ResampledWaveform {
    fn at_time(&self, seconds: f64) -> f64 {
        (seconds * self.sample_rate as f64 / self.scale as f64).floor()
    }

    fn time(&self, offset: f64) -> f64 {
        offset * self.scale as f64 / self.sample_rate as f64
    }

    fn offset_length(&self) -> f64 {
        (self.total_samples as f64 / self.scale as f64).ceil()
    }

    fn scale(&self) -> u32 {
        self.scale
    }

    fn total_samples(&self) -> u64 {
        self.total_samples
    }

    fn resample(&mut self, samples_per_pixel: u32) {
        let samples_per_pixel = samples_per_pixel.max(1);
        if samples_per_pixel != self.scale {
            log::debug!("Resampling waveform data: {} -> {} samples/px", self.scale, samples_per_pixel);
            self.scale = samples_per_pixel;
        }
    }

    fn set_window(&mut self, start: f64, end: f64) {
        self.window = (start, end);
    }

    fn window(&self) -> (f64, f64) {
        self.window
    }

    fn set_segment(&mut self, id: &str, start: f64, end: f64) {
        self.segments.insert(id.to_string(), (start, end));
    }

    fn set_point(&mut self, id: &str, offset: f64) {
        self.points.insert(id.to_string(), offset);
    }

    fn remove_segment(&mut self, id: &str) {
        self.segments.remove(id);
    }

    fn remove_point(&mut self, id: &str) {
        self.points.remove(id);
    }

    fn clear_segments(&mut self) {
        self.segments.clear();
    }

    fn clear_points(&mut self) {
        self.points.clear();
    }

    fn segment_visible(&self, id: &str) -> bool {
        let (window_start, window_end) = self.window;
        self.segments
            .get(id)
            .is_some_and(|&(start, end)| start < window_end && end > window_start)
    }

    fn point_visible(&self, id: &str) -> bool {
        let (window_start, window_end) = self.window;
        self.points
            .get(id)
            .is_some_and(|&offset| offset >= window_start && offset <= window_end)
    }
}
