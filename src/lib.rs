// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! WAVEMARKS - segment and point annotations for audio waveforms.
//!
//! Annotations are edited over two synchronized views of the same audio
//! timeline: an overview showing the whole file at a fixed scale, and a
//! zoom view showing a scrollable window at a variable scale. Each
//! annotation owns one visual proxy per view; the stores keep those proxies
//! projected onto the current view state and enforce boundary constraints
//! while handles are dragged.

pub mod config;
pub mod editor;
pub mod error;
pub mod graphics;
pub mod io;
pub mod markers;
pub mod models;
pub mod util;
pub mod waveform;

pub use config::{MarkerConfig, MarkerOptions};
pub use editor::Editor;
pub use error::ValidationError;
pub use markers::{HandleRef, MarkerEvent, PointStore, SegmentStore};
pub use models::{AnnotationSet, EntityKey, Point, PointSpec, Segment, SegmentSpec};
pub use waveform::{ResampledWaveform, Stage, View, ViewKind, WaveformData};
