// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Waveform views and their data providers.
//!
//! A [`Stage`] holds the overview and the zoom [`View`]. Each view owns a
//! [`WaveformData`] provider that maps between time and pixel offsets at the
//! view's current scale, and a layer stack the annotation stores draw into.

pub mod data;
pub mod view;
pub mod zoom;

pub use data::{ResampledWaveform, WaveformData};
pub use view::{Stage, View, ViewKind};
pub use zoom::{StaticZoom, ZoomAdapter};
