// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Retained scene primitives for annotation proxies.
//!
//! Each proxy is a [`Group`](shapes::Group) of boundary handles, a label and
//! a waveform mark. Layers collect the groups attached to a view and, when
//! drawn, flatten them into a display list of [`Primitive`](layer::Primitive)s
//! that a rendering backend paints.

pub mod factory;
pub mod layer;
pub mod shapes;

pub use factory::{DefaultLabels, DefaultMarkers, HandleSpec, LabelFactory, MarkerFactory};
pub use layer::{Layer, LayerKind, LayerStack, Primitive};
pub use shapes::{Group, Handle, HandleHooks, HandleRole, Handles, TextLabel, WaveformMark};
