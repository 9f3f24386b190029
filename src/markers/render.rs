// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Explicit layer flushing.
//!
//! Store mutations never draw. A store calls [`flush`] once after a batch
//! (or once per drag step), which redraws its layer in every view exactly
//! once.

use super::binder::Binder;
use crate::waveform::{Stage, ViewKind};

/// Redraw the binder's layer in both views.
pub fn flush(stage: &mut Stage, binder: &Binder) {
    for kind in ViewKind::ALL {
        stage
            .view_mut(kind)
            .layer_mut(binder.layer())
            .draw(|key| binder.group(key, kind));
    }
}

/// Total draws of `binder`'s layer across both views.
pub fn draw_count(stage: &Stage, binder: &Binder) -> u64 {
    ViewKind::ALL
        .iter()
        .filter_map(|&kind| stage.view(kind).layer(binder.layer()))
        .map(|layer| layer.draw_calls())
        .sum()
}
