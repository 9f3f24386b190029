// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! WAVEMARKS - segment and point annotations for audio waveforms.
//!
//! A desktop editor for marking time segments and points over an overview
//! and a zoomable view of an audio timeline.
//!
//! Usage: `wavemarks [OPTIONS.yaml]`

mod app;
mod ui;

use anyhow::Result;
use app::WavemarksApp;
use std::path::PathBuf;
use wavemarks::{MarkerConfig, MarkerOptions};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let options = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            log::info!("Loading marker options from {}", path.display());
            MarkerOptions::load(&path)?
        }
        None => MarkerOptions {
            editable_default: true,
            ..Default::default()
        },
    };
    let config = MarkerConfig::from(options);
    log::debug!("Marker configuration: {:?}", config);

    // Configure egui options
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title("WAVEMARKS - Waveform Annotations"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "WAVEMARKS",
        native_options,
        Box::new(|_cc| Ok(Box::new(WavemarksApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
