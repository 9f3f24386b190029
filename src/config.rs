// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Marker configuration.
//!
//! [`MarkerOptions`] is the plain, file-loadable form. [`MarkerConfig`] is
//! the resolved record handed to the stores once, at construction.

use crate::graphics::{DefaultLabels, DefaultMarkers, HandleHooks, LabelFactory, MarkerFactory};
use crate::util::color::random_rgba;
use crate::waveform::ViewKind;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

/// User-facing marker options, as read from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerOptions {
    /// Whether entities are editable when their spec does not say.
    pub editable_default: bool,
    /// Views that draw boundary lines even for non-editable entities.
    pub show_lines_when_uneditable: Vec<ViewKind>,
    pub randomize_segment_color: bool,
    pub segment_color: String,
    /// Fixed point color; random when absent.
    pub point_color: Option<String>,
    pub in_marker_color: Option<String>,
    pub out_marker_color: Option<String>,
    pub point_marker_color: Option<String>,
    /// Leave hundredths of a second out of handle labels.
    pub compact_time_labels: bool,
    pub notify_dbl_click: bool,
    pub notify_drag_end: bool,
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            editable_default: false,
            show_lines_when_uneditable: vec![ViewKind::Overview],
            randomize_segment_color: true,
            segment_color: "rgba(0, 225, 128, 1)".to_string(),
            point_color: None,
            in_marker_color: None,
            out_marker_color: None,
            point_marker_color: None,
            compact_time_labels: false,
            notify_dbl_click: true,
            notify_drag_end: true,
        }
    }
}

impl MarkerOptions {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let options = serde_yaml::from_str(yaml).context("Invalid marker options")?;
        Ok(options)
    }

    /// Load options from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml_str(&yaml)
    }
}

/// How an entity gets a color when its spec has none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorPolicy {
    Random,
    Fixed(String),
}

impl ColorPolicy {
    pub fn pick(&self) -> String {
        match self {
            ColorPolicy::Random => random_rgba(),
            ColorPolicy::Fixed(color) => color.clone(),
        }
    }
}

/// Resolved marker configuration shared by the segment and point stores.
pub struct MarkerConfig {
    pub editable_default: bool,
    pub show_lines_in_views: BTreeSet<ViewKind>,
    pub segment_color: ColorPolicy,
    pub point_color: ColorPolicy,
    pub compact_time_labels: bool,
    pub hooks: HandleHooks,
    pub marker_factory: Box<dyn MarkerFactory>,
    pub label_factory: Box<dyn LabelFactory>,
}

impl MarkerConfig {
    /// Whether non-editable entities still get boundary lines in `view`.
    pub fn shows_lines_in(&self, view: ViewKind) -> bool {
        self.show_lines_in_views.contains(&view)
    }
}

impl Default for MarkerConfig {
    fn default() -> Self {
        MarkerOptions::default().into()
    }
}

impl From<MarkerOptions> for MarkerConfig {
    fn from(options: MarkerOptions) -> Self {
        let segment_color = if options.randomize_segment_color {
            ColorPolicy::Random
        } else {
            ColorPolicy::Fixed(options.segment_color)
        };
        let point_color = options
            .point_color
            .map_or(ColorPolicy::Random, ColorPolicy::Fixed);

        Self {
            editable_default: options.editable_default,
            show_lines_in_views: options.show_lines_when_uneditable.into_iter().collect(),
            segment_color,
            point_color,
            compact_time_labels: options.compact_time_labels,
            hooks: HandleHooks {
                dbl_click: options.notify_dbl_click,
                drag_end: options.notify_drag_end,
            },
            marker_factory: Box::new(DefaultMarkers {
                in_color: options.in_marker_color,
                out_color: options.out_marker_color,
                point_color: options.point_marker_color,
            }),
            label_factory: Box::new(DefaultLabels),
        }
    }
}

impl fmt::Debug for MarkerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkerConfig")
            .field("editable_default", &self.editable_default)
            .field("show_lines_in_views", &self.show_lines_in_views)
            .field("segment_color", &self.segment_color)
            .field("point_color", &self.point_color)
            .field("compact_time_labels", &self.compact_time_labels)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_yaml_overrides_and_defaults() {
        let options = MarkerOptions::from_yaml_str(
            "editable_default: true\n\
             show_lines_when_uneditable: [overview, zoomview]\n\
             randomize_segment_color: false\n\
             segment_color: '#336699'\n",
        )
        .unwrap();

        assert!(options.editable_default);
        assert_eq!(
            options.show_lines_when_uneditable,
            vec![ViewKind::Overview, ViewKind::Zoom]
        );
        assert!(options.notify_drag_end);

        let config = MarkerConfig::from(options);
        assert_eq!(config.segment_color, ColorPolicy::Fixed("#336699".to_string()));
        assert_eq!(config.point_color, ColorPolicy::Random);
        assert!(config.shows_lines_in(ViewKind::Zoom));
    }

    #[test]
    fn test_unknown_view_is_an_error() {
        assert!(MarkerOptions::from_yaml_str("show_lines_when_uneditable: [sideview]").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "compact_time_labels: true").unwrap();

        let options = MarkerOptions::load(file.path()).unwrap();
        assert!(options.compact_time_labels);
        assert!(!options.editable_default);
    }
}
