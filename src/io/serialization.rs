// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation set serialization and deserialization.
//!
//! This module handles exporting and importing annotation sets in YAML
//! and JSON formats. Imported files are only parsed here; the editor
//! validates every entity when the set is loaded.

use crate::models::AnnotationSet;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// On-disk annotation formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path.extension().and_then(|s| s.to_str());
        match extension.map(str::to_ascii_lowercase).as_deref() {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => bail!("Unsupported file extension: {:?}", extension),
        }
    }
}

/// Export annotations to YAML format.
pub fn export_yaml(data: &AnnotationSet, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(data)?;
    std::fs::write(path, yaml).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Export annotations to JSON format.
pub fn export_json(data: &AnnotationSet, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Import annotations from YAML format.
pub fn import_yaml(path: &Path) -> Result<AnnotationSet> {
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let data = serde_yaml::from_str(&yaml).context("Invalid YAML annotations")?;
    Ok(data)
}

/// Import annotations from JSON format.
pub fn import_json(path: &Path) -> Result<AnnotationSet> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let data = serde_json::from_str(&json).context("Invalid JSON annotations")?;
    Ok(data)
}

/// Export in the format named by `path`'s extension.
pub fn export(data: &AnnotationSet, path: &Path) -> Result<()> {
    match Format::from_path(path)? {
        Format::Yaml => export_yaml(data, path)?,
        Format::Json => export_json(data, path)?,
    }
    log::info!(
        "Exported {} segments and {} points to {}",
        data.segments.len(),
        data.points.len(),
        path.display()
    );
    Ok(())
}

/// Import in the format named by `path`'s extension.
pub fn import(path: &Path) -> Result<AnnotationSet> {
    let data = match Format::from_path(path)? {
        Format::Yaml => import_yaml(path)?,
        Format::Json => import_json(path)?,
    };
    log::info!(
        "Imported {} segments and {} points from {}",
        data.segments.len(),
        data.points.len(),
        path.display()
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Editor, PointSpec, SegmentSpec, View, ViewKind};
    use crate::waveform::ResampledWaveform;
    use std::path::PathBuf;

    fn sample() -> AnnotationSet {
        let overview = View::new(
            ViewKind::Overview,
            1000,
            100,
            Box::new(ResampledWaveform::new(100, 10_000, 10)),
        );
        let zoom = View::new(
            ViewKind::Zoom,
            500,
            200,
            Box::new(ResampledWaveform::new(100, 10_000, 1)),
        );
        let mut editor = Editor::new(Default::default(), overview, zoom);
        editor
            .segments()
            .create(
                SegmentSpec::new(1.5, 4.0)
                    .editable(true)
                    .with_label("intro")
                    .with_bounds(Some(1.0), None),
            )
            .unwrap();
        editor.points().create(PointSpec::new(7.25)).unwrap();
        editor.export(Some("take1.wav".to_string()))
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a.yml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("a.JSON")).unwrap(), Format::Json);
        assert!(Format::from_path(Path::new("a.txt")).is_err());
        assert!(Format::from_path(Path::new("annotations")).is_err());
    }

    #[test]
    fn test_yaml_and_json_files_reload_identically() {
        let dir = tempfile::tempdir().unwrap();
        let data = sample();

        for name in ["set.yaml", "set.json"] {
            let path: PathBuf = dir.path().join(name);
            export(&data, &path).unwrap();
            assert_eq!(import(&path).unwrap(), data);
        }
    }

    #[test]
    fn test_json_uses_camel_case_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("set.json");
        export_json(&sample(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"startTime\": 1.5"));
        assert!(text.contains("\"leftBound\": 1.0"));
        assert!(text.contains("\"audioFile\": \"take1.wav\""));
        assert!(!text.contains("rightBound"));
    }

    #[test]
    fn test_missing_and_malformed_files_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(import(&dir.path().join("missing.yaml")).is_err());

        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ \"segments\": 3 }").unwrap();
        let err = import(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid JSON"));
    }
}
