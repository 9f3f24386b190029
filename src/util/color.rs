// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation colors.
//!
//! Colors are stored on entities as CSS-style strings so that they survive
//! a save/load round-trip unchanged. The UI parses them when painting.

use rand::Rng;

/// A random opaque color in `rgba(r, g, b, 1)` form.
pub fn random_rgba() -> String {
    let mut rng = rand::rng();
    let r: u8 = rng.random_range(0..255);
    let g: u8 = rng.random_range(0..255);
    let b: u8 = rng.random_range(0..255);
    format!("rgba({}, {}, {}, 1)", r, g, b)
}

/// Parse `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
///
/// The alpha of the `rgba` form is a 0..=1 float, as in CSS.
pub fn parse_rgba(color: &str) -> Option<[u8; 4]> {
    let color = color.trim();

    if let Some(hex) = color.strip_prefix('#') {
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        return match hex.len() {
            6 => Some([byte(0)?, byte(2)?, byte(4)?, 255]),
            8 => Some([byte(0)?, byte(2)?, byte(4)?, byte(6)?]),
            _ => None,
        };
    }

    let inner = color
        .strip_prefix("rgba(")
        .or_else(|| color.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();

    let channel = |s: &str| s.parse::<u8>().ok();
    match parts.as_slice() {
        [r, g, b] => Some([channel(r)?, channel(g)?, channel(b)?, 255]),
        [r, g, b, a] => {
            let alpha = a.parse::<f32>().ok()?.clamp(0.0, 1.0);
            Some([channel(r)?, channel(g)?, channel(b)?, (alpha * 255.0).round() as u8])
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_color_parses_back() {
        let color = random_rgba();
        assert!(color.starts_with("rgba("));
        let rgba = parse_rgba(&color).unwrap();
        assert_eq!(rgba[3], 255);
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(parse_rgba("#ff8000"), Some([255, 128, 0, 255]));
        assert_eq!(parse_rgba("#ff800080"), Some([255, 128, 0, 128]));
        assert_eq!(parse_rgba("rgb(1, 2, 3)"), Some([1, 2, 3, 255]));
        assert_eq!(parse_rgba("rgba(10, 20, 30, 0.5)"), Some([10, 20, 30, 128]));
        assert_eq!(parse_rgba("tomato"), None);
    }
}
