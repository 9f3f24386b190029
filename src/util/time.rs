// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Time formatting for handle labels.

/// Format a time in seconds as `HH:MM:SS.hh`.
///
/// The hours field is left out when zero. With `drop_hundredths` the
/// `.hh` suffix is omitted. Every field is zero-padded to two digits.
pub fn nice_time(seconds: f64, drop_hundredths: bool) -> String {
    let seconds = seconds.max(0.0);
    let hundredths = (seconds.fract() * 100.0).floor() as u64;
    let whole = seconds.floor() as u64;
    let minutes = whole / 60;
    let hours = minutes / 60;

    let mut fields = Vec::with_capacity(3);
    if hours > 0 {
        fields.push(hours);
    }
    fields.push(minutes % 60);
    fields.push(whole % 60);

    let mut result = fields
        .iter()
        .map(|field| format!("{:02}", field))
        .collect::<Vec<_>>()
        .join(":");

    if !drop_hundredths {
        result.push_str(&format!(".{:02}", hundredths));
    }

    result
}
