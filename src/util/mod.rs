// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Small helpers shared by the stores and the UI.

pub mod color;
pub mod time;

pub use time::nice_time;
