//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Integer pixel geometry (points, sizes, rectangles) and rotation math
//! - Logging utilities

pub mod math;
pub mod logging;
