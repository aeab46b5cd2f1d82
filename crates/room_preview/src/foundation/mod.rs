//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the previewer:
//! - 2D math types and operations
//! - Handle-based collections for scene nodes
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod logging;
