//! Cross-module tests for building and editing previews

mod fixtures;
