//! Editor host boundary
//!
//! The editor shell is opaque to the previewer. It only hears about failed
//! items and finished compositions.

use crate::scene::CompositionReport;

/// Callbacks into the editor shell
pub trait EditorHost {
    /// Show a non-blocking error notification
    fn notify_error(&mut self, message: &str);

    /// Called once a room has been composed
    fn composition_finished(&mut self, _report: &CompositionReport) {}
}

/// Host that forwards notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHost;

impl EditorHost for LogHost {
    fn notify_error(&mut self, message: &str) {
        log::warn!("Editor notification: {}", message);
    }
}

/// Host that keeps every notification for later display
#[derive(Debug, Clone, Default)]
pub struct CollectingHost {
    errors: Vec<String>,
    reports: Vec<CompositionReport>,
}

impl CollectingHost {
    /// Create an empty host
    pub fn new() -> Self {
        Self::default()
    }

    /// Error messages in the order they arrived
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Composition reports in the order they arrived
    pub fn reports(&self) -> &[CompositionReport] {
        &self.reports
    }
}

impl EditorHost for CollectingHost {
    fn notify_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn composition_finished(&mut self, report: &CompositionReport) {
        self.reports.push(report.clone());
    }
}
