//! Operator alerting hook
//!
//! The pipeline notifies an [`AlertSink`] whenever the delete gate
//! refuses a job. No transport is wired in; [`NoAlert`] is the default
//! and deployments that want email/paging plug in their own sink.

/// Receives gate-refusal notifications
pub trait AlertSink {
    /// Called once per refused job with the operator-facing warning
    fn notify(&self, job_name: &str, warning: &str);
}

/// Sink that drops every notification
#[derive(Debug, Default)]
pub struct NoAlert;

impl AlertSink for NoAlert {
    fn notify(&self, _job_name: &str, _warning: &str) {}
}
