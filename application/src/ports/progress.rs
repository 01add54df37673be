//! Progress notification port
//!
//! Defines the interface for reporting progress while a feature waits on the model.

use leap_domain::FeatureKind;

/// Callback for progress updates during generation
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain log line, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called right before the model request is sent
    fn on_request_start(&self, feature: FeatureKind);

    /// Called once the request has an outcome
    fn on_request_complete(&self, feature: FeatureKind, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_request_start(&self, _feature: FeatureKind) {}
    fn on_request_complete(&self, _feature: FeatureKind, _success: bool) {}
}
