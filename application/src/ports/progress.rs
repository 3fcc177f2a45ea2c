//! Progress notification port
//!
//! Defines the interface for reporting progress of a prediction invocation.

use wml_domain::PredictionPhase;

/// Callback for phase changes during a prediction invocation
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain text, nothing).
pub trait PredictionProgressNotifier: Send + Sync {
    /// Called on every phase transition
    fn on_phase_change(&self, from: PredictionPhase, to: PredictionPhase);

    /// Called when a step fails, before the phase returns to `Idle`
    fn on_failure(&self, _phase: PredictionPhase, _message: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl PredictionProgressNotifier for NoProgress {
    fn on_phase_change(&self, _from: PredictionPhase, _to: PredictionPhase) {}
}
