//! Progress reporting for a prediction invocation
//!
//! Both reporters write to stderr so `-o json` / `-o raw` output on stdout
//! stays machine readable.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use wml_application::PredictionProgressNotifier;
use wml_domain::PredictionPhase;

/// Spinner that follows the invocation through its phases
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn step_label(phase: PredictionPhase) -> &'static str {
        match phase {
            PredictionPhase::Authenticating | PredictionPhase::Authenticated => "Step 1/2",
            _ => "Step 2/2",
        }
    }

    fn start(&self, phase: PredictionPhase) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(Self::step_label(phase));
        pb.set_message(format!("{}...", phase.display_name()));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.bar.lock() {
            if let Some(previous) = slot.replace(pb) {
                previous.finish_and_clear();
            }
        }
    }

    fn finish(&self, message: String) {
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(pb) = slot.take() {
                pb.finish_with_message(message);
            }
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionProgressNotifier for ProgressReporter {
    fn on_phase_change(&self, _from: PredictionPhase, to: PredictionPhase) {
        match to {
            PredictionPhase::Authenticating | PredictionPhase::Requesting => self.start(to),
            PredictionPhase::Authenticated => {
                self.finish(format!("{}", "Access token obtained".green()))
            }
            PredictionPhase::ResponseReceived => {
                self.finish(format!("{}", "Response received".green()))
            }
            PredictionPhase::Parsed | PredictionPhase::ParseFailed | PredictionPhase::Idle => {}
        }
    }

    fn on_failure(&self, phase: PredictionPhase, message: &str) {
        self.finish(format!(
            "{} {} failed: {}",
            "x".red(),
            phase.display_name(),
            message
        ));
    }
}

/// Simple text-based progress (no spinner)
pub struct SimpleProgress;

impl PredictionProgressNotifier for SimpleProgress {
    fn on_phase_change(&self, _from: PredictionPhase, to: PredictionPhase) {
        match to {
            PredictionPhase::Authenticating | PredictionPhase::Requesting => {
                eprintln!("{} {}", "->".cyan(), to.display_name().bold());
            }
            PredictionPhase::Authenticated | PredictionPhase::ResponseReceived => {
                eprintln!("  {} {}", "v".green(), to.display_name());
            }
            PredictionPhase::ParseFailed => {
                eprintln!("  {} {}", "!".yellow(), to.display_name());
            }
            PredictionPhase::Parsed | PredictionPhase::Idle => {}
        }
    }

    fn on_failure(&self, phase: PredictionPhase, message: &str) {
        eprintln!("  {} {} ({})", "x".red(), phase.display_name(), message);
    }
}
