//! Progress reporting while waiting on the model

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use leap_application::ports::progress::ProgressNotifier;
use leap_domain::FeatureKind;
use std::sync::Mutex;
use std::time::Duration;

/// Spinner shown on stderr while a feature request is in flight
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_request_start(&self, feature: FeatureKind) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(feature.display_name().to_string());
        pb.set_message("Thinking...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(pb);
        }
    }

    fn on_request_complete(&self, _feature: FeatureKind, success: bool) {
        let Some(pb) = self.spinner.lock().ok().and_then(|mut slot| slot.take()) else {
            return;
        };
        if success {
            pb.finish_with_message(format!("{}", "done".green()));
        } else {
            pb.abandon_with_message(format!("{}", "failed".red()));
        }
    }
}

/// Plain line-based progress for non-interactive terminals
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_request_start(&self, feature: FeatureKind) {
        eprintln!("{} {}...", "->".cyan(), feature.display_name().bold());
    }

    fn on_request_complete(&self, feature: FeatureKind, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), feature.display_name());
        } else {
            eprintln!("  {} {} (failed)", "x".red(), feature.display_name());
        }
    }
}
