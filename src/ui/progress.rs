use crate::importer::ImportSummary;
use crate::ui::output::import_summary;
use indicatif::ProgressBar;
use std::time::Duration;

enum Mode {
    Silent,
    Spinner(ProgressBar),
    Lines,
}

/// Running drug count during an import.
///
/// A spinner on a terminal, one `Drugs in database: N` line per drug when
/// piped, nothing when quiet.
pub struct ImportProgress {
    mode: Mode,
}

impl ImportProgress {
    pub fn new(quiet: bool) -> Self {
        let mode = if quiet {
            Mode::Silent
        } else if console::Term::stdout().is_term() {
            let pb = ProgressBar::new_spinner();
            pb.set_message("Reading drug records");
            pb.enable_steady_tick(Duration::from_millis(100));
            Mode::Spinner(pb)
        } else {
            Mode::Lines
        };
        Self { mode }
    }

    pub fn update(&self, drugs: usize) {
        match &self.mode {
            Mode::Silent => {}
            Mode::Spinner(pb) => pb.set_message(format!("Drugs in database: {}", drugs)),
            Mode::Lines => println!("Drugs in database: {}", drugs),
        }
    }

    /// Stop the spinner without a summary, leaving the last count visible
    pub fn abandon(&self) {
        if let Mode::Spinner(pb) = &self.mode {
            pb.abandon();
        }
    }

    pub fn finish(&self, summary: &ImportSummary) {
        if let Mode::Spinner(pb) = &self.mode {
            pb.finish_and_clear();
        }
        if matches!(self.mode, Mode::Silent) {
            return;
        }

        import_summary(summary);
    }
}
