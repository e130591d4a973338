use crate::importer::ImportSummary;
use crate::query::{unknown_drug_message, QueryOutcome};
use crate::ui::theme::{stderr_theme, stdout_theme, Theme};
use crate::ui::Icons;
use indicatif::HumanDuration;
use std::fmt::Write;
use std::path::Path;

/// Query outcome as printed in text mode.
///
/// With a plain theme this is exactly `outcome.render()`, plus a trailing
/// newline after the unknown-drug message.
pub fn format_outcome(outcome: &QueryOutcome, theme: &Theme) -> String {
    let mut out = String::new();
    match outcome {
        QueryOutcome::Interactions(interactions) => {
            for interaction in interactions {
                let pair = format!("{} interacts with {}", interaction.drug_name, interaction.interacts_with);
                let _ = writeln!(out, "{}", theme.pair.style(pair));
                let _ = writeln!(out, "{}", theme.description.style(&interaction.description));
                out.push('\n');
            }
        }
        QueryOutcome::UnknownDrug(name) => {
            let _ = writeln!(out, "{}", theme.unknown.style(unknown_drug_message(name)));
        }
    }
    out
}

pub fn print_outcome(outcome: &QueryOutcome) {
    print!("{}", format_outcome(outcome, stdout_theme()));
}

pub fn import_banner(source: &Path, database: &Path) {
    let theme = stdout_theme();
    println!(
        "{} {}",
        Icons::PILL,
        theme.banner.style(format!("Importing {}", source.display()))
    );
    println!("  {} {}", theme.label.style("Database:"), database.display());
}

pub fn import_summary(summary: &ImportSummary) {
    let theme = stdout_theme();
    println!();
    println!("{} {}", Icons::CHECK, theme.done.style("Import complete"));
    println!("  {} {}", theme.label.style("Drugs:"), summary.drugs);
    println!("  {} {}", theme.label.style("Interactions:"), summary.interactions);
    println!("  {} {}", theme.label.style("Elapsed:"), HumanDuration(summary.elapsed));
}

pub fn stats_banner(database: &Path) {
    let theme = stdout_theme();
    println!(
        "{} {} {}",
        Icons::STATS,
        theme.banner.style("DrugQry Statistics"),
        theme.label.style(database.display())
    );
}

pub fn config_written(path: &Path) {
    println!("{} {}", Icons::CHECK, stdout_theme().done.style(format!("Wrote {}", path.display())));
}

pub fn config_missing(path: &Path) {
    eprintln!("{} Config file {} not found, using defaults", Icons::WARN, path.display());
}

/// Report a failed command on stderr, with its cause chain
pub fn fatal(err: &anyhow::Error) {
    eprintln!("{} {}", Icons::CROSS, stderr_theme().failure.style(format!("{:#}", err)));
}
