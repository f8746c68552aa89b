//! Console presentation for command results
//!
//! Status lines and end-of-run summaries are styled with `console`. The
//! operator-facing record of a run lives in the event log, not here.

use console::Style;

use crate::drivers::{StageReport, StagingPlan};
use crate::fonts::{InstallOutcome, InstallSummary};

macro_rules! display_field {
    ($label:expr, $value:expr) => {
        println!("    {} {}", Style::new().bold().apply_to($label), $value)
    };
}

/// Print one line per font followed by the totals
pub fn display_install_summary(summary: &InstallSummary) {
    for report in &summary.reports {
        let (marker, detail) = match &report.outcome {
            InstallOutcome::Installed { value_name } => (
                Style::new().green().apply_to("installed"),
                format!("as '{value_name}'"),
            ),
            InstallOutcome::AlreadyInstalled => (
                Style::new().dim().apply_to("skipped"),
                "already installed".to_string(),
            ),
            InstallOutcome::UnsupportedType(label) => (
                Style::new().dim().apply_to("skipped"),
                format!("unsupported type '{label}'"),
            ),
            InstallOutcome::Failed(reason) => (Style::new().red().apply_to("failed"), reason.clone()),
        };
        println!("  {} {} {}", marker, report.file_name, Style::new().dim().apply_to(detail));
    }

    let totals = format!(
        "{} installed, {} skipped, {} failed",
        summary.installed(),
        summary.skipped(),
        summary.failed()
    );
    if summary.failed() > 0 {
        println!("{}", Style::new().yellow().bold().apply_to(totals));
    } else {
        println!("{}", Style::new().green().bold().apply_to(totals));
    }
}

/// Print the staged package and where its content went
pub fn display_stage_report(plan: &StagingPlan, report: &StageReport, target: &str) {
    println!(
        "{} {}",
        Style::new().green().bold().apply_to("Staged"),
        Style::new().bold().yellow().apply_to(plan.description())
    );
    display_field!(
        "Package:",
        format!("{} ({})", report.package.name, report.package.id)
    );
    display_field!(
        "Category:",
        format!("{} ({})", report.category.name, report.category.id)
    );
    display_field!("Source:", plan.source_path.display());
    let created = if report.version_folder_created {
        " (created)"
    } else {
        ""
    };
    display_field!(
        "Content:",
        format!("{}{}", plan.version_folder.display(), created)
    );
    display_field!("Driver files:", report.driver_files);
    let marker_state = if report.markers.created {
        "new"
    } else {
        "reused"
    };
    display_field!(
        "Marker:",
        format!(
            "{} ({}, {} folder(s))",
            plan.marker_file_name,
            marker_state,
            report.markers.copies + 1
        )
    );

    match &report.distribution_error {
        None => display_field!("Distributed to:", target),
        Some(reason) => {
            println!(
                "{} distribution to '{}' failed: {}",
                Style::new().yellow().bold().apply_to("Warning:"),
                target,
                reason
            );
            println!(
                "  {}",
                Style::new()
                    .dim()
                    .apply_to("The package is complete. Distribute its content manually.")
            );
        }
    }
}
