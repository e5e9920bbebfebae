//! Terminal output formatting for idemsql reports.
//! Uses comfy-table for the change table and colored for
//! decision-aware terminal styling.

use colored::Colorize;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use serde::Serialize;

use idemsql_core::rewrite::{AppliedChange, RewriteDecision};
use idemsql_core::{CheckReport, RewriteReport};

/// Print any report as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize report: {}", e),
    }
}

/// Return a colored label for a rewrite decision.
fn format_decision(decision: RewriteDecision) -> String {
    match decision {
        RewriteDecision::CommentOut => "Commented out".red().to_string(),
        RewriteDecision::InsertGuard => "Guard added".green().to_string(),
        RewriteDecision::NormalizeTypo => "Typo fixed".yellow().to_string(),
        RewriteDecision::NoChange => "Unchanged".dimmed().to_string(),
    }
}

/// Format line changes as a colored table.
pub fn print_changes_table(changes: &[AppliedChange]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Line"),
            Cell::new("Statement"),
            Cell::new("Table"),
            Cell::new("Action"),
        ]);

    for change in changes {
        table.add_row(vec![
            Cell::new(change.line),
            Cell::new(change.kind),
            Cell::new(change.table.as_deref().unwrap_or("")),
            Cell::new(format_decision(change.decision)),
        ]);
    }

    println!("{table}");
}

/// Print changed lines as `-`/`+` pairs.
pub fn print_line_diff(changes: &[AppliedChange]) {
    for change in changes {
        println!("{}", format!("@@ line {} @@", change.line).cyan());
        println!("{}", format!("-{}", change.before).red());
        println!("{}", format!("+{}", change.after).green());
    }
}

/// Print a rewrite report summary.
pub fn print_rewrite_report(report: &RewriteReport, show_diff: bool) {
    let target = report.target.display();
    println!(
        "{}",
        format!(
            "Scanned {} line(s), {} statement(s) ({} CREATE TABLE, {} DROP TABLE) in {}",
            report.lines_scanned,
            report.statements.total(),
            report.statements.create_table,
            report.statements.drop_table,
            target
        )
        .dimmed()
    );

    if report.changes.is_empty() {
        println!(
            "{}",
            "Script is already idempotent. No changes necessary.".green()
        );
        if report.written {
            println!("  {} Backup saved to {}", "→".green(), report.backup.display());
        }
        return;
    }

    print_changes_table(&report.changes);
    if show_diff {
        print_line_diff(&report.changes);
    }

    let summary = format!(
        "{} DROP TABLE line(s) commented out, {} guard(s) added, {} typo(s) fixed, {} already guarded",
        report.drops_commented, report.guards_inserted, report.typos_fixed, report.already_guarded
    );

    if report.dry_run {
        println!("{}", format!("Dry run: {}", summary).yellow().bold());
        println!("{}", "Nothing was written.".dimmed());
        return;
    }

    println!("{}", format!("Patched {}: {}", target, summary).green().bold());
    println!("  {} Backup saved to {}", "→".green(), report.backup.display());
}

/// Print a check report.
pub fn print_check_report(report: &CheckReport, show_diff: bool) {
    if report.idempotent {
        println!(
            "{}",
            format!("{} is idempotent.", report.target.display())
                .green()
                .bold()
        );
        return;
    }

    println!(
        "{}",
        format!(
            "{} needs {} line(s) rewritten:",
            report.target.display(),
            report.pending.len()
        )
        .yellow()
        .bold()
    );
    print_changes_table(&report.pending);
    if show_diff {
        print_line_diff(&report.pending);
    }
}
