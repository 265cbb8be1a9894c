use std::fmt::Write;

use colored::Colorize;

use crate::output::SecurityReport;

/// Human-facing run summary printed after the JSON files are written.
#[must_use]
pub fn render_summary(report: &SecurityReport) -> String {
    let mut output = String::new();
    let summary = &report.summary;

    let _ = writeln!(output, "{}", "CODE TO CLOUD - FORGED FINDINGS".bold());
    let _ = writeln!(
        output,
        "{}",
        "═══════════════════════════════════════════".bright_black()
    );

    let _ = writeln!(
        output,
        "  {} findings across {} services",
        summary.total_findings.to_string().bright_white().bold(),
        report.services.len()
    );
    let _ = writeln!(
        output,
        "  {} critical  {} high  {} medium  {} low  {} informational",
        summary.critical.to_string().red().bold(),
        summary.high.to_string().red(),
        summary.medium.to_string().yellow(),
        summary.low.to_string().green(),
        summary.informational.to_string().bright_black()
    );
    let _ = writeln!(
        output,
        "  stages: {} code / {} build / {} runtime",
        summary.by_stage.code, summary.by_stage.build, summary.by_stage.runtime
    );

    let chain_total: usize = report
        .services
        .iter()
        .map(|s| s.connected_findings.len())
        .sum();
    let _ = writeln!(output, "  {chain_total} connected chains");

    for service in &report.services {
        let _ = writeln!(
            output,
            "  ▸ {:<28} {:>3} findings, {} chains",
            service.name.bright_cyan(),
            service.findings_count,
            service.connected_findings.len()
        );
    }

    output
}
