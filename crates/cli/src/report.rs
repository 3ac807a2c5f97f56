use advisor_core::domain::recommendation::{AdvisoryReport, InvestmentRecommendation};
use std::fmt::Write;

const RULE_WIDTH: usize = 70;

fn section(out: &mut String, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "\n{rule}\n{title}\n{rule}\n");
}

fn recommendation(out: &mut String, rec: &InvestmentRecommendation) {
    let _ = writeln!(out, "Asset Name:      {}", rec.asset_name);
    let _ = writeln!(out, "Rationale:       {}", rec.rationale);
    let _ = writeln!(out, "Risk Level:      {}", rec.risk_level);
    let _ = writeln!(out, "Expected Return: {}", rec.expected_return);
    let _ = writeln!(out, "Time Horizon:    {}", rec.time_horizon);
}

/// Human-readable rendering of a finished report.
pub fn render(report: &AdvisoryReport) -> String {
    let mut out = String::new();

    section(&mut out, "FINAL FINANCIAL ADVISORY REPORT");
    let _ = writeln!(
        out,
        "Generated at: {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out, "Total processing time: {:.2} seconds", report.elapsed.as_secs_f64());

    section(&mut out, "MARKET ANALYSIS");
    let _ = writeln!(out, "{}", report.market_analysis.trim_end());

    section(&mut out, "SHORT-TERM INVESTMENT RECOMMENDATION");
    recommendation(&mut out, &report.short_term_investment);

    section(&mut out, "LONG-TERM INVESTMENT RECOMMENDATION");
    recommendation(&mut out, &report.long_term_investment);

    section(&mut out, "Report generation completed successfully!");
    out
}
