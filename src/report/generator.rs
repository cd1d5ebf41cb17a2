//! Report generation.
//!
//! This module renders a dashboard [`Report`] as Markdown, JSON or a short
//! plain-text summary.

use crate::config::ReportConfig;
use crate::models::{
    BenchmarkComparison, Insight, MetricRecord, Platform, PlatformEngagement, Report,
    ReportMetadata, SummaryMetrics, TrendReport, WeekdayProfile,
};
use anyhow::Result;

/// Format an integer with thousands separators (`12,345`).
fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report, options: &ReportConfig) -> String {
    let mut output = String::new();

    // Title
    output.push_str(&format!(
        "# {} Social Dashboard\n\n",
        report.metadata.school_name
    ));

    if let Some(ref logo) = report.metadata.logo_url {
        output.push_str(&format!("![{} logo]({})\n\n", report.metadata.school_name, logo));
    }

    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_warnings_section(&report.warnings));
    output.push_str(&generate_key_metrics_section(&report.summary));
    output.push_str(&generate_insights_section(&report.insights));
    output.push_str(&generate_platform_section(report));
    output.push_str(&generate_trend_section(&report.trend));

    if options.include_weekdays {
        output.push_str(&generate_weekday_section(&report.weekday_profile));
    }
    if options.include_benchmark {
        output.push_str(&generate_benchmark_section(&report.benchmark));
    }
    if options.include_top_days {
        output.push_str(&generate_top_days_section(&report.top_days));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Overview\n\n");
    section.push_str(&format!("- **School:** {}\n", metadata.school_name));
    if let Some(ref user) = metadata.generated_for {
        section.push_str(&format!("- **Prepared for:** {}\n", user));
    }
    section.push_str(&format!(
        "- **Period:** {} to {}\n",
        metadata.period.start(),
        metadata.period.end()
    ));
    section.push_str(&format!("- **Platform:** {}\n", metadata.platform_filter));
    section.push_str(&format!("- **Data points:** {}\n", metadata.record_count));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str("\n*Figures are mock data, reproducible for this school name.*\n\n");

    section
}

fn generate_warnings_section(warnings: &[String]) -> String {
    if warnings.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## Input Warnings\n\n");
    for warning in warnings {
        section.push_str(&format!("- ⚠️ {}\n", warning));
    }
    section.push('\n');

    section
}

/// Generate the headline figures table.
fn generate_key_metrics_section(summary: &SummaryMetrics) -> String {
    let mut section = String::new();

    section.push_str("## Key Metrics\n\n");
    section.push_str("| Followers | Avg. Engagement | Total Reach | Total Interactions |\n");
    section.push_str("|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {:.1}% | {} | {} |\n\n",
        thousands(summary.latest_followers),
        summary.mean_engagement,
        thousands(summary.total_reach),
        thousands(summary.total_interactions)
    ));

    section
}

fn generate_insights_section(insights: &[Insight]) -> String {
    let mut section = String::new();

    section.push_str("## Insights & Tips\n\n");
    for insight in insights {
        section.push_str(&format!(
            "- {} **{}:** {}\n",
            insight.severity.emoji(),
            insight.severity,
            insight.message
        ));
    }
    section.push('\n');

    section
}

/// Per-platform engagement plus the best/worst comparison, if applicable.
fn generate_platform_section(report: &Report) -> String {
    let mut section = String::new();

    section.push_str("## Platforms\n\n");

    if !report.engagement_by_platform.is_empty() {
        section.push_str(&generate_platform_table(&report.engagement_by_platform));
    }

    match report.summary.comparison {
        Some(ref comparison) => {
            section.push_str(&format!(
                "**Strongest:** {} | **Weakest:** {}\n\n",
                comparison.best.platform, comparison.worst.platform
            ));
        }
        None => {
            section.push_str(
                "*Platform comparison: not applicable (fewer than two platforms selected).*\n\n",
            );
        }
    }

    if !report.summary.growth.is_empty() {
        section.push_str("| Platform | Followers (start) | Followers (end) | Growth |\n");
        section.push_str("|:---|:---:|:---:|:---:|\n");
        for growth in &report.summary.growth {
            section.push_str(&format!(
                "| {} | {} | {} | {:+} |\n",
                growth.platform,
                thousands(growth.first_followers),
                thousands(growth.last_followers),
                growth.delta()
            ));
        }
        section.push('\n');
    }

    section
}

fn generate_platform_table(rows: &[PlatformEngagement]) -> String {
    let mut table = String::new();

    table.push_str("| Platform | Avg. Engagement | Days |\n");
    table.push_str("|:---|:---:|:---:|\n");
    for row in rows {
        table.push_str(&format!(
            "| {} | {:.2}% | {} |\n",
            row.platform, row.mean_engagement, row.records
        ));
    }
    table.push('\n');

    table
}

fn generate_trend_section(trend: &TrendReport) -> String {
    format!(
        "## Engagement Trend\n\n**{}** ({:+.2}% average change per day)\n\n",
        trend.direction, trend.mean_change_pct
    )
}

fn generate_weekday_section(profile: &WeekdayProfile) -> String {
    let mut section = String::new();

    section.push_str("## Best Days to Post\n\n");
    section.push_str("| Day | Avg. Engagement |\n");
    section.push_str("|:---|:---:|\n");

    let peak = profile.peak().map(|p| p.weekday.as_str());
    for day in profile.days() {
        let marker = if Some(day.weekday.as_str()) == peak { " ⭐" } else { "" };
        section.push_str(&format!(
            "| {}{} | {:.2}% |\n",
            day.weekday, marker, day.mean_engagement
        ));
    }
    section.push('\n');

    section
}

fn generate_benchmark_section(benchmark: &BenchmarkComparison) -> String {
    if benchmark.rows.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Benchmark vs. Average School\n\n");
    section.push_str("| Metric | Your School | Average School | |\n");
    section.push_str("|:---|:---:|:---:|:---:|\n");
    for row in &benchmark.rows {
        let badge = if row.above_average() { "🟢" } else { "🔴" };
        section.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            row.metric, row.school, row.average, badge
        ));
    }
    section.push_str("\n*Average school values are mock reference figures.*\n\n");

    section
}

fn generate_top_days_section(records: &[MetricRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Top Days\n\n");
    section.push_str("| Date | Platform | Likes | Comments | Shares | Reach |\n");
    section.push_str("|:---|:---|:---:|:---:|:---:|:---:|\n");
    for record in records {
        section.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            record.date,
            record.platform,
            record.likes,
            record.comments,
            record.shares,
            thousands(record.reach)
        ));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by SchoolSocial*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Generate the short plain-text report.
pub fn generate_text_report(report: &Report) -> String {
    let metadata = &report.metadata;
    let summary = &report.summary;
    let mut lines = Vec::new();

    lines.push(format!("Social Media Report - {}", metadata.school_name));
    lines.push(format!(
        "Period: {} to {}",
        metadata.period.start(),
        metadata.period.end()
    ));
    lines.push(format!("Platform: {}", metadata.platform_filter));
    lines.push(String::new());
    lines.push(format!(
        "Total followers: {}",
        thousands(summary.latest_followers)
    ));
    lines.push(format!("Average engagement: {:.1}%", summary.mean_engagement));
    lines.push(format!("Total reach: {}", thousands(summary.total_reach)));
    lines.push(format!(
        "Total interactions: {}",
        thousands(summary.total_interactions)
    ));
    lines.push(match summary.comparison {
        Some(ref comparison) => format!("Best platform: {}", comparison.best.platform),
        None => "Best platform: not applicable".to_string(),
    });
    if let Some(growth) = summary.growth_for(Platform::TikTok) {
        lines.push(format!("TikTok growth: {:+} followers", growth.delta()));
    }

    if !report.insights.is_empty() {
        lines.push(String::new());
        lines.push("Insights:".to_string());
        for insight in &report.insights {
            lines.push(format!("- [{}] {}", insight.severity, insight.message));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated on {}",
        metadata.generated_at.format("%d-%m-%Y")
    ));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::dashboard::{build, DashboardRequest};
    use crate::models::PlatformFilter;
    use crate::session::Session;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn create_test_report(filter: PlatformFilter) -> Report {
        let mut config = Config::default();
        config.dashboard.platform = filter;
        let request = DashboardRequest {
            start: NaiveDate::from_ymd_opt(2025, 1, 1),
            end: NaiveDate::from_ymd_opt(2025, 1, 14),
            today: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            generated_at: Utc.with_ymd_and_hms(2025, 1, 31, 9, 30, 0).unwrap(),
        };
        build(&config, &Session::anonymous("Oak Tree Primary"), &request).report
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = create_test_report(PlatformFilter::All);
        let markdown = generate_markdown_report(&report, &ReportConfig::default());

        assert!(markdown.starts_with("# Oak Tree Primary Social Dashboard"));
        assert!(markdown.contains("## Key Metrics"));
        assert!(markdown.contains("## Insights & Tips"));
        assert!(markdown.contains("**Strongest:** TikTok"));
        assert!(markdown.contains("## Best Days to Post"));
        assert!(markdown.contains("## Benchmark vs. Average School"));
        assert!(markdown.contains("## Top Days"));
        assert!(markdown.contains("2025-01-31 09:30:00 UTC"));
        assert!(!markdown.contains("## Input Warnings"));
    }

    #[test]
    fn test_markdown_single_platform_not_applicable() {
        let report = create_test_report(PlatformFilter::Only(Platform::Facebook));
        let markdown = generate_markdown_report(&report, &ReportConfig::default());

        assert!(markdown.contains("not applicable"));
        assert!(!markdown.contains("**Strongest:**"));
    }

    #[test]
    fn test_markdown_respects_section_toggles() {
        let report = create_test_report(PlatformFilter::All);
        let options = ReportConfig {
            include_weekdays: false,
            include_benchmark: false,
            include_top_days: false,
        };
        let markdown = generate_markdown_report(&report, &options);

        assert!(!markdown.contains("## Best Days to Post"));
        assert!(!markdown.contains("## Benchmark"));
        assert!(!markdown.contains("## Top Days"));
    }

    #[test]
    fn test_markdown_shows_warnings_and_logo() {
        let mut report = create_test_report(PlatformFilter::All);
        report.warnings.push("start date is after end date".to_string());
        report.metadata.logo_url = Some("https://example.org/logo.png".to_string());

        let markdown = generate_markdown_report(&report, &ReportConfig::default());
        assert!(markdown.contains("## Input Warnings"));
        assert!(markdown.contains("![Oak Tree Primary logo](https://example.org/logo.png)"));
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report(PlatformFilter::All);
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"school_name\": \"Oak Tree Primary\""));
        assert!(json.contains("\"platform_filter\": \"all\""));
        assert!(json.contains("\"weekday_profile\""));
        assert!(json.contains("\"insights\""));
        assert!(json.contains("\"severity\": \"positive\""));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["weekday_profile"]["days"].as_array().map(Vec::len), Some(7));
    }

    #[test]
    fn test_generate_text_report() {
        let report = create_test_report(PlatformFilter::All);
        let text = generate_text_report(&report);

        assert!(text.starts_with("Social Media Report - Oak Tree Primary\n"));
        assert!(text.contains("Period: 2025-01-01 to 2025-01-14"));
        assert!(text.contains("Best platform: TikTok"));
        assert!(text.contains("TikTok growth: +650 followers"));
        assert!(text.contains("Generated on 31-01-2025"));
    }

    #[test]
    fn test_text_report_single_platform() {
        let report = create_test_report(PlatformFilter::Only(Platform::Instagram));
        let text = generate_text_report(&report);

        assert!(text.contains("Best platform: not applicable"));
        assert!(!text.contains("TikTok growth"));
    }
}
