//! Dashboard assembly.
//!
//! Runs the full pipeline for one set of inputs: resolve the period,
//! generate the series, aggregate, select insights and package everything
//! into a [`Report`]. Nothing is cached between runs.

use crate::analysis::{
    benchmark, engagement_by_platform, generate_insights, summarize, top_days, trend,
    weekday_profile,
};
use crate::config::Config;
use crate::generator::generate;
use crate::models::{DateRange, MetricSeries, Platform, Report, ReportMetadata};
use crate::session::Session;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

/// Per-run inputs that do not come from configuration.
#[derive(Debug, Clone)]
pub struct DashboardRequest {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// The day treated as "today" for default and fallback windows.
    pub today: NaiveDate,
    pub generated_at: DateTime<Utc>,
}

impl DashboardRequest {
    /// A request for the default window ending now.
    pub fn now() -> Self {
        let generated_at = Utc::now();
        Self {
            start: None,
            end: None,
            today: chrono::Local::now().date_naive(),
            generated_at,
        }
    }
}

/// Result of one dashboard run.
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Records passing the platform filter, for CSV export.
    pub series: MetricSeries,
    pub report: Report,
}

/// Check that a logo URL is something a report can link to.
pub fn validate_logo_url(url: &str) -> Result<(), String> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| format!("logo URL must start with http:// or https://: {}", url))?;

    if rest.is_empty() || rest.starts_with('/') {
        return Err(format!("logo URL has no host: {}", url));
    }
    if url.chars().any(char::is_whitespace) {
        return Err(format!("logo URL contains whitespace: {}", url));
    }

    Ok(())
}

/// Build the dashboard for `session` from configuration and request.
pub fn build(config: &Config, session: &Session, request: &DashboardRequest) -> Dashboard {
    let mut warnings = Vec::new();
    let window_days = config.dashboard.window_days.min(DateRange::MAX_DAYS);

    let resolved = DateRange::resolve(request.start, request.end, request.today, window_days);
    if let Some(err) = resolved.fallback_reason {
        warn!("{}; falling back to the last {} days", err, window_days);
        warnings.push(format!(
            "{}. Showing the last {} days instead ({}).",
            err, window_days, resolved.range
        ));
    }
    let range = resolved.range;

    let filter = config.dashboard.platform;
    let seed_offset = config.mock.seed_offset(session.seed_text());
    debug!("Seed offset {} for '{}'", seed_offset, session.seed_text());

    let full_series = generate(&config.mock, &range, &Platform::ALL, seed_offset);
    let summary = summarize(&full_series, filter);
    let weekdays = weekday_profile(&full_series, filter);
    let trend_report = trend(&full_series, filter, config.analysis.trend_threshold_pct);
    let insights = generate_insights(&summary, &weekdays, &trend_report);

    info!(
        "Summarized {} records for {} ({}), {} insights",
        summary.record_count,
        filter,
        range,
        insights.len()
    );

    let logo_url = match config.dashboard.logo_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => match validate_logo_url(url) {
            Ok(()) => Some(url.to_string()),
            Err(reason) => {
                warn!("Skipping logo: {}", reason);
                warnings.push(format!("Logo skipped: {}", reason));
                None
            }
        },
        _ => None,
    };

    let series = full_series.filter(filter);

    let report = Report {
        metadata: ReportMetadata {
            school_name: session.school_name().to_string(),
            generated_for: session.display_name().map(str::to_string),
            generated_at: request.generated_at,
            period: range,
            platform_filter: filter,
            seed_offset,
            record_count: series.len(),
            logo_url,
        },
        benchmark: benchmark(&summary, &config.benchmark),
        engagement_by_platform: engagement_by_platform(&full_series, filter),
        top_days: top_days(&full_series, filter, config.analysis.top_days),
        weekday_profile: weekdays,
        trend: trend_report,
        summary,
        insights,
        warnings,
    };

    Dashboard { series, report }
}
