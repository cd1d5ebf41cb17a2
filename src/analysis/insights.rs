//! Automatic insights and tips.
//!
//! A fixed list of rules, evaluated in order. The output order is the
//! evaluation order, so the same inputs always produce the same list.

use crate::models::{
    Insight, Platform, Severity, SummaryMetrics, TrendDirection, TrendReport, WeekdayProfile,
};

/// Static tip appended to every insight list.
pub const POSTING_TIP: &str = "Tip: post more videos on Tuesday and Thursday around 15:00-17:00 \
     for maximum reach (based on mock data).";

/// Select the insights for a dashboard.
pub fn generate_insights(
    summary: &SummaryMetrics,
    weekday_profile: &WeekdayProfile,
    trend: &TrendReport,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    if let Some(ref comparison) = summary.comparison {
        insights.push(Insight::new(
            Severity::Positive,
            format!(
                "Strongest platform: {} ({:.1}% average engagement). Focus more effort here!",
                comparison.best.platform, comparison.best.mean_engagement
            ),
        ));
        insights.push(Insight::new(
            Severity::Warning,
            format!(
                "Needs attention: {} has the lowest engagement ({:.1}% on average).",
                comparison.worst.platform, comparison.worst.mean_engagement
            ),
        ));
    }

    if let Some(growth) = summary.growth_for(Platform::TikTok) {
        insights.push(Insight::new(
            Severity::Informational,
            format!(
                "TikTok growth: {:+} followers in this period.",
                growth.delta()
            ),
        ));
    }

    insights.push(trend_insight(trend));

    if let Some(peak) = weekday_profile.peak() {
        insights.push(Insight::new(
            Severity::Informational,
            format!(
                "Best day to post: {} ({:.1}% average engagement).",
                peak.weekday, peak.mean_engagement
            ),
        ));
    }

    insights.push(Insight::new(Severity::Informational, POSTING_TIP));

    insights
}

fn trend_insight(trend: &TrendReport) -> Insight {
    match trend.direction {
        TrendDirection::Rising => Insight::new(
            Severity::Positive,
            format!(
                "Engagement is rising: {:+.1}% average change per day. Keep it up!",
                trend.mean_change_pct
            ),
        ),
        TrendDirection::Falling => Insight::new(
            Severity::Warning,
            format!(
                "Engagement is falling: {:+.1}% average change per day. Review recent content.",
                trend.mean_change_pct
            ),
        ),
        TrendDirection::Stable => Insight::new(
            Severity::Informational,
            format!(
                "Engagement is stable ({:+.1}% average change per day).",
                trend.mean_change_pct
            ),
        ),
    }
}
