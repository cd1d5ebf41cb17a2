//! Engagement trend detection.

use super::aggregator::mean;
use crate::models::{MetricSeries, PlatformFilter, TrendDirection, TrendReport};

/// Mean change (in percent) beyond which a trend counts as rising or falling.
pub const DEFAULT_THRESHOLD_PCT: f64 = 5.0;

/// Classify a mean percentage change against a symmetric threshold.
pub fn classify(mean_change_pct: f64, threshold_pct: f64) -> TrendDirection {
    if mean_change_pct > threshold_pct {
        TrendDirection::Rising
    } else if mean_change_pct < -threshold_pct {
        TrendDirection::Falling
    } else {
        TrendDirection::Stable
    }
}

/// Mean period-over-period percentage change in engagement rate.
///
/// Changes are taken within each platform's run so the jump from one
/// platform's last day to the next platform's first day is never counted.
/// Steps from a zero rate are skipped. With fewer than two records the
/// trend is stable at 0%.
pub fn trend(series: &MetricSeries, filter: PlatformFilter, threshold_pct: f64) -> TrendReport {
    let filtered = series.filter(filter);
    let mut changes = Vec::new();

    for platform in filtered.platforms() {
        let rates: Vec<f64> = filtered
            .for_platform(platform)
            .map(|r| r.engagement_rate)
            .collect();

        changes.extend(
            rates
                .windows(2)
                .filter(|w| w[0] != 0.0)
                .map(|w| (w[1] - w[0]) / w[0] * 100.0),
        );
    }

    let mean_change_pct = mean(changes);
    TrendReport {
        mean_change_pct,
        direction: classify(mean_change_pct, threshold_pct),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate, MockFormula};
    use crate::models::{DateRange, MetricRecord, Platform};
    use chrono::NaiveDate;

    fn series_with_rates(platform: Platform, rates: &[f64]) -> MetricSeries {
        rates
            .iter()
            .enumerate()
            .map(|(i, &rate)| MetricRecord {
                date: NaiveDate::from_ymd_opt(2025, 1, 1 + i as u32).unwrap(),
                platform,
                followers: 100,
                engagement_rate: rate,
                reach: 0,
                likes: 0,
                comments: 0,
                shares: 0,
            })
            .collect()
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(5.1, 5.0), TrendDirection::Rising);
        assert_eq!(classify(5.0, 5.0), TrendDirection::Stable);
        assert_eq!(classify(-5.0, 5.0), TrendDirection::Stable);
        assert_eq!(classify(-5.1, 5.0), TrendDirection::Falling);
    }

    #[test]
    fn test_strictly_increasing_is_rising() {
        let series = series_with_rates(Platform::Instagram, &[3.0, 3.5, 4.0, 4.5, 5.0]);
        let report = trend(&series, PlatformFilter::All, DEFAULT_THRESHOLD_PCT);
        assert_eq!(report.direction, TrendDirection::Rising);
        assert!(report.mean_change_pct > 10.0);
    }

    #[test]
    fn test_strictly_decreasing_is_falling() {
        let series = series_with_rates(Platform::TikTok, &[8.0, 6.0, 4.0]);
        let report = trend(&series, PlatformFilter::All, DEFAULT_THRESHOLD_PCT);
        assert_eq!(report.direction, TrendDirection::Falling);
        // (-25% + -33.3%) / 2
        assert!((report.mean_change_pct + 29.1666).abs() < 0.001);
    }

    #[test]
    fn test_too_few_records_is_stable() {
        let single = series_with_rates(Platform::Facebook, &[4.0]);
        assert_eq!(trend(&single, PlatformFilter::All, 5.0), TrendReport::default());
        assert_eq!(
            trend(&MetricSeries::default(), PlatformFilter::All, 5.0),
            TrendReport::default()
        );
    }

    #[test]
    fn test_zero_rate_steps_are_skipped() {
        let series = series_with_rates(Platform::Instagram, &[0.0, 2.0, 2.2]);
        let report = trend(&series, PlatformFilter::All, 5.0);
        assert!((report.mean_change_pct - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_platform_boundaries_are_not_counted() {
        let mut records = series_with_rates(Platform::Instagram, &[2.0, 2.0]).records().to_vec();
        records.extend(series_with_rates(Platform::TikTok, &[9.0, 9.0]).records().to_vec());
        let series = MetricSeries::new(records);

        let report = trend(&series, PlatformFilter::All, 5.0);
        assert_eq!(report.mean_change_pct, 0.0);
        assert_eq!(report.direction, TrendDirection::Stable);
    }

    #[test]
    fn test_mock_oscillation_is_stable() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 28).unwrap(),
        )
        .unwrap();
        let series = generate(&MockFormula::default(), &range, &Platform::ALL, 0);

        let report = trend(
            &series,
            PlatformFilter::Only(Platform::Instagram),
            DEFAULT_THRESHOLD_PCT,
        );
        assert_eq!(report.direction, TrendDirection::Stable);
    }
}
