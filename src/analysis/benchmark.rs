//! Comparison against an average school.

use super::aggregator::mean;
use crate::config::BenchmarkConfig;
use crate::models::{BenchmarkComparison, BenchmarkRow, PlatformGrowth, SummaryMetrics};

/// Mean weekly follower growth across platforms.
///
/// Each platform contributes `delta * 7 / days`; platforms whose records
/// all fall on one day are skipped.
pub fn weekly_follower_growth(growth: &[PlatformGrowth]) -> f64 {
    mean(
        growth
            .iter()
            .filter(|g| g.days > 0)
            .map(|g| g.delta() as f64 * 7.0 / g.days as f64),
    )
}

/// Build the benchmark table for a summary.
pub fn benchmark(summary: &SummaryMetrics, averages: &BenchmarkConfig) -> BenchmarkComparison {
    let reach_per_day = if summary.record_count == 0 {
        0.0
    } else {
        (summary.total_reach as f64 / summary.record_count as f64).round()
    };

    BenchmarkComparison {
        rows: vec![
            BenchmarkRow {
                metric: "Avg. engagement rate (%)".to_string(),
                school: (summary.mean_engagement * 10.0).round() / 10.0,
                average: averages.engagement_rate,
            },
            BenchmarkRow {
                metric: "Weekly follower growth".to_string(),
                school: weekly_follower_growth(&summary.growth).round(),
                average: averages.weekly_follower_growth,
            },
            BenchmarkRow {
                metric: "Avg. reach per day".to_string(),
                school: reach_per_day,
                average: averages.reach_per_day,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Platform;

    fn growth(platform: Platform, first: u64, last: u64, days: u64) -> PlatformGrowth {
        PlatformGrowth {
            platform,
            first_followers: first,
            last_followers: last,
            days,
        }
    }

    #[test]
    fn test_weekly_follower_growth() {
        let growth = vec![
            growth(Platform::Instagram, 5000, 5200, 10),
            growth(Platform::TikTok, 3000, 3500, 10),
            growth(Platform::Facebook, 2000, 2000, 0),
        ];
        // (140 + 350) / 2
        assert_eq!(weekly_follower_growth(&growth), 245.0);
        assert_eq!(weekly_follower_growth(&[]), 0.0);
    }

    #[test]
    fn test_benchmark_rows() {
        let summary = SummaryMetrics {
            mean_engagement: 4.66,
            total_reach: 10_000,
            record_count: 3,
            growth: vec![growth(Platform::TikTok, 3000, 3100, 14)],
            ..SummaryMetrics::default()
        };

        let table = benchmark(&summary, &BenchmarkConfig::default());
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0].school, 4.7);
        assert_eq!(table.rows[0].average, 2.8);
        assert!(table.rows[0].above_average());
        assert_eq!(table.rows[1].school, 50.0);
        assert!(!table.rows[1].above_average());
        assert_eq!(table.rows[2].school, 3333.0);
        assert_eq!(table.rows[2].average, 3200.0);
    }

    #[test]
    fn test_benchmark_empty_summary() {
        let table = benchmark(&SummaryMetrics::default(), &BenchmarkConfig::default());
        assert!(table.rows.iter().all(|r| r.school == 0.0));
    }
}
