//! Metric aggregation and statistics.
//!
//! This module computes summary figures and grouped metrics over a
//! generated series. Every function accepts the full series plus a
//! platform filter and treats an empty filtered set as a defined,
//! all-zero state.

use crate::models::{
    MetricRecord, MetricSeries, Platform, PlatformComparison, PlatformEngagement, PlatformFilter,
    PlatformGrowth, SummaryMetrics, WeekdayProfile,
};
use std::cmp::Ordering;

/// Arithmetic mean, `0.0` for no values.
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn saturating_sum(values: impl Iterator<Item = u64>) -> u64 {
    values.fold(0, u64::saturating_add)
}

/// Compute the headline figures for the filtered series.
pub fn summarize(series: &MetricSeries, filter: PlatformFilter) -> SummaryMetrics {
    let filtered = series.filter(filter);
    if filtered.is_empty() {
        return SummaryMetrics::default();
    }

    SummaryMetrics {
        latest_followers: latest_record(&filtered).map_or(0, |r| r.followers),
        mean_engagement: mean(filtered.iter().map(|r| r.engagement_rate)),
        total_reach: saturating_sum(filtered.iter().map(|r| r.reach)),
        total_interactions: saturating_sum(filtered.iter().map(MetricRecord::interactions)),
        record_count: filtered.len(),
        comparison: platform_comparison(&filtered, PlatformFilter::All),
        growth: platform_growth(&filtered, PlatformFilter::All),
    }
}

/// The chronologically last record; the later one in series order on a date tie.
pub fn latest_record(series: &MetricSeries) -> Option<&MetricRecord> {
    series.iter().fold(None, |latest, record| match latest {
        Some(l) if l.date > record.date => Some(l),
        _ => Some(record),
    })
}

/// Mean engagement per weekday, Monday through Sunday, `0.0` for days without data.
pub fn weekday_profile(series: &MetricSeries, filter: PlatformFilter) -> WeekdayProfile {
    let mut sums = [0.0_f64; 7];
    let mut counts = [0usize; 7];

    for record in series.iter().filter(|r| filter.matches(r.platform)) {
        let idx = record.weekday().num_days_from_monday() as usize;
        sums[idx] += record.engagement_rate;
        counts[idx] += 1;
    }

    WeekdayProfile::from_fn(|weekday| {
        let idx = weekday.num_days_from_monday() as usize;
        if counts[idx] == 0 {
            0.0
        } else {
            sums[idx] / counts[idx] as f64
        }
    })
}

/// Mean engagement per platform present in the filtered set, in declaration order.
pub fn engagement_by_platform(
    series: &MetricSeries,
    filter: PlatformFilter,
) -> Vec<PlatformEngagement> {
    Platform::ALL
        .iter()
        .filter(|p| filter.matches(**p))
        .filter_map(|&platform| {
            let rates: Vec<f64> = series
                .for_platform(platform)
                .map(|r| r.engagement_rate)
                .collect();
            if rates.is_empty() {
                return None;
            }
            Some(PlatformEngagement {
                platform,
                mean_engagement: mean(rates.iter().copied()),
                records: rates.len(),
            })
        })
        .collect()
}

/// Best and worst platform by mean engagement.
///
/// Returns `None` when the filtered set spans fewer than two platforms;
/// a comparison is not applicable there. Ties go to the alphabetically
/// first platform name.
pub fn platform_comparison(
    series: &MetricSeries,
    filter: PlatformFilter,
) -> Option<PlatformComparison> {
    let mut by_platform = engagement_by_platform(series, filter);
    if by_platform.len() < 2 {
        return None;
    }

    let by_name =
        |a: &PlatformEngagement, b: &PlatformEngagement| a.platform.name().cmp(b.platform.name());

    by_platform.sort_by(|a, b| {
        b.mean_engagement
            .partial_cmp(&a.mean_engagement)
            .unwrap_or(Ordering::Equal)
            .then_with(|| by_name(a, b))
    });
    let best = by_platform[0].clone();

    by_platform.sort_by(|a, b| {
        a.mean_engagement
            .partial_cmp(&b.mean_engagement)
            .unwrap_or(Ordering::Equal)
            .then_with(|| by_name(a, b))
    });
    let worst = by_platform[0].clone();

    Some(PlatformComparison { best, worst })
}

/// Follower change per platform with at least two filtered records.
pub fn platform_growth(series: &MetricSeries, filter: PlatformFilter) -> Vec<PlatformGrowth> {
    Platform::ALL
        .iter()
        .filter(|p| filter.matches(**p))
        .filter_map(|&platform| {
            let records: Vec<&MetricRecord> = series.for_platform(platform).collect();
            if records.len() < 2 {
                return None;
            }
            let first = records[0];
            let last = records[records.len() - 1];
            Some(PlatformGrowth {
                platform,
                first_followers: first.followers,
                last_followers: last.followers,
                days: (last.date - first.date).num_days().max(0) as u64,
            })
        })
        .collect()
}

/// The `n` records with the most interactions.
///
/// Ties keep series order, so earlier dates and earlier-declared
/// platforms come first.
pub fn top_days(series: &MetricSeries, filter: PlatformFilter, n: usize) -> Vec<MetricRecord> {
    let mut records: Vec<MetricRecord> = series.filter(filter).records().to_vec();
    records.sort_by(|a, b| {
        b.interactions()
            .cmp(&a.interactions())
            .then_with(|| a.date.cmp(&b.date))
    });
    records.truncate(n);
    records
}
