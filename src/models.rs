//! Data models for the school social dashboard.
//!
//! This module contains the core data structures shared by the generator,
//! the aggregator, the insight rules and the report writers.

use crate::error::DashboardError;
use chrono::{DateTime, Datelike, Days, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A social media platform tracked by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Instagram,
    TikTok,
    Facebook,
}

impl Platform {
    /// All platforms, in the order they are generated and reported.
    pub const ALL: [Platform; 3] = [Platform::Instagram, Platform::TikTok, Platform::Facebook];

    /// Display name of the platform.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::TikTok => "TikTok",
            Platform::Facebook => "Facebook",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "instagram" => Ok(Platform::Instagram),
            "tiktok" => Ok(Platform::TikTok),
            "facebook" => Ok(Platform::Facebook),
            _ => Err(DashboardError::UnknownPlatform(s.to_string())),
        }
    }
}

/// Which platforms the dashboard should look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PlatformFilter {
    /// No restriction.
    #[default]
    All,
    /// Only records of one platform.
    Only(Platform),
}

impl PlatformFilter {
    /// Returns true if records of `platform` pass this filter.
    pub fn matches(&self, platform: Platform) -> bool {
        match self {
            PlatformFilter::All => true,
            PlatformFilter::Only(p) => *p == platform,
        }
    }
}

impl fmt::Display for PlatformFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformFilter::All => write!(f, "All platforms"),
            PlatformFilter::Only(p) => write!(f, "{}", p),
        }
    }
}

impl FromStr for PlatformFilter {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "all platforms" => Ok(PlatformFilter::All),
            _ => s.parse().map(PlatformFilter::Only),
        }
    }
}

impl TryFrom<String> for PlatformFilter {
    type Error = DashboardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PlatformFilter> for String {
    fn from(filter: PlatformFilter) -> Self {
        match filter {
            PlatformFilter::All => "all".to_string(),
            PlatformFilter::Only(p) => p.name().to_lowercase(),
        }
    }
}

/// An inclusive calendar range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

/// Outcome of resolving user supplied dates into a usable range.
#[derive(Debug)]
pub struct ResolvedRange {
    /// The range to generate data for.
    pub range: DateRange,
    /// Set when the requested range was invalid and the default window was used.
    pub fallback_reason: Option<DashboardError>,
}

impl DateRange {
    /// Longest span, in days between start and end, a range may cover.
    pub const MAX_DAYS: u32 = 3650;

    /// Creates a range, rejecting `start > end` and spans over [`Self::MAX_DAYS`].
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DashboardError> {
        if start > end {
            return Err(DashboardError::InvalidDateRange { start, end });
        }
        if (end - start).num_days() > i64::from(Self::MAX_DAYS) {
            return Err(DashboardError::RangeTooLong {
                start,
                end,
                max_days: Self::MAX_DAYS,
            });
        }
        Ok(Self { start, end })
    }

    /// The `days`-long trailing window ending on `end` (inclusive on both sides).
    ///
    /// `days` is capped at [`Self::MAX_DAYS`].
    pub fn trailing(end: NaiveDate, days: u32) -> Self {
        let days = days.min(Self::MAX_DAYS);
        let start = end
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    /// Resolve optional start/end dates against `today`.
    ///
    /// A missing end defaults to `today`, a missing start to `window_days`
    /// before the end. If the result is inverted or too long the trailing
    /// window ending today is used instead and the error is handed back as
    /// a warning.
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
        window_days: u32,
    ) -> ResolvedRange {
        let end = end.unwrap_or(today);
        let start = start.unwrap_or_else(|| Self::trailing(end, window_days).start);

        match Self::new(start, end) {
            Ok(range) => ResolvedRange {
                range,
                fallback_reason: None,
            },
            Err(err) => ResolvedRange {
                range: Self::trailing(today, window_days),
                fallback_reason: Some(err),
            },
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, counting both ends.
    pub fn len_days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Every day in the range, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// One day of metrics for one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub date: NaiveDate,
    pub platform: Platform,
    pub followers: u64,
    /// Engagement as a percentage (3.5 means 3.5%).
    pub engagement_rate: f64,
    pub reach: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

impl MetricRecord {
    /// Column names used for tabular export, in field order.
    pub const FIELD_NAMES: [&'static str; 8] = [
        "date",
        "platform",
        "followers",
        "engagement_rate",
        "reach",
        "likes",
        "comments",
        "shares",
    ];

    /// Likes, comments and shares combined.
    pub fn interactions(&self) -> u64 {
        self.likes
            .saturating_add(self.comments)
            .saturating_add(self.shares)
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }
}

/// Ordered records, one contiguous run per platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricSeries {
    records: Vec<MetricRecord>,
}

impl MetricSeries {
    pub fn new(records: Vec<MetricRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[MetricRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetricRecord> {
        self.records.iter()
    }

    /// Copy of the series restricted to records passing `filter`.
    pub fn filter(&self, filter: PlatformFilter) -> MetricSeries {
        self.records
            .iter()
            .filter(|r| filter.matches(r.platform))
            .cloned()
            .collect()
    }

    /// Records of a single platform, in series order.
    pub fn for_platform(&self, platform: Platform) -> impl Iterator<Item = &MetricRecord> {
        self.records.iter().filter(move |r| r.platform == platform)
    }

    /// Distinct platforms present, in order of first appearance.
    pub fn platforms(&self) -> Vec<Platform> {
        let mut seen = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.platform) {
                seen.push(record.platform);
            }
        }
        seen
    }
}

impl FromIterator<MetricRecord> for MetricSeries {
    fn from_iter<I: IntoIterator<Item = MetricRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a MetricSeries {
    type Item = &'a MetricRecord;
    type IntoIter = std::slice::Iter<'a, MetricRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Mean engagement and volume for one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformEngagement {
    pub platform: Platform,
    pub mean_engagement: f64,
    pub records: usize,
}

/// Best and worst platform by mean engagement.
///
/// Only produced when at least two platforms are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformComparison {
    pub best: PlatformEngagement,
    pub worst: PlatformEngagement,
}

/// Follower change over the period for one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformGrowth {
    pub platform: Platform,
    pub first_followers: u64,
    pub last_followers: u64,
    /// Number of days between the first and last record.
    pub days: u64,
}

impl PlatformGrowth {
    /// `followers[last] - followers[first]`.
    pub fn delta(&self) -> i64 {
        if self.last_followers >= self.first_followers {
            i64::try_from(self.last_followers - self.first_followers).unwrap_or(i64::MAX)
        } else {
            i64::try_from(self.first_followers - self.last_followers).map_or(i64::MIN, |d| -d)
        }
    }
}

/// Headline figures for the active filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    /// Followers on the chronologically last record.
    pub latest_followers: u64,
    pub mean_engagement: f64,
    pub total_reach: u64,
    /// Sum of likes, comments and shares.
    pub total_interactions: u64,
    pub record_count: usize,
    /// `None` when fewer than two platforms are in view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<PlatformComparison>,
    /// Growth per platform with at least two records.
    pub growth: Vec<PlatformGrowth>,
}

impl SummaryMetrics {
    /// Growth entry for a platform, if it had enough records.
    pub fn growth_for(&self, platform: Platform) -> Option<&PlatformGrowth> {
        self.growth.iter().find(|g| g.platform == platform)
    }
}

/// English name of a weekday.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayEntry {
    pub weekday: String,
    pub mean_engagement: f64,
}

/// Mean engagement per weekday, always Monday through Sunday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayProfile {
    days: Vec<WeekdayEntry>,
}

impl WeekdayProfile {
    pub const ORDER: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Builds the profile by asking `mean` for every weekday in order.
    pub fn from_fn(mut mean: impl FnMut(Weekday) -> f64) -> Self {
        let days = Self::ORDER
            .iter()
            .map(|&wd| WeekdayEntry {
                weekday: weekday_name(wd).to_string(),
                mean_engagement: mean(wd),
            })
            .collect();
        Self { days }
    }

    pub fn days(&self) -> &[WeekdayEntry] {
        &self.days
    }

    #[cfg(test)]
    pub fn get(&self, weekday: Weekday) -> f64 {
        self.days[weekday.num_days_from_monday() as usize].mean_engagement
    }

    /// Day with the highest engagement; earliest in the week on ties.
    /// `None` when no day has data.
    pub fn peak(&self) -> Option<&WeekdayEntry> {
        self.days
            .iter()
            .filter(|d| d.mean_engagement > 0.0)
            .fold(None, |best: Option<&WeekdayEntry>, day| match best {
                Some(b) if b.mean_engagement >= day.mean_engagement => Some(b),
                _ => Some(day),
            })
    }
}

impl Default for WeekdayProfile {
    fn default() -> Self {
        Self::from_fn(|_| 0.0)
    }
}

/// Direction of the engagement trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    Falling,
    Stable,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Rising => write!(f, "Rising"),
            TrendDirection::Falling => write!(f, "Falling"),
            TrendDirection::Stable => write!(f, "Stable"),
        }
    }
}

/// Mean period-over-period change in engagement and its classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub mean_change_pct: f64,
    pub direction: TrendDirection,
}

impl Default for TrendReport {
    fn default() -> Self {
        Self {
            mean_change_pct: 0.0,
            direction: TrendDirection::Stable,
        }
    }
}

/// Tone of an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Something going well
    Positive,
    /// Something that needs attention
    Warning,
    /// Neutral information or a tip
    Informational,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Positive => write!(f, "Positive"),
            Severity::Warning => write!(f, "Warning"),
            Severity::Informational => write!(f, "Info"),
        }
    }
}

impl Severity {
    /// Returns an emoji representation of the severity.
    pub fn emoji(&self) -> &'static str {
        match self {
            Severity::Positive => "✅",
            Severity::Warning => "⚠️",
            Severity::Informational => "ℹ️",
        }
    }
}

/// A canned message selected by the insight rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub severity: Severity,
    pub message: String,
}

impl Insight {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// One line of the school vs. average school comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRow {
    pub metric: String,
    pub school: f64,
    pub average: f64,
}

impl BenchmarkRow {
    /// True when the school meets or beats the average.
    pub fn above_average(&self) -> bool {
        self.school >= self.average
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    pub rows: Vec<BenchmarkRow>,
}

/// Metadata about the generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub school_name: String,
    /// Display name of the signed-in user, when an access gate supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_for: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub period: DateRange,
    pub platform_filter: PlatformFilter,
    pub seed_offset: u64,
    pub record_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// The complete dashboard report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub summary: SummaryMetrics,
    pub engagement_by_platform: Vec<PlatformEngagement>,
    pub weekday_profile: WeekdayProfile,
    pub trend: TrendReport,
    pub benchmark: BenchmarkComparison,
    pub top_days: Vec<MetricRecord>,
    pub insights: Vec<Insight>,
    /// Input problems that were recovered from (e.g. an inverted date range).
    pub warnings: Vec<String>,
}

impl Report {
    /// Number of insights with the given severity.
    pub fn insight_count(&self, severity: Severity) -> usize {
        self.insights
            .iter()
            .filter(|i| i.severity == severity)
            .count()
    }
}
