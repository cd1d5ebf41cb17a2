//! Closed-form mock formulas.
//!
//! All constants are demo values without business meaning. They are kept
//! as named fields so a `[mock]` config section can override them.

use crate::models::{MetricRecord, Platform};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-platform constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformProfile {
    /// Followers on the first day, before the seed offset.
    pub base_followers: u64,

    /// Followers gained per day.
    pub growth_rate: u64,

    /// Flat bonus added to every engagement rate.
    #[serde(default)]
    pub engagement_bonus: f64,
}

impl PlatformProfile {
    fn new(base_followers: u64, growth_rate: u64, engagement_bonus: f64) -> Self {
        Self {
            base_followers,
            growth_rate,
            engagement_bonus,
        }
    }
}

fn default_instagram() -> PlatformProfile {
    PlatformProfile::new(5000, 20, 0.0)
}

fn default_tiktok() -> PlatformProfile {
    PlatformProfile::new(3000, 50, 1.0)
}

fn default_facebook() -> PlatformProfile {
    PlatformProfile::new(2000, 20, 0.0)
}

/// Formulas used to synthesize one record per platform per day.
///
/// For day index `i` (0-based from the range start):
///
/// ```text
/// followers       = base_followers + seed_offset + i * growth_rate
/// engagement_rate = engagement_base + (i % engagement_period) * engagement_step + engagement_bonus
/// reach           = reach_base + i * reach_growth + (i % reach_period) * reach_step
/// likes           = likes_base + i * likes_growth      (same shape for comments, shares)
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockFormula {
    /// Seed offset per character of the seed text.
    #[serde(default = "default_seed_multiplier")]
    pub seed_multiplier: u64,

    #[serde(default = "default_engagement_base")]
    pub engagement_base: f64,

    #[serde(default = "default_engagement_step")]
    pub engagement_step: f64,

    /// Length of the engagement oscillation in days.
    #[serde(default = "default_engagement_period")]
    pub engagement_period: u64,

    #[serde(default = "default_reach_base")]
    pub reach_base: u64,

    #[serde(default = "default_reach_growth")]
    pub reach_growth: u64,

    #[serde(default = "default_reach_step")]
    pub reach_step: u64,

    #[serde(default = "default_reach_period")]
    pub reach_period: u64,

    #[serde(default = "default_likes_base")]
    pub likes_base: u64,

    #[serde(default = "default_likes_growth")]
    pub likes_growth: u64,

    #[serde(default = "default_comments_base")]
    pub comments_base: u64,

    #[serde(default = "default_comments_growth")]
    pub comments_growth: u64,

    #[serde(default = "default_shares_base")]
    pub shares_base: u64,

    #[serde(default = "default_shares_growth")]
    pub shares_growth: u64,

    #[serde(default = "default_instagram")]
    pub instagram: PlatformProfile,

    #[serde(default = "default_tiktok")]
    pub tiktok: PlatformProfile,

    #[serde(default = "default_facebook")]
    pub facebook: PlatformProfile,
}

impl Default for MockFormula {
    fn default() -> Self {
        Self {
            seed_multiplier: default_seed_multiplier(),
            engagement_base: default_engagement_base(),
            engagement_step: default_engagement_step(),
            engagement_period: default_engagement_period(),
            reach_base: default_reach_base(),
            reach_growth: default_reach_growth(),
            reach_step: default_reach_step(),
            reach_period: default_reach_period(),
            likes_base: default_likes_base(),
            likes_growth: default_likes_growth(),
            comments_base: default_comments_base(),
            comments_growth: default_comments_growth(),
            shares_base: default_shares_base(),
            shares_growth: default_shares_growth(),
            instagram: default_instagram(),
            tiktok: default_tiktok(),
            facebook: default_facebook(),
        }
    }
}

fn default_seed_multiplier() -> u64 {
    100
}

fn default_engagement_base() -> f64 {
    3.5
}

fn default_engagement_step() -> f64 {
    0.5
}

fn default_engagement_period() -> u64 {
    7
}

fn default_reach_base() -> u64 {
    1000
}

fn default_reach_growth() -> u64 {
    30
}

fn default_reach_step() -> u64 {
    100
}

fn default_reach_period() -> u64 {
    5
}

fn default_likes_base() -> u64 {
    200
}

fn default_likes_growth() -> u64 {
    10
}

fn default_comments_base() -> u64 {
    20
}

fn default_comments_growth() -> u64 {
    2
}

fn default_shares_base() -> u64 {
    10
}

fn default_shares_growth() -> u64 {
    1
}

impl MockFormula {
    /// Constants for one platform.
    pub fn profile(&self, platform: Platform) -> &PlatformProfile {
        match platform {
            Platform::Instagram => &self.instagram,
            Platform::TikTok => &self.tiktok,
            Platform::Facebook => &self.facebook,
        }
    }

    /// Deterministic follower offset derived from free text.
    ///
    /// Counts characters rather than bytes so accented school names
    /// are not inflated.
    pub fn seed_offset(&self, seed_text: &str) -> u64 {
        (seed_text.chars().count() as u64).saturating_mul(self.seed_multiplier)
    }

    /// The record for `platform` on day index `i` of a range.
    pub fn record(
        &self,
        platform: Platform,
        i: u64,
        date: NaiveDate,
        seed_offset: u64,
    ) -> MetricRecord {
        let profile = self.profile(platform);
        // A zero period from config would otherwise divide by zero.
        let engagement_phase = i % self.engagement_period.max(1);
        let reach_phase = i % self.reach_period.max(1);

        // Constants come from config; counts saturate instead of wrapping.
        let linear = |base: u64, growth: u64| base.saturating_add(i.saturating_mul(growth));

        MetricRecord {
            date,
            platform,
            followers: linear(
                profile.base_followers.saturating_add(seed_offset),
                profile.growth_rate,
            ),
            engagement_rate: self.engagement_base
                + engagement_phase as f64 * self.engagement_step
                + profile.engagement_bonus,
            reach: linear(self.reach_base, self.reach_growth)
                .saturating_add(reach_phase.saturating_mul(self.reach_step)),
            likes: linear(self.likes_base, self.likes_growth),
            comments: linear(self.comments_base, self.comments_growth),
            shares: linear(self.shares_base, self.shares_growth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn test_default_profiles() {
        let formula = MockFormula::default();
        assert_eq!(formula.profile(Platform::Instagram).base_followers, 5000);
        assert_eq!(formula.profile(Platform::TikTok).base_followers, 3000);
        assert_eq!(formula.profile(Platform::Facebook).base_followers, 2000);
        assert!(
            formula.profile(Platform::TikTok).growth_rate
                > formula.profile(Platform::Instagram).growth_rate
        );
    }

    #[test]
    fn test_seed_offset() {
        let formula = MockFormula::default();
        assert_eq!(formula.seed_offset(""), 0);
        assert_eq!(formula.seed_offset("Oak"), 300);
        assert_eq!(formula.seed_offset("École"), 500);
    }

    #[test]
    fn test_record_formulas() {
        let formula = MockFormula::default();

        let first = formula.record(Platform::TikTok, 0, day(), 0);
        assert_eq!(first.followers, 3000);
        assert_eq!(first.engagement_rate, 4.5);
        assert_eq!(first.reach, 1000);
        assert_eq!(first.likes, 200);
        assert_eq!(first.comments, 20);
        assert_eq!(first.shares, 10);

        let later = formula.record(Platform::Instagram, 8, day(), 100);
        assert_eq!(later.followers, 5000 + 100 + 8 * 20);
        // 8 % 7 == 1
        assert_eq!(later.engagement_rate, 4.0);
        // 8 % 5 == 3
        assert_eq!(later.reach, 1000 + 240 + 300);
        assert_eq!(later.likes, 280);
        assert_eq!(later.comments, 36);
        assert_eq!(later.shares, 18);
    }

    #[test]
    fn test_zero_periods_do_not_panic() {
        let formula = MockFormula {
            engagement_period: 0,
            reach_period: 0,
            ..MockFormula::default()
        };
        let record = formula.record(Platform::Facebook, 3, day(), 0);
        assert_eq!(record.engagement_rate, 3.5);
        assert_eq!(record.reach, 1090);
    }

    #[test]
    fn test_huge_constants_saturate() {
        let mut formula = MockFormula {
            seed_multiplier: u64::MAX,
            reach_growth: u64::MAX / 2,
            likes_base: u64::MAX,
            ..MockFormula::default()
        };
        formula.tiktok.base_followers = u64::MAX - 10;
        formula.tiktok.growth_rate = u64::MAX / 3;

        let offset = formula.seed_offset("Oak");
        assert_eq!(offset, u64::MAX);

        let first = formula.record(Platform::TikTok, 0, day(), 0);
        let later = formula.record(Platform::TikTok, 5, day(), offset);
        assert_eq!(first.followers, u64::MAX - 10);
        assert_eq!(later.followers, u64::MAX);
        assert!(later.followers >= first.followers);
        assert_eq!(later.reach, u64::MAX);
        assert_eq!(later.likes, u64::MAX);
        assert_eq!(later.comments, 30);
    }

    #[test]
    fn test_partial_override_from_toml() {
        let formula: MockFormula = toml::from_str(
            r#"
seed_multiplier = 10

[tiktok]
base_followers = 100
growth_rate = 5
"#,
        )
        .unwrap();

        assert_eq!(formula.seed_multiplier, 10);
        assert_eq!(formula.tiktok.base_followers, 100);
        assert_eq!(formula.tiktok.engagement_bonus, 0.0);
        assert_eq!(formula.instagram, MockFormula::default().instagram);
        assert_eq!(formula.engagement_base, 3.5);
    }
}
