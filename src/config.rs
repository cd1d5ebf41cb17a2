//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.schoolsocial.toml` files.

use crate::analysis::trend::DEFAULT_THRESHOLD_PCT;
use crate::generator::MockFormula;
use crate::models::{DateRange, PlatformFilter};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".schoolsocial.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Dashboard inputs.
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Mock data formulas.
    #[serde(default)]
    pub mock: MockFormula,

    /// Analysis settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Average school values for the benchmark table.
    #[serde(default)]
    pub benchmark: BenchmarkConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "schoolsocial_report.md".to_string()
}

/// School and filter inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// School name shown in the report and used as the default seed.
    #[serde(default = "default_school_name")]
    pub school_name: String,

    /// Platform filter: instagram, tiktok, facebook or all.
    #[serde(default)]
    pub platform: PlatformFilter,

    /// Length of the trailing window used when no valid range is given.
    #[serde(default = "default_window_days")]
    pub window_days: u32,

    /// Optional logo URL for the Markdown report.
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            school_name: default_school_name(),
            platform: PlatformFilter::All,
            window_days: default_window_days(),
            logo_url: None,
        }
    }
}

fn default_school_name() -> String {
    "Your Primary School".to_string()
}

fn default_window_days() -> u32 {
    30
}

/// Analysis thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Mean daily engagement change (percent) needed to call a trend.
    #[serde(default = "default_trend_threshold")]
    pub trend_threshold_pct: f64,

    /// Number of rows in the top days table.
    #[serde(default = "default_top_days")]
    pub top_days: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            trend_threshold_pct: default_trend_threshold(),
            top_days: default_top_days(),
        }
    }
}

fn default_trend_threshold() -> f64 {
    DEFAULT_THRESHOLD_PCT
}

fn default_top_days() -> usize {
    5
}

/// Reference values for an average school.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    #[serde(default = "default_benchmark_engagement")]
    pub engagement_rate: f64,

    #[serde(default = "default_benchmark_growth")]
    pub weekly_follower_growth: f64,

    #[serde(default = "default_benchmark_reach")]
    pub reach_per_day: f64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            engagement_rate: default_benchmark_engagement(),
            weekly_follower_growth: default_benchmark_growth(),
            reach_per_day: default_benchmark_reach(),
        }
    }
}

fn default_benchmark_engagement() -> f64 {
    2.8
}

fn default_benchmark_growth() -> f64 {
    80.0
}

fn default_benchmark_reach() -> f64 {
    3200.0
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include the weekday engagement table.
    #[serde(default = "default_true")]
    pub include_weekdays: bool,

    /// Include the benchmark table.
    #[serde(default = "default_true")]
    pub include_benchmark: bool,

    /// Include the top days table.
    #[serde(default = "default_true")]
    pub include_top_days: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_weekdays: true,
            include_benchmark: true,
            include_top_days: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Check values that parse but cannot be used.
    pub fn validate(&self) -> Result<()> {
        let window_days = self.dashboard.window_days;
        if window_days == 0 || window_days > DateRange::MAX_DAYS {
            bail!(
                "dashboard.window_days must be between 1 and {}, got {}",
                DateRange::MAX_DAYS,
                window_days
            );
        }
        Ok(())
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings and only
    /// override values they explicitly provide.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref school) = args.school {
            self.dashboard.school_name = school.clone();
        }
        if let Some(platform) = args.platform {
            self.dashboard.platform = platform.into();
        }
        if let Some(days) = args.days {
            self.dashboard.window_days = days;
        }
        if let Some(ref logo) = args.logo {
            self.dashboard.logo_url = Some(logo.clone());
        }
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
