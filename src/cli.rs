//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::{DateRange, Platform, PlatformFilter};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// SchoolSocial - social media dashboard for schools
///
/// Review followers, engagement, reach and interactions across Instagram,
/// TikTok and Facebook. Markdown/JSON/text reports and CSV export.
/// Figures are generated mock data, reproducible per school name.
///
/// Examples:
///   schoolsocial --school "Oak Tree Primary"
///   schoolsocial --platform tiktok --start 2025-01-01 --end 2025-01-31
///   schoolsocial --format json --output report.json --csv data.csv
///   schoolsocial --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// School name shown in the report
    ///
    /// Also seeds the mock data unless --user is given.
    #[arg(short, long, value_name = "NAME", env = "SCHOOLSOCIAL_SCHOOL")]
    pub school: Option<String>,

    /// Platform to report on
    #[arg(short, long, value_name = "PLATFORM")]
    pub platform: Option<PlatformArg>,

    /// First day of the period (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start: Option<NaiveDate>,

    /// Last day of the period (YYYY-MM-DD), defaults to today
    #[arg(long, value_name = "DATE")]
    pub end: Option<NaiveDate>,

    /// Length of the trailing window in days
    ///
    /// Used when --start is omitted or the given range is invalid.
    #[arg(long, value_name = "DAYS")]
    pub days: Option<u32>,

    /// Display name of the signed-in user
    ///
    /// Supplied by an external access gate. When set it seeds the mock data
    /// instead of the school name.
    #[arg(long, value_name = "NAME", env = "SCHOOLSOCIAL_USER")]
    pub user: Option<String>,

    /// Logo URL to show in the Markdown report
    #[arg(long, value_name = "URL")]
    pub logo: Option<String>,

    /// Output file path for the report
    ///
    /// Defaults to the config value or schoolsocial_report.md
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json, text)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Also export the filtered data as CSV to this path
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .schoolsocial.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Exit with code 2 when the report contains warning insights
    #[arg(long)]
    pub fail_on_warning: bool,

    /// Generate a default .schoolsocial.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
    /// Plain text summary
    Text,
}

/// Platform choice on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PlatformArg {
    Instagram,
    Tiktok,
    Facebook,
    All,
}

impl From<PlatformArg> for PlatformFilter {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Instagram => PlatformFilter::Only(Platform::Instagram),
            PlatformArg::Tiktok => PlatformFilter::Only(Platform::TikTok),
            PlatformArg::Facebook => PlatformFilter::Only(Platform::Facebook),
            PlatformArg::All => PlatformFilter::All,
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    ///
    /// An inverted date range is not an error here; it is recovered
    /// later by falling back to the trailing window.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(days) = self.days {
            if days == 0 {
                return Err("Days must be at least 1".to_string());
            }
            if days > DateRange::MAX_DAYS {
                return Err(format!("Days must be at most {}", DateRange::MAX_DAYS));
            }
        }

        if let Some(ref school) = self.school {
            if school.trim().is_empty() {
                return Err("School name must not be empty".to_string());
            }
        }

        if let (Some(csv), Some(output)) = (&self.csv, &self.output) {
            if csv == output {
                return Err("--csv and --output must point to different files".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            school: Some("Oak Tree Primary".to_string()),
            platform: None,
            start: None,
            end: None,
            days: None,
            user: None,
            logo: None,
            output: None,
            format: OutputFormat::Markdown,
            csv: None,
            config: None,
            verbose: false,
            quiet: false,
            fail_on_warning: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_from_command_line() {
        let args = Args::try_parse_from([
            "schoolsocial",
            "--platform",
            "tiktok",
            "--start",
            "2025-01-01",
            "--end",
            "2025-01-31",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(args.platform, Some(PlatformArg::Tiktok));
        assert_eq!(args.start, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(args.end, NaiveDate::from_ymd_opt(2025, 1, 31));
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_rejects_malformed_date() {
        assert!(Args::try_parse_from(["schoolsocial", "--start", "31-01-2025"]).is_err());
    }

    #[test]
    fn test_platform_arg_into_filter() {
        assert_eq!(
            PlatformFilter::from(PlatformArg::Tiktok),
            PlatformFilter::Only(Platform::TikTok)
        );
        assert_eq!(PlatformFilter::from(PlatformArg::All), PlatformFilter::All);
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_days() {
        let mut args = make_args();
        args.days = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_days_upper_bound() {
        let mut args = make_args();
        args.days = Some(3650);
        assert!(args.validate().is_ok());

        args.days = Some(3651);
        assert!(args.validate().is_err());

        let args = Args::try_parse_from(["schoolsocial", "--days", "4294967295"]).unwrap();
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_same_csv_and_output() {
        let mut args = make_args();
        args.csv = Some(PathBuf::from("out.md"));
        args.output = Some(PathBuf::from("out.md"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_allows_inverted_range() {
        let mut args = make_args();
        args.start = NaiveDate::from_ymd_opt(2025, 2, 1);
        args.end = NaiveDate::from_ymd_opt(2025, 1, 1);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
