//! SchoolSocial - social media dashboard for schools
//!
//! A CLI tool that builds a performance dashboard (followers, engagement,
//! reach, interactions) for a school from deterministic mock metrics and
//! writes it as a Markdown, JSON or plain-text report with optional CSV
//! export.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad config, unwritable output, etc.)
//!   2 - Warning insights present and --fail-on-warning set

mod analysis;
mod cli;
mod config;
mod dashboard;
mod error;
mod generator;
mod models;
mod report;
mod session;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use dashboard::DashboardRequest;
use models::Severity;
use session::Session;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    match run_dashboard(args) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            error!("Dashboard failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .schoolsocial.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to set your school name, platform filter and mock constants.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Build the dashboard and write its outputs. Returns exit code (0 or 2).
fn run_dashboard(args: Args) -> Result<i32> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let level = if !args.quiet && config.general.verbose {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    };
    init_logging(level);

    info!("SchoolSocial v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    let session = Session::anonymous(config.dashboard.school_name.clone())
        .with_display_name(args.user.clone());

    let request = DashboardRequest {
        start: args.start,
        end: args.end,
        ..DashboardRequest::now()
    };

    println!("📊 Building dashboard for {}...", session.school_name());
    let dashboard = dashboard::build(&config, &session, &request);
    let report = &dashboard.report;

    for warning in &report.warnings {
        eprintln!("⚠️  {}", warning);
    }

    let output = match args.format {
        OutputFormat::Markdown => report::generate_markdown_report(report, &config.report),
        OutputFormat::Json => report::generate_json_report(report)?,
        OutputFormat::Text => report::generate_text_report(report),
    };

    let output_path = PathBuf::from(&config.general.output);
    std::fs::write(&output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    if let Some(ref csv_path) = args.csv {
        report::write_csv_file(&dashboard.series, csv_path)
            .with_context(|| format!("Failed to write CSV to {}", csv_path.display()))?;
        println!("💾 Exported {} rows to {}", dashboard.series.len(), csv_path.display());
    }

    // Print summary
    let summary = &report.summary;
    println!("\n📈 Summary ({}, {}):", report.metadata.platform_filter, report.metadata.period);
    println!("   Followers: {}", summary.latest_followers);
    println!("   Avg. engagement: {:.1}%", summary.mean_engagement);
    println!("   Total reach: {}", summary.total_reach);
    println!("   Total interactions: {}", summary.total_interactions);
    println!(
        "   Insights: ✅ {} | ⚠️ {} | ℹ️ {}",
        report.insight_count(Severity::Positive),
        report.insight_count(Severity::Warning),
        report.insight_count(Severity::Informational)
    );
    println!("\n✅ Report saved to: {}", output_path.display());

    if args.fail_on_warning && report.insight_count(Severity::Warning) > 0 {
        eprintln!("\n⛔ Warning insights found. Failing (exit code 2).");
        return Ok(2);
    }

    Ok(0)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok(config),
        Ok(None) => Ok(Config::default()),
        Err(e) => {
            eprintln!("⚠️  Ignoring {}: {:#}", CONFIG_FILE_NAME, e);
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
