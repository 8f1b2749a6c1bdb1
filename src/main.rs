mod actions;
mod assignees;
mod checks;
mod cli;
mod config;
mod error;
mod labels;
mod rank;
mod report;
mod signals;
mod types;

use crate::error::{GuardError, Result};
use crate::types::report::WorkItem;
use chrono::Utc;
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const BLOCKING: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_policy(root: &Path) -> Result<config::LoadedPolicy> {
    if !root.exists() {
        return Err(GuardError::PathNotFound(root.display().to_string()));
    }
    match config::load_config(root)? {
        Some(loaded) => Ok(loaded),
        None => {
            eprintln!(
                "warning: no {} found in {}, using defaults",
                config::DEFAULT_CONFIG_FILE,
                root.display()
            );
            Ok(config::LoadedPolicy::default())
        }
    }
}

fn read_work_item(path: &Path) -> Result<WorkItem> {
    if !path.exists() {
        return Err(GuardError::PathNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Evaluate(cmd) => {
            let policy = load_policy(&cmd.path)?;
            let cfg = &policy.config;
            let work_item = read_work_item(&cmd.work_item)?;
            let source = signals::retry::RetryingSource::new(
                signals::snapshot::SnapshotSource::load(&cmd.signals)?,
                cfg.retry_policy(),
            );

            let evaluation = assignees::evaluate_assignees(&work_item, cfg, &source, Utc::now())?;

            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
            };
            let rendered = report::render(&evaluation, output_format)?;
            println!("{rendered}");

            if cmd.apply {
                let summary =
                    actions::apply_outcome(&evaluation, &mut actions::ConsoleActions);
                if !summary.failed.is_empty() {
                    eprintln!(
                        "warning: could not unassign: {}",
                        summary.failed.join(", ")
                    );
                }
            }

            if !evaluation.all_passed() {
                Ok(exit_code::BLOCKING)
            } else if policy.uses_defaults() {
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Rank(cmd) => {
            let input = rank::RankInput {
                commits: cmd.commits,
                prs: cmd.prs,
                issues: cmd.issues,
                reviews: cmd.reviews,
                stars: cmd.stars,
                followers: cmd.followers,
            };
            println!("rank: {:.2}", rank::score(&input));
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Labels(cmd) => {
            let policy = load_policy(&cmd.path)?;
            let cfg = &policy.config;
            let guarded = labels::retain_guarded(
                labels::parse_labels(cmd.labels.as_slice()),
                cfg.label_filters.as_slice(),
            );
            let resolved = labels::resolve_duplicates(guarded, &cfg.tier_thresholds());

            if resolved.labels.is_empty() {
                println!("labels: none (language gate skipped)");
            } else {
                println!("labels:");
                for label in &resolved.labels {
                    println!("- {} ({})", label.language, label.tier);
                }
            }
            for note in &resolved.notes {
                println!("note: {note}");
            }

            if policy.uses_defaults() {
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Lint(cmd) => {
            let policy = load_policy(&cmd.path)?;
            let cfg = &policy.config;
            cfg.validate()?;

            let stats = cfg.stat_thresholds();
            println!("min_account_age_in_days: {}", stats.min_account_age_in_days);
            println!("label_filters: {}", cfg.label_filters.join(", "));
            let thresholds = cfg.tier_thresholds();
            let mut tiers = thresholds.iter().collect::<Vec<_>>();
            tiers.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
            for (name, value) in tiers {
                println!("tier {name}: {value}%");
            }
            println!(
                "stats: commits >= {}, prs >= {}, issues >= {}, stars >= {}",
                stats.min_commits, stats.min_prs, stats.min_issues, stats.min_stars
            );
            let layers = if policy.uses_defaults() {
                "defaults".to_string()
            } else {
                policy
                    .layers
                    .iter()
                    .map(|layer| layer.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            println!("layers: {layers}");
            println!(
                "privileged members bypass checks: {}",
                cfg.bypass_privileged_members()
            );

            if policy.uses_defaults() {
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
