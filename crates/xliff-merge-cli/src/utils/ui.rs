// CLI output formatting with consistent styling using indicatif and colored.
// We stick to standard println!/eprintln! for textual output to ensure ANSI color compatibility.
// Diagnostic logging goes through tracing, to stderr, filtered by XLIFF_MERGE_LOG.

use colored::Colorize as _;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use xliff_merge::MergeStats;

const PD_TICK: Duration = Duration::from_millis(100);

/// Environment variable holding the tracing filter directives.
pub const LOG_ENV: &str = "XLIFF_MERGE_LOG";

static E2E_MODE: AtomicBool = AtomicBool::new(false);

/// Enable E2E mode for deterministic output (no colors, fixed durations, hidden progress bars).
pub fn set_e2e_mode(enabled: bool) {
    E2E_MODE.store(enabled, Ordering::SeqCst);
    if enabled {
        colored::control::set_override(false);
    }
}

pub fn is_e2e() -> bool {
    E2E_MODE.load(Ordering::SeqCst)
}

fn format_duration(duration: Duration) -> String {
    if is_e2e() {
        "[DURATION]".to_string()
    } else {
        format!("{:.2?}", duration)
    }
}

/// Install the stderr tracing subscriber. Defaults to `warn` when the filter is unset.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

pub fn create_progress_bar(len: u64, msg: &str) -> ProgressBar {
    if is_e2e() {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    let pb = ProgressBar::new(len);
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(PD_TICK);
    pb
}

pub fn print_sync_header() {
    println!("{}", "XLIFF Sync".dimmed());
}

pub fn print_discovered(locales: &[String], source: &str) {
    println!(
        "{} {} {}",
        "Discovered".dimmed(),
        format!("{} locale(s):", locales.len()).green(),
        locales.join(", ")
    );
    println!("{} {}", "Source locale".dimmed(), source.cyan());
}

pub fn print_no_locales_found(dir: &Path) {
    eprintln!(
        "{} {}",
        "No catalog files found in".red(),
        dir.display().to_string().white().bold()
    );
}

pub fn print_translation_enabled() {
    println!("{}", "Google Translate enabled for new units".dimmed());
}

pub fn print_saved(locale: &str, stats: &MergeStats) {
    println!(
        "{} {} ({})",
        "Saved".green(),
        locale.cyan(),
        describe_stats(stats)
    );
}

pub fn print_unchanged(locale: &str) {
    println!("{} {}", "Unchanged".dimmed(), locale.cyan());
}

pub fn print_would_update(locale: &str, stats: &MergeStats) {
    println!(
        "{} {} ({})",
        "Would update".yellow(),
        locale.cyan(),
        describe_stats(stats)
    );
}

pub fn print_locale_error(locale: &str, error: &str) {
    eprintln!(
        "{} {}: {}",
        "Sync failed for".red(),
        locale.white().bold(),
        error
    );
}

pub fn print_locale_not_found(locale: &str, available: &[String]) {
    let available_str = if available.is_empty() {
        "none".to_string()
    } else {
        available.join(", ")
    };
    eprintln!(
        "{} '{}'. Available locales: {}",
        "Locale not found:".red(),
        locale.white().bold(),
        available_str.cyan()
    );
}

pub fn print_fail_fast(locale: &str) {
    eprintln!(
        "{} {}",
        "Aborting after failure in".red(),
        locale.white().bold()
    );
}

pub fn print_sync_summary(saved: usize, unchanged: usize, totals: &MergeStats, duration: Duration) {
    println!(
        "{} {} saved, {} unchanged in {} ({})",
        "Done:".green(),
        saved,
        unchanged,
        format_duration(duration).green(),
        describe_stats(totals)
    );
}

pub fn print_sync_dry_run_summary(changed: usize, totals: &MergeStats) {
    println!(
        "{} {} locale(s) would change ({})",
        "Dry run:".yellow(),
        changed,
        describe_stats(totals)
    );
}

fn describe_stats(stats: &MergeStats) -> String {
    format!(
        "{} units: {} retained, {} translated, {} untranslated, {} dropped",
        stats.total(),
        stats.retained,
        stats.translated,
        stats.untranslated,
        stats.dropped
    )
}

pub fn print_diff(old: &str, new: &str) {
    use similar::{ChangeTag, TextDiff};

    let diff = TextDiff::from_lines(old, new);

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            println!("{}", "  ...".dimmed());
        }
        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => "-",
                    ChangeTag::Insert => "+",
                    ChangeTag::Equal => " ",
                };
                let mut line = format!("{} {}", sign, change);
                if change.missing_newline() {
                    line.push('\n');
                }
                match change.tag() {
                    ChangeTag::Delete => print!("{}", line.red()),
                    ChangeTag::Insert => print!("{}", line.green()),
                    ChangeTag::Equal => print!("{}", line.dimmed()),
                }
            }
        }
    }
}
